//! qapigen-cli - Schema-driven Rust code generator
//!
//! This crate provides:
//! - [`codegen`], turning a resolved [`qapigen_core::Schema`] into Rust source buffers
//! - [`generate`], loading inputs and writing the generated module to disk
//! - [`logging`], the `tracing` subscriber used by the `qapigen` binary

pub mod codegen;
pub mod generate;
pub mod logging;

pub use codegen::{Output, Target};
pub use generate::{CheckSummary, check, run, write_output};
