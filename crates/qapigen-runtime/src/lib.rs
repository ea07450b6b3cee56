//! qapigen-runtime - Runtime support for qapigen-generated code
//!
//! This crate provides:
//! - [`Strict`] and [`strict_decode`] for decoding that rejects unknown top-level fields
//! - [`encode`] and [`decode`] thin JSON helpers with typed errors
//! - [`AbsentAlternate`], [`is_absent`] and [`deserialize_present`] for the
//!   null/absent/payload protocol of nullable alternates
//! - [`EncodeError`] and [`DecodeError`]

mod error;
mod presence;
mod strict;

pub use error::{DecodeError, EncodeError};
pub use presence::{AbsentAlternate, deserialize_present, is_absent, to_any_or_absent};
pub use serde_json::Value;
pub use strict::{Strict, decode, encode, strict_decode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AbsentAlternate, DecodeError, EncodeError, Strict, Value, decode, deserialize_present,
        encode, is_absent, strict_decode, to_any_or_absent,
    };
}
