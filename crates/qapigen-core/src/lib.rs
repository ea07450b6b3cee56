//! qapigen-core - Schema IR, configuration, and error types
//!
//! This crate provides the foundational types shared by the generator and its tools:
//! - [`Schema`] and [`SchemaEntity`], the resolved IR handed over by the schema front-end
//! - [`GeneratorConfig`] for generator configuration
//! - [`SchemaInvariantError`] and [`GenerateError`] for error handling
//! - [`LogLevel`] for log verbosity

mod config;
mod error;
mod schema;

pub use config::GeneratorConfig;
pub use error::{GenerateError, GenerateResult, SchemaInvariantError};
pub use schema::{
    AlternateType, ArrayType, CommandDecl, EnumMember, EnumType, EventDecl, Member, NULL_TYPE,
    Schema, SchemaEntity, StructType, StructVariants, Variant,
};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Log verbosity for the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl FromStr for LogLevel {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(GenerateError::Config(format!("unknown log level: {other}"))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AlternateType, EnumType, GenerateError, GenerateResult, GeneratorConfig, LogLevel, Schema,
        SchemaEntity, SchemaInvariantError, StructType,
    };
}
