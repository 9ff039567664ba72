//! shapegen-core - Shape model, settings, and error types
//!
//! This crate provides the foundational types consumed by the symbol resolver:
//! - [`Shape`], [`ShapeId`], [`ShapeKind`] and [`Trait`] for the input shape graph
//! - [`Model`] for the immutable, pre-validated closure of shapes
//! - [`Settings`] for per-run configuration
//! - [`GenerationError`] for error handling

mod config;
mod error;
mod json_ast;
mod media_type;
mod model;
mod shape;

pub use config::{ReservedWordSettings, Settings};
pub use error::{ErrorCategory, GenerationError, GenerationResult};
pub use media_type::MediaType;
pub use model::{Model, ModelBuilder, PRELUDE_NAMESPACE, UNIT};
pub use shape::{EnumDefinition, ErrorSource, ServiceShape, Shape, ShapeId, ShapeKind, Trait};

use std::str::FromStr;

/// Log levels shared by the observers and the subscriber setup
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl FromStr for LogLevel {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(GenerationError::ConfigError(format!(
                "unknown log level: {other}"
            ))),
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
        GenerationError, GenerationResult, LogLevel, Model, Settings, Shape, ShapeId, ShapeKind,
        Trait,
    };
}
