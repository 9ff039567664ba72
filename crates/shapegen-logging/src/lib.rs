//! shapegen-logging - Resolution observers and tracing setup
//!
//! This crate provides:
//! - [`ResolutionObserver`] hook notified once per resolved shape
//! - [`ObserverRegistry`] for fanning events out to several observers
//! - [`CaptureLayer`] tracing layer that records events in memory
//! - [`init_logging`] to install a filtered fmt subscriber

mod layer;
mod observer;

pub use layer::{CaptureLayer, CapturedEvent, init_logging, init_logging_with_filter};
pub use observer::{
    ObserverRegistry, RecordingObserver, ResolutionEvent, ResolutionObserver, TracingObserver,
    SYMBOLS_TARGET,
};
pub use shapegen_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        LogLevel, ObserverRegistry, ResolutionEvent, ResolutionObserver, init_logging,
    };
}
