//! # shapegen
//!
//! Maps the shapes of a Smithy model onto the Python identifiers a client
//! generator emits.
//!
//! shapegen resolves every shape reachable from a service to a [`Symbol`]:
//! - the Python type expression used wherever the shape is referenced
//! - the module and file a generated definition lives in
//! - the imports and runtime dependencies that come with it
//! - helper facets such as enum constants and dict converters
//!
//! ## Quick Start
//!
//! ```
//! use shapegen::prelude::*;
//! use std::sync::Arc;
//!
//! let model = Model::builder()
//!     .service("example.weather#Weather", "2006-03-01", &[])
//!     .structure("example.weather#City", &[("cityId", "smithy.api#String")])
//!     .list("example.weather#Cities", "example.weather#City")
//!     .build()?;
//! let service: ShapeId = "example.weather#Weather".parse()?;
//! let settings = Settings::new(service, "weather");
//! let ctx = GenerationContext::new(model, settings, Arc::new(InMemoryWriterDelegator::new()))?;
//!
//! let cities: ShapeId = "example.weather#Cities".parse()?;
//! let symbol = ctx.symbol_provider().symbol_for(&cities)?;
//! assert_eq!(symbol.name(), "List[City]");
//! assert_eq!(symbol.as_dict().map(Symbol::name), Some("_cities_as_dict"));
//!
//! let city_id: ShapeId = "example.weather#City$cityId".parse()?;
//! let table = SymbolTable::build(&ctx)?;
//! assert_eq!(table.member_name(&city_id), Some("city_id"));
//! # Ok::<(), shapegen::GenerationError>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`shapegen_core`] - Shape model, settings, and errors
//! - [`shapegen_logging`] - Resolution observers and `tracing` setup
//! - [`shapegen_codegen`] - Symbol resolution, writers, and protocol hooks

// Re-export core types
pub use shapegen_core::{
    EnumDefinition, ErrorCategory, ErrorSource, GenerationError, GenerationResult, LogLevel,
    MediaType, Model, ModelBuilder, ReservedWordSettings, ServiceShape, Settings, Shape, ShapeId,
    ShapeKind, Trait,
};

// Re-export observers and logging setup
pub use shapegen_logging::{
    CaptureLayer, CapturedEvent, ObserverRegistry, RecordingObserver, ResolutionEvent,
    ResolutionObserver, SYMBOLS_TARGET, TracingObserver, init_logging, init_logging_with_filter,
};

// Re-export symbol resolution
pub use shapegen_codegen::{
    DependencyKind, Escaper, GenerationContext, Import, InMemoryWriterDelegator, NameRole,
    PROTOCOL_TEST_FILE, PROTOCOL_TEST_MODULE, ProtocolGenerator, ProtocolTestGenerator,
    PythonDependency, PythonWriter, ReferenceContext, ReferenceRegistry, ReservedWords,
    RestJsonProtocolGenerator, Symbol, SymbolBuilder, SymbolReference, SymbolTable, SymbolVisitor,
    WriterDelegator, collect_dependencies, collect_imports, naming, resolve_protocol_generator,
};

// Re-export common dependencies that generator authors need
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use shapegen::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Model types: `Model`, `Shape`, `ShapeId`, `Trait`
/// - Configuration: `Settings`, `LogLevel`
/// - Resolution: `GenerationContext`, `Symbol`, `SymbolTable`
/// - Emission: `InMemoryWriterDelegator`, `ProtocolGenerator`, `ProtocolTestGenerator`
pub mod prelude {
    pub use crate::{
        GenerationContext, GenerationError, GenerationResult, InMemoryWriterDelegator, LogLevel,
        Model, ProtocolGenerator, ProtocolTestGenerator, PythonWriter, Settings, Shape, ShapeId,
        ShapeKind, Symbol, SymbolTable, Trait, WriterDelegator,
    };
}
