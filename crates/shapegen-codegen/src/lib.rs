//! shapegen-codegen - Python symbol resolution for Smithy models
//!
//! Given a [`GenerationContext`], the [`SymbolVisitor`] maps every shape in
//! the service closure to a Python [`Symbol`]: its identifier, module,
//! defining file, import references and helper facets.
//!
//! ```text
//! Model + Settings
//!     ↓
//!  GenerationContext ──→ SymbolVisitor ──→ Symbol (+ references, facets)
//!     ↓                        ↓
//!  ProtocolGenerator      SymbolTable
//!     ↓
//!  WriterDelegator → ./tests/test_protocol.py
//! ```

mod context;
mod dependency;
pub mod naming;
mod protocol;
mod references;
mod reserved;
mod symbol;
mod symbol_table;
mod symbol_visitor;
mod writer;

pub use context::GenerationContext;
pub use dependency::{DependencyKind, PythonDependency};
pub use protocol::{
    PROTOCOL_TEST_FILE, PROTOCOL_TEST_MODULE, ProtocolGenerator, ProtocolTestGenerator,
    RestJsonProtocolGenerator, resolve_protocol_generator,
};
pub use references::{Import, ReferenceRegistry, collect_dependencies, collect_imports};
pub use reserved::{Escaper, NameRole, ReservedWords};
pub use symbol::{ReferenceContext, Symbol, SymbolBuilder, SymbolReference};
pub use symbol_table::SymbolTable;
pub use symbol_visitor::SymbolVisitor;
pub use writer::{InMemoryWriterDelegator, PythonWriter, WriterDelegator};
