//! Resolved Python symbols
//!
//! A [`Symbol`] is the result of mapping one shape: the Python identifier, the
//! module it lives in, the file that defines it (when the generator owns it),
//! the references needed to import it, and a fixed set of optional facets.
//!
//! # Facets
//!
//! | Facet | Attached to | Meaning |
//! |-------|-------------|---------|
//! | enum symbol | strings with an enum trait | constants container in the models module |
//! | as-dict helper | lists, sets and maps over non-simple targets | encoder function |
//! | from-dict helper | the same, plus every union | decoder function |
//! | stdlib | standard-library types | import needs no dependency |
//!
//! Symbols are values: resolving the same shape twice yields equal symbols.

use crate::ReferenceRegistry;
use crate::dependency::PythonDependency;
use serde::Serialize;
use shapegen_core::ShapeId;
use std::fmt;

/// A resolved Python type or function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    definition_file: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    references: Vec<SymbolReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<PythonDependency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shape: Option<ShapeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enum_symbol: Option<Box<Symbol>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    as_dict: Option<Box<Symbol>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_dict: Option<Box<Symbol>>,
    stdlib: bool,
}

impl Symbol {
    pub fn builder(name: impl Into<String>) -> SymbolBuilder {
        SymbolBuilder::new(name)
    }

    /// Python identifier, or a type expression such as `List[str]`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted module path; `None` for builtins and type expressions
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Path of the generated file defining this symbol; `None` when the
    /// symbol is not generated
    pub fn definition_file(&self) -> Option<&str> {
        self.definition_file.as_deref()
    }

    pub fn has_definition_file(&self) -> bool {
        self.definition_file.is_some()
    }

    /// `namespace.name`, or just the name when there is no namespace
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn references(&self) -> &[SymbolReference] {
        &self.references
    }

    pub fn dependencies(&self) -> &[PythonDependency] {
        &self.dependencies
    }

    /// The shape this symbol was created from
    pub fn shape(&self) -> Option<&ShapeId> {
        self.shape.as_ref()
    }

    pub fn enum_symbol(&self) -> Option<&Symbol> {
        self.enum_symbol.as_deref()
    }

    pub fn as_dict(&self) -> Option<&Symbol> {
        self.as_dict.as_deref()
    }

    pub fn from_dict(&self) -> Option<&Symbol> {
        self.from_dict.as_deref()
    }

    pub fn is_stdlib(&self) -> bool {
        self.stdlib
    }

    /// Same symbol under a different name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Facet symbols attached to this symbol.
    pub fn facets(&self) -> impl Iterator<Item = &Symbol> {
        [&self.enum_symbol, &self.as_dict, &self.from_dict]
            .into_iter()
            .filter_map(|facet| facet.as_deref())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())?;
        if let Some(file) = &self.definition_file {
            write!(f, " [{file}]")?;
        }
        Ok(())
    }
}

/// Builder for [`Symbol`]. References are deduplicated as they are added.
#[derive(Debug, Clone)]
pub struct SymbolBuilder {
    name: String,
    namespace: Option<String>,
    definition_file: Option<String>,
    references: ReferenceRegistry,
    dependencies: Vec<PythonDependency>,
    shape: Option<ShapeId>,
    enum_symbol: Option<Symbol>,
    as_dict: Option<Symbol>,
    from_dict: Option<Symbol>,
    stdlib: bool,
}

impl SymbolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            definition_file: None,
            references: ReferenceRegistry::new(),
            dependencies: Vec::new(),
            shape: None,
            enum_symbol: None,
            as_dict: None,
            from_dict: None,
            stdlib: false,
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn definition_file(mut self, file: impl Into<String>) -> Self {
        self.definition_file = Some(file.into());
        self
    }

    pub fn reference(mut self, reference: SymbolReference) -> Self {
        self.references.register(reference);
        self
    }

    pub fn dependency(mut self, dependency: PythonDependency) -> Self {
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
        self
    }

    pub fn shape(mut self, shape: ShapeId) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn enum_symbol(mut self, symbol: Symbol) -> Self {
        self.enum_symbol = Some(symbol);
        self
    }

    /// Attach both dict conversion helpers.
    pub fn dict_helpers(mut self, as_dict: Symbol, from_dict: Symbol) -> Self {
        self.as_dict = Some(as_dict);
        self.from_dict = Some(from_dict);
        self
    }

    pub fn from_dict(mut self, from_dict: Symbol) -> Self {
        self.from_dict = Some(from_dict);
        self
    }

    pub fn stdlib(mut self) -> Self {
        self.stdlib = true;
        self
    }

    pub fn build(self) -> Symbol {
        Symbol {
            name: self.name,
            namespace: self.namespace,
            definition_file: self.definition_file,
            references: self.references.into_references(),
            dependencies: self.dependencies,
            shape: self.shape,
            enum_symbol: self.enum_symbol.map(Box::new),
            as_dict: self.as_dict.map(Box::new),
            from_dict: self.from_dict.map(Box::new),
            stdlib: self.stdlib,
        }
    }
}

/// How the referencing code uses the referenced symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceContext {
    /// Needed wherever the owning symbol is used, e.g. `typing.List`
    Use,
    /// Needed where the owning symbol is declared
    Declare,
    /// Needed in both places
    All,
}

impl ReferenceContext {
    pub fn is_use(self) -> bool {
        matches!(self, ReferenceContext::Use | ReferenceContext::All)
    }
}

/// A symbol recorded against another symbol for import computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolReference {
    pub symbol: Symbol,
    pub context: ReferenceContext,
}

impl SymbolReference {
    pub fn new(symbol: Symbol, context: ReferenceContext) -> Self {
        Self { symbol, context }
    }

    /// A standard-library name imported wherever the owner is used.
    pub fn stdlib(name: &str, namespace: &str) -> Self {
        let symbol = Symbol::builder(name).namespace(namespace).stdlib().build();
        Self::new(symbol, ReferenceContext::Use)
    }

    pub fn is_stdlib(&self) -> bool {
        self.symbol.is_stdlib()
    }
}

impl From<Symbol> for SymbolReference {
    fn from(symbol: Symbol) -> Self {
        Self::new(symbol, ReferenceContext::All)
    }
}
