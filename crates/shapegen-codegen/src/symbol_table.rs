//! Model-wide resolution

use crate::context::GenerationContext;
use crate::dependency::PythonDependency;
use crate::references::collect_dependencies;
use crate::symbol::Symbol;
use shapegen_core::{GenerationError, GenerationResult, ShapeId};
use std::collections::{BTreeMap, HashMap};

/// Symbols for every shape in a service closure.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: BTreeMap<ShapeId, Symbol>,
    member_names: BTreeMap<ShapeId, String>,
}

impl SymbolTable {
    /// Resolve the whole closure of the context's service. Fails on the
    /// first error; there are no partial tables.
    pub fn build(ctx: &GenerationContext) -> GenerationResult<Self> {
        let provider = ctx.symbol_provider();
        let closure = ctx.model().service_closure(ctx.service().id())?;

        let mut table = SymbolTable::default();
        let mut owners: HashMap<(String, String), ShapeId> = HashMap::new();

        for shape in closure {
            let symbol = provider.to_symbol(shape)?;

            if shape.member_target().is_some() {
                table
                    .member_names
                    .insert(shape.id().clone(), provider.to_member_name(shape)?);
            } else {
                for owned in std::iter::once(&symbol).chain(symbol.facets()) {
                    claim(&mut owners, owned, shape.id())?;
                }
            }
            table.symbols.insert(shape.id().clone(), symbol);
        }

        tracing::info!(
            service = %ctx.service().id(),
            symbols = table.symbols.len(),
            members = table.member_names.len(),
            "built symbol table"
        );
        Ok(table)
    }

    pub fn symbol(&self, id: &ShapeId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn member_name(&self, id: &ShapeId) -> Option<&str> {
        self.member_names.get(id).map(String::as_str)
    }

    /// All symbols in shape id order.
    pub fn symbols(&self) -> impl Iterator<Item = (&ShapeId, &Symbol)> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Runtime dependencies of the whole table, one per package.
    pub fn dependencies(&self) -> Vec<PythonDependency> {
        let mut dependencies: Vec<PythonDependency> = Vec::new();
        for symbol in self.symbols.values() {
            for dependency in collect_dependencies(symbol) {
                if !dependencies.iter().any(|d| d.package == dependency.package) {
                    dependencies.push(dependency);
                }
            }
        }
        dependencies
    }

    /// Generated files and the shapes that define something in each.
    pub fn definition_files(&self) -> BTreeMap<String, Vec<ShapeId>> {
        let mut files: BTreeMap<String, Vec<ShapeId>> = BTreeMap::new();
        for (id, symbol) in &self.symbols {
            if id.member().is_some() {
                continue;
            }
            for owned in std::iter::once(symbol).chain(symbol.facets()) {
                if let Some(file) = owned.definition_file() {
                    let shapes = files.entry(file.to_string()).or_default();
                    if !shapes.contains(id) {
                        shapes.push(id.clone());
                    }
                }
            }
        }
        files
    }
}

/// Record `shape` as the producer of `symbol`, failing if another shape
/// already produced the same generated name.
fn claim(
    owners: &mut HashMap<(String, String), ShapeId>,
    symbol: &Symbol,
    shape: &ShapeId,
) -> GenerationResult<()> {
    let Some(namespace) = symbol.namespace() else {
        return Ok(());
    };
    if !symbol.has_definition_file() {
        return Ok(());
    }
    let key = (namespace.to_string(), symbol.name().to_string());
    match owners.get(&key) {
        Some(first) if first != shape => Err(GenerationError::SymbolCollision {
            namespace: key.0,
            name: key.1,
            first: first.clone(),
            second: shape.clone(),
        }),
        Some(_) => Ok(()),
        None => {
            owners.insert(key, shape.clone());
            Ok(())
        }
    }
}
