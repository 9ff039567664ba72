//! Reference registry and import computation
//!
//! References are keyed by the `(namespace, name)` of the referenced symbol.
//! The first registration of a key wins and insertion order is kept, so
//! import statements come out the same on every run.

use crate::dependency::PythonDependency;
use crate::symbol::{Symbol, SymbolReference};
use std::collections::HashSet;

/// Ordered, deduplicated set of references held by one symbol.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    references: Vec<SymbolReference>,
    seen: HashSet<(String, String)>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `reference` unless one with the same qualified name is present.
    /// Returns whether it was added.
    pub fn register(&mut self, reference: SymbolReference) -> bool {
        if self.seen.insert(key(&reference.symbol)) {
            self.references.push(reference);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.seen.contains(&key(symbol))
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolReference> {
        self.references.iter()
    }

    pub fn into_references(self) -> Vec<SymbolReference> {
        self.references
    }
}

fn key(symbol: &Symbol) -> (String, String) {
    (
        symbol.namespace().unwrap_or_default().trim().to_string(),
        symbol.name().trim().to_string(),
    )
}

/// One `from <module> import <names>` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub module: String,
    pub names: Vec<String>,
}

impl Import {
    pub fn render(&self) -> String {
        format!("from {} import {}", self.module, self.names.join(", "))
    }
}

/// Append `name` to the import for `module`, keeping first-seen order.
pub(crate) fn merge_import(imports: &mut Vec<Import>, module: &str, name: &str) {
    match imports.iter_mut().find(|i| i.module == module) {
        Some(import) => {
            if !import.names.iter().any(|n| n == name) {
                import.names.push(name.to_string());
            }
        }
        None => imports.push(Import {
            module: module.to_string(),
            names: vec![name.to_string()],
        }),
    }
}

/// Imports needed to use `symbol` from code in `current_namespace`.
///
/// Walks references transitively. Builtins (no namespace) and symbols that
/// live in `current_namespace` are skipped.
pub fn collect_imports(symbol: &Symbol, current_namespace: &str) -> Vec<Import> {
    let mut imports = Vec::new();
    let mut visited = HashSet::new();
    walk_references(symbol, &mut visited, &mut |reference| {
        match reference.namespace() {
            Some(module) if !module.is_empty() && module != current_namespace => {
                merge_import(&mut imports, module, reference.name());
            }
            _ => {}
        }
    });
    imports
}

/// Runtime dependencies of `symbol` and everything it references, one per package.
pub fn collect_dependencies(symbol: &Symbol) -> Vec<PythonDependency> {
    let mut dependencies: Vec<PythonDependency> = Vec::new();
    let mut push = |dependency: &PythonDependency| {
        if !dependencies.iter().any(|d| d.package == dependency.package) {
            dependencies.push(dependency.clone());
        }
    };

    symbol.dependencies().iter().for_each(&mut push);
    let mut visited = HashSet::new();
    walk_references(symbol, &mut visited, &mut |reference| {
        reference.dependencies().iter().for_each(&mut push);
    });
    dependencies
}

fn walk_references<'a>(
    symbol: &'a Symbol,
    visited: &mut HashSet<(String, String)>,
    visit: &mut dyn FnMut(&'a Symbol),
) {
    for reference in symbol.references() {
        if !visited.insert(key(&reference.symbol)) {
            continue;
        }
        visit(&reference.symbol);
        walk_references(&reference.symbol, visited, visit);
    }
}
