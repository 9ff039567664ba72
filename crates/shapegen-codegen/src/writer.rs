//! Python source writers and the delegator that hands them out
//!
//! Emission proper is out of scope for this crate; [`PythonWriter`] is the
//! minimal surface the protocol hook and downstream generators write through.

use crate::dependency::PythonDependency;
use crate::references::{Import, collect_dependencies, collect_imports, merge_import};
use crate::symbol::Symbol;
use parking_lot::Mutex;
use shapegen_core::GenerationResult;
use std::collections::BTreeMap;

const INDENT: &str = "    ";

/// Line buffer for one Python file.
#[derive(Debug, Clone)]
pub struct PythonWriter {
    filename: String,
    namespace: String,
    indent: usize,
    lines: Vec<String>,
    imports: Vec<Import>,
    dependencies: Vec<PythonDependency>,
}

impl PythonWriter {
    pub fn new(filename: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            namespace: namespace.into(),
            indent: 0,
            lines: Vec::new(),
            imports: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Module this file defines
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Write one line at the current indentation. Blank lines stay blank.
    pub fn write(&mut self, line: impl AsRef<str>) -> &mut Self {
        let line = line.as_ref();
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{line}", INDENT.repeat(self.indent)));
        }
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.indent += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self
    }

    /// Import `name` from `module`, unless the module is this file's own.
    pub fn add_import(&mut self, module: &str, name: &str) -> &mut Self {
        if !module.is_empty() && module != self.namespace {
            merge_import(&mut self.imports, module, name);
        }
        self
    }

    /// Import everything needed to use `symbol` here, and record its
    /// runtime dependencies.
    pub fn add_use_imports(&mut self, symbol: &Symbol) -> &mut Self {
        if let Some(module) = symbol.namespace() {
            self.add_import(module, symbol.name());
        }
        for import in collect_imports(symbol, &self.namespace) {
            for name in &import.names {
                merge_import(&mut self.imports, &import.module, name);
            }
        }
        for dependency in collect_dependencies(symbol) {
            self.add_dependency(dependency);
        }
        self
    }

    pub fn add_dependency(&mut self, dependency: PythonDependency) -> &mut Self {
        if !self.dependencies.iter().any(|d| d.package == dependency.package) {
            self.dependencies.push(dependency);
        }
        self
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn dependencies(&self) -> &[PythonDependency] {
        &self.dependencies
    }

    /// Import block, a blank line, then the body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for import in &self.imports {
            out.push_str(&import.render());
            out.push('\n');
        }
        if !self.imports.is_empty() && !self.lines.is_empty() {
            out.push('\n');
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Hands out writers scoped to one output file.
pub trait WriterDelegator: Send + Sync {
    /// Run `f` against the writer for `filename`, creating it on first use.
    /// Errors from `f` propagate unchanged.
    fn use_file_writer(
        &self,
        filename: &str,
        namespace: &str,
        f: &mut dyn FnMut(&mut PythonWriter) -> GenerationResult<()>,
    ) -> GenerationResult<()>;
}

/// Keeps every writer in memory, keyed by filename.
#[derive(Debug, Default)]
pub struct InMemoryWriterDelegator {
    writers: Mutex<BTreeMap<String, PythonWriter>>,
}

impl InMemoryWriterDelegator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered contents of every file.
    pub fn files(&self) -> BTreeMap<String, String> {
        self.writers
            .lock()
            .iter()
            .map(|(name, writer)| (name.clone(), writer.render()))
            .collect()
    }

    /// Rendered contents of one file.
    pub fn file(&self, filename: &str) -> Option<String> {
        self.writers.lock().get(filename).map(PythonWriter::render)
    }

    /// Namespace a file was opened with.
    pub fn namespace_of(&self, filename: &str) -> Option<String> {
        self.writers
            .lock()
            .get(filename)
            .map(|writer| writer.namespace().to_string())
    }

    /// Runtime dependencies recorded across all writers, one per package.
    pub fn dependencies(&self) -> Vec<PythonDependency> {
        let mut dependencies: Vec<PythonDependency> = Vec::new();
        for writer in self.writers.lock().values() {
            for dependency in writer.dependencies() {
                if !dependencies.iter().any(|d| d.package == dependency.package) {
                    dependencies.push(dependency.clone());
                }
            }
        }
        dependencies
    }
}

impl WriterDelegator for InMemoryWriterDelegator {
    fn use_file_writer(
        &self,
        filename: &str,
        namespace: &str,
        f: &mut dyn FnMut(&mut PythonWriter) -> GenerationResult<()>,
    ) -> GenerationResult<()> {
        // Take the writer out so `f` may open other files without deadlocking.
        let mut writer = self
            .writers
            .lock()
            .remove(filename)
            .unwrap_or_else(|| PythonWriter::new(filename, namespace));

        let result = f(&mut writer);
        self.writers.lock().insert(filename.to_string(), writer);
        result
    }
}
