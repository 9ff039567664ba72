//! Runtime package dependencies of generated code

use serde::Serialize;

/// Where a dependency is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    Dependency,
    TestDependency,
}

/// A Python package the generated code imports at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PythonDependency {
    pub package: String,
    /// PEP 440 version specifier, e.g. `==0.0.1`
    pub version: String,
    pub kind: DependencyKind,
}

impl PythonDependency {
    pub fn new(package: impl Into<String>, version: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            kind,
        }
    }

    /// The `smithy_python` runtime support package.
    pub fn smithy_python() -> Self {
        Self::new("smithy_python", "==0.0.1", DependencyKind::Dependency)
    }
}
