//! Shapes, shape ids, and traits
//!
//! A [`Shape`] is one node of the input model graph. Shapes are immutable once
//! built; the resolver only ever reads them.
//!
//! # Shape ids
//!
//! | Form | Example |
//! |------|---------|
//! | top-level | `example.weather#City` |
//! | member | `example.weather#City$name` |

use crate::{GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Absolute identifier of a shape: `namespace#Name` with an optional `$member`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeId {
    namespace: String,
    name: String,
    member: Option<String>,
}

impl ShapeId {
    /// Create a top-level shape id, validating each part.
    pub fn new(namespace: &str, name: &str) -> GenerationResult<Self> {
        let namespace_ok = !namespace.is_empty() && namespace.split('.').all(is_identifier);
        if !namespace_ok || !is_identifier(name) {
            return Err(GenerationError::InvalidShapeId(format!("{namespace}#{name}")));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            member: None,
        })
    }

    /// Id of a shape in the `smithy.api` prelude.
    pub fn prelude(name: &str) -> ShapeId {
        ShapeId {
            namespace: crate::PRELUDE_NAMESPACE.to_string(),
            name: name.to_string(),
            member: None,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// The id with its member part removed.
    pub fn container(&self) -> ShapeId {
        ShapeId {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            member: None,
        }
    }

    /// Id of the named member of this shape.
    pub fn with_member(&self, member: &str) -> GenerationResult<ShapeId> {
        if !is_identifier(member) {
            return Err(GenerationError::InvalidShapeId(format!("{self}${member}")));
        }
        Ok(ShapeId {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            member: Some(member.to_string()),
        })
    }

    /// Name of the shape as seen from `service`, honouring its `rename` map.
    pub fn name_for_service<'a>(&'a self, service: &'a ServiceShape) -> &'a str {
        service
            .rename
            .get(&self.container())
            .map(String::as_str)
            .unwrap_or(&self.name)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for ShapeId {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, rest) = s
            .split_once('#')
            .ok_or_else(|| GenerationError::InvalidShapeId(s.to_string()))?;
        match rest.split_once('$') {
            Some((name, member)) => ShapeId::new(namespace, name)?
                .with_member(member)
                .map_err(|_| GenerationError::InvalidShapeId(s.to_string())),
            None => ShapeId::new(namespace, rest)
                .map_err(|_| GenerationError::InvalidShapeId(s.to_string())),
        }
    }
}

impl TryFrom<String> for ShapeId {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShapeId> for String {
    fn from(id: ShapeId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)?;
        if let Some(member) = &self.member {
            write!(f, "${member}")?;
        }
        Ok(())
    }
}

/// Service-level data: the roots of the closure and the rename map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceShape {
    pub version: String,
    pub operations: Vec<ShapeId>,
    pub resources: Vec<ShapeId>,
    pub errors: Vec<ShapeId>,
    /// Contextual names that disambiguate conflicting shape names
    pub rename: BTreeMap<ShapeId, String>,
}

/// The kind of a shape, with the ids of any shapes it points at.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    String,
    Blob,
    Timestamp,
    Document,
    List { member: ShapeId },
    Set { member: ShapeId },
    Map { key: ShapeId, value: ShapeId },
    Structure { members: Vec<ShapeId> },
    Union { members: Vec<ShapeId> },
    Member { target: ShapeId },
    Resource {
        operations: Vec<ShapeId>,
        resources: Vec<ShapeId>,
    },
    Service(ServiceShape),
    Operation {
        input: Option<ShapeId>,
        output: Option<ShapeId>,
        errors: Vec<ShapeId>,
    },
}

impl ShapeKind {
    /// Lowercase kind name as used in model documents and messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Boolean => "boolean",
            ShapeKind::Byte => "byte",
            ShapeKind::Short => "short",
            ShapeKind::Integer => "integer",
            ShapeKind::Long => "long",
            ShapeKind::Float => "float",
            ShapeKind::Double => "double",
            ShapeKind::BigInteger => "bigInteger",
            ShapeKind::BigDecimal => "bigDecimal",
            ShapeKind::String => "string",
            ShapeKind::Blob => "blob",
            ShapeKind::Timestamp => "timestamp",
            ShapeKind::Document => "document",
            ShapeKind::List { .. } => "list",
            ShapeKind::Set { .. } => "set",
            ShapeKind::Map { .. } => "map",
            ShapeKind::Structure { .. } => "structure",
            ShapeKind::Union { .. } => "union",
            ShapeKind::Member { .. } => "member",
            ShapeKind::Resource { .. } => "resource",
            ShapeKind::Service(_) => "service",
            ShapeKind::Operation { .. } => "operation",
        }
    }

    /// Scalar shapes that need no structural conversion.
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            ShapeKind::Boolean
                | ShapeKind::Byte
                | ShapeKind::Short
                | ShapeKind::Integer
                | ShapeKind::Long
                | ShapeKind::Float
                | ShapeKind::Double
                | ShapeKind::BigInteger
                | ShapeKind::BigDecimal
                | ShapeKind::String
                | ShapeKind::Blob
                | ShapeKind::Timestamp
                | ShapeKind::Document
        )
    }

    /// Ids this shape points at, in declaration order.
    pub fn references(&self) -> Vec<&ShapeId> {
        match self {
            ShapeKind::List { member } | ShapeKind::Set { member } => vec![member],
            ShapeKind::Map { key, value } => vec![key, value],
            ShapeKind::Structure { members } | ShapeKind::Union { members } => {
                members.iter().collect()
            }
            ShapeKind::Member { target } => vec![target],
            ShapeKind::Resource {
                operations,
                resources,
            } => operations.iter().chain(resources).collect(),
            ShapeKind::Service(service) => service
                .operations
                .iter()
                .chain(&service.resources)
                .chain(&service.errors)
                .collect(),
            ShapeKind::Operation {
                input,
                output,
                errors,
            } => input.iter().chain(output).chain(errors).collect(),
            _ => Vec::new(),
        }
    }
}

/// One value of an enum trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EnumDefinition {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: None,
        }
    }

    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: Some(name.into()),
        }
    }
}

/// Which side of a call an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    Client,
    Server,
}

/// Traits that can be applied to a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Trait {
    Enum(Vec<EnumDefinition>),
    Error(ErrorSource),
    Streaming,
    MediaType(String),
    /// Any trait the resolver does not interpret, e.g. protocol traits.
    Other {
        id: String,
        value: serde_json::Value,
    },
}

impl Trait {
    pub const ENUM: &'static str = "smithy.api#enum";
    pub const ERROR: &'static str = "smithy.api#error";
    pub const STREAMING: &'static str = "smithy.api#streaming";
    pub const MEDIA_TYPE: &'static str = "smithy.api#mediaType";

    /// Absolute trait id.
    pub fn id(&self) -> &str {
        match self {
            Trait::Enum(_) => Self::ENUM,
            Trait::Error(_) => Self::ERROR,
            Trait::Streaming => Self::STREAMING,
            Trait::MediaType(_) => Self::MEDIA_TYPE,
            Trait::Other { id, .. } => id,
        }
    }

    /// Marker trait with no value, such as a protocol trait.
    pub fn other(id: impl Into<String>) -> Self {
        Trait::Other {
            id: id.into(),
            value: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// A node in the model graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    traits: Vec<Trait>,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            traits: Vec::new(),
        }
    }

    /// Apply a trait, replacing any earlier trait with the same id.
    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.retain(|existing| existing.id() != t.id());
        self.traits.push(t);
        self
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    pub fn has_trait(&self, id: &str) -> bool {
        self.traits.iter().any(|t| t.id() == id)
    }

    pub fn enum_values(&self) -> Option<&[EnumDefinition]> {
        self.traits.iter().find_map(|t| match t {
            Trait::Enum(values) => Some(values.as_slice()),
            _ => None,
        })
    }

    pub fn error_source(&self) -> Option<ErrorSource> {
        self.traits.iter().find_map(|t| match t {
            Trait::Error(source) => Some(*source),
            _ => None,
        })
    }

    pub fn is_error(&self) -> bool {
        self.error_source().is_some()
    }

    pub fn is_streaming(&self) -> bool {
        self.traits.iter().any(|t| matches!(t, Trait::Streaming))
    }

    pub fn media_type(&self) -> Option<&str> {
        self.traits.iter().find_map(|t| match t {
            Trait::MediaType(value) => Some(value.as_str()),
            _ => None,
        })
    }

    /// Target of a member shape.
    pub fn member_target(&self) -> Option<&ShapeId> {
        match &self.kind {
            ShapeKind::Member { target } => Some(target),
            _ => None,
        }
    }

    pub fn as_service(&self) -> Option<&ServiceShape> {
        match &self.kind {
            ShapeKind::Service(service) => Some(service),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: `{}`)", self.kind.type_name(), self.id)
    }
}
