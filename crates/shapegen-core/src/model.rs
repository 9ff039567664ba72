//! The immutable shape graph handed to the resolver
//!
//! A [`Model`] is built once upstream and shared read-only for the whole
//! generation run. Shapes are kept in a `BTreeMap` so that every walk over the
//! model is deterministic.

use crate::json_ast;
use crate::{GenerationError, GenerationResult, ServiceShape, Shape, ShapeId, ShapeKind, Trait};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Namespace of the built-in prelude shapes.
pub const PRELUDE_NAMESPACE: &str = "smithy.api";

/// Name of the prelude unit shape.
pub const UNIT: &str = "Unit";

const PRELUDE: &[(&str, ShapeKind)] = &[
    ("String", ShapeKind::String),
    ("Blob", ShapeKind::Blob),
    ("BigInteger", ShapeKind::BigInteger),
    ("BigDecimal", ShapeKind::BigDecimal),
    ("Timestamp", ShapeKind::Timestamp),
    ("Document", ShapeKind::Document),
    ("Boolean", ShapeKind::Boolean),
    ("PrimitiveBoolean", ShapeKind::Boolean),
    ("Byte", ShapeKind::Byte),
    ("PrimitiveByte", ShapeKind::Byte),
    ("Short", ShapeKind::Short),
    ("PrimitiveShort", ShapeKind::Short),
    ("Integer", ShapeKind::Integer),
    ("PrimitiveInteger", ShapeKind::Integer),
    ("Long", ShapeKind::Long),
    ("PrimitiveLong", ShapeKind::Long),
    ("Float", ShapeKind::Float),
    ("PrimitiveFloat", ShapeKind::Float),
    ("Double", ShapeKind::Double),
    ("PrimitiveDouble", ShapeKind::Double),
];

/// Immutable closure of shapes with lookup by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    shapes: BTreeMap<ShapeId, Shape>,
}

impl Model {
    /// Start a model that already contains the prelude shapes.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// Load and validate a Smithy JSON AST document.
    pub fn from_json(text: &str) -> GenerationResult<Model> {
        let model = json_ast::parse(text)?;
        model.validate()?;
        tracing::debug!(shapes = model.len(), "loaded model from JSON AST");
        Ok(model)
    }

    /// Load and validate a Smithy JSON AST file.
    pub fn from_json_file(path: impl AsRef<Path>) -> GenerationResult<Model> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn get_shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn expect_shape(&self, id: &ShapeId) -> GenerationResult<&Shape> {
        self.shapes
            .get(id)
            .ok_or_else(|| GenerationError::ShapeNotFound(id.clone()))
    }

    /// Look up a service shape, failing if it is absent or not a service.
    pub fn expect_service(&self, id: &ShapeId) -> GenerationResult<(&Shape, &ServiceShape)> {
        let shape = self
            .shapes
            .get(id)
            .ok_or_else(|| GenerationError::MissingService(id.clone()))?;
        match shape.kind() {
            ShapeKind::Service(service) => Ok((shape, service)),
            other => Err(GenerationError::UnexpectedShapeKind {
                id: id.clone(),
                expected: "service",
                actual: other.type_name(),
            }),
        }
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Check that every referenced id exists and that member ids belong to
    /// their container.
    pub fn validate(&self) -> GenerationResult<()> {
        for shape in self.shapes.values() {
            for target in shape.kind().references() {
                if !self.shapes.contains_key(target) {
                    return Err(GenerationError::DanglingReference {
                        referrer: shape.id().clone(),
                        target: target.clone(),
                    });
                }
            }
            if let ShapeKind::Service(service) = shape.kind() {
                for renamed in service.rename.keys() {
                    if !self.shapes.contains_key(renamed) {
                        return Err(GenerationError::DanglingReference {
                            referrer: shape.id().clone(),
                            target: renamed.clone(),
                        });
                    }
                }
            }
            if shape.id().member().is_some() && shape.member_target().is_none() {
                return Err(GenerationError::UnexpectedShapeKind {
                    id: shape.id().clone(),
                    expected: "member",
                    actual: shape.kind().type_name(),
                });
            }
        }
        Ok(())
    }

    /// Every shape reachable from `service`, the service first, in depth-first
    /// declaration order. Each shape appears once.
    pub fn service_closure(&self, service: &ShapeId) -> GenerationResult<Vec<&Shape>> {
        let (root, _) = self.expect_service(service)?;

        let mut seen: HashSet<&ShapeId> = HashSet::new();
        let mut closure = Vec::new();
        let mut stack = vec![root];

        while let Some(shape) = stack.pop() {
            if !seen.insert(shape.id()) {
                continue;
            }
            closure.push(shape);

            let references = shape.kind().references();
            for target in references.into_iter().rev() {
                let next = self.shapes.get(target).ok_or_else(|| {
                    GenerationError::DanglingReference {
                        referrer: shape.id().clone(),
                        target: target.clone(),
                    }
                })?;
                if !seen.contains(next.id()) {
                    stack.push(next);
                }
            }
        }

        Ok(closure)
    }
}

/// Incremental model construction.
///
/// Ids are given as text; the first malformed id is reported by [`build`].
/// References are not checked here; call [`Model::validate`] for that.
///
/// [`build`]: ModelBuilder::build
pub struct ModelBuilder {
    shapes: BTreeMap<ShapeId, Shape>,
    error: Option<GenerationError>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        let mut shapes: BTreeMap<ShapeId, Shape> = PRELUDE
            .iter()
            .map(|(name, kind)| {
                let id = ShapeId::prelude(name);
                (id.clone(), Shape::new(id, kind.clone()))
            })
            .collect();
        // Smithy 2 unit type: union members and operation input/output target it.
        let unit = ShapeId::prelude(UNIT);
        shapes.insert(
            unit.clone(),
            Shape::new(unit, ShapeKind::Structure { members: Vec::new() }),
        );
        Self {
            shapes,
            error: None,
        }
    }

    /// Insert a fully formed shape, replacing any shape with the same id.
    pub fn add_shape(mut self, shape: Shape) -> Self {
        self.shapes.insert(shape.id().clone(), shape);
        self
    }

    /// Insert a scalar shape of the given kind.
    pub fn simple(mut self, id: &str, kind: ShapeKind) -> Self {
        if let Some(id) = self.parse(id) {
            self.shapes.insert(id.clone(), Shape::new(id, kind));
        }
        self
    }

    pub fn string(self, id: &str) -> Self {
        self.simple(id, ShapeKind::String)
    }

    pub fn blob(self, id: &str) -> Self {
        self.simple(id, ShapeKind::Blob)
    }

    /// Insert a list whose `member` targets `target`.
    pub fn list(self, id: &str, target: &str) -> Self {
        self.collection(id, target, |member| ShapeKind::List { member })
    }

    /// Insert a set whose `member` targets `target`.
    pub fn set(self, id: &str, target: &str) -> Self {
        self.collection(id, target, |member| ShapeKind::Set { member })
    }

    fn collection(mut self, id: &str, target: &str, kind: fn(ShapeId) -> ShapeKind) -> Self {
        let (Some(id), Some(target)) = (self.parse(id), self.parse(target)) else {
            return self;
        };
        if let Some(member) = self.member(&id, "member", target) {
            self.shapes.insert(id.clone(), Shape::new(id, kind(member)));
        }
        self
    }

    /// Insert a map from `smithy.api#String` keys to `value` targets.
    pub fn map(mut self, id: &str, value: &str) -> Self {
        let (Some(id), Some(value)) = (self.parse(id), self.parse(value)) else {
            return self;
        };
        let key = self.member(&id, "key", ShapeId::prelude("String"));
        let value = self.member(&id, "value", value);
        if let (Some(key), Some(value)) = (key, value) {
            self.shapes
                .insert(id.clone(), Shape::new(id, ShapeKind::Map { key, value }));
        }
        self
    }

    /// Insert a structure with `(member name, target)` members.
    pub fn structure(self, id: &str, members: &[(&str, &str)]) -> Self {
        self.aggregate(id, members, |members| ShapeKind::Structure { members })
    }

    /// Insert a union with `(member name, target)` members.
    pub fn union(self, id: &str, members: &[(&str, &str)]) -> Self {
        self.aggregate(id, members, |members| ShapeKind::Union { members })
    }

    fn aggregate(
        mut self,
        id: &str,
        members: &[(&str, &str)],
        kind: fn(Vec<ShapeId>) -> ShapeKind,
    ) -> Self {
        let Some(id) = self.parse(id) else {
            return self;
        };
        let mut member_ids = Vec::with_capacity(members.len());
        for (name, target) in members {
            let Some(target) = self.parse(target) else {
                return self;
            };
            match self.member(&id, name, target) {
                Some(member) => member_ids.push(member),
                None => return self,
            }
        }
        self.shapes.insert(id.clone(), Shape::new(id, kind(member_ids)));
        self
    }

    /// Insert a service with the given version and operations.
    pub fn service(mut self, id: &str, version: &str, operations: &[&str]) -> Self {
        let Some(id) = self.parse(id) else {
            return self;
        };
        let operations = operations.iter().filter_map(|op| self.parse(op)).collect();
        let service = ServiceShape {
            version: version.to_string(),
            operations,
            ..ServiceShape::default()
        };
        self.shapes
            .insert(id.clone(), Shape::new(id, ShapeKind::Service(service)));
        self
    }

    /// Register a contextual name for `shape` on an already inserted service.
    pub fn rename(mut self, service: &str, shape: &str, alias: &str) -> Self {
        let (Some(service), Some(shape)) = (self.parse(service), self.parse(shape)) else {
            return self;
        };
        match self.shapes.get_mut(&service).map(Shape::kind_mut) {
            Some(ShapeKind::Service(svc)) => {
                svc.rename.insert(shape, alias.to_string());
            }
            _ => self.fail(GenerationError::MissingService(service)),
        }
        self
    }

    /// Add service-wide errors to an already inserted service.
    pub fn service_errors(mut self, service: &str, errors: &[&str]) -> Self {
        let Some(service) = self.parse(service) else {
            return self;
        };
        let errors: Vec<ShapeId> = errors.iter().filter_map(|e| self.parse(e)).collect();
        match self.shapes.get_mut(&service).map(Shape::kind_mut) {
            Some(ShapeKind::Service(svc)) => svc.errors.extend(errors),
            _ => self.fail(GenerationError::MissingService(service)),
        }
        self
    }

    /// Insert an operation.
    pub fn operation(
        mut self,
        id: &str,
        input: Option<&str>,
        output: Option<&str>,
        errors: &[&str],
    ) -> Self {
        let Some(id) = self.parse(id) else {
            return self;
        };
        let input = input.and_then(|i| self.parse(i));
        let output = output.and_then(|o| self.parse(o));
        let errors = errors.iter().filter_map(|e| self.parse(e)).collect();
        self.shapes.insert(
            id.clone(),
            Shape::new(
                id,
                ShapeKind::Operation {
                    input,
                    output,
                    errors,
                },
            ),
        );
        self
    }

    /// Insert a resource bound to the given operations.
    pub fn resource(mut self, id: &str, operations: &[&str]) -> Self {
        let Some(id) = self.parse(id) else {
            return self;
        };
        let operations = operations.iter().filter_map(|op| self.parse(op)).collect();
        self.shapes.insert(
            id.clone(),
            Shape::new(
                id,
                ShapeKind::Resource {
                    operations,
                    resources: Vec::new(),
                },
            ),
        );
        self
    }

    /// Apply a trait to an already inserted shape (top-level or member).
    pub fn apply(mut self, id: &str, t: Trait) -> Self {
        let Some(id) = self.parse(id) else {
            return self;
        };
        match self.shapes.remove(&id) {
            Some(shape) => {
                self.shapes.insert(id, shape.with_trait(t));
            }
            None => self.fail(GenerationError::ShapeNotFound(id)),
        }
        self
    }

    /// Finish the model. Fails on the first malformed id or misapplied trait.
    pub fn build(self) -> GenerationResult<Model> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Model {
                shapes: self.shapes,
            }),
        }
    }

    fn member(&mut self, container: &ShapeId, name: &str, target: ShapeId) -> Option<ShapeId> {
        match container.with_member(name) {
            Ok(member) => {
                self.shapes.insert(
                    member.clone(),
                    Shape::new(member.clone(), ShapeKind::Member { target }),
                );
                Some(member)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn parse(&mut self, id: &str) -> Option<ShapeId> {
        match id.parse() {
            Ok(id) => Some(id),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn fail(&mut self, err: GenerationError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
