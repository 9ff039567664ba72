//! Shape-to-symbol mapping
//!
//! [`SymbolVisitor`] is a total function from shapes in the model to Python
//! [`Symbol`]s. Each shape kind has exactly one rule:
//!
//! | Shape | Symbol |
//! |-------|--------|
//! | `boolean` | `bool` |
//! | `byte`, `short`, `integer`, `long`, `bigInteger` | `int` |
//! | `float`, `double` | `float` |
//! | `bigDecimal` | `decimal.Decimal` |
//! | `string` | `str`, with an enum facet when the enum trait is present |
//! | `string` + JSON media type | `Union[str, JsonString]` |
//! | `blob` | `Union[bytes, bytearray]` |
//! | `blob` + streaming | `smithy_python.interfaces.blobs.StreamingBlob` |
//! | `blob` + JSON media type | `Union[bytes, bytearray, JsonBlob]` |
//! | `timestamp` | `datetime.datetime` |
//! | `document`, `resource` | `typing.Any` |
//! | `list`, `set` | `List[T]` |
//! | `map` | `Dict[str, V]` |
//! | `structure` | class in `<module>.models`, or `<module>.errors` for errors |
//! | `union` | class in `<module>.models` with a `from_dict` helper |
//! | `member` | the symbol of its target |
//! | `service` | `<Name>Client` in `<module>.client` |
//! | `operation` | snake-cased method name in `<module>.client` |
//!
//! Results are cached per shape id. Collections and maps recurse into their
//! member targets; every other kind resolves in one step.

use crate::dependency::PythonDependency;
use crate::naming::{capitalize, module_file, module_namespace, to_snake_case};
use crate::reserved::Escaper;
use crate::symbol::{Symbol, SymbolBuilder, SymbolReference};
use parking_lot::RwLock;
use shapegen_core::{
    GenerationError, GenerationResult, MediaType, Model, ServiceShape, Settings, Shape, ShapeId,
    ShapeKind,
};
use shapegen_logging::{ObserverRegistry, ResolutionEvent};
use std::collections::HashMap;
use std::sync::Arc;

const MODELS: &str = "models";
const ERRORS: &str = "errors";
const CLIENT: &str = "client";

const BLOBS_NAMESPACE: &str = "smithy_python.interfaces.blobs";
const MEDIATYPES_NAMESPACE: &str = "smithy_python.mediatypes";

/// Maps shapes to symbols for one service.
pub struct SymbolVisitor {
    model: Arc<Model>,
    module_name: String,
    service: ServiceShape,
    escaper: Escaper,
    observers: Arc<ObserverRegistry>,
    cache: RwLock<HashMap<ShapeId, Symbol>>,
}

impl SymbolVisitor {
    /// Create a visitor for the service named in `settings`.
    pub fn new(
        model: Arc<Model>,
        settings: &Settings,
        observers: Arc<ObserverRegistry>,
    ) -> GenerationResult<Self> {
        let (_, service) = model.expect_service(&settings.service)?;
        let service = service.clone();
        Ok(Self {
            model,
            module_name: settings.module_name.clone(),
            service,
            escaper: Escaper::with_settings(&settings.reserved_words),
            observers,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn escaper(&self) -> &Escaper {
        &self.escaper
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Resolve a shape to its symbol.
    pub fn to_symbol(&self, shape: &Shape) -> GenerationResult<Symbol> {
        let mut in_flight = Vec::new();
        self.resolve(shape, &mut in_flight)
    }

    /// Look up `id` in the model and resolve it.
    pub fn symbol_for(&self, id: &ShapeId) -> GenerationResult<Symbol> {
        let shape = self.model.expect_shape(id)?;
        self.to_symbol(shape)
    }

    /// Python attribute name for a member shape.
    pub fn to_member_name(&self, member: &Shape) -> GenerationResult<String> {
        let Some(raw) = member.id().member() else {
            return Err(GenerationError::UnexpectedShapeKind {
                id: member.id().clone(),
                expected: "member",
                actual: member.kind().type_name(),
            });
        };
        let container = self.model.expect_shape(&member.id().container())?;
        let is_error = container.is_error();

        if is_error && raw.eq_ignore_ascii_case("message") {
            return Ok("message".to_string());
        }

        Ok(self
            .escaper
            .escape_member_name(&to_snake_case(raw), is_error))
    }

    /// Number of cached resolutions.
    pub fn cached(&self) -> usize {
        self.cache.read().len()
    }

    fn resolve(&self, shape: &Shape, in_flight: &mut Vec<ShapeId>) -> GenerationResult<Symbol> {
        if let Some(symbol) = self.cache.read().get(shape.id()) {
            return Ok(symbol.clone());
        }
        if in_flight.contains(shape.id()) {
            return Err(GenerationError::RecursiveShape(shape.id().clone()));
        }

        in_flight.push(shape.id().clone());
        let visited = self.visit(shape, in_flight);
        in_flight.pop();
        let symbol = self.escaper.escape_symbol(visited?);

        {
            let mut cache = self.cache.write();
            if let Some(existing) = cache.get(shape.id()) {
                return Ok(existing.clone());
            }
            cache.insert(shape.id().clone(), symbol.clone());
        }

        self.observers.notify(&ResolutionEvent {
            shape: shape.id().clone(),
            name: symbol.name().to_string(),
            namespace: symbol.namespace().unwrap_or_default().to_string(),
            definition_file: symbol.definition_file().unwrap_or_default().to_string(),
        });
        Ok(symbol)
    }

    fn visit(&self, shape: &Shape, in_flight: &mut Vec<ShapeId>) -> GenerationResult<Symbol> {
        validate_traits(shape)?;

        let symbol = match shape.kind() {
            ShapeKind::Boolean => self.builder(shape, "bool").build(),
            ShapeKind::Byte
            | ShapeKind::Short
            | ShapeKind::Integer
            | ShapeKind::Long
            | ShapeKind::BigInteger => self.builder(shape, "int").build(),
            ShapeKind::Float | ShapeKind::Double => self.builder(shape, "float").build(),
            ShapeKind::BigDecimal => self.stdlib_symbol(shape, "Decimal", "decimal"),
            ShapeKind::String => self.string_symbol(shape),
            ShapeKind::Blob => self.blob_symbol(shape),
            ShapeKind::Timestamp => self.stdlib_symbol(shape, "datetime", "datetime"),
            // Documents and resources are not modeled yet.
            ShapeKind::Document | ShapeKind::Resource { .. } => {
                self.stdlib_symbol(shape, "Any", "typing")
            }
            // Python has no native set that fits; sets are lists with
            // uniqueness left to the service.
            ShapeKind::List { member } | ShapeKind::Set { member } => {
                let (reference, target) = self.resolve_member(shape, member, in_flight)?;
                let builder = self
                    .builder(shape, format!("List[{}]", reference.name()))
                    .reference(SymbolReference::stdlib("List", "typing"))
                    .reference(reference.into());
                self.with_dict_helpers(builder, shape, target).build()
            }
            ShapeKind::Map { value, .. } => {
                let (reference, target) = self.resolve_member(shape, value, in_flight)?;
                let builder = self
                    .builder(shape, format!("Dict[str, {}]", reference.name()))
                    .reference(SymbolReference::stdlib("Dict", "typing"))
                    .reference(reference.into());
                self.with_dict_helpers(builder, shape, target).build()
            }
            ShapeKind::Structure { .. } => {
                let suffix = if shape.is_error() { ERRORS } else { MODELS };
                self.generated(shape, self.default_shape_name(shape.id()), suffix)
                    .build()
            }
            ShapeKind::Union { .. } => self
                .generated(shape, self.default_shape_name(shape.id()), MODELS)
                .from_dict(self.helper(shape.id(), "from_dict"))
                .build(),
            ShapeKind::Member { target } => {
                let target = self.model.get_shape(target).ok_or_else(|| {
                    GenerationError::DanglingReference {
                        referrer: shape.id().clone(),
                        target: target.clone(),
                    }
                })?;
                return self.resolve(target, in_flight);
            }
            ShapeKind::Service(_) => {
                let name = format!("{}Client", capitalize(shape.id().name()));
                self.generated(shape, name, CLIENT).build()
            }
            ShapeKind::Operation { .. } => {
                let name = to_snake_case(shape.id().name_for_service(&self.service));
                self.generated(shape, name, CLIENT).build()
            }
        };
        Ok(symbol)
    }

    fn string_symbol(&self, shape: &Shape) -> Symbol {
        if shape.media_type().is_some_and(MediaType::is_json) {
            return self
                .builder(shape, "Union[str, JsonString]")
                .reference(SymbolReference::stdlib("Union", "typing"))
                .reference(runtime_symbol("JsonString", MEDIATYPES_NAMESPACE).into())
                .build();
        }

        let builder = self.builder(shape, "str");
        if shape.enum_values().is_none() {
            return builder.build();
        }

        // The enum class only holds convenience constants; values stay plain
        // strings, so it is attached as a facet rather than returned.
        let enum_symbol = self
            .generated(shape, self.default_shape_name(shape.id()), MODELS)
            .build();
        builder
            .enum_symbol(self.escaper.escape_symbol(enum_symbol))
            .build()
    }

    fn blob_symbol(&self, shape: &Shape) -> Symbol {
        if shape.is_streaming() {
            return self
                .builder(shape, "StreamingBlob")
                .namespace(BLOBS_NAMESPACE)
                .dependency(PythonDependency::smithy_python())
                .build();
        }
        if shape.media_type().is_some_and(MediaType::is_json) {
            return self
                .builder(shape, "Union[bytes, bytearray, JsonBlob]")
                .reference(SymbolReference::stdlib("Union", "typing"))
                .reference(runtime_symbol("JsonBlob", MEDIATYPES_NAMESPACE).into())
                .build();
        }
        self.builder(shape, "Union[bytes, bytearray]")
            .reference(SymbolReference::stdlib("Union", "typing"))
            .build()
    }

    /// Resolve the target of a collection or map member, returning the
    /// target's symbol and shape.
    fn resolve_member<'m>(
        &'m self,
        container: &Shape,
        member: &ShapeId,
        in_flight: &mut Vec<ShapeId>,
    ) -> GenerationResult<(Symbol, &'m Shape)> {
        let dangling = |target: &ShapeId| GenerationError::DanglingReference {
            referrer: container.id().clone(),
            target: target.clone(),
        };
        let member_shape = self.model.get_shape(member).ok_or_else(|| dangling(member))?;
        let target_id = member_shape
            .member_target()
            .ok_or_else(|| GenerationError::UnexpectedShapeKind {
                id: member.clone(),
                expected: "member",
                actual: member_shape.kind().type_name(),
            })?;
        let target = self
            .model
            .get_shape(target_id)
            .ok_or_else(|| GenerationError::DanglingReference {
                referrer: member.clone(),
                target: target_id.clone(),
            })?;
        let symbol = self.resolve(member_shape, in_flight)?;
        Ok((symbol, target))
    }

    fn with_dict_helpers(&self, builder: SymbolBuilder, shape: &Shape, target: &Shape) -> SymbolBuilder {
        if target.kind().is_simple() {
            return builder;
        }
        builder.dict_helpers(
            self.helper(shape.id(), "as_dict"),
            self.helper(shape.id(), "from_dict"),
        )
    }

    /// `_<snake name>_<suffix>` in the models module.
    fn helper(&self, id: &ShapeId, suffix: &str) -> Symbol {
        let name = format!(
            "_{}_{suffix}",
            to_snake_case(id.name_for_service(&self.service))
        );
        Symbol::builder(name)
            .namespace(module_namespace(&self.module_name, MODELS))
            .definition_file(module_file(&self.module_name, MODELS))
            .build()
    }

    fn default_shape_name(&self, id: &ShapeId) -> String {
        capitalize(id.name_for_service(&self.service))
    }

    fn builder(&self, shape: &Shape, name: impl Into<String>) -> SymbolBuilder {
        Symbol::builder(name).shape(shape.id().clone())
    }

    /// Symbol for a definition the generator writes into `<module>.<suffix>`.
    fn generated(&self, shape: &Shape, name: String, suffix: &str) -> SymbolBuilder {
        self.builder(shape, name)
            .namespace(module_namespace(&self.module_name, suffix))
            .definition_file(module_file(&self.module_name, suffix))
    }

    fn stdlib_symbol(&self, shape: &Shape, name: &str, namespace: &str) -> Symbol {
        self.builder(shape, name).namespace(namespace).stdlib().build()
    }
}

impl std::fmt::Debug for SymbolVisitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolVisitor")
            .field("module_name", &self.module_name)
            .field("cached", &self.cached())
            .finish()
    }
}

/// A `smithy_python` runtime type.
fn runtime_symbol(name: &str, namespace: &str) -> Symbol {
    Symbol::builder(name)
        .namespace(namespace)
        .dependency(PythonDependency::smithy_python())
        .build()
}

/// Reject trait placements the mapping table has no rule for.
fn validate_traits(shape: &Shape) -> GenerationResult<()> {
    let kind = shape.kind();
    let kind_name = kind.type_name();

    if shape.enum_values().is_some() && !matches!(kind, ShapeKind::String) {
        return Err(GenerationError::unsupported(
            shape.id(),
            format!("enum trait on a {kind_name} shape"),
        ));
    }
    if let Some(media_type) = shape.media_type() {
        if !matches!(kind, ShapeKind::String | ShapeKind::Blob) {
            return Err(GenerationError::unsupported(
                shape.id(),
                format!("mediaType trait on a {kind_name} shape"),
            ));
        }
        if shape.enum_values().is_some() && MediaType::is_json(media_type) {
            return Err(GenerationError::unsupported(
                shape.id(),
                "enum trait combined with a JSON mediaType",
            ));
        }
    }
    if shape.is_streaming() && !matches!(kind, ShapeKind::Blob | ShapeKind::Union { .. }) {
        return Err(GenerationError::unsupported(
            shape.id(),
            format!("streaming trait on a {kind_name} shape"),
        ));
    }
    if shape.is_error() && !matches!(kind, ShapeKind::Structure { .. }) {
        return Err(GenerationError::unsupported(
            shape.id(),
            format!("error trait on a {kind_name} shape"),
        ));
    }
    Ok(())
}
