//! Smithy JSON AST loading
//!
//! Only the parts of the AST that affect symbol resolution are read: shape
//! types, member targets, closure roots, renames, and traits. Unknown traits
//! are kept as [`Trait::Other`].

use crate::{
    EnumDefinition, ErrorSource, GenerationError, GenerationResult, Model, ModelBuilder,
    ServiceShape, Shape, ShapeId, ShapeKind, Trait,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const ENUM_VALUE: &str = "smithy.api#enumValue";

#[derive(Deserialize)]
struct AstDocument {
    smithy: String,
    #[serde(default)]
    shapes: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AstShape {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    members: Map<String, Value>,
    member: Option<AstMember>,
    key: Option<AstMember>,
    value: Option<AstMember>,
    #[serde(default)]
    operations: Vec<AstTarget>,
    #[serde(default)]
    collection_operations: Vec<AstTarget>,
    #[serde(default)]
    resources: Vec<AstTarget>,
    #[serde(default)]
    errors: Vec<AstTarget>,
    create: Option<AstTarget>,
    put: Option<AstTarget>,
    read: Option<AstTarget>,
    update: Option<AstTarget>,
    delete: Option<AstTarget>,
    list: Option<AstTarget>,
    input: Option<AstTarget>,
    output: Option<AstTarget>,
    #[serde(default)]
    version: String,
    #[serde(default)]
    rename: BTreeMap<String, String>,
    #[serde(default)]
    traits: Map<String, Value>,
}

#[derive(Deserialize)]
struct AstMember {
    target: String,
    #[serde(default)]
    traits: Map<String, Value>,
}

#[derive(Deserialize)]
struct AstTarget {
    target: String,
}

impl AstTarget {
    fn id(&self) -> GenerationResult<ShapeId> {
        self.target.parse()
    }
}

/// Decode a JSON AST document into a model. References are not validated.
pub(crate) fn parse(text: &str) -> GenerationResult<Model> {
    let document: AstDocument = serde_json::from_str(text)?;
    if !(document.smithy.starts_with('1') || document.smithy.starts_with('2')) {
        return Err(GenerationError::ModelParse(format!(
            "unsupported smithy version: {}",
            document.smithy
        )));
    }

    let mut builder = ModelBuilder::new();
    for (id, value) in document.shapes {
        let id: ShapeId = id.parse()?;
        let ast: AstShape = serde_json::from_value(value)?;
        for shape in lower_shape(id, ast)? {
            builder = builder.add_shape(shape);
        }
    }
    builder.build()
}

/// Lower one AST shape into the shape itself followed by its members.
fn lower_shape(id: ShapeId, ast: AstShape) -> GenerationResult<Vec<Shape>> {
    let mut traits = lower_traits(&id, ast.traits)?;
    let mut members = Vec::new();

    let kind = match ast.kind.as_str() {
        "boolean" => ShapeKind::Boolean,
        "byte" => ShapeKind::Byte,
        "short" => ShapeKind::Short,
        "integer" | "intEnum" => ShapeKind::Integer,
        "long" => ShapeKind::Long,
        "float" => ShapeKind::Float,
        "double" => ShapeKind::Double,
        "bigInteger" => ShapeKind::BigInteger,
        "bigDecimal" => ShapeKind::BigDecimal,
        "string" => ShapeKind::String,
        "blob" => ShapeKind::Blob,
        "timestamp" => ShapeKind::Timestamp,
        "document" => ShapeKind::Document,
        "enum" => {
            traits.push(Trait::Enum(enum_definitions(&id, &ast.members)?));
            ShapeKind::String
        }
        "list" | "set" => {
            let member = required(&id, "member", ast.member)?;
            let member = lower_member(&id, "member", member, &mut members)?;
            if ast.kind == "list" {
                ShapeKind::List { member }
            } else {
                ShapeKind::Set { member }
            }
        }
        "map" => {
            let key = lower_member(&id, "key", required(&id, "key", ast.key)?, &mut members)?;
            let value = lower_member(
                &id,
                "value",
                required(&id, "value", ast.value)?,
                &mut members,
            )?;
            ShapeKind::Map { key, value }
        }
        "structure" | "union" => {
            let mut ids = Vec::with_capacity(ast.members.len());
            for (name, value) in ast.members {
                let member: AstMember = serde_json::from_value(value)?;
                ids.push(lower_member(&id, &name, member, &mut members)?);
            }
            if ast.kind == "structure" {
                ShapeKind::Structure { members: ids }
            } else {
                ShapeKind::Union { members: ids }
            }
        }
        "service" => {
            let mut rename = BTreeMap::new();
            for (target, alias) in ast.rename {
                rename.insert(target.parse()?, alias);
            }
            ShapeKind::Service(ServiceShape {
                version: ast.version,
                operations: targets(&ast.operations)?,
                resources: targets(&ast.resources)?,
                errors: targets(&ast.errors)?,
                rename,
            })
        }
        "operation" => ShapeKind::Operation {
            input: ast.input.as_ref().map(AstTarget::id).transpose()?,
            output: ast.output.as_ref().map(AstTarget::id).transpose()?,
            errors: targets(&ast.errors)?,
        },
        "resource" => {
            let lifecycle = [
                &ast.create,
                &ast.put,
                &ast.read,
                &ast.update,
                &ast.delete,
                &ast.list,
            ];
            let mut operations = Vec::new();
            for op in lifecycle.into_iter().flatten() {
                operations.push(op.id()?);
            }
            operations.extend(targets(&ast.operations)?);
            operations.extend(targets(&ast.collection_operations)?);
            ShapeKind::Resource {
                operations,
                resources: targets(&ast.resources)?,
            }
        }
        other => {
            return Err(GenerationError::ModelParse(format!(
                "unsupported shape type `{other}` for {id}"
            )));
        }
    };

    let mut shape = Shape::new(id, kind);
    for t in traits {
        shape = shape.with_trait(t);
    }

    let mut shapes = Vec::with_capacity(members.len() + 1);
    shapes.push(shape);
    shapes.extend(members);
    Ok(shapes)
}

fn lower_member(
    container: &ShapeId,
    name: &str,
    ast: AstMember,
    out: &mut Vec<Shape>,
) -> GenerationResult<ShapeId> {
    let id = container.with_member(name)?;
    let target = ast.target.parse()?;
    let mut shape = Shape::new(id.clone(), ShapeKind::Member { target });
    for t in lower_traits(&id, ast.traits)? {
        shape = shape.with_trait(t);
    }
    out.push(shape);
    Ok(id)
}

fn lower_traits(id: &ShapeId, traits: Map<String, Value>) -> GenerationResult<Vec<Trait>> {
    let mut lowered = Vec::with_capacity(traits.len());
    for (trait_id, value) in traits {
        let t = match trait_id.as_str() {
            Trait::ENUM => Trait::Enum(serde_json::from_value(value)?),
            Trait::ERROR => Trait::Error(serde_json::from_value::<ErrorSource>(value)?),
            Trait::STREAMING => Trait::Streaming,
            Trait::MEDIA_TYPE => Trait::MediaType(string_trait(id, &trait_id, value)?),
            _ => Trait::Other {
                id: trait_id,
                value,
            },
        };
        lowered.push(t);
    }
    Ok(lowered)
}

fn string_trait(id: &ShapeId, trait_id: &str, value: Value) -> GenerationResult<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(GenerationError::ModelParse(format!(
            "trait {trait_id} on {id} must be a string"
        ))),
    }
}

/// Enum values of a Smithy 2.0 `enum` shape, taken from its members.
fn enum_definitions(id: &ShapeId, members: &Map<String, Value>) -> GenerationResult<Vec<EnumDefinition>> {
    let mut values = Vec::with_capacity(members.len());
    for (name, value) in members {
        let member: AstMember = serde_json::from_value(value.clone())?;
        let enum_value = match member.traits.get(ENUM_VALUE) {
            Some(Value::String(v)) => v.clone(),
            Some(_) => {
                return Err(GenerationError::ModelParse(format!(
                    "enum member {id}${name} has a non-string value"
                )));
            }
            None => name.clone(),
        };
        values.push(EnumDefinition::named(name.clone(), enum_value));
    }
    Ok(values)
}

fn required(id: &ShapeId, field: &str, member: Option<AstMember>) -> GenerationResult<AstMember> {
    member.ok_or_else(|| GenerationError::ModelParse(format!("{id} is missing `{field}`")))
}

fn targets(targets: &[AstTarget]) -> GenerationResult<Vec<ShapeId>> {
    targets.iter().map(AstTarget::id).collect()
}

#[cfg(test)]
#[path = "json_ast/json_ast_tests.rs"]
mod json_ast_tests;
