#![allow(non_snake_case)]

use super::*;

fn id(s: &str) -> ShapeId {
    s.parse().unwrap()
}

#[test]
fn parse___structure_members___keep_document_order() {
    let text = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#City": {
                "type": "structure",
                "members": {
                    "zeta": { "target": "smithy.api#String" },
                    "alpha": { "target": "smithy.api#Integer" },
                    "mid": { "target": "smithy.api#Boolean" }
                }
            }
        }
    }"#;

    let model = parse(text).unwrap();
    let city = model.expect_shape(&id("example.weather#City")).unwrap();

    let names: Vec<&str> = match city.kind() {
        ShapeKind::Structure { members } => members.iter().filter_map(ShapeId::member).collect(),
        other => panic!("unexpected kind {other:?}"),
    };
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn parse___known_traits___are_lowered() {
    let text = r#"{
        "smithy": "1.0",
        "shapes": {
            "example.weather#Status": {
                "type": "string",
                "traits": {
                    "smithy.api#enum": [
                        { "value": "sunny", "name": "SUNNY" },
                        { "value": "rainy" }
                    ],
                    "smithy.api#documentation": "Sky status"
                }
            },
            "example.weather#InvalidInput": {
                "type": "structure",
                "members": {},
                "traits": { "smithy.api#error": "client" }
            },
            "example.weather#Payload": {
                "type": "blob",
                "traits": {
                    "smithy.api#streaming": {},
                    "smithy.api#mediaType": "application/octet-stream"
                }
            }
        }
    }"#;

    let model = parse(text).unwrap();

    let status = model.expect_shape(&id("example.weather#Status")).unwrap();
    assert_eq!(
        status.enum_values(),
        Some(
            &[
                EnumDefinition::named("SUNNY", "sunny"),
                EnumDefinition::new("rainy")
            ][..]
        )
    );
    assert!(status.has_trait("smithy.api#documentation"));

    let error = model.expect_shape(&id("example.weather#InvalidInput")).unwrap();
    assert_eq!(error.error_source(), Some(ErrorSource::Client));

    let payload = model.expect_shape(&id("example.weather#Payload")).unwrap();
    assert!(payload.is_streaming());
    assert_eq!(payload.media_type(), Some("application/octet-stream"));
}

#[test]
fn parse___unknown_trait___is_kept_as_other() {
    let text = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#Weather": {
                "type": "service",
                "version": "2006-03-01",
                "traits": { "aws.protocols#restJson1": {} }
            }
        }
    }"#;

    let model = parse(text).unwrap();
    let service = model.expect_shape(&id("example.weather#Weather")).unwrap();

    assert!(service.has_trait("aws.protocols#restJson1"));
}

#[test]
fn from_json___union_with_unit_member___validates() {
    let text = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#Choice": {
                "type": "union",
                "members": {
                    "none": { "target": "smithy.api#Unit" },
                    "some": { "target": "smithy.api#String" }
                }
            }
        }
    }"#;

    let model = Model::from_json(text).unwrap();
    let none = model
        .expect_shape(&id("example.weather#Choice$none"))
        .unwrap();

    assert_eq!(none.member_target(), Some(&ShapeId::prelude("Unit")));
    assert!(matches!(
        model.expect_shape(&ShapeId::prelude("Unit")).unwrap().kind(),
        ShapeKind::Structure { members } if members.is_empty()
    ));
}

#[test]
fn parse___smithy2_enum___becomes_string_with_enum_values() {
    let text = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#Status": {
                "type": "enum",
                "members": {
                    "SUNNY": {
                        "target": "smithy.api#Unit",
                        "traits": { "smithy.api#enumValue": "sunny" }
                    },
                    "CLOUDY": { "target": "smithy.api#Unit" }
                }
            }
        }
    }"#;

    let model = parse(text).unwrap();
    let status = model.expect_shape(&id("example.weather#Status")).unwrap();

    assert_eq!(status.kind(), &ShapeKind::String);
    assert_eq!(
        status.enum_values(),
        Some(
            &[
                EnumDefinition::named("SUNNY", "sunny"),
                EnumDefinition::named("CLOUDY", "CLOUDY")
            ][..]
        )
    );
    assert!(model.get_shape(&id("example.weather#Status$SUNNY")).is_none());
}

#[test]
fn parse___service___reads_closure_roots_and_rename() {
    let text = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#Weather": {
                "type": "service",
                "version": "2006-03-01",
                "operations": [{ "target": "example.weather#GetCurrentTime" }],
                "resources": [{ "target": "example.weather#City" }],
                "errors": [{ "target": "example.weather#ServiceError" }],
                "rename": { "other.ns#City": "OtherCity" }
            }
        }
    }"#;

    let model = parse(text).unwrap();
    let (_, service) = model.expect_service(&id("example.weather#Weather")).unwrap();

    assert_eq!(service.version, "2006-03-01");
    assert_eq!(service.operations, vec![id("example.weather#GetCurrentTime")]);
    assert_eq!(service.resources, vec![id("example.weather#City")]);
    assert_eq!(service.errors, vec![id("example.weather#ServiceError")]);
    assert_eq!(
        service.rename.get(&id("other.ns#City")).map(String::as_str),
        Some("OtherCity")
    );
}

#[test]
fn parse___resource___collects_lifecycle_operations() {
    let text = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#City": {
                "type": "resource",
                "read": { "target": "example.weather#GetCity" },
                "list": { "target": "example.weather#ListCities" },
                "resources": [{ "target": "example.weather#Forecast" }]
            }
        }
    }"#;

    let model = parse(text).unwrap();
    let city = model.expect_shape(&id("example.weather#City")).unwrap();

    assert_eq!(
        city.kind(),
        &ShapeKind::Resource {
            operations: vec![id("example.weather#GetCity"), id("example.weather#ListCities")],
            resources: vec![id("example.weather#Forecast")],
        }
    );
}

#[test]
fn parse___map___creates_key_and_value_members() {
    let text = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#Tags": {
                "type": "map",
                "key": { "target": "smithy.api#String" },
                "value": { "target": "smithy.api#Integer" }
            }
        }
    }"#;

    let model = parse(text).unwrap();
    let value = model.expect_shape(&id("example.weather#Tags$value")).unwrap();

    assert_eq!(value.member_target(), Some(&ShapeId::prelude("Integer")));
}

#[test]
fn parse___list_without_member___fails() {
    let text = r#"{"smithy": "2.0", "shapes": {"example.weather#Cities": {"type": "list"}}}"#;

    let err = parse(text).unwrap_err();

    assert!(matches!(err, GenerationError::ModelParse(_)));
}

#[test]
fn parse___unknown_shape_type___fails() {
    let text = r#"{"smithy": "2.0", "shapes": {"example.weather#Thing": {"type": "widget"}}}"#;

    let err = parse(text).unwrap_err();

    assert!(matches!(err, GenerationError::ModelParse(ref msg) if msg.contains("widget")));
}

#[test]
fn parse___unsupported_version___fails() {
    let err = parse(r#"{"smithy": "3.0", "shapes": {}}"#).unwrap_err();

    assert!(matches!(err, GenerationError::ModelParse(_)));
}

#[test]
fn parse___malformed_shape_id___fails() {
    let text = r#"{"smithy": "2.0", "shapes": {"Thing": {"type": "string"}}}"#;

    let err = parse(text).unwrap_err();

    assert!(matches!(err, GenerationError::InvalidShapeId(_)));
}
