//! End-to-end symbol resolution scenarios for a small weather service.

#![allow(non_snake_case)]

use shapegen_codegen::{GenerationContext, InMemoryWriterDelegator, Symbol, SymbolTable};
use shapegen_core::{EnumDefinition, ErrorSource, Model, ModelBuilder, Settings, ShapeId, Trait};
use shapegen_logging::{CaptureLayer, ObserverRegistry, RecordingObserver, SYMBOLS_TARGET};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

const SERVICE: &str = "example.weather#Weather";

fn id(s: &str) -> ShapeId {
    s.parse().unwrap()
}

fn weather() -> ModelBuilder {
    Model::builder().service(SERVICE, "2006-03-01", &[])
}

fn context(model: Model) -> GenerationContext {
    GenerationContext::with_observers(
        model,
        Settings::new(id(SERVICE), "weather"),
        Arc::new(InMemoryWriterDelegator::new()),
        Arc::new(ObserverRegistry::new()),
    )
    .unwrap()
}

fn resolve(model: Model, shape: &str) -> Symbol {
    context(model).symbol_provider().symbol_for(&id(shape)).unwrap()
}

#[test]
fn enum_string___resolves_to_str_with_enum_constants_in_models() {
    let model = weather()
        .string("example.weather#Status")
        .apply(
            "example.weather#Status",
            Trait::Enum(vec![
                EnumDefinition::named("SUNNY", "sunny"),
                EnumDefinition::named("RAINY", "rainy"),
            ]),
        )
        .build()
        .unwrap();

    let symbol = resolve(model, "example.weather#Status");

    assert_eq!(symbol.name(), "str");
    assert_eq!(symbol.namespace(), None);
    assert!(!symbol.has_definition_file());
    let constants = symbol.enum_symbol().expect("enum facet");
    assert_eq!(constants.name(), "Status");
    assert_eq!(constants.namespace(), Some("weather.models"));
    assert_eq!(constants.definition_file(), Some("./weather/models.py"));
}

#[test]
fn enum_string___named_after_reserved_type___escapes_constants_only() {
    let model = weather()
        .string("example.weather#Union")
        .apply("example.weather#Union", Trait::Enum(vec![EnumDefinition::new("a")]))
        .build()
        .unwrap();

    let symbol = resolve(model, "example.weather#Union");

    assert_eq!(symbol.name(), "str");
    assert_eq!(symbol.enum_symbol().map(Symbol::name), Some("Union_"));
}

#[test]
fn error_structure___resolves_into_errors_module() {
    let model = weather()
        .structure("example.weather#InvalidInput", &[("message", "smithy.api#String")])
        .apply("example.weather#InvalidInput", Trait::Error(ErrorSource::Client))
        .structure("example.weather#City", &[])
        .build()
        .unwrap();
    let ctx = context(model);
    let provider = ctx.symbol_provider();

    let error = provider.symbol_for(&id("example.weather#InvalidInput")).unwrap();
    let city = provider.symbol_for(&id("example.weather#City")).unwrap();

    assert_eq!(error.namespace(), Some("weather.errors"));
    assert_eq!(error.definition_file(), Some("./weather/errors.py"));
    assert_eq!(city.namespace(), Some("weather.models"));
    assert_ne!(error.definition_file(), city.definition_file());
}

#[test]
fn set_and_list___over_same_structure___resolve_identically() {
    let as_set = weather()
        .structure("example.weather#City", &[])
        .set("example.weather#Cities", "example.weather#City")
        .build()
        .unwrap();
    let as_list = weather()
        .structure("example.weather#City", &[])
        .list("example.weather#Cities", "example.weather#City")
        .build()
        .unwrap();

    let set_symbol = resolve(as_set, "example.weather#Cities");
    let list_symbol = resolve(as_list, "example.weather#Cities");

    assert_eq!(set_symbol, list_symbol);
    assert_eq!(set_symbol.name(), "List[City]");
    assert_eq!(set_symbol.as_dict().map(Symbol::name), Some("_cities_as_dict"));
    assert_eq!(set_symbol.from_dict().map(Symbol::name), Some("_cities_from_dict"));
    assert_eq!(
        set_symbol.as_dict().and_then(Symbol::definition_file),
        Some("./weather/models.py")
    );
}

#[test]
fn collection_helpers___absent_for_simple_targets() {
    let model = weather()
        .list("example.weather#Names", "smithy.api#String")
        .map("example.weather#Counts", "smithy.api#Integer")
        .build()
        .unwrap();
    let ctx = context(model);
    let provider = ctx.symbol_provider();

    let names = provider.symbol_for(&id("example.weather#Names")).unwrap();
    let counts = provider.symbol_for(&id("example.weather#Counts")).unwrap();

    assert_eq!(names.name(), "List[str]");
    assert_eq!(counts.name(), "Dict[str, int]");
    for symbol in [&names, &counts] {
        assert!(symbol.as_dict().is_none());
        assert!(symbol.from_dict().is_none());
    }
}

#[test]
fn collection_helpers___present_for_structure_map_values() {
    let model = weather()
        .structure("example.weather#Forecast", &[])
        .map("example.weather#ForecastByCity", "example.weather#Forecast")
        .build()
        .unwrap();

    let symbol = resolve(model, "example.weather#ForecastByCity");

    assert!(symbol.as_dict().is_some());
    assert!(symbol.from_dict().is_some());
}

#[test]
fn streaming_json_blob___prefers_streaming_interface() {
    let model = weather()
        .blob("example.weather#Payload")
        .apply("example.weather#Payload", Trait::Streaming)
        .apply("example.weather#Payload", Trait::MediaType("application/json".into()))
        .build()
        .unwrap();

    let symbol = resolve(model, "example.weather#Payload");

    assert_eq!(symbol.name(), "StreamingBlob");
    assert_eq!(symbol.namespace(), Some("smithy_python.interfaces.blobs"));
}

#[test]
fn error_message_member___is_always_message() {
    let model = weather()
        .structure(
            "example.weather#Throttled",
            &[("Message", "smithy.api#String"), ("code", "smithy.api#String")],
        )
        .apply("example.weather#Throttled", Trait::Error(ErrorSource::Server))
        .build()
        .unwrap();
    let ctx = context(model);
    let provider = ctx.symbol_provider();
    let member_name = |member: &str| {
        let shape = ctx.model().expect_shape(&id(member)).unwrap();
        provider.to_member_name(shape).unwrap()
    };

    assert_eq!(member_name("example.weather#Throttled$Message"), "message");
    assert_eq!(member_name("example.weather#Throttled$code"), "code_");
}

#[test]
fn message_member___outside_errors___is_only_snake_cased() {
    let model = weather()
        .structure("example.weather#Note", &[("Message", "smithy.api#String")])
        .build()
        .unwrap();
    let ctx = context(model);
    let shape = ctx
        .model()
        .expect_shape(&id("example.weather#Note$Message"))
        .unwrap();

    assert_eq!(ctx.symbol_provider().to_member_name(shape).unwrap(), "message");
}

#[test]
fn builtin_types___are_never_escaped() {
    let model = weather().build().unwrap();
    let ctx = context(model);

    let string = ctx.symbol_provider().symbol_for(&ShapeId::prelude("String")).unwrap();

    assert_eq!(string.name(), "str");
}

#[test]
fn primitive_kinds___never_have_definition_files() {
    let model = weather().build().unwrap();
    let ctx = context(model);

    for shape in ctx.model().shapes().filter(|s| s.kind().is_simple()) {
        let symbol = ctx.symbol_provider().to_symbol(shape).unwrap();
        assert!(
            !symbol.has_definition_file(),
            "{} resolved to {}",
            shape.id(),
            symbol
        );
    }
}

#[test]
fn resolution_observers___see_each_shape_once() {
    let model = weather()
        .structure("example.weather#City", &[("name", "smithy.api#String")])
        .build()
        .unwrap();
    let observers = Arc::new(ObserverRegistry::new());
    let recorder = Arc::new(RecordingObserver::new());
    observers.register(recorder.clone());
    let ctx = GenerationContext::with_observers(
        model,
        Settings::new(id(SERVICE), "weather"),
        Arc::new(InMemoryWriterDelegator::new()),
        observers,
    )
    .unwrap();

    ctx.symbol_provider().symbol_for(&id("example.weather#City")).unwrap();
    ctx.symbol_provider().symbol_for(&id("example.weather#City")).unwrap();

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "City");
    assert_eq!(events[0].definition_file, "./weather/models.py");
}

#[test]
fn dotted_module_name___nests_definition_files_by_package() {
    let model = weather()
        .structure("example.weather#City", &[])
        .structure("example.weather#NoSuchCity", &[])
        .apply("example.weather#NoSuchCity", Trait::Error(ErrorSource::Client))
        .build()
        .unwrap();
    let ctx = GenerationContext::with_observers(
        model,
        Settings::new(id(SERVICE), "weather.sub"),
        Arc::new(InMemoryWriterDelegator::new()),
        Arc::new(ObserverRegistry::new()),
    )
    .unwrap();

    let city = ctx.symbol_provider().symbol_for(&id("example.weather#City")).unwrap();
    let error = ctx.symbol_provider().symbol_for(&id("example.weather#NoSuchCity")).unwrap();

    assert_eq!(city.namespace(), Some("weather.sub.models"));
    assert_eq!(city.definition_file(), Some("./weather/sub/models.py"));
    assert_eq!(error.namespace(), Some("weather.sub.errors"));
    assert_eq!(error.definition_file(), Some("./weather/sub/errors.py"));
}

#[test]
fn tracing_observer___logs_resolutions_on_symbols_target() {
    let capture = CaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let model = weather().structure("example.weather#City", &[]).build().unwrap();

    tracing::subscriber::with_default(subscriber, || {
        let ctx = GenerationContext::new(
            model,
            Settings::new(id(SERVICE), "weather"),
            Arc::new(InMemoryWriterDelegator::new()),
        )
        .unwrap();
        ctx.symbol_provider().symbol_for(&id("example.weather#City")).unwrap();
    });

    let events = capture.events_for(SYMBOLS_TARGET);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("namespace"), Some("weather.models"));
}

#[test]
fn json_ast_model___builds_full_symbol_table() {
    let text = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#Weather": {
                "type": "service",
                "version": "2006-03-01",
                "operations": [{ "target": "example.weather#GetForecast" }],
                "traits": { "aws.protocols#restJson1": {} }
            },
            "example.weather#GetForecast": {
                "type": "operation",
                "input": { "target": "example.weather#GetForecastInput" },
                "output": { "target": "example.weather#GetForecastOutput" },
                "errors": [{ "target": "example.weather#NoSuchCity" }]
            },
            "example.weather#GetForecastInput": {
                "type": "structure",
                "members": {
                    "cityId": { "target": "smithy.api#String" }
                }
            },
            "example.weather#GetForecastOutput": {
                "type": "structure",
                "members": {
                    "sky": { "target": "example.weather#Sky" },
                    "hourly": { "target": "example.weather#HourlyForecasts" }
                }
            },
            "example.weather#Sky": {
                "type": "enum",
                "members": {
                    "CLEAR": { "target": "smithy.api#Unit", "traits": { "smithy.api#enumValue": "clear" } }
                }
            },
            "example.weather#HourlyForecasts": {
                "type": "list",
                "member": { "target": "example.weather#HourlyForecast" }
            },
            "example.weather#HourlyForecast": {
                "type": "structure",
                "members": {
                    "chanceOfRain": { "target": "smithy.api#Float" }
                }
            },
            "example.weather#NoSuchCity": {
                "type": "structure",
                "members": {
                    "message": { "target": "smithy.api#String" }
                },
                "traits": { "smithy.api#error": "client" }
            }
        }
    }"#;
    let model = Model::from_json(text).unwrap();

    let table = SymbolTable::build(&context(model)).unwrap();

    assert_eq!(
        table.symbol(&id("example.weather#HourlyForecasts")).map(Symbol::name),
        Some("List[HourlyForecast]")
    );
    assert_eq!(
        table
            .symbol(&id("example.weather#Sky"))
            .and_then(Symbol::enum_symbol)
            .map(Symbol::full_name),
        Some("weather.models.Sky".to_string())
    );
    assert_eq!(
        table.member_name(&id("example.weather#HourlyForecast$chanceOfRain")),
        Some("chance_of_rain")
    );
    assert_eq!(
        table.member_name(&id("example.weather#NoSuchCity$message")),
        Some("message")
    );
    assert_eq!(
        table.symbol(&id(SERVICE)).map(Symbol::full_name),
        Some("weather.client.WeatherClient".to_string())
    );
    assert!(table.dependencies().is_empty());
}
