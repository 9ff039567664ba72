#![allow(non_snake_case)]

use super::*;
use std::io::Write;
use test_case::test_case;

fn service() -> ShapeId {
    "example.weather#Weather".parse().unwrap()
}

#[test]
fn Settings___new___has_expected_defaults() {
    let settings = Settings::new(service(), "weather");

    assert_eq!(settings.module_version, "0.0.1");
    assert_eq!(settings.log_level, "info");
    assert!(settings.module_description.is_none());
    assert!(settings.reserved_words.types.is_empty());
    assert!(settings.reserved_words.members.is_empty());
}

#[test]
fn Settings___from_toml___parses_all_fields() {
    let text = r#"
service = "example.weather#Weather"
module_name = "weather"
module_version = "1.2.0"
module_description = "Weather client"
log_level = "debug"

[reserved_words]
types = ["City"]
members = ["forecast"]
"#;

    let settings = Settings::from_toml(text).unwrap();

    assert_eq!(settings.service, service());
    assert_eq!(settings.module_version, "1.2.0");
    assert_eq!(settings.module_description.as_deref(), Some("Weather client"));
    assert_eq!(settings.log_level().unwrap(), LogLevel::Debug);
    assert_eq!(settings.reserved_words.types, vec!["City".to_string()]);
    assert_eq!(settings.reserved_words.members, vec!["forecast".to_string()]);
}

#[test]
fn Settings___from_json___applies_defaults() {
    let json = r#"{"service": "example.weather#Weather", "module_name": "weather"}"#;

    let settings = Settings::from_json(json.as_bytes()).unwrap();

    assert_eq!(settings, Settings::new(service(), "weather"));
}

#[test]
fn Settings___from_json___rejects_bad_service_id() {
    let json = r#"{"service": "Weather", "module_name": "weather"}"#;

    let err = Settings::from_json(json.as_bytes()).unwrap_err();

    assert!(matches!(err, GenerationError::ConfigError(_)));
}

#[test]
fn Settings___from_toml___rejects_missing_module() {
    let err = Settings::from_toml(r#"service = "example.weather#Weather""#).unwrap_err();

    assert!(matches!(err, GenerationError::ConfigError(_)));
}

#[test_case("weather" ; "single segment")]
#[test_case("aws.weather_v2" ; "dotted")]
#[test_case("_private" ; "leading underscore")]
fn Settings___validate___accepts_module(module: &str) {
    assert!(Settings::new(service(), module).validate().is_ok());
}

#[test_case("" ; "empty")]
#[test_case("weather-client" ; "hyphen")]
#[test_case("2weather" ; "leading digit")]
#[test_case("weather." ; "trailing dot")]
fn Settings___validate___rejects_module(module: &str) {
    let err = Settings::new(service(), module).validate().unwrap_err();

    assert!(matches!(err, GenerationError::ConfigError(_)));
}

#[test]
fn Settings___validate___rejects_unknown_log_level() {
    let mut settings = Settings::new(service(), "weather");
    settings.log_level = "verbose".into();

    assert!(settings.validate().is_err());
}

#[test]
fn Settings___from_file___dispatches_on_extension() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, r#"service = "example.weather#Weather""#).unwrap();
    writeln!(file, r#"module_name = "weather""#).unwrap();

    let settings = Settings::from_file(file.path()).unwrap();

    assert_eq!(settings.module_name, "weather");
}

#[test]
fn Settings___from_file___reads_json() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"service": "example.weather#Weather", "module_name": "weather", "log_level": "warn"}}"#
    )
    .unwrap();

    let settings = Settings::from_file(file.path()).unwrap();

    assert_eq!(settings.log_level().unwrap(), LogLevel::Warn);
}

#[test]
fn Settings___from_file___rejects_unknown_extension() {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();

    let err = Settings::from_file(file.path()).unwrap_err();

    assert!(matches!(err, GenerationError::ConfigError(_)));
}
