use filter_bridge::config::{LogFormat, LogOutput};
use filter_bridge::{Config, ConfigError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults_from_empty_document() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Compact);
    assert!(config.invoke.check_conversions);
    assert!(!config.invoke.trace_calls);
}

#[test]
fn test_partial_sections() {
    let config = Config::from_toml_str(
        r#"
        [logging]
        level = "trace"
        format = "json"

        [invoke]
        trace_calls = true
        "#,
    )
    .unwrap();
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.output, LogOutput::Stderr);
    assert!(config.invoke.trace_calls);
    assert!(config.invoke.check_conversions);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[logging]\noutput = \"file\"\ndirectory = \"/tmp/fb\"").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.logging.output, LogOutput::File);
    assert_eq!(config.logging.directory, "/tmp/fb");
    assert_eq!(config.logging.prefix, "filter-bridge");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_bad_value_is_parse_error() {
    let err = Config::from_toml_str("[logging]\nformat = \"xml\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_serialize_roundtrip() {
    let mut config = Config::default();
    config.invoke.trace_calls = true;
    let text = config.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_init_builds_configured_invoker() {
    let mut config = Config::default();
    config.invoke.check_conversions = false;
    let invoker = filter_bridge::init(&config, filter_bridge::TypeCheckConverter);
    assert!(!invoker.config().check_conversions);
}
