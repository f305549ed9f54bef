use esquery::{Config, EsqueryError, WarningMode};
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_config_defaults_to_logging() {
    env::remove_var("ESQUERY_WARNINGS");
    let config = Config::from_env().expect("Config should parse");
    assert_eq!(config.warnings, WarningMode::Log);
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_config_silent_is_case_insensitive() {
    for raw in ["silent", "SILENT", " Silent "] {
        env::set_var("ESQUERY_WARNINGS", raw);
        let config = Config::from_env().expect("Config should parse");
        assert_eq!(config.warnings, WarningMode::Silent, "value {:?}", raw);
    }
    env::remove_var("ESQUERY_WARNINGS");
}

#[test]
#[serial]
fn test_config_rejects_unknown_mode() {
    env::set_var("ESQUERY_WARNINGS", "loud");
    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, EsqueryError::Config(_)));
    assert_eq!(err.code(), "config_error");
    assert!(err.to_string().contains("'log' or 'silent'"));
    env::remove_var("ESQUERY_WARNINGS");
}

#[test]
#[serial]
fn test_init_from_env_surfaces_bad_value() {
    env::set_var("ESQUERY_WARNINGS", "verbose");
    assert!(esquery::init_from_env().is_err());

    env::set_var("ESQUERY_WARNINGS", "log");
    let config = esquery::init_from_env().expect("valid mode");
    assert_eq!(config.warnings, WarningMode::Log);
    env::remove_var("ESQUERY_WARNINGS");
}
