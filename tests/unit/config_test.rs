//! Unit tests for config module

use std::time::Duration;

use scanswitch::Config;
use tempfile::TempDir;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.cache.capacity, 10);
    assert_eq!(config.carousel.width, 1080);
    assert_eq!(config.carousel.height, 1920);
    assert_eq!(config.carousel.step, 10);
    assert_eq!(config.carousel.tick_interval_ms, 10);
    assert_eq!(config.carousel.paused_interval_ms, 200);
    assert!(config.validate().is_ok());
}

#[test]
fn config_serialization_roundtrip() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn partial_config_fills_defaults() {
    let toml_str = r#"
[cache]
capacity = 3
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.cache.capacity, 3);
    assert_eq!(config.carousel.step, 10);
}

#[test]
fn carousel_settings_convert_intervals() {
    let toml_str = r#"
[carousel]
width = 400
tick_interval_ms = 16
paused_interval_ms = 500
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    let settings = config.carousel_settings();
    assert_eq!(settings.width, 400);
    assert_eq!(settings.tick_interval, Duration::from_millis(16));
    assert_eq!(settings.paused_interval, Duration::from_millis(500));
}

#[test]
fn zero_capacity_is_invalid() {
    let mut config = Config::default();
    config.cache.capacity = 0;
    assert!(config.validate().unwrap_err().contains("cache.capacity"));
}

#[test]
fn step_wider_than_screen_is_invalid() {
    let mut config = Config::default();
    config.carousel.width = 100;
    config.carousel.step = 200;
    assert!(config.validate().is_err());
}

#[test]
fn zero_tick_interval_is_invalid() {
    let mut config = Config::default();
    config.carousel.tick_interval_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn load_from_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn save_then_load_preserves_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.cache.capacity = 4;
    config.carousel.step = 20;
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn load_rejects_invalid_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[cache]\ncapacity = 0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid config"));
}

#[test]
fn load_rejects_malformed_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[cache\ncapacity = ").unwrap();

    assert!(Config::load_from(&path).is_err());
}
