use mealbook::Config;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(Some("config/default.toml".to_owned())).expect("Failed to load config");

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.import.match_threshold, 0.34);
    assert!(config.import.create_missing);
    assert_eq!(config.observability.log_level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_defaults_without_file() {
    let config = Config::load(Some("missing.toml".to_owned())).expect("Failed to load config");

    assert!(!config.server.host.is_empty());
    assert!(config.server.port > 0);
    assert!(!config.database.url.is_empty());
    assert_eq!(config.import.fetch_timeout_secs, 15);
}
