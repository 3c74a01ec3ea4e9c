use tempfile::TempDir;
use yamlnub::config::{Config, OutputFormat};

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.output_format, OutputFormat::Yaml);
    assert!(!config.create_backup);
    assert_eq!(config.log_filter, "warn");
}

#[test]
fn test_custom_config() {
    let config = Config {
        output_format: OutputFormat::Json,
        create_backup: true,
        log_filter: "yamlnub=trace".to_string(),
    };

    assert_eq!(config.output_format, OutputFormat::Json);
    assert!(config.create_backup);
    assert_eq!(config.log_filter, "yamlnub=trace");
}

#[test]
fn test_config_serialization() {
    let config = Config {
        create_backup: true,
        ..Config::default()
    };

    let toml_string = toml::to_string(&config).unwrap();
    assert!(toml_string.contains("output_format = \"yaml\""));
    assert!(toml_string.contains("create_backup = true"));

    let parsed: Config = toml::from_str(&toml_string).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_empty_file_is_default() {
    let parsed: Config = toml::from_str("").unwrap();
    assert_eq!(parsed, Config::default());
}

#[test]
fn test_unknown_format_is_rejected() {
    assert!(toml::from_str::<Config>("output_format = \"xml\"\n").is_err());
}

#[test]
fn test_save_to_creates_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("config.toml");

    Config::default().save_to(&path).unwrap();
    assert!(path.exists());
    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/yamlnub/config.toml"));
    }
}
