//! Tests for configuration module

use super::*;
use crate::error::{Error, Result};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(
        config.scan.library_imports,
        vec!["github.com/prometheus/client_golang/prometheus".to_string()]
    );
    assert_eq!(config.scan.extensions, vec!["go".to_string()]);
    assert_eq!(config.scan.skip_suffixes, vec!["_test.go".to_string()]);
    assert!(config.scan.ignore_patterns.is_empty());
    assert!(!config.scan.respect_gitignore);
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [scan]
        library_imports = ["github.com/prometheus/client_golang/prometheus", "example.com/metrics"]
        ignore_patterns = ["**/vendor/**"]
        respect_gitignore = true

        [output]
        format = "json"
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(config.scan.library_imports.len(), 2);
    assert_eq!(config.scan.ignore_patterns, vec!["**/vendor/**".to_string()]);
    assert!(config.scan.respect_gitignore);
    assert_eq!(config.scan.extensions, vec!["go".to_string()]);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_from_toml_str_empty_uses_defaults() {
    let config = Config::from_toml_str("").expect("Empty TOML should parse");
    assert_eq!(config, Config::default());
}

#[test]
fn test_from_toml_str_invalid() {
    let result = Config::from_toml_str("[scan\nextensions = 3");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_from_file() {
    let file = create_temp_config_file(
        r#"
        [scan]
        skip_suffixes = ["_test.go", "_mock.go"]
    "#,
    )
    .expect("test setup failed");

    let config = Config::from_file(file.path()).expect("Failed to load config file");
    assert_eq!(
        config.scan.skip_suffixes,
        vec!["_test.go".to_string(), "_mock.go".to_string()]
    );
}

#[test]
fn test_from_file_missing_uses_defaults() {
    let config = Config::from_file(Path::new("/nonexistent/promgrep/config.toml"))
        .expect("Missing file should fall back to defaults");
    assert_eq!(config.scan, ScanConfig::default());
}

#[test]
fn test_load_explicit_missing_file_fails() {
    let result = Config::load(Some(Path::new("/nonexistent/promgrep/config.toml")));
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Config file not found"));
}

#[test]
fn test_env_overrides_file() {
    let file = create_temp_config_file(
        r#"
        [output]
        format = "text"
    "#,
    )
    .expect("test setup failed");

    let config = with_env_var("PROMGREP_OUTPUT__FORMAT", "json", || {
        Config::from_file(file.path())
    })
    .expect("Failed to load config");
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_validation_rejects_empty_library_imports() {
    let mut config = Config::default();
    config.scan.library_imports.clear();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("library_imports"));
}

#[test]
fn test_validation_rejects_blank_library_import() {
    let mut config = Config::default();
    config.scan.library_imports.push("  ".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_dotted_extension() {
    let mut config = Config::default();
    config.scan.extensions = vec![".go".to_string()];
    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("leading dot"));
}

#[test]
fn test_validation_rejects_empty_extensions() {
    let mut config = Config::default();
    config.scan.extensions.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_bad_glob() {
    let mut config = Config::default();
    config.scan.ignore_patterns = vec!["[unclosed".to_string()];
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid ignore pattern"));
}

#[test]
fn test_output_format_from_str() {
    use std::str::FromStr;
    assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
    assert!(OutputFormat::from_str("yaml").is_err());
    assert_eq!(OutputFormat::Json.to_string(), "json");
}
