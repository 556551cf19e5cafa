use std::fs;
use std::time::Duration;

use tempfile::tempdir;

use super::{ConfigError, DEFAULT_BASE_URL, GalleryConfig, load_config, save_config};

#[test]
fn defaults_are_valid() {
    let config = GalleryConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.page_size, 100);
    assert_eq!(config.debounce(), Duration::from_millis(300));
    assert_eq!(config.pagination().page_size(), 100);
}

#[test]
fn yaml_config_fills_missing_fields_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gallery.yaml");
    fs::write(&path, "base_url: https://photos.example\npage_size: 24\n").expect("write");

    let config = load_config(&path).expect("load yaml");
    assert_eq!(config.base_url, "https://photos.example");
    assert_eq!(config.page_size, 24);
    assert_eq!(config.debounce_ms, 300);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
}

#[test]
fn json_config_roundtrip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gallery.json");
    let config = GalleryConfig {
        debounce_ms: 150,
        thumbnail_size: 128,
        ..GalleryConfig::default()
    };
    save_config(&path, &config).expect("save json");
    assert_eq!(load_config(&path).expect("load json"), config);
}

#[test]
fn zero_page_size_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gallery.yml");
    fs::write(&path, "page_size: 0\n").expect("write");

    let error = load_config(&path).expect_err("must fail");
    assert!(matches!(error, ConfigError::Invalid(_)));
    assert!(error.to_string().contains("page_size"));
}

#[test]
fn base_url_needs_http_scheme() {
    let config = GalleryConfig::default().with_base_url(Some("ftp://photos".to_string()));
    assert!(config.validate().is_err());

    let config = GalleryConfig::default().with_base_url(None);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let error = load_config(dir.path().join("absent.json")).expect_err("must fail");
    assert!(matches!(error, ConfigError::Io(_)));
}
