//! Tests for layered config loading
//!
//! These tests run against explicit temp config files only; the real
//! global config location is never touched.

use std::fs;

use tempfile::TempDir;

use tmap::config::TmapConfig;

#[test]
fn given_no_global_file_when_loading_then_compiled_defaults() {
    // Act
    let config = TmapConfig::load_from(None).unwrap();

    // Assert
    assert_eq!(config.canvas.width, 1024);
    assert_eq!(config.canvas.height, 768);
    assert!(config.papers.by_year);
    assert!(config.papers.dataset.is_none());
}

#[test]
fn given_global_file_when_loading_then_it_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tmap.toml");
    fs::write(
        &path,
        r#"
[canvas]
width = 640

[papers]
by_year = false
dataset = "/data/papers.csv"
"#,
    )
    .unwrap();

    // Act
    let config = TmapConfig::load_from(Some(&path)).unwrap();

    // Assert: specified keys override, the rest keep defaults
    assert_eq!(config.canvas.width, 640);
    assert_eq!(config.canvas.height, 768);
    assert!(!config.papers.by_year);
    assert_eq!(
        config.papers.dataset.as_deref(),
        Some(std::path::Path::new("/data/papers.csv"))
    );
}

#[test]
fn given_missing_global_file_when_loading_then_defaults_survive() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("does-not-exist.toml");

    let config = TmapConfig::load_from(Some(&path)).unwrap();

    assert_eq!(config, TmapConfig::default());
}
