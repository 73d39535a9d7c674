//! Tests for loading the yearly tables from disk.

mod common;

use std::sync::Arc;

use author_metrics::config::Config;
use author_metrics::error::LoadError;
use author_metrics::{DatasetLoader, DatasetStore};
use tempfile::TempDir;

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    common::write_tables(dir.path(), &common::standard_tables());
    dir
}

#[test]
fn test_load_all_configured_years() {
    let dir = fixture_dir();
    let store = DatasetStore::load(&Config::for_testing(dir.path())).unwrap();

    assert_eq!(store.years(), vec![2020, 2021, 2022, 2023]);
    assert_eq!(store.get(2023).unwrap().len(), 4);
    assert_eq!(store.total_rows(), 3 + 3 + 3 + 4);

    let jane = &store.get(2023).unwrap().records()[0];
    assert_eq!(jane.first_name, "Jane");
    assert_eq!(jane.inst_name, "tsinghua university");
    assert_eq!(jane.rank, 1001);
    assert!((jane.composite_ns - 3.5).abs() < f64::EPSILON);
    assert_eq!(jane.subfield.as_deref(), Some("Artificial Intelligence & Image Processing"));
}

#[test]
fn test_missing_file_fails_strict_load() {
    let dir = fixture_dir();
    let config = Config::for_testing(dir.path());
    std::fs::remove_file(config.dataset_path(2021)).unwrap();

    let err = DatasetStore::load(&config).unwrap_err();
    let LoadError::Incomplete { failures } = err else {
        panic!("expected incomplete load, got {err:?}");
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 2021);
}

#[test]
fn test_partial_load_drops_failed_years() {
    let dir = fixture_dir();
    let mut config = Config::for_testing(dir.path());
    std::fs::remove_file(config.dataset_path(2021)).unwrap();
    config.allow_partial_load = true;

    let store = DatasetStore::load(&config).unwrap();
    assert_eq!(store.years(), vec![2020, 2022, 2023]);
    assert!(!store.contains(2021));
}

#[test]
fn test_renamed_column_fails_load() {
    let dir = fixture_dir();
    let config = Config::for_testing(dir.path());
    let path = config.dataset_path(2022);
    let renamed = std::fs::read_to_string(&path).unwrap().replacen("np6022", "np6099", 1);
    std::fs::write(&path, renamed).unwrap();

    let err = DatasetStore::load(&config).unwrap_err();
    assert!(err.to_string().contains("np6022"), "{err}");
}

#[test]
fn test_unmapped_year_fails_load() {
    let dir = fixture_dir();
    let config = Config { years: vec![2019, 2023], ..Config::for_testing(dir.path()) };

    assert!(matches!(DatasetStore::load(&config), Err(LoadError::Incomplete { .. })));

    let partial = Config { allow_partial_load: true, ..config };
    assert_eq!(DatasetStore::load(&partial).unwrap().years(), vec![2023]);
}

#[test]
fn test_nothing_loaded_is_empty() {
    let dir = TempDir::new().unwrap();
    let config = Config { allow_partial_load: true, ..Config::for_testing(dir.path()) };

    assert!(matches!(DatasetStore::load(&config), Err(LoadError::Empty)));
}

#[tokio::test]
async fn test_loader_is_idempotent() {
    let dir = fixture_dir();
    let loader = DatasetLoader::new(Config::for_testing(dir.path()));
    assert!(loader.get().is_none());

    let first = loader.load().await.unwrap();
    // the snapshot is reused even when the files go away
    std::fs::remove_file(Config::for_testing(dir.path()).dataset_path(2020)).unwrap();
    let second = loader.load().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &loader.get().unwrap()));
}

#[tokio::test]
async fn test_loader_retries_after_failure() {
    let dir = TempDir::new().unwrap();
    let loader = DatasetLoader::new(Config::for_testing(dir.path()));

    assert!(loader.load().await.is_err());
    assert!(loader.get().is_none());

    common::write_tables(dir.path(), &common::standard_tables());
    assert_eq!(loader.load().await.unwrap().years().len(), 4);
}
