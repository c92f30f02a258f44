//! Integration test: startup from a fault catalog file.
//!
//! Validates: catalog TOML on disk → validation → registry → engine
//! classifies catalog kinds by their configured category.

use std::fs;
use std::sync::Arc;

use faultline_common::category::FaultCategory;
use faultline_common::config::{ConfigError, FaultCatalogConfig};
use faultline_common::registry::{FaultRegistry, RegistryError};
use faultline_engine::policy::{Handled, HandlerScope, HandlingOutcome, PolicyEngine};
use tempfile::TempDir;

const CATALOG_TOML: &str = r#"
include_standard = true

[shared]
log_level = "debug"
service_name = "walkthrough"

[[kinds]]
name = "StackOverflow"
category = "Error"
description = "recursion without a base case"

[[kinds]]
name = "Interrupted"
category = "Exception"

[[kinds]]
name = "NumberFormat"
category = "RuntimeException"
"#;

fn load(dir: &TempDir, content: &str) -> Result<FaultCatalogConfig, ConfigError> {
    let path = dir.path().join("faults.toml");
    fs::write(&path, content).unwrap();
    FaultCatalogConfig::load_validated(&path)
}

#[test]
fn catalog_seeds_registry() {
    let dir = TempDir::new().unwrap();
    let catalog = load(&dir, CATALOG_TOML).unwrap();
    let registry = FaultRegistry::from_config(&catalog).unwrap();

    assert_eq!(registry.len(), 6);
    assert_eq!(registry.category_of("StackOverflow"), Ok(FaultCategory::Fatal));
    assert_eq!(
        registry.category_of("Interrupted"),
        Ok(FaultCategory::CheckedRecoverable)
    );
    assert_eq!(
        registry.category_of("NumberFormat"),
        Ok(FaultCategory::UncheckedRecoverable)
    );
}

#[test]
fn catalog_kinds_follow_policy() {
    let dir = TempDir::new().unwrap();
    let catalog = load(&dir, CATALOG_TOML).unwrap();
    let engine = PolicyEngine::new(Arc::new(FaultRegistry::from_config(&catalog).unwrap()));
    let scope = HandlerScope::new().catch("NumberFormat", |_| Handled::Recover(-1i64));

    let fault = engine.registry().raise("NumberFormat", "parse \"12a\"").unwrap();
    assert_eq!(engine.classify(fault, &scope), HandlingOutcome::Recovered(-1));

    let fault = engine.registry().raise("Interrupted", "sleep").unwrap();
    assert!(engine.classify(fault, &scope).is_abort());

    let fault = engine.registry().raise("StackOverflow", "fib(1_000_000)").unwrap();
    assert!(engine.classify(fault, &scope).is_abort());
}

#[test]
fn missing_catalog_file() {
    let dir = TempDir::new().unwrap();
    let result = FaultCatalogConfig::load_validated(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}

#[test]
fn catalog_duplicate_rejected_by_validation() {
    let dir = TempDir::new().unwrap();
    let result = load(
        &dir,
        r#"
[[kinds]]
name = "A"
category = "fatal"

[[kinds]]
name = "A"
category = "unchecked"
"#,
    );
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn catalog_clash_with_standard_rejected_by_registry() {
    let dir = TempDir::new().unwrap();
    let catalog = load(
        &dir,
        r#"
[[kinds]]
name = "OutOfMemory"
category = "checked"
"#,
    )
    .unwrap();
    assert!(matches!(
        FaultRegistry::from_config(&catalog),
        Err(RegistryError::DuplicateKind(_))
    ));
}
