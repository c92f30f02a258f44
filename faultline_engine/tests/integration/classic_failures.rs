//! Integration test: the three classic failure walkthroughs.
//!
//! Validates: probe detects the condition → registry kind attached →
//! engine classifies → outcome matches the category's requirement.

use faultline_common::category::FaultCategory;
use faultline_common::consts::{FILE_NOT_FOUND, INDEX_OUT_OF_RANGE, OUT_OF_MEMORY};
use faultline_common::kind::FaultKind;
use faultline_common::registry::{FaultRegistry, RegistryError};
use faultline_engine::policy::{
    AbortReason, FaultState, Handled, HandlerScope, HandlingOutcome, PolicyEngine,
};
use faultline_engine::probe::{MemoryBudget, Probe};
use std::sync::Arc;
use tempfile::TempDir;

fn setup() -> (PolicyEngine, Probe) {
    let registry = Arc::new(FaultRegistry::with_standard_kinds());
    let probe = Probe::new(&registry).unwrap();
    (PolicyEngine::new(registry), probe)
}

#[test]
fn out_of_memory_always_aborts() {
    let mut registry = FaultRegistry::new();
    registry
        .register(FaultKind::new(OUT_OF_MEMORY, FaultCategory::Fatal, "heap gone"))
        .unwrap();
    let engine = PolicyEngine::new(Arc::new(registry));

    let fault = engine.registry().raise(OUT_OF_MEMORY, "heap exhausted").unwrap();
    let scope = HandlerScope::new().catch(OUT_OF_MEMORY, |_| Handled::Recover(()));
    let outcome = engine.classify(fault, &scope);

    assert_eq!(outcome.state(), FaultState::Aborted);
    let text = outcome.diagnostic().unwrap().to_string();
    assert!(text.contains("heap exhausted"));
    assert!(text.contains(OUT_OF_MEMORY));
}

#[test]
fn unbounded_loop_is_fatal() {
    let (engine, probe) = setup();
    let fault = probe.grow_until_exhausted(&MemoryBudget {
        limit_bytes: 1 << 16,
        chunk_bytes: 1 << 12,
    });
    let scope = HandlerScope::new().catch_category(
        faultline_common::category::CategoryMask::all(),
        |_| Handled::Recover(()),
    );
    let outcome = engine.classify(fault, &scope);
    assert_eq!(outcome.diagnostic().unwrap().reason, AbortReason::Fatal);
}

#[test]
fn missing_file_without_handler_aborts() {
    let (engine, probe) = setup();
    let dir = TempDir::new().unwrap();
    let fault = probe.require_file(&dir.path().join("input.txt")).unwrap_err();

    let scope: HandlerScope<String> = HandlerScope::new();
    let outcome = engine.classify(fault, &scope);
    assert!(outcome
        .diagnostic()
        .unwrap()
        .to_string()
        .contains("unhandled checked fault"));
}

#[test]
fn missing_file_with_handler_recovers_default() {
    let (engine, probe) = setup();
    let dir = TempDir::new().unwrap();
    let fault = probe.require_file(&dir.path().join("input.txt")).unwrap_err();

    let scope = HandlerScope::new().catch(FILE_NOT_FOUND, |_| {
        Handled::Recover("default contents".to_string())
    });
    let outcome = engine.classify(fault, &scope);
    assert_eq!(outcome, HandlingOutcome::Recovered("default contents".to_string()));
}

#[test]
fn off_by_one_without_handler_aborts() {
    let (engine, probe) = setup();
    let items = vec![1u8, 2, 3];
    let fault = probe.element_at(&items, items.len()).unwrap_err();

    let scope: HandlerScope<u8> = HandlerScope::new();
    let outcome = engine.classify(fault, &scope);
    let d = outcome.diagnostic().unwrap();
    assert_eq!(d.reason, AbortReason::UnhandledUnchecked);
    assert!(d.to_string().contains("index 3 out of range for length 3"));
}

#[test]
fn fixed_loop_never_raises() {
    let (_, probe) = setup();
    let items = vec![1u8, 2, 3];
    let sum: u32 = (0..items.len())
        .map(|i| *probe.element_at(&items, i).unwrap() as u32)
        .sum();
    assert_eq!(sum, 6);
}

#[test]
fn unchecked_with_handler_recovers() {
    let (engine, probe) = setup();
    let fault = probe.element_at::<u8>(&[], 0).unwrap_err();
    let scope = HandlerScope::new().catch(INDEX_OUT_OF_RANGE, |_| Handled::Recover(0u8));
    assert_eq!(engine.classify(fault, &scope), HandlingOutcome::Recovered(0));
}

#[test]
fn every_registered_kind_round_trips() {
    let registry = FaultRegistry::with_standard_kinds();
    for kind in registry.kinds() {
        assert_eq!(registry.lookup(&kind.name).unwrap(), kind);
    }
    assert_eq!(
        registry.lookup("NullPointer"),
        Err(RegistryError::UnknownKind("NullPointer".to_string()))
    );
}
