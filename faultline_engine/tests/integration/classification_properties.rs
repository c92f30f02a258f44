//! Integration test: classification rules over generated registries.
//!
//! Validates: for any registered kind and context, fatal always aborts,
//! checked without a handler aborts as unhandled, and unchecked with a
//! handler recovers.

use std::collections::HashMap;
use std::sync::Arc;

use faultline_common::category::{CategoryMask, FaultCategory};
use faultline_common::kind::FaultKind;
use faultline_common::registry::FaultRegistry;
use faultline_engine::policy::{AbortReason, Handled, HandlerScope, HandlingOutcome, PolicyEngine};
use proptest::prelude::*;

fn catalog() -> impl Strategy<Value = HashMap<String, FaultCategory>> {
    prop::collection::hash_map(
        "[A-Za-z][A-Za-z0-9_]{0,15}",
        prop::sample::select(FaultCategory::ALL.to_vec()),
        1..16,
    )
}

fn engine_for(catalog: &HashMap<String, FaultCategory>) -> PolicyEngine {
    let mut registry = FaultRegistry::new();
    for (name, category) in catalog {
        registry
            .register(FaultKind::new(name.clone(), *category, ""))
            .unwrap();
    }
    PolicyEngine::new(Arc::new(registry))
}

fn names_in(catalog: &HashMap<String, FaultCategory>, category: FaultCategory) -> Vec<&str> {
    catalog
        .iter()
        .filter(|(_, c)| **c == category)
        .map(|(n, _)| n.as_str())
        .collect()
}

proptest! {
    #[test]
    fn fatal_always_aborts(catalog in catalog(), context in "[ -~]{1,40}") {
        let engine = engine_for(&catalog);
        let scope = HandlerScope::new()
            .catch_category(CategoryMask::all(), |_| Handled::Recover(()));
        for name in names_in(&catalog, FaultCategory::Fatal) {
            let scope = HandlerScope::new().catch(name, |_| Handled::Recover(()));
            let fault = engine.registry().raise(name, context.clone()).unwrap();
            let d = engine.classify(fault, &scope).diagnostic().cloned();
            prop_assert_eq!(d.map(|d| d.reason), Some(AbortReason::Fatal));
        }
        for name in names_in(&catalog, FaultCategory::Fatal) {
            let fault = engine.registry().raise(name, context.clone()).unwrap();
            let outcome = engine.classify(fault, &scope);
            prop_assert!(outcome.is_abort());
            prop_assert!(outcome.diagnostic().unwrap().to_string().contains(context.as_str()));
        }
    }

    #[test]
    fn checked_without_handler_is_unhandled(catalog in catalog(), context in "[ -~]{1,40}") {
        let engine = engine_for(&catalog);
        // Declaring the kind does not stand in for a handler.
        let scope: HandlerScope<()> =
            HandlerScope::new().throws_category(CategoryMask::CHECKED);
        for name in names_in(&catalog, FaultCategory::CheckedRecoverable) {
            let fault = engine.registry().raise(name, context.clone()).unwrap();
            let outcome = engine.classify(fault, &scope);
            let text = outcome.diagnostic().map(ToString::to_string).unwrap_or_default();
            prop_assert!(text.contains("unhandled checked fault"), "{}", text);
        }
    }

    #[test]
    fn unchecked_with_handler_recovers(
        catalog in catalog(),
        context in "[ -~]{1,40}",
        value in any::<u32>(),
    ) {
        let engine = engine_for(&catalog);
        for name in names_in(&catalog, FaultCategory::UncheckedRecoverable) {
            let scope = HandlerScope::new().catch(name, move |_| Handled::Recover(value));
            let fault = engine.registry().raise(name, context.clone()).unwrap();
            prop_assert_eq!(engine.classify(fault, &scope), HandlingOutcome::Recovered(value));
        }
    }
}
