//! Integration test: concurrent classification.
//!
//! Validates: one registry and one scope shared read-only across threads
//! → every thread observes the same outcomes.

use std::sync::Arc;
use std::thread;

use faultline_common::category::CategoryMask;
use faultline_common::consts::{FILE_NOT_FOUND, INDEX_OUT_OF_RANGE, OUT_OF_MEMORY};
use faultline_common::registry::FaultRegistry;
use faultline_engine::policy::{FaultState, Handled, HandlerScope, PolicyEngine};

#[test]
fn many_threads_same_outcomes() {
    let engine = PolicyEngine::new(Arc::new(FaultRegistry::with_standard_kinds()));
    let scope: HandlerScope<usize> =
        HandlerScope::new().catch_category(CategoryMask::UNCHECKED, |f| {
            Handled::Recover(f.context.len())
        });

    let results: Vec<Vec<FaultState>> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let engine = engine.clone();
                let scope = &scope;
                s.spawn(move || {
                    (0..100)
                        .map(|i| {
                            let name = match (t + i) % 3 {
                                0 => OUT_OF_MEMORY,
                                1 => FILE_NOT_FOUND,
                                _ => INDEX_OUT_OF_RANGE,
                            };
                            let fault = engine
                                .registry()
                                .raise(name, format!("thread {t} iteration {i}"))
                                .unwrap();
                            engine.classify(fault, scope).state()
                        })
                        .collect()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (t, states) in results.iter().enumerate() {
        for (i, state) in states.iter().enumerate() {
            let expected = match (t + i) % 3 {
                0 | 1 => FaultState::Aborted,
                _ => FaultState::Recovered,
            };
            assert_eq!(*state, expected, "thread {t} iteration {i}");
        }
    }
}
