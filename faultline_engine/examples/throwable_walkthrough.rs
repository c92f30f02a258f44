//! Walks through the three classic failures.
//!
//! Run with `cargo run -p faultline_engine --example throwable_walkthrough`.
//! Pass a catalog path as the first argument to extend the standard kinds.
//! The last step is an unhandled fatal fault, so the process exits non-zero.

use std::path::Path;
use std::sync::Arc;

use faultline_common::config::{FaultCatalogConfig, SharedConfig};
use faultline_common::consts::FILE_NOT_FOUND;
use faultline_common::logging::init_logging;
use faultline_common::registry::FaultRegistry;
use faultline_engine::policy::{Handled, HandlerScope, PolicyEngine};
use faultline_engine::probe::{MemoryBudget, Probe};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match std::env::args().nth(1) {
        Some(path) => FaultCatalogConfig::load_validated(Path::new(&path))?,
        None => FaultCatalogConfig {
            shared: SharedConfig {
                service_name: "throwable-walkthrough".to_string(),
                ..Default::default()
            },
            ..Default::default()
        },
    };
    init_logging(&catalog.shared);

    let registry = Arc::new(FaultRegistry::from_config(&catalog)?);
    let probe = Probe::new(&registry)?;
    let engine = PolicyEngine::new(registry);

    // Checked: a missing file is caught and replaced with defaults.
    let scope = HandlerScope::new().catch(FILE_NOT_FOUND, |_| Handled::Recover(String::new()));
    let contents = match probe.require_file(Path::new("does-not-exist.txt")) {
        Ok(path) => std::fs::read_to_string(path)?,
        Err(fault) => engine.classify(fault, &scope).resolve_or_exit().unwrap_or_default(),
    };
    info!("file step finished with {} bytes", contents.len());

    // Unchecked: the off-by-one is fixed in the loop, so nothing is raised.
    let scores = [3, 1, 4, 1, 5];
    let mut total = 0;
    for i in 0..scores.len() {
        total += *probe.element_at(&scores, i).unwrap_or(&0);
    }
    info!("index step finished with total {total}");

    // Fatal: unbounded growth exhausts the budget; no handler can help.
    let fault = probe.grow_until_exhausted(&MemoryBudget::default());
    let fatal_scope: HandlerScope<()> = HandlerScope::new();
    engine.classify(fault, &fatal_scope).resolve_or_exit().ok();

    Ok(())
}
