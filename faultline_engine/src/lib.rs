//! # Faultline Engine
//!
//! Classifies raised faults and decides what happens to them.
//!
//! ## Pieces
//!
//! 1. **[`policy::PolicyEngine`]** — classify a `RaisedFault` against a
//!    [`policy::HandlerScope`] and return a [`policy::HandlingOutcome`]
//! 2. **[`policy::HandlerScope`]** — catch clauses and `throws`
//!    declarations of a call path, plus the static declaration check
//! 3. **[`probe::Probe`]** — detectors that turn the three classic failure
//!    conditions (unbounded growth, missing file, off-by-one index) into
//!    raised faults
//!
//! ## Example
//!
//! ```rust
//! use faultline_common::consts::FILE_NOT_FOUND;
//! use faultline_engine::policy::{Handled, HandlerScope, HandlingOutcome, PolicyEngine};
//!
//! let engine = PolicyEngine::with_standard_kinds();
//! let scope = HandlerScope::new().catch(FILE_NOT_FOUND, |_| Handled::Recover(String::new()));
//! let fault = engine.registry().raise(FILE_NOT_FOUND, "open notes.txt").unwrap();
//!
//! assert_eq!(engine.classify(fault, &scope), HandlingOutcome::Recovered(String::new()));
//! ```

pub mod policy;
pub mod probe;
