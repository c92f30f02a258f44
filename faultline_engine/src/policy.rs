//! Fault handling policy.
//!
//! Category decides the requirement, the scope decides who handles:
//! fatal → abort, checked → must be handled, unchecked → optionally handled.

pub mod engine;
pub mod outcome;
pub mod scope;

pub use engine::PolicyEngine;
pub use outcome::{
    AbortReason, Diagnostic, FaultEvent, FaultLifecycle, FaultState, HandlingOutcome,
    TransitionResult, Unrecovered,
};
pub use scope::{DeclarationError, Handled, HandlerScope};
