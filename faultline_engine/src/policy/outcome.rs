//! Handling outcomes, abort diagnostics and the per-fault lifecycle.
//!
//! ## Lifecycle
//!
//! ```text
//! Raised ──Classify──▶ Classified ──Abort────▶ Aborted
//!                                 ├─Recover──▶ Recovered
//!                                 └─Propagate▶ Propagated
//! ```
//!
//! Terminal states never transition again.

use std::fmt;

use faultline_common::category::FaultCategory;
use faultline_common::consts::ABORT_EXIT_CODE;
use faultline_common::kind::RaisedFault;
use thiserror::Error;
use tracing::error;

// ─── Diagnostic ─────────────────────────────────────────────────────

/// Why a fault ended in `Abort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// Fatal category; recovery is never attempted.
    Fatal,
    /// Checked fault with no handler on the path.
    UnhandledChecked,
    /// Checked fault rethrown by a handler on a path that does not declare it.
    UndeclaredRethrow,
    /// Unchecked fault with no handler on the path.
    UnhandledUnchecked,
    /// The fault's kind is not in the engine's registry.
    UnknownKind,
}

/// Message surfaced before the process terminates on `Abort`.
///
/// Always names the fault kind and the context it was raised with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: String,
    pub category: FaultCategory,
    pub context: String,
    pub reason: AbortReason,
}

impl Diagnostic {
    pub fn new(fault: &RaisedFault, category: FaultCategory, reason: AbortReason) -> Self {
        Self {
            kind: fault.kind.name.clone(),
            category,
            context: fault.context.clone(),
            reason,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { kind, context, .. } = self;
        match self.reason {
            AbortReason::Fatal => {
                write!(f, "fatal fault {kind} at {context}: no recovery attempted")
            }
            AbortReason::UnhandledChecked => {
                write!(f, "unhandled checked fault {kind} at {context}")
            }
            AbortReason::UndeclaredRethrow => write!(
                f,
                "unhandled checked fault {kind} at {context}: rethrown on a path that does not declare it"
            ),
            AbortReason::UnhandledUnchecked => {
                write!(f, "unhandled unchecked fault {kind} at {context}")
            }
            AbortReason::UnknownKind => write!(f, "unknown fault kind {kind} at {context}"),
        }
    }
}

// ─── Outcome ────────────────────────────────────────────────────────

/// Result of classifying and dispatching one raised fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlingOutcome<T> {
    /// Terminal: the process must stop after surfacing the diagnostic.
    Abort(Diagnostic),
    /// A handler recovered and produced a value.
    Recovered(T),
    /// A handler rethrew; an outer scope may classify the fault again.
    Propagated(RaisedFault),
}

/// A non-recovered outcome, as an error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unrecovered {
    #[error("{0}")]
    Aborted(Diagnostic),
    #[error("propagated {0}")]
    Propagated(RaisedFault),
}

impl<T> HandlingOutcome<T> {
    /// Terminal lifecycle state this outcome corresponds to.
    pub const fn state(&self) -> FaultState {
        match self {
            Self::Abort(_) => FaultState::Aborted,
            Self::Recovered(_) => FaultState::Recovered,
            Self::Propagated(_) => FaultState::Propagated,
        }
    }

    /// Lifecycle event that moves a classified fault to this outcome.
    pub const fn event(&self) -> FaultEvent {
        match self {
            Self::Abort(_) => FaultEvent::Abort,
            Self::Recovered(_) => FaultEvent::Recover,
            Self::Propagated(_) => FaultEvent::Propagate,
        }
    }

    #[inline]
    pub const fn is_abort(&self) -> bool {
        matches!(self, Self::Abort(_))
    }

    #[inline]
    pub const fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }

    #[inline]
    pub const fn is_propagated(&self) -> bool {
        matches!(self, Self::Propagated(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Abort(d) => Some(d),
            _ => None,
        }
    }

    /// The recovered value, if any.
    pub fn recovered(self) -> Option<T> {
        match self {
            Self::Recovered(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<T, Unrecovered> {
        match self {
            Self::Recovered(v) => Ok(v),
            Self::Abort(d) => Err(Unrecovered::Aborted(d)),
            Self::Propagated(f) => Err(Unrecovered::Propagated(f)),
        }
    }

    /// Act on the outcome the way a top-level caller must.
    ///
    /// `Abort` logs the diagnostic, prints it to stderr and terminates the
    /// process with [`ABORT_EXIT_CODE`]. `Propagated` hands the fault back.
    pub fn resolve_or_exit(self) -> Result<T, RaisedFault> {
        match self {
            Self::Recovered(v) => Ok(v),
            Self::Propagated(f) => Err(f),
            Self::Abort(d) => {
                error!("aborting: {d}");
                eprintln!("{d}");
                std::process::exit(ABORT_EXIT_CODE);
            }
        }
    }
}

// ─── Lifecycle ──────────────────────────────────────────────────────

/// State of one raised fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultState {
    Raised,
    Classified,
    Aborted,
    Recovered,
    Propagated,
}

impl FaultState {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Aborted | Self::Recovered | Self::Propagated)
    }
}

/// Event driving a [`FaultLifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultEvent {
    Classify,
    Abort,
    Recover,
    Propagate,
}

/// Result of a lifecycle transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition succeeded — new state.
    Ok(FaultState),
    /// Transition rejected — reason.
    Rejected(&'static str),
}

/// Lifecycle tracker for a single fault instance.
#[derive(Debug, Clone)]
pub struct FaultLifecycle {
    state: FaultState,
}

impl FaultLifecycle {
    /// A freshly raised fault.
    pub const fn new() -> Self {
        Self {
            state: FaultState::Raised,
        }
    }

    #[inline]
    pub const fn state(&self) -> FaultState {
        self.state
    }

    /// Attempt a transition given an event.
    pub fn handle_event(&mut self, event: FaultEvent) -> TransitionResult {
        use FaultEvent::*;
        use FaultState::*;

        let next = match (self.state, event) {
            (Raised, Classify) => Classified,
            (Classified, Abort) => Aborted,
            (Classified, Recover) => Recovered,
            (Classified, Propagate) => Propagated,
            (s, _) if s.is_terminal() => {
                return TransitionResult::Rejected("fault already reached a terminal state");
            }
            (Raised, _) => return TransitionResult::Rejected("fault must be classified first"),
            (Classified, Classify) => {
                return TransitionResult::Rejected("fault is already classified");
            }
            _ => return TransitionResult::Rejected("invalid fault transition"),
        };
        self.state = next;
        TransitionResult::Ok(next)
    }
}

impl Default for FaultLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
