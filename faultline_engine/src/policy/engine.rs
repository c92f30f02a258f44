//! Handling Policy Engine.
//!
//! Classifies a raised fault by category and dispatches it against the
//! handlers of a [`HandlerScope`]:
//!
//! - **Fatal** → `Abort`. Handlers are never consulted.
//! - **Checked** (must handle) → handler runs; without one, `Abort` with
//!   "unhandled checked fault". A rethrow propagates only if the scope
//!   declares the kind.
//! - **Unchecked** (optionally handled) → handler runs; without one,
//!   `Abort` naming the fault context.
//!
//! The engine holds nothing but a shared, read-only registry. It never
//! retries and never panics on a well-formed fault.

use std::sync::Arc;

use faultline_common::category::{FaultCategory, HandlingRequirement};
use faultline_common::kind::{FaultKind, RaisedFault};
use faultline_common::registry::FaultRegistry;
use static_assertions::assert_impl_all;
use tracing::{debug, info, warn};

use super::outcome::{AbortReason, Diagnostic, HandlingOutcome};
use super::scope::{DeclarationError, Handled, HandlerScope};

/// Stateless classifier over a shared fault registry.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    registry: Arc<FaultRegistry>,
}

assert_impl_all!(PolicyEngine: Send, Sync);

impl PolicyEngine {
    pub fn new(registry: Arc<FaultRegistry>) -> Self {
        Self { registry }
    }

    /// Engine over the three standard kinds.
    pub fn with_standard_kinds() -> Self {
        Self::new(Arc::new(FaultRegistry::with_standard_kinds()))
    }

    #[inline]
    pub fn registry(&self) -> &FaultRegistry {
        &self.registry
    }

    /// Registered kind of the fault, or `None` for an unknown kind.
    ///
    /// The registry is authoritative over the category carried by the fault.
    fn registered_kind(&self, fault: &RaisedFault) -> Option<&FaultKind> {
        let registered = self.registry.lookup(&fault.kind.name).ok()?;
        if registered.category != fault.kind.category {
            warn!(
                "fault {} carries category {} but is registered as {}",
                fault.kind.name, fault.kind.category, registered.category
            );
        }
        Some(registered)
    }

    /// Requirement the fault's category places on the call path.
    ///
    /// Unknown kinds are treated as `Abort`.
    pub fn requirement(&self, fault: &RaisedFault) -> HandlingRequirement {
        self.registered_kind(fault)
            .map_or(HandlingRequirement::Abort, |k| k.category.requirement())
    }

    /// Classify `fault` and dispatch it against `scope`.
    ///
    /// Consumes the fault: it is either dropped (Abort, Recovered) or
    /// returned for an outer scope (Propagated).
    pub fn classify<T>(&self, fault: RaisedFault, scope: &HandlerScope<T>) -> HandlingOutcome<T> {
        let outcome = match self.registered_kind(&fault) {
            None => HandlingOutcome::Abort(Diagnostic::new(
                &fault,
                fault.kind.category,
                AbortReason::UnknownKind,
            )),
            Some(registered) => {
                // Scope matching sees the registered kind, not the carried one.
                let fault = RaisedFault {
                    kind: registered.clone(),
                    ..fault
                };
                Self::dispatch(fault, registered.category, scope)
            }
        };

        match &outcome {
            HandlingOutcome::Abort(d) => debug!("fault aborts: {d}"),
            HandlingOutcome::Recovered(_) => debug!("fault recovered"),
            HandlingOutcome::Propagated(f) => debug!("fault propagated: {f}"),
        }
        outcome
    }

    fn dispatch<T>(
        fault: RaisedFault,
        category: FaultCategory,
        scope: &HandlerScope<T>,
    ) -> HandlingOutcome<T> {
        let abort = |fault: &RaisedFault, reason| {
            HandlingOutcome::Abort(Diagnostic::new(fault, category, reason))
        };

        match category.requirement() {
            HandlingRequirement::Abort => {
                if scope.handler_count() > 0 {
                    debug!("ignoring handlers for fatal fault {}", fault.kind.name);
                }
                abort(&fault, AbortReason::Fatal)
            }
            HandlingRequirement::MustHandle => match scope.handler_for(&fault) {
                None => abort(&fault, AbortReason::UnhandledChecked),
                Some(handler) => match handler(&fault) {
                    Handled::Recover(v) => {
                        info!("recovered from checked fault {}", fault);
                        HandlingOutcome::Recovered(v)
                    }
                    Handled::Rethrow if scope.declares(&fault.kind) => {
                        HandlingOutcome::Propagated(fault)
                    }
                    Handled::Rethrow => abort(&fault, AbortReason::UndeclaredRethrow),
                },
            },
            HandlingRequirement::OptionallyHandled => match scope.handler_for(&fault) {
                None => abort(&fault, AbortReason::UnhandledUnchecked),
                Some(handler) => match handler(&fault) {
                    Handled::Recover(v) => {
                        info!("recovered from unchecked fault {}", fault);
                        HandlingOutcome::Recovered(v)
                    }
                    Handled::Rethrow => HandlingOutcome::Propagated(fault),
                },
            },
        }
    }

    /// Static check of a call path that may raise the named kinds.
    ///
    /// Every checked kind must be caught or declared by `scope`; names the
    /// registry does not know are reported too.
    pub fn check_path<T>(
        &self,
        scope: &HandlerScope<T>,
        may_raise: &[&str],
    ) -> Result<(), Vec<DeclarationError>> {
        let mut errors = Vec::new();
        let mut kinds = Vec::with_capacity(may_raise.len());
        for name in may_raise {
            match self.registry.lookup(name) {
                Ok(kind) => kinds.push(kind),
                Err(_) => errors.push(DeclarationError::UnknownKind {
                    kind: (*name).to_string(),
                }),
            }
        }
        if let Err(undeclared) = scope.check_declarations(kinds) {
            errors.extend(undeclared);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
