//! Fault kinds and raised fault instances.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::category::FaultCategory;

/// A concrete kind of fault and the single category it belongs to.
///
/// Immutable once created; the registry hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaultKind {
    /// Unique name within a registry (e.g. `"FileNotFound"`).
    pub name: String,
    /// Classification tier.
    pub category: FaultCategory,
    /// Human-readable explanation.
    #[serde(default)]
    pub description: String,
}

impl FaultKind {
    pub fn new(
        name: impl Into<String>,
        category: FaultCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            description: description.into(),
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}

/// One occurrence of a fault at runtime.
///
/// Consumed by the policy engine and dropped once handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaisedFault {
    /// Kind of the fault.
    pub kind: FaultKind,
    /// Where and why it happened (call site description).
    pub context: String,
    /// Wall-clock time of detection.
    pub timestamp: SystemTime,
}

impl RaisedFault {
    /// Raise a fault of `kind` now.
    pub fn new(kind: FaultKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
            timestamp: SystemTime::now(),
        }
    }

    #[inline]
    pub fn category(&self) -> FaultCategory {
        self.kind.category
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.kind.name
    }
}

impl fmt::Display for RaisedFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.context)
    }
}
