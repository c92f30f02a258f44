//! Prelude module for common re-exports.
//!
//! ```rust
//! use faultline_common::prelude::*;
//! ```

// ─── Fault Model ────────────────────────────────────────────────────
pub use crate::category::{CategoryMask, FaultCategory, HandlingRequirement};
pub use crate::kind::{FaultKind, RaisedFault};

// ─── Registry ───────────────────────────────────────────────────────
pub use crate::registry::{FaultRegistry, RegistryError};

// ─── Configuration & Logging ────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, FaultCatalogConfig, LogLevel, SharedConfig};
pub use crate::logging::init_logging;

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{ABORT_EXIT_CODE, FILE_NOT_FOUND, INDEX_OUT_OF_RANGE, OUT_OF_MEMORY};
