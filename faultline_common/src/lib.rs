//! Faultline Common Library
//!
//! Fault model shared by all Faultline crates: a flat, three-tier
//! classification of faults (fatal, checked, unchecked), the registry that
//! maps concrete fault kinds onto it, and the configuration and logging
//! plumbing around them.
//!
//! # Module Structure
//!
//! - [`category`] - `FaultCategory`, category masks and handling requirements
//! - [`kind`] - `FaultKind` and `RaisedFault`
//! - [`registry`] - `FaultRegistry` (populate once, read-only afterwards)
//! - [`config`] - TOML configuration and the fault catalog
//! - [`logging`] - tracing subscriber setup
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use faultline_common::prelude::*;
//!
//! let registry = FaultRegistry::with_standard_kinds();
//! let kind = registry.lookup(FILE_NOT_FOUND).unwrap();
//! assert!(kind.category.requires_static_declaration());
//! ```

pub mod category;
pub mod config;
pub mod consts;
pub mod kind;
pub mod logging;
pub mod prelude;
pub mod registry;
