//! Fault Registry — name to `FaultKind` mapping.
//!
//! Populated once at startup, either from the standard kinds or from a
//! [`FaultCatalogConfig`]. Wrap it in an `Arc` afterwards; there is no
//! remove operation and every runtime accessor takes `&self`.

use std::collections::HashMap;

use static_assertions::assert_impl_all;
use thiserror::Error;
use tracing::{debug, info};

use crate::category::{CategoryMask, FaultCategory};
use crate::config::FaultCatalogConfig;
use crate::consts::{FILE_NOT_FOUND, INDEX_OUT_OF_RANGE, OUT_OF_MEMORY};
use crate::kind::{FaultKind, RaisedFault};

/// Registry misuse or lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A kind with this name is already registered.
    #[error("fault kind '{0}' is already registered")]
    DuplicateKind(String),

    /// No kind with this name is registered.
    #[error("unknown fault kind '{0}'")]
    UnknownKind(String),

    /// The kind cannot be registered as given.
    #[error("invalid fault kind: {0}")]
    InvalidKind(String),
}

/// Registry of known fault kinds, keyed by unique name.
#[derive(Debug, Clone, Default)]
pub struct FaultRegistry {
    kinds: HashMap<String, FaultKind>,
}

assert_impl_all!(FaultRegistry: Send, Sync);

impl FaultRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the three standard kinds:
    /// out-of-memory (fatal), file-not-found (checked) and
    /// index-out-of-range (unchecked).
    pub fn with_standard_kinds() -> Self {
        let mut registry = Self::new();
        for kind in standard_kinds() {
            let registered = registry.register(kind);
            debug_assert!(registered.is_ok(), "standard kind names clash: {registered:?}");
        }
        registry
    }

    /// Build a registry from a catalog, running its validation first.
    ///
    /// Returns the first duplicate or invalid kind encountered.
    pub fn from_config(config: &FaultCatalogConfig) -> Result<Self, RegistryError> {
        let mut registry = if config.include_standard {
            Self::with_standard_kinds()
        } else {
            Self::new()
        };
        for entry in &config.kinds {
            registry.register(FaultKind::new(
                entry.name.clone(),
                entry.category,
                entry.description.clone(),
            ))?;
        }
        info!(
            "FaultRegistry built: {} kinds ({} fatal, {} checked, {} unchecked)",
            registry.len(),
            registry.kinds_in(CategoryMask::FATAL).count(),
            registry.kinds_in(CategoryMask::CHECKED).count(),
            registry.kinds_in(CategoryMask::UNCHECKED).count(),
        );
        Ok(registry)
    }

    /// Register a new kind.
    ///
    /// Fails with [`RegistryError::DuplicateKind`] if the name is taken and
    /// with [`RegistryError::InvalidKind`] if the name is blank. The
    /// registry is left untouched on failure.
    pub fn register(&mut self, kind: FaultKind) -> Result<(), RegistryError> {
        if kind.name.trim().is_empty() {
            return Err(RegistryError::InvalidKind(
                "name cannot be empty".to_string(),
            ));
        }
        if self.kinds.contains_key(&kind.name) {
            return Err(RegistryError::DuplicateKind(kind.name));
        }
        debug!("registered fault kind {kind}");
        self.kinds.insert(kind.name.clone(), kind);
        Ok(())
    }

    /// Look up a kind by name.
    pub fn lookup(&self, name: &str) -> Result<&FaultKind, RegistryError> {
        self.kinds
            .get(name)
            .ok_or_else(|| RegistryError::UnknownKind(name.to_string()))
    }

    /// Raise a fault of the named kind with the given context.
    pub fn raise(
        &self,
        name: &str,
        context: impl Into<String>,
    ) -> Result<RaisedFault, RegistryError> {
        let kind = self.lookup(name)?;
        Ok(RaisedFault::new(kind.clone(), context))
    }

    /// Category of the named kind.
    pub fn category_of(&self, name: &str) -> Result<FaultCategory, RegistryError> {
        self.lookup(name).map(|k| k.category)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// All registered kinds, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &FaultKind> {
        self.kinds.values()
    }

    /// Kinds whose category is in `mask`.
    pub fn kinds_in(&self, mask: CategoryMask) -> impl Iterator<Item = &FaultKind> {
        self.kinds
            .values()
            .filter(move |k| mask.contains(k.category.mask()))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// The three kinds seeded by [`FaultRegistry::with_standard_kinds`].
pub fn standard_kinds() -> [FaultKind; 3] {
    [
        FaultKind::new(
            OUT_OF_MEMORY,
            FaultCategory::Fatal,
            "the heap cannot satisfy an allocation, e.g. an unbounded loop keeps growing a collection",
        ),
        FaultKind::new(
            FILE_NOT_FOUND,
            FaultCategory::CheckedRecoverable,
            "a required file does not exist at the given path",
        ),
        FaultKind::new(
            INDEX_OUT_OF_RANGE,
            FaultCategory::UncheckedRecoverable,
            "an index falls outside the bounds of a sequence, e.g. an off-by-one loop",
        ),
    ]
}
