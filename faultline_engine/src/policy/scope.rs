//! Handler scopes: the catch clauses and declarations of a call path.
//!
//! A scope is built once with the builder methods and then only read, so it
//! can be shared between threads classifying faults concurrently.

use std::collections::{HashMap, HashSet};
use std::fmt;

use faultline_common::category::CategoryMask;
use faultline_common::kind::{FaultKind, RaisedFault};
use thiserror::Error;

/// What a handler decided to do with a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled<T> {
    /// Resume with this value.
    Recover(T),
    /// Hand the fault to the enclosing scope.
    Rethrow,
}

/// Handler callback.
pub type HandlerFn<T> = Box<dyn Fn(&RaisedFault) -> Handled<T> + Send + Sync>;

/// Static declaration violation on a call path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// A checked kind the path may raise is neither caught nor declared.
    #[error("checked fault '{kind}' must be caught or declared")]
    Undeclared { kind: String },

    /// The path names a kind the registry does not know.
    #[error("unknown fault kind '{kind}'")]
    UnknownKind { kind: String },
}

/// Catch clauses and `throws` declarations present on a call path.
pub struct HandlerScope<T> {
    by_kind: HashMap<String, HandlerFn<T>>,
    by_category: Vec<(CategoryMask, HandlerFn<T>)>,
    declared_kinds: HashSet<String>,
    declared_mask: CategoryMask,
}

impl<T> HandlerScope<T> {
    /// Scope with no handlers and no declarations.
    pub fn new() -> Self {
        Self {
            by_kind: HashMap::new(),
            by_category: Vec::new(),
            declared_kinds: HashSet::new(),
            declared_mask: CategoryMask::empty(),
        }
    }

    /// Catch one kind by name. Replaces an earlier handler for the same kind.
    pub fn catch<F>(mut self, kind: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&RaisedFault) -> Handled<T> + Send + Sync + 'static,
    {
        self.by_kind.insert(kind.into(), Box::new(handler));
        self
    }

    /// Catch every recoverable fault whose category is covered by `mask`.
    ///
    /// `CategoryMask::CHECKED` also catches unchecked faults. Category
    /// handlers are tried in registration order after kind handlers.
    pub fn catch_category<F>(mut self, mask: CategoryMask, handler: F) -> Self
    where
        F: Fn(&RaisedFault) -> Handled<T> + Send + Sync + 'static,
    {
        self.by_category.push((mask, Box::new(handler)));
        self
    }

    /// Declare that this path may let `kind` escape.
    pub fn throws(mut self, kind: impl Into<String>) -> Self {
        self.declared_kinds.insert(kind.into());
        self
    }

    /// Declare every kind in the given categories.
    pub fn throws_category(mut self, mask: CategoryMask) -> Self {
        self.declared_mask |= mask;
        self
    }

    /// Handler that applies to `fault`, if any. Fatal faults never match.
    pub fn handler_for(&self, fault: &RaisedFault) -> Option<&HandlerFn<T>> {
        self.handler_for_kind(&fault.kind)
    }

    fn handler_for_kind(&self, kind: &FaultKind) -> Option<&HandlerFn<T>> {
        if !kind.category.is_recoverable() {
            return None;
        }
        self.by_kind.get(&kind.name).or_else(|| {
            self.by_category
                .iter()
                .find(|(mask, _)| mask.catches(kind.category))
                .map(|(_, h)| h)
        })
    }

    /// True if a handler on this path catches `kind`.
    pub fn catches(&self, kind: &FaultKind) -> bool {
        self.handler_for_kind(kind).is_some()
    }

    /// True if this path declares `kind`, by name or by category.
    pub fn declares(&self, kind: &FaultKind) -> bool {
        self.declared_kinds.contains(&kind.name) || self.declared_mask.catches(kind.category)
    }

    /// Check that every checked kind in `kinds` is caught or declared.
    ///
    /// Unchecked and fatal kinds need no declaration. Collects all
    /// violations instead of stopping at the first.
    pub fn check_declarations<'a>(
        &self,
        kinds: impl IntoIterator<Item = &'a FaultKind>,
    ) -> Result<(), Vec<DeclarationError>> {
        let errors: Vec<DeclarationError> = kinds
            .into_iter()
            .filter(|k| k.category.requires_static_declaration())
            .filter(|k| !self.catches(k) && !self.declares(k))
            .map(|k| DeclarationError::Undeclared {
                kind: k.name.clone(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Number of catch clauses (kind and category).
    pub fn handler_count(&self) -> usize {
        self.by_kind.len() + self.by_category.len()
    }
}

impl<T> Default for HandlerScope<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HandlerScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&String> = self.by_kind.keys().collect();
        kinds.sort();
        f.debug_struct("HandlerScope")
            .field("catch_kinds", &kinds)
            .field(
                "catch_categories",
                &self.by_category.iter().map(|(m, _)| *m).collect::<Vec<_>>(),
            )
            .field("declared_kinds", &self.declared_kinds)
            .field("declared_mask", &self.declared_mask)
            .finish()
    }
}
