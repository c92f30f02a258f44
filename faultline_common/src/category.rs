//! Fault category model.
//!
//! Three tiers, mirroring the `Throwable` split of exception-based runtimes:
//!
//! | Category               | Throwable class    | Recoverable | Must declare |
//! |------------------------|--------------------|-------------|--------------|
//! | `Fatal`                | `Error`            | no          | no           |
//! | `CheckedRecoverable`   | `Exception`        | yes         | yes          |
//! | `UncheckedRecoverable` | `RuntimeException` | yes         | no           |
//!
//! `UncheckedRecoverable` is a subcategory of `CheckedRecoverable`, so a
//! catch clause for the checked tier also catches unchecked faults. `Fatal`
//! relates only to itself.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Classification tier of a fault kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaultCategory {
    /// No local recovery possible; the process must terminate.
    #[serde(rename = "fatal", alias = "Error")]
    Fatal,
    /// Call paths must declare handling before the fault may occur.
    #[serde(rename = "checked", alias = "Exception")]
    CheckedRecoverable,
    /// Caused by caller logic; declaring it is optional.
    #[serde(rename = "unchecked", alias = "RuntimeException")]
    UncheckedRecoverable,
}

impl FaultCategory {
    /// Every category, in severity order.
    pub const ALL: [Self; 3] = [
        Self::Fatal,
        Self::CheckedRecoverable,
        Self::UncheckedRecoverable,
    ];

    /// True for both recoverable tiers, false for `Fatal`.
    #[inline]
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Self::Fatal)
    }

    /// True only for `CheckedRecoverable`.
    #[inline]
    pub const fn requires_static_declaration(self) -> bool {
        matches!(self, Self::CheckedRecoverable)
    }

    /// Reflexive subtype relation. `UncheckedRecoverable <: CheckedRecoverable`.
    pub const fn is_subcategory_of(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Fatal, Self::Fatal)
                | (Self::CheckedRecoverable, Self::CheckedRecoverable)
                | (Self::UncheckedRecoverable, Self::UncheckedRecoverable)
                | (Self::UncheckedRecoverable, Self::CheckedRecoverable)
        )
    }

    /// Single-bit mask for this category.
    #[inline]
    pub const fn mask(self) -> CategoryMask {
        match self {
            Self::Fatal => CategoryMask::FATAL,
            Self::CheckedRecoverable => CategoryMask::CHECKED,
            Self::UncheckedRecoverable => CategoryMask::UNCHECKED,
        }
    }

    /// Mask of this category and every category it is a subcategory of.
    pub const fn ancestor_mask(self) -> CategoryMask {
        match self {
            Self::Fatal => CategoryMask::FATAL,
            Self::CheckedRecoverable => CategoryMask::CHECKED,
            Self::UncheckedRecoverable => CategoryMask::from_bits_truncate(
                CategoryMask::UNCHECKED.bits() | CategoryMask::CHECKED.bits(),
            ),
        }
    }

    /// Handling requirement imposed on call paths by this category.
    pub const fn requirement(self) -> HandlingRequirement {
        match self {
            Self::Fatal => HandlingRequirement::Abort,
            Self::CheckedRecoverable => HandlingRequirement::MustHandle,
            Self::UncheckedRecoverable => HandlingRequirement::OptionallyHandled,
        }
    }

    /// Name of the matching class in the `Throwable` hierarchy.
    pub const fn throwable_name(self) -> &'static str {
        match self {
            Self::Fatal => "Error",
            Self::CheckedRecoverable => "Exception",
            Self::UncheckedRecoverable => "RuntimeException",
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::CheckedRecoverable => "checked",
            Self::UncheckedRecoverable => "unchecked",
        }
    }
}

impl fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaultCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fatal" | "Error" => Ok(Self::Fatal),
            "checked" | "Exception" => Ok(Self::CheckedRecoverable),
            "unchecked" | "RuntimeException" => Ok(Self::UncheckedRecoverable),
            other => Err(format!("unknown fault category '{other}'")),
        }
    }
}

/// What a call path owes a fault of a given category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlingRequirement {
    /// Terminate after surfacing a diagnostic; no handler is consulted.
    Abort,
    /// A handler must be present on the path, otherwise abort.
    MustHandle,
    /// A handler may be present; without one the fault aborts.
    OptionallyHandled,
}

bitflags! {
    /// Set of fault categories, used by category-wide catch clauses.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategoryMask: u8 {
        /// `FaultCategory::Fatal`.
        const FATAL     = 0x01;
        /// `FaultCategory::CheckedRecoverable`.
        const CHECKED   = 0x02;
        /// `FaultCategory::UncheckedRecoverable`.
        const UNCHECKED = 0x04;
    }
}

impl CategoryMask {
    /// Categories eligible for local recovery.
    pub const RECOVERABLE_MASK: Self =
        Self::from_bits_truncate(Self::CHECKED.bits() | Self::UNCHECKED.bits());

    /// Categories that must be statically declared.
    pub const DECLARED_MASK: Self = Self::CHECKED;

    /// True if a catch clause over this mask catches a fault of `category`.
    ///
    /// Follows the subtype relation. Fatal faults are never caught.
    #[inline]
    pub const fn catches(&self, category: FaultCategory) -> bool {
        category.is_recoverable() && self.intersects(category.ancestor_mask())
    }
}

impl Default for CategoryMask {
    fn default() -> Self {
        Self::empty()
    }
}
