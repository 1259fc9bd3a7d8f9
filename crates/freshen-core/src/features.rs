//! Capability flags declared by a backend

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Immutable capability flag set of a backend instance
///
/// Declared once at initialization and never changed afterwards. The bit
/// values are fixed so the set can be serialized across a host/plugin
/// boundary and stay interoperable between implementations.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendFeatures(u32);

impl BackendFeatures {
    /// No optional capabilities
    pub const NONE: Self = Self(0x00);
    /// The backend may emit progress reports during a check
    pub const CHECK_PROGRESS: Self = Self(0x01);
    /// `trigger_updates` may be called at all
    pub const TRIGGER_INSTALL: Self = Self(0x02);
    /// `trigger_updates` may be called with tracking requested
    pub const PARALLEL_TRIGGER: Self = Self(0x04);
    /// `create_installer` may be called
    pub const PERFORM_INSTALL: Self = Self(0x08);
    /// All defined capabilities
    pub const ALL: Self = Self(0x0F);

    /// Build a set from raw bits, dropping undefined bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every flag in `other` is present in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for BackendFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for BackendFeatures {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for BackendFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(BackendFeatures, &str); 4] = [
            (BackendFeatures::CHECK_PROGRESS, "CHECK_PROGRESS"),
            (BackendFeatures::TRIGGER_INSTALL, "TRIGGER_INSTALL"),
            (BackendFeatures::PARALLEL_TRIGGER, "PARALLEL_TRIGGER"),
            (BackendFeatures::PERFORM_INSTALL, "PERFORM_INSTALL"),
        ];

        if self.is_empty() {
            return write!(f, "BackendFeatures(NONE)");
        }

        write!(f, "BackendFeatures(")?;
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        write!(f, ")")
    }
}
