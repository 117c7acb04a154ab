//! # Compile Configuration
//!
//! Policies for the three situations where the catalog or field directory is
//! inconsistent but a table can still be produced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How to react to a recoverable inconsistency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Carry on silently
    Allow,
    /// Carry on and report a warning
    Warn,
    /// Abort with an error
    Deny,
}

impl Policy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Policy::Allow => "allow",
            Policy::Warn => "warn",
            Policy::Deny => "deny",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Policy::Allow),
            "warn" => Ok(Policy::Warn),
            "deny" => Ok(Policy::Deny),
            other => Err(format!("unknown policy '{}' (expected allow, warn or deny)", other)),
        }
    }
}

/// Compiler and loader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// A variable field named by an instruction is missing from the directory
    pub unknown_field: Policy,
    /// The field directory lists the same name twice (`Allow`/`Warn` keep the last row)
    pub duplicate_field: Policy,
    /// An instruction's match value has bits set outside its fixed mask
    pub match_outside_mask: Policy,
}

impl CompileConfig {
    /// Default configuration:
    /// - Unknown fields: skipped with a warning
    /// - Duplicate fields: rejected
    /// - Match bits outside the fixed mask: warning
    pub const DEFAULT: Self = Self {
        unknown_field: Policy::Warn,
        duplicate_field: Policy::Deny,
        match_outside_mask: Policy::Warn,
    };

    /// Every inconsistency is an error
    pub const STRICT: Self = Self {
        unknown_field: Policy::Deny,
        duplicate_field: Policy::Deny,
        match_outside_mask: Policy::Deny,
    };

    /// Behaves like the historical generator: skip unknown fields, keep the
    /// last duplicate, never check match bits
    pub const LENIENT: Self = Self {
        unknown_field: Policy::Allow,
        duplicate_field: Policy::Allow,
        match_outside_mask: Policy::Allow,
    };

    pub const fn with_unknown_field(mut self, policy: Policy) -> Self {
        self.unknown_field = policy;
        self
    }

    pub const fn with_duplicate_field(mut self, policy: Policy) -> Self {
        self.duplicate_field = policy;
        self
    }

    pub const fn with_match_outside_mask(mut self, policy: Policy) -> Self {
        self.match_outside_mask = policy;
        self
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CompileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompileConfig {{ unknown_field: {}, duplicate_field: {}, match_outside_mask: {} }}",
            self.unknown_field, self.duplicate_field, self.match_outside_mask,
        )
    }
}
