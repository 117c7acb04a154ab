//! # Instruction Definitions and Encoding Records
//!
//! [`InstructionDefinition`] is what a catalog supplies; [`EncodingRecord`]
//! is what the compiler produces from it. A decoder classifies a raw word by
//! testing `word & fixed_mask == match_bits`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Catalog Input
// ============================================================================

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionDefinition {
    /// Mnemonic, unique within one requested extension set
    pub name: String,

    /// Bit pattern at the fixed positions
    pub raw_match: u32,

    /// Bits the catalog considers encoded; may include operand field bits
    pub raw_mask: u32,

    /// Operand fields referenced by this instruction, in catalog order
    pub variable_fields: Vec<String>,

    /// Extensions this instruction belongs to, in catalog order
    pub extensions: Vec<String>,

    /// Bit pattern string (MSB first, `-` for operand bits) when the catalog carries one
    pub encoding: Option<String>,

    /// Pseudo-instruction (alias of a real encoding)
    pub is_pseudo: bool,
}

impl InstructionDefinition {
    pub fn new(name: impl Into<String>, raw_match: u32, raw_mask: u32) -> Self {
        Self {
            name: name.into(),
            raw_match,
            raw_mask,
            variable_fields: Vec::new(),
            extensions: Vec::new(),
            encoding: None,
            is_pseudo: false,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn pseudo(mut self) -> Self {
        self.is_pseudo = true;
        self
    }

    /// First listed extension, which decides the display tag
    #[inline]
    pub fn primary_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }

    /// True if any of this instruction's extensions is in `requested`
    pub fn belongs_to<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        self.extensions
            .iter()
            .any(|ext| requested.iter().any(|r| r.as_ref() == ext))
    }
}

// ============================================================================
// Extension Tag
// ============================================================================

/// Display label for the extension group a record came from.
///
/// Cosmetic only: decode never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ExtensionTag {
    /// Canonical upper-case form of the first extension (`rv_i` → `RV_I`)
    Named(String),
    /// The instruction listed no extensions
    Unclassified,
}

impl ExtensionTag {
    /// Label printed for [`ExtensionTag::Unclassified`]
    pub const UNCLASSIFIED: &'static str = "UNKNOWN";

    /// Derive the tag from an instruction's extension list
    pub fn from_extensions<S: AsRef<str>>(extensions: &[S]) -> Self {
        match extensions.first() {
            Some(first) => ExtensionTag::Named(first.as_ref().to_uppercase()),
            None => ExtensionTag::Unclassified,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ExtensionTag::Named(tag) => tag,
            ExtensionTag::Unclassified => Self::UNCLASSIFIED,
        }
    }

    #[inline]
    pub fn is_classified(&self) -> bool {
        matches!(self, ExtensionTag::Named(_))
    }
}

impl fmt::Display for ExtensionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized as the tag text, or `null` when unclassified, so a catalog
/// extension literally named `unknown` survives a round trip
impl From<Option<String>> for ExtensionTag {
    fn from(tag: Option<String>) -> Self {
        match tag {
            Some(tag) => ExtensionTag::Named(tag),
            None => ExtensionTag::Unclassified,
        }
    }
}

impl From<ExtensionTag> for Option<String> {
    fn from(tag: ExtensionTag) -> Self {
        match tag {
            ExtensionTag::Named(tag) => Some(tag),
            ExtensionTag::Unclassified => None,
        }
    }
}

// ============================================================================
// Compiled Output
// ============================================================================

/// One row of the compiled encoding table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodingRecord {
    pub name: String,

    /// 1 only where the bit is constant for every encoding of this instruction
    pub fixed_mask: u32,

    /// The catalog's raw match value, unmodified
    #[serde(rename = "match")]
    pub match_bits: u32,

    pub extension_tag: ExtensionTag,
}

impl EncodingRecord {
    /// Test whether a raw instruction word is an encoding of this record
    #[inline]
    pub fn matches(&self, word: u32) -> bool {
        word & self.fixed_mask == self.match_bits
    }

    /// Match bits that fall outside the fixed mask.
    ///
    /// Non-zero means no word can ever satisfy [`EncodingRecord::matches`].
    #[inline]
    pub fn stray_match_bits(&self) -> u32 {
        self.match_bits & !self.fixed_mask
    }

    /// True if some word matches this record
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.stray_match_bits() == 0
    }

    /// True if both records have the same fixed mask and the same fixed bits
    #[inline]
    pub fn same_pattern(&self, other: &EncodingRecord) -> bool {
        self.fixed_mask == other.fixed_mask && self.match_bits == other.match_bits
    }

    /// True if at least one word matches both records
    pub fn overlaps(&self, other: &EncodingRecord) -> bool {
        if !self.is_reachable() || !other.is_reachable() {
            return false;
        }
        let common = self.fixed_mask & other.fixed_mask;
        (self.match_bits ^ other.match_bits) & common == 0
    }
}

impl fmt::Display for EncodingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<16} mask=0x{:08x} match=0x{:08x} {}",
            self.name, self.fixed_mask, self.match_bits, self.extension_tag
        )
    }
}
