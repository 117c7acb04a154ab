//! Opcode catalog
//!
//! Reads the `instr_dict.json` shape emitted by the riscv-opcodes tooling:
//!
//! ```text
//! {
//!   "add": {
//!     "encoding": "0000000----------000-----0110011",
//!     "variable_fields": ["rd", "rs1", "rs2"],
//!     "extension": ["rv_i"],
//!     "match": "0x33",
//!     "mask": "0xfe00707f"
//!   },
//!   ...
//! }
//! ```
//!
//! Entry order in the file is preserved; it becomes the table order.

use rvenc_spec::encoding::{format_word, parse_hex_word, pattern_to_mask_match};
use rvenc_spec::InstructionDefinition;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{LoaderError, Result};

/// Anything that can hand out instruction definitions for a set of extensions
pub trait CatalogSource {
    /// Definitions belonging to any of `extensions`, in catalog order.
    /// Pseudo-instructions are included only when `include_pseudo` is set.
    fn select(&self, extensions: &[String], include_pseudo: bool) -> Vec<InstructionDefinition>;
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    encoding: Option<String>,

    #[serde(default)]
    variable_fields: Vec<String>,

    #[serde(default, alias = "extensions")]
    extension: Vec<String>,

    #[serde(default, rename = "match")]
    match_bits: Option<String>,

    #[serde(default)]
    mask: Option<String>,

    #[serde(default)]
    is_pseudo: bool,
}

/// In-memory opcode catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: Vec<InstructionDefinition>,
}

impl Catalog {
    pub fn new(definitions: Vec<InstructionDefinition>) -> Self {
        Self { definitions }
    }

    /// Parse a JSON catalog
    pub fn from_json(text: &str) -> Result<Self> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;

        let mut definitions = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            let entry: CatalogEntry =
                serde_json::from_value(value).map_err(|e| LoaderError::InvalidCatalogEntry {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            definitions.push(resolve_entry(name, entry)?);
        }

        debug!(instructions = definitions.len(), "loaded opcode catalog");
        Ok(Self { definitions })
    }

    /// Every definition, in catalog order
    #[inline]
    pub fn definitions(&self) -> &[InstructionDefinition] {
        &self.definitions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl CatalogSource for Catalog {
    fn select(&self, extensions: &[String], include_pseudo: bool) -> Vec<InstructionDefinition> {
        self.definitions
            .iter()
            .filter(|def| include_pseudo || !def.is_pseudo)
            .filter(|def| def.belongs_to(extensions))
            .cloned()
            .collect()
    }
}

/// Turn a raw entry into a definition, deriving mask/match from the
/// encoding pattern when the hex values are absent
fn resolve_entry(name: String, entry: CatalogEntry) -> Result<InstructionDefinition> {
    let invalid = |message: String| LoaderError::InvalidCatalogEntry {
        name: name.clone(),
        message,
    };

    let from_pattern = match &entry.encoding {
        Some(pattern) => Some(
            pattern_to_mask_match(pattern)
                .ok_or_else(|| invalid(format!("invalid encoding pattern '{}'", pattern)))?,
        ),
        None => None,
    };

    let hex = |field: &str, text: &Option<String>| -> Result<Option<u32>> {
        match text {
            Some(text) => parse_hex_word(text)
                .map(Some)
                .ok_or_else(|| invalid(format!("{} '{}' is not a hex word", field, text))),
            None => Ok(None),
        }
    };
    let match_hex = hex("match", &entry.match_bits)?;
    let mask_hex = hex("mask", &entry.mask)?;

    let (raw_mask, raw_match) = match (mask_hex, match_hex, from_pattern) {
        (Some(mask), Some(bits), Some((pattern_mask, pattern_bits))) => {
            if (mask, bits) != (pattern_mask, pattern_bits) {
                warn!(
                    instruction = %name,
                    mask = %format_word(mask),
                    pattern_mask = %format_word(pattern_mask),
                    "mask/match disagree with encoding pattern, using the hex values"
                );
            }
            (mask, bits)
        }
        (Some(mask), Some(bits), None) => (mask, bits),
        (_, _, Some(pair)) => pair,
        _ => return Err(invalid("needs either match and mask or an encoding pattern".to_string())),
    };

    let mut definition = InstructionDefinition::new(name, raw_match, raw_mask)
        .with_fields(entry.variable_fields)
        .with_extensions(entry.extension);
    definition.encoding = entry.encoding;
    definition.is_pseudo = entry.is_pseudo;
    Ok(definition)
}
