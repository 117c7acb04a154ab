//! # Extension Selection
//!
//! Turns an ISA string such as `rv64imac_zicsr` into the extension
//! identifiers an opcode catalog is keyed by. Every extension yields one
//! width-agnostic identifier (`rv_m`) and one width-specific identifier
//! (`rv64_m`); the width-agnostic family comes first.

use crate::error::SpecError;
use std::fmt;
use std::str::FromStr;

/// Base integer width of an ISA string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseWidth {
    Rv32,
    Rv64,
    /// No width given (`rv_i`-style strings); only width-agnostic identifiers apply
    Unspecified,
}

impl BaseWidth {
    /// Prefix of width-specific extension identifiers
    pub const fn prefix(self) -> &'static str {
        match self {
            BaseWidth::Rv32 => "rv32",
            BaseWidth::Rv64 => "rv64",
            BaseWidth::Unspecified => "rv",
        }
    }

    pub const fn bits(self) -> Option<u32> {
        match self {
            BaseWidth::Rv32 => Some(32),
            BaseWidth::Rv64 => Some(64),
            BaseWidth::Unspecified => None,
        }
    }
}

/// Extensions implied by the `g` shorthand
const GENERAL_LETTERS: [&str; 5] = ["i", "m", "a", "f", "d"];
const GENERAL_WORDS: [&str; 2] = ["zicsr", "zifencei"];

/// A parsed ISA string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsaString {
    base: BaseWidth,
    extensions: Vec<String>,
}

impl IsaString {
    /// Parse `rv32i`, `rv64imac_zicsr_zifencei`, `rv64gc`, ...
    ///
    /// Single letters after the width are one extension each; every
    /// `_`-separated word after the first group is a multi-letter extension.
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        let isa = text.trim().to_ascii_lowercase();
        let invalid = |reason: &str| SpecError::InvalidIsa {
            isa: text.trim().to_string(),
            reason: reason.to_string(),
        };

        let rest = isa
            .strip_prefix("rv")
            .ok_or_else(|| invalid("missing 'rv' prefix"))?;

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let base = match &rest[..digits] {
            "32" => BaseWidth::Rv32,
            "64" => BaseWidth::Rv64,
            "" => BaseWidth::Unspecified,
            _ => return Err(invalid("base width must be 32 or 64")),
        };

        let mut parts = rest[digits..].split('_');
        let letters = parts.next().unwrap_or_default();

        let mut extensions: Vec<String> = Vec::new();
        let mut push = |ext: &str| {
            if !extensions.iter().any(|e| e == ext) {
                extensions.push(ext.to_string());
            }
        };

        let mut implied_words: Vec<&str> = Vec::new();
        for c in letters.chars() {
            if !c.is_ascii_lowercase() {
                return Err(invalid("extension letters must be a-z"));
            }
            if c == 'g' {
                GENERAL_LETTERS.iter().for_each(|l| push(*l));
                implied_words.extend(GENERAL_WORDS);
            } else {
                push(c.encode_utf8(&mut [0u8; 4]));
            }
        }

        for word in parts {
            if word.is_empty() {
                continue;
            }
            if !word.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
                return Err(invalid("multi-letter extensions must be alphanumeric"));
            }
            push(word);
        }
        implied_words.into_iter().for_each(|w| push(w));

        if extensions.is_empty() {
            return Err(invalid("no extensions listed"));
        }

        Ok(Self { base, extensions })
    }

    #[inline]
    pub fn base(&self) -> BaseWidth {
        self.base
    }

    /// Extension names in the order they were requested (`g` expanded)
    #[inline]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Catalog identifiers: `rv_<ext>` for every extension, then
    /// `<width>_<ext>` for every extension, without repeats.
    pub fn extension_identifiers(&self) -> Vec<String> {
        let prefix = self.base.prefix();
        let agnostic = self.extensions.iter().map(|ext| format!("rv_{}", ext));
        let specific = self.extensions.iter().map(|ext| format!("{}_{}", prefix, ext));

        let mut identifiers: Vec<String> = Vec::with_capacity(self.extensions.len() * 2);
        for id in agnostic.chain(specific) {
            if !identifiers.contains(&id) {
                identifiers.push(id);
            }
        }
        identifiers
    }
}

impl FromStr for IsaString {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IsaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base.bits() {
            Some(bits) => write!(f, "rv{}", bits)?,
            None => write!(f, "rv")?,
        }
        let (letters, words): (Vec<&String>, Vec<&String>) =
            self.extensions.iter().partition(|ext| ext.len() == 1);
        for letter in letters {
            write!(f, "{}", letter)?;
        }
        for word in words {
            write!(f, "_{}", word)?;
        }
        Ok(())
    }
}
