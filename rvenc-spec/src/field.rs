//! # Operand Field Directory
//!
//! Maps operand field names (`rd`, `rs1`, `imm12`, ...) to the inclusive bit
//! range they occupy inside a 32-bit instruction word.

use crate::encoding::range_mask;
use crate::error::{RangeFault, SpecError};
use crate::WORD_BITS;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// One named operand field and its inclusive bit range
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldRange {
    name: String,
    msb: u8,
    lsb: u8,
}

impl FieldRange {
    /// Create a field range, rejecting inverted ranges and indices outside the word
    pub fn new(name: impl Into<String>, msb: u32, lsb: u32) -> Result<Self, SpecError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SpecError::EmptyFieldName);
        }

        for index in [msb, lsb] {
            if index >= WORD_BITS {
                return Err(SpecError::MalformedRange {
                    name,
                    fault: RangeFault::OutsideWord(index),
                });
            }
        }
        if msb < lsb {
            return Err(SpecError::MalformedRange {
                name,
                fault: RangeFault::Inverted { msb, lsb },
            });
        }

        Ok(Self {
            name,
            msb: msb as u8,
            lsb: lsb as u8,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn msb(&self) -> u32 {
        self.msb as u32
    }

    #[inline]
    pub fn lsb(&self) -> u32 {
        self.lsb as u32
    }

    /// Number of bits covered
    #[inline]
    pub fn width(&self) -> u32 {
        self.msb() - self.lsb() + 1
    }

    /// Word with exactly this field's bits set
    #[inline]
    pub fn mask(&self) -> u32 {
        range_mask(self.msb(), self.lsb())
    }

    /// True if the two fields share at least one bit
    #[inline]
    pub fn overlaps(&self, other: &FieldRange) -> bool {
        self.mask() & other.mask() != 0
    }
}

impl fmt::Display for FieldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}:{}]", self.name, self.msb, self.lsb)
    }
}

/// Field name → bit range, in insertion order
///
/// Built once at startup and then shared read-only by the compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDirectory {
    ranges: Vec<FieldRange>,
    index: HashMap<String, usize>,
}

impl FieldDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from in-memory `(name, msb, lsb)` rows.
    ///
    /// Rejects malformed ranges and repeated names.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = (S, u32, u32)>,
        S: Into<String>,
    {
        let mut directory = Self::new();
        for (name, msb, lsb) in rows {
            let range = FieldRange::new(name, msb, lsb)?;
            if directory.contains(range.name()) {
                return Err(SpecError::DuplicateField(range.name().to_string()));
            }
            directory.insert(range);
        }
        Ok(directory)
    }

    /// Insert a range, replacing (in place) any previous range with the same
    /// name. Returns the replaced range.
    pub fn insert(&mut self, range: FieldRange) -> Option<FieldRange> {
        match self.index.get(range.name()) {
            Some(&slot) => Some(std::mem::replace(&mut self.ranges[slot], range)),
            None => {
                self.index.insert(range.name().to_string(), self.ranges.len());
                self.ranges.push(range);
                None
            }
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&FieldRange> {
        self.index.get(name).map(|&slot| &self.ranges[slot])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate ranges in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FieldRange> {
        self.ranges.iter()
    }
}

impl<'a> IntoIterator for &'a FieldDirectory {
    type Item = &'a FieldRange;
    type IntoIter = std::slice::Iter<'a, FieldRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
