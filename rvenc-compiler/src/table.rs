//! # Encoding Table
//!
//! The ordered output of a compile run. Record order is catalog order, which
//! is also the priority order a first-match decoder uses.

use rvenc_spec::EncodingRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CompileWarning;

/// Ordered sequence of compiled records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodingTable {
    records: Vec<EncodingRecord>,
}

impl EncodingTable {
    pub fn new(records: Vec<EncodingRecord>) -> Self {
        Self { records }
    }

    #[inline]
    pub fn records(&self) -> &[EncodingRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EncodingRecord> {
        self.records.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with this mnemonic
    pub fn get(&self, name: &str) -> Option<&EncodingRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn into_records(self) -> Vec<EncodingRecord> {
        self.records
    }
}

impl FromIterator<EncodingRecord> for EncodingTable {
    fn from_iter<I: IntoIterator<Item = EncodingRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EncodingTable {
    type Item = &'a EncodingRecord;
    type IntoIter = std::slice::Iter<'a, EncodingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for EncodingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

/// Result of a compile run: the table plus everything reported along the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    pub table: EncodingTable,
    pub warnings: Vec<CompileWarning>,
}

impl Compilation {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
