//! Encoding Table Analyzer
//!
//! Diagnostics over a compiled table. Nothing here changes the table; a
//! decoder that takes the first matching record resolves every ambiguity by
//! catalog order anyway.

use rvenc_spec::encoding::is_subset;
use rvenc_spec::EncodingRecord;
use std::fmt;

use crate::table::EncodingTable;

/// How two records collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmbiguityKind {
    /// Same fixed mask and match bits
    Identical,
    /// Every word matching the later record also matches the earlier one,
    /// so first-match decode never returns the later record
    Shadowed,
    /// Some words match both
    Overlapping,
}

impl AmbiguityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            AmbiguityKind::Identical => "identical",
            AmbiguityKind::Shadowed => "shadowed",
            AmbiguityKind::Overlapping => "overlapping",
        }
    }
}

impl fmt::Display for AmbiguityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pair of records that can match the same word; `first` precedes `second`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub first: String,
    pub second: String,
    pub kind: AmbiguityKind,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AmbiguityKind::Shadowed => write!(f, "{} is shadowed by {}", self.second, self.first),
            kind => write!(f, "{} and {} are {}", self.first, self.second, kind),
        }
    }
}

fn classify(first: &EncodingRecord, second: &EncodingRecord) -> Option<AmbiguityKind> {
    if !first.overlaps(second) {
        return None;
    }
    if first.same_pattern(second) {
        Some(AmbiguityKind::Identical)
    } else if is_subset(first.fixed_mask, second.fixed_mask) {
        Some(AmbiguityKind::Shadowed)
    } else {
        Some(AmbiguityKind::Overlapping)
    }
}

/// Every pair of reachable records that some word matches, in table order.
///
/// Quadratic in the table size, which is fine for catalogs of a few thousand
/// entries.
pub fn find_ambiguities(table: &EncodingTable) -> Vec<Ambiguity> {
    let records = table.records();
    let mut found = Vec::new();

    for (i, first) in records.iter().enumerate() {
        for second in &records[i + 1..] {
            if let Some(kind) = classify(first, second) {
                found.push(Ambiguity {
                    first: first.name.clone(),
                    second: second.name.clone(),
                    kind,
                });
            }
        }
    }

    found
}

/// Record count per extension tag, in order of first appearance
pub fn summarize_tags(table: &EncodingTable) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for record in table {
        let tag = record.extension_tag.as_str();
        match counts.iter_mut().find(|(name, _)| name == tag) {
            Some((_, count)) => *count += 1,
            None => counts.push((tag.to_string(), 1)),
        }
    }

    counts
}
