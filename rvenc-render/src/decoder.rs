//! Table-driven instruction decoder
//!
//! Records are bucketed by the 7-bit major opcode so a lookup only scans the
//! records that could possibly match. A record whose fixed mask does not pin
//! the whole opcode lands in every bucket. Buckets hold record indices in
//! table order, so the first hit is still the highest-priority record.

use rvenc_compiler::EncodingTable;
use rvenc_spec::encoding::is_subset;
use rvenc_spec::EncodingRecord;

const OPCODE_MASK: u32 = 0x7f;
const BUCKETS: usize = OPCODE_MASK as usize + 1;

/// First-match decoder over a compiled table
#[derive(Debug, Clone)]
pub struct TableDecoder<'a> {
    records: &'a [EncodingRecord],
    buckets: Vec<Vec<usize>>,
}

impl<'a> TableDecoder<'a> {
    pub fn new(table: &'a EncodingTable) -> Self {
        Self::from_records(table.records())
    }

    pub fn from_records(records: &'a [EncodingRecord]) -> Self {
        let mut buckets = vec![Vec::new(); BUCKETS];

        for (index, record) in records.iter().enumerate() {
            if !record.is_reachable() {
                continue;
            }
            if is_subset(OPCODE_MASK, record.fixed_mask) {
                buckets[(record.match_bits & OPCODE_MASK) as usize].push(index);
            } else {
                for bucket in buckets.iter_mut() {
                    bucket.push(index);
                }
            }
        }

        Self { records, buckets }
    }

    fn candidates(&self, word: u32) -> impl Iterator<Item = &'a EncodingRecord> + '_ {
        let records = self.records;
        self.buckets[(word & OPCODE_MASK) as usize]
            .iter()
            .map(move |&index| &records[index])
            .filter(move |record| record.matches(word))
    }

    /// Highest-priority record matching `word`
    pub fn decode(&self, word: u32) -> Option<&'a EncodingRecord> {
        self.candidates(word).next()
    }

    /// Every record matching `word`, in table order
    pub fn decode_all(&self, word: u32) -> Vec<&'a EncodingRecord> {
        self.candidates(word).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
