//! # Bit-Range Helpers
//!
//! Mask arithmetic shared by the field directory, the compiler and the
//! decoder. Bit indices are 0-based from the least significant bit and
//! ranges are inclusive on both ends.
//!
//! ```text
//!  31                 20 19    15 14  12 11     7 6       0
//! [       funct7/imm   ][  rs1  ][funct3][  rd   ][ opcode ]
//! ```

use crate::WORD_BITS;

// ============================================================================
// Range Masks
// ============================================================================

/// Mask with exactly bits `lsb..=msb` set.
///
/// Callers must guarantee `lsb <= msb < 32`; [`crate::FieldRange`] enforces
/// that on construction.
#[inline]
pub const fn range_mask(msb: u32, lsb: u32) -> u32 {
    let width = msb - lsb + 1;
    if width >= WORD_BITS {
        u32::MAX
    } else {
        ((1u32 << width) - 1) << lsb
    }
}

/// Clear bits `lsb..=msb` in `word`
#[inline]
pub const fn clear_range(word: u32, msb: u32, lsb: u32) -> u32 {
    word & !range_mask(msb, lsb)
}

/// Extract bits `lsb..=msb` of `word`, shifted down to bit 0
#[inline]
pub const fn extract_range(word: u32, msb: u32, lsb: u32) -> u32 {
    (word & range_mask(msb, lsb)) >> lsb
}

/// True when every set bit of `inner` is also set in `outer`
#[inline]
pub const fn is_subset(inner: u32, outer: u32) -> bool {
    inner & !outer == 0
}

// ============================================================================
// Text Forms
// ============================================================================

/// Parse a hexadecimal word as written in opcode catalogs (`0x0000707f`)
pub fn parse_hex_word(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(&digits.replace('_', ""), 16).ok()
}

/// Format a word the way generated tables print it
#[inline]
pub fn format_word(word: u32) -> String {
    format!("0x{:08x}", word)
}

/// Convert an encoding pattern (`"-------------------------0110011"`, most
/// significant bit first) into a `(mask, match)` pair.
///
/// `0` and `1` are fixed bits, `-` is a don't-care bit. Returns `None` for
/// any other character or a pattern longer than a word.
pub fn pattern_to_mask_match(pattern: &str) -> Option<(u32, u32)> {
    let len = pattern.len();
    if len == 0 || len > WORD_BITS as usize {
        return None;
    }

    let mut mask = 0u32;
    let mut bits = 0u32;
    for (i, c) in pattern.bytes().enumerate() {
        let bit = 1u32 << (len - 1 - i);
        match c {
            b'0' => mask |= bit,
            b'1' => {
                mask |= bit;
                bits |= bit;
            }
            b'-' => {}
            _ => return None,
        }
    }
    Some((mask, bits))
}
