//! # Error Types for the encoding table core

use thiserror::Error;

/// Why a bit range was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeFault {
    #[error("msb {msb} is below lsb {lsb}")]
    Inverted { msb: u32, lsb: u32 },

    #[error("bit index {0} is outside the 32-bit instruction word")]
    OutsideWord(u32),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    // Field directory errors
    #[error("Malformed bit range for field '{name}': {fault}")]
    MalformedRange { name: String, fault: RangeFault },

    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Empty field name")]
    EmptyFieldName,

    // Extension selection errors
    #[error("Invalid ISA string '{isa}': {reason}")]
    InvalidIsa { isa: String, reason: String },
}
