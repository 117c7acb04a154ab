//! # RISC-V Encoding Table Core Types
//!
//! Value types shared by every stage of the encoding table pipeline.
//!
//! ## Key Types
//! - [`FieldRange`] / [`FieldDirectory`]: named operand fields and their bit ranges
//! - [`InstructionDefinition`]: one catalog entry (raw match, raw mask, operand fields)
//! - [`EncodingRecord`]: one compiled table row (fixed mask, match, extension tag)
//! - [`IsaString`]: turns `rv64imac` into the extension identifiers a catalog understands
//! - [`CompileConfig`]: strict/lenient policies for unknown and duplicate fields

pub mod encoding;
pub mod field;
pub mod instruction;
pub mod isa;
pub mod config;
pub mod error;

pub use field::{FieldRange, FieldDirectory};
pub use instruction::{InstructionDefinition, EncodingRecord, ExtensionTag};
pub use isa::{BaseWidth, IsaString};
pub use config::{CompileConfig, Policy};
pub use error::{RangeFault, SpecError};

/// Instruction word (all base encodings are 32 bits wide)
pub type Word = u32;

/// Width of an instruction word in bits
pub const WORD_BITS: u32 = Word::BITS;
