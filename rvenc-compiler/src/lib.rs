//! # RISC-V Encoding Table Compiler
//!
//! Turns catalog [`InstructionDefinition`]s into [`EncodingRecord`]s whose
//! `fixed_mask` keeps only the bits that are constant across every encoding
//! of the instruction. A decoder can then classify a raw word with
//! `word & fixed_mask == match_bits`.
//!
//! ## Example
//!
//! ```rust
//! use rvenc_compiler::compile;
//! use rvenc_spec::{FieldDirectory, InstructionDefinition};
//!
//! let fields = FieldDirectory::from_rows([("rd", 11, 7), ("rs1", 19, 15)]).unwrap();
//! let addi = InstructionDefinition::new("addi", 0x13, 0xffff_ffff)
//!     .with_fields(["rd", "rs1"])
//!     .with_extensions(["rv_i"]);
//!
//! let table = compile(&[addi], &fields).unwrap();
//! assert_eq!(table.records()[0].fixed_mask, 0xfff0_707f);
//! assert_eq!(table.records()[0].extension_tag.as_str(), "RV_I");
//! ```
//!
//! [`InstructionDefinition`]: rvenc_spec::InstructionDefinition
//! [`EncodingRecord`]: rvenc_spec::EncodingRecord

pub mod error;
pub mod compiler;
pub mod table;
pub mod analyzer;

pub use error::{CompileError, CompileWarning, Result};
pub use compiler::{compile, fixed_mask, Compiler};
pub use table::{Compilation, EncodingTable};
pub use analyzer::{find_ambiguities, summarize_tags, Ambiguity, AmbiguityKind};
