//! Compiler errors and warnings

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Instruction '{instruction}' references unknown field '{field}'")]
    UnknownField { instruction: String, field: String },

    #[error("Instruction '{instruction}' has match bits 0x{stray_bits:08x} outside its fixed mask")]
    MatchOutsideMask { instruction: String, stray_bits: u32 },
}

pub type Result<T> = std::result::Result<T, CompileError>;

/// Non-fatal findings collected during a compile run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    /// Field missing from the directory; its bits were left in the mask
    UnknownField { instruction: String, field: String },

    /// Instruction lists no extensions; tagged as unclassified
    EmptyExtensionSet { instruction: String },

    /// Match has bits the fixed mask does not cover, so the record can never match
    MatchOutsideMask { instruction: String, stray_bits: u32 },
}

impl CompileWarning {
    /// Instruction the warning is about
    pub fn instruction(&self) -> &str {
        match self {
            CompileWarning::UnknownField { instruction, .. }
            | CompileWarning::EmptyExtensionSet { instruction }
            | CompileWarning::MatchOutsideMask { instruction, .. } => instruction,
        }
    }
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileWarning::UnknownField { instruction, field } => {
                write!(f, "{}: unknown field '{}', mask bits left untouched", instruction, field)
            }
            CompileWarning::EmptyExtensionSet { instruction } => {
                write!(f, "{}: no extensions listed, tagged UNKNOWN", instruction)
            }
            CompileWarning::MatchOutsideMask { instruction, stray_bits } => {
                write!(
                    f,
                    "{}: match bits 0x{:08x} fall outside the fixed mask",
                    instruction, stray_bits
                )
            }
        }
    }
}
