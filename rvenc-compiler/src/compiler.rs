//! Encoding table compiler
//!
//! Each definition is compiled independently:
//!
//! 1. start from the catalog's raw mask
//! 2. clear the bit range of every variable field found in the directory
//! 3. tag the record with its first extension, upper-cased
//! 4. check that the match value fits inside the resulting mask
//!
//! Clearing only ever removes bits, so the result does not depend on field
//! order and repeated or overlapping fields are harmless.

use rvenc_spec::encoding::format_word;
use rvenc_spec::{
    CompileConfig, EncodingRecord, ExtensionTag, FieldDirectory, InstructionDefinition, Policy,
};
use tracing::{debug, warn};

use crate::error::{CompileError, CompileWarning, Result};
use crate::table::{Compilation, EncodingTable};

/// Compile with the default configuration, keeping only the table.
///
/// Warnings are still logged.
pub fn compile(definitions: &[InstructionDefinition], fields: &FieldDirectory) -> Result<EncodingTable> {
    Compiler::default()
        .compile(definitions, fields)
        .map(|compilation| compilation.table)
}

/// Clear every resolvable variable field from `raw_mask`.
///
/// Returns the fixed mask and the names that had no entry in `fields`.
pub fn fixed_mask<'a, S: AsRef<str>>(
    raw_mask: u32,
    variable_fields: &'a [S],
    fields: &FieldDirectory,
) -> (u32, Vec<&'a str>) {
    let mut mask = raw_mask;
    let mut unresolved = Vec::new();

    for name in variable_fields {
        match fields.get(name.as_ref()) {
            Some(range) => mask &= !range.mask(),
            None => unresolved.push(name.as_ref()),
        }
    }

    (mask, unresolved)
}

/// Encoding table compiler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compiler {
    config: CompileConfig,
}

impl Compiler {
    pub fn new(config: CompileConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Compile every definition, in order.
    ///
    /// The first policy violation configured as [`Policy::Deny`] aborts the run.
    pub fn compile(
        &self,
        definitions: &[InstructionDefinition],
        fields: &FieldDirectory,
    ) -> Result<Compilation> {
        let mut records = Vec::with_capacity(definitions.len());
        let mut warnings = Vec::new();

        for definition in definitions {
            records.push(self.compile_one(definition, fields, &mut warnings)?);
        }

        debug!(
            records = records.len(),
            warnings = warnings.len(),
            "compiled encoding table"
        );

        Ok(Compilation {
            table: EncodingTable::new(records),
            warnings,
        })
    }

    /// Compile a single definition, appending any warnings
    pub fn compile_one(
        &self,
        definition: &InstructionDefinition,
        fields: &FieldDirectory,
        warnings: &mut Vec<CompileWarning>,
    ) -> Result<EncodingRecord> {
        let (mask, unresolved) = fixed_mask(definition.raw_mask, &definition.variable_fields, fields);

        for field in unresolved {
            match self.config.unknown_field {
                Policy::Deny => {
                    return Err(CompileError::UnknownField {
                        instruction: definition.name.clone(),
                        field: field.to_string(),
                    });
                }
                Policy::Warn => {
                    warn!(instruction = %definition.name, field, "unknown variable field, mask bits left untouched");
                    warnings.push(CompileWarning::UnknownField {
                        instruction: definition.name.clone(),
                        field: field.to_string(),
                    });
                }
                Policy::Allow => {}
            }
        }

        let extension_tag = ExtensionTag::from_extensions(&definition.extensions);
        if !extension_tag.is_classified() {
            warn!(instruction = %definition.name, "no extensions listed, tagging as unclassified");
            warnings.push(CompileWarning::EmptyExtensionSet {
                instruction: definition.name.clone(),
            });
        }

        let record = EncodingRecord {
            name: definition.name.clone(),
            fixed_mask: mask,
            match_bits: definition.raw_match,
            extension_tag,
        };

        let stray_bits = record.stray_match_bits();
        if stray_bits != 0 {
            match self.config.match_outside_mask {
                Policy::Deny => {
                    return Err(CompileError::MatchOutsideMask {
                        instruction: record.name,
                        stray_bits,
                    });
                }
                Policy::Warn => {
                    warn!(
                        instruction = %record.name,
                        stray_bits = %format_word(stray_bits),
                        "match bits outside the fixed mask, record can never match"
                    );
                    warnings.push(CompileWarning::MatchOutsideMask {
                        instruction: record.name.clone(),
                        stray_bits,
                    });
                }
                Policy::Allow => {}
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> FieldDirectory {
        FieldDirectory::from_rows([
            ("rd", 11, 7),
            ("rs1", 19, 15),
            ("rs2", 24, 20),
            ("imm12", 31, 20),
        ])
        .unwrap()
    }

    #[test]
    fn test_add_scenario() {
        // rd and rs1 bits are already clear in the raw mask
        let add = InstructionDefinition::new("add", 0x0000_0033, 0xfe00_707f)
            .with_fields(["rd", "rs1"])
            .with_extensions(["rv_i"]);

        let table = compile(&[add], &directory()).unwrap();
        let record = &table.records()[0];
        assert_eq!(record.fixed_mask, 0xfe00_707f);
        assert_eq!(record.fixed_mask & 0x0000_0f80, 0);
        assert_eq!(record.fixed_mask & 0x000f_8000, 0);
        assert_eq!(record.match_bits, 0x0000_0033);
        assert_eq!(record.extension_tag.as_str(), "RV_I");
    }

    #[test]
    fn test_fields_cleared_from_full_mask() {
        let addi = InstructionDefinition::new("addi", 0x13, 0xffff_ffff)
            .with_fields(["rd", "rs1", "imm12"])
            .with_extensions(["rv_i"]);
        let table = compile(&[addi], &directory()).unwrap();
        assert_eq!(table.records()[0].fixed_mask, 0x0000_707f);
    }

    #[test]
    fn test_no_variable_fields_keeps_raw_mask() {
        let ecall = InstructionDefinition::new("ecall", 0x73, 0xffff_ffff).with_extensions(["rv_i"]);
        let table = compile(&[ecall], &directory()).unwrap();
        assert_eq!(table.records()[0].fixed_mask, 0xffff_ffff);
    }

    #[test]
    fn test_unknown_field_lenient() {
        let def = InstructionDefinition::new("custom", 0x0b, 0xffff_ffff)
            .with_fields(["rd", "nosuchfield"])
            .with_extensions(["rv_x"]);

        let compilation = Compiler::default().compile(&[def], &directory()).unwrap();
        assert_eq!(compilation.table.records()[0].fixed_mask, 0xffff_f07f);
        assert_eq!(
            compilation.warnings,
            vec![CompileWarning::UnknownField {
                instruction: "custom".to_string(),
                field: "nosuchfield".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_field_allow_is_silent() {
        let def = InstructionDefinition::new("custom", 0x0b, 0x7f)
            .with_fields(["nosuchfield"])
            .with_extensions(["rv_x"]);
        let compiler = Compiler::new(CompileConfig::LENIENT);
        let compilation = compiler.compile(&[def], &directory()).unwrap();
        assert!(compilation.warnings.is_empty());
    }

    #[test]
    fn test_unknown_field_strict() {
        let def = InstructionDefinition::new("custom", 0x0b, 0xffff_ffff)
            .with_fields(["nosuchfield"])
            .with_extensions(["rv_x"]);

        let err = Compiler::new(CompileConfig::STRICT)
            .compile(&[def], &directory())
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownField {
                instruction: "custom".to_string(),
                field: "nosuchfield".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_extension_set() {
        let def = InstructionDefinition::new("orphan", 0x73, 0xffff_ffff);
        let compilation = Compiler::default().compile(&[def], &directory()).unwrap();
        assert_eq!(compilation.table.records()[0].extension_tag, ExtensionTag::Unclassified);
        assert_eq!(compilation.warnings.len(), 1);
    }

    #[test]
    fn test_match_inside_variable_field() {
        // match has a bit set inside rd, which is about to be cleared
        let def = InstructionDefinition::new("odd", 0x0000_0093, 0xffff_ffff)
            .with_fields(["rd"])
            .with_extensions(["rv_i"]);

        let compilation = Compiler::default().compile(&[def.clone()], &directory()).unwrap();
        assert_eq!(
            compilation.warnings,
            vec![CompileWarning::MatchOutsideMask {
                instruction: "odd".to_string(),
                stray_bits: 0x80,
            }]
        );

        let strict = CompileConfig::DEFAULT.with_match_outside_mask(Policy::Deny);
        let err = Compiler::new(strict).compile(&[def], &directory()).unwrap_err();
        assert!(matches!(err, CompileError::MatchOutsideMask { stray_bits: 0x80, .. }));
    }

    #[test]
    fn test_order_preserved() {
        let defs = vec![
            InstructionDefinition::new("sub", 0x4000_0033, 0xfe00_707f).with_extensions(["rv_i"]),
            InstructionDefinition::new("add", 0x0000_0033, 0xfe00_707f).with_extensions(["rv_i"]),
            InstructionDefinition::new("mul", 0x0200_0033, 0xfe00_707f).with_extensions(["rv_m"]),
        ];
        let table = compile(&defs, &directory()).unwrap();
        let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sub", "add", "mul"]);
    }

    #[test]
    fn test_fixed_mask_reports_unresolved() {
        let (mask, unresolved) = fixed_mask(0xffff_ffff, &["rs2", "shamt", "rd"], &directory());
        assert_eq!(mask, 0xfe0f_f07f);
        assert_eq!(unresolved, vec!["shamt"]);
    }
}
