//! End-to-end tests for the rvenc toolchain
//!
//! These tests run the complete workflow over the bundled data:
//! 1. Load the field directory and the catalog
//! 2. Select the instructions of an ISA string
//! 3. Compile fixed masks
//! 4. Render the table and decode words with it

use rvenc_compiler::{compile, Compiler, EncodingTable};
use rvenc_loader::{load_fields, Catalog, CatalogSource};
use rvenc_render::{render, table_from_json, OutputFormat, RenderOptions, TableDecoder};
use rvenc_spec::{CompileConfig, ExtensionTag, IsaString};

const ARG_LUT: &str = include_str!("../data/arg_lut.csv");
const INSTR_DICT: &str = include_str!("../data/instr_dict.json");

fn build(isa: &str, include_pseudo: bool) -> EncodingTable {
    let fields = load_fields(ARG_LUT, &CompileConfig::default()).expect("field directory");
    let catalog = Catalog::from_json(INSTR_DICT).expect("catalog");
    let isa = IsaString::parse(isa).expect("isa");
    let selected = catalog.select(&isa.extension_identifiers(), include_pseudo);
    compile(&selected, &fields).expect("compile")
}

// ============================================================================
// Compile Tests
// ============================================================================

#[test]
fn test_rv32i_table() {
    let table = build("rv32i", false);

    assert_eq!(table.len(), 40);
    assert_eq!(table.records().first().unwrap().name, "lui");
    assert_eq!(table.records().last().unwrap().name, "srai");

    let add = table.get("add").unwrap();
    assert_eq!(add.fixed_mask, 0xfe00_707f);
    assert_eq!(add.match_bits, 0x0000_0033);
    assert_eq!(add.extension_tag, ExtensionTag::Named("RV_I".to_string()));
}

#[test]
fn test_rv64g_picks_up_csr_words() {
    // g expands to imafd plus zicsr and zifencei
    let table = build("rv64g", false);

    assert!(table.get("csrrw").is_some());
    assert!(table.get("mulw").is_some());
    assert!(table.get("ld").is_some());
    assert!(table.get("slli").is_none());
    assert_eq!(table.get("csrrw").unwrap().extension_tag.as_str(), "RV_ZICSR");
}

#[test]
fn test_pseudo_flag_only_adds_pseudo_records() {
    let without = build("rv32i", false);
    let with = build("rv32i", true);

    assert_eq!(with.len(), without.len() + 5);
    assert_eq!(&with.records()[..without.len()], without.records());
    assert!(with.get("nop").is_some());
    assert!(without.get("nop").is_none());
}

#[test]
fn test_variable_field_bits_never_in_mask() {
    let fields = load_fields(ARG_LUT, &CompileConfig::default()).unwrap();
    let catalog = Catalog::from_json(INSTR_DICT).unwrap();
    let table = compile(catalog.definitions(), &fields).unwrap();

    for (record, def) in table.iter().zip(catalog.definitions()) {
        for field in &def.variable_fields {
            let range = fields.get(field).unwrap();
            assert_eq!(
                record.fixed_mask & range.mask(),
                0,
                "{} keeps bits of {}",
                record.name,
                range
            );
        }
    }
}

// ============================================================================
// Render -> Decode Tests
// ============================================================================

#[test]
fn test_program_decodes_through_rendered_table() {
    let table = build("rv32im", false);

    // JSON is the format other tools consume; decode from the reloaded copy
    let json = render(&table, OutputFormat::Json, &RenderOptions::default()).unwrap();
    let reloaded = table_from_json(std::str::from_utf8(&json).unwrap()).unwrap();
    assert_eq!(reloaded, table);

    let program: [(u32, &str); 8] = [
        (0x00a00513, "addi"),  // li a0, 10
        (0x00100593, "addi"),  // li a1, 1
        (0x02b50633, "mul"),   // mul a2, a0, a1
        (0x40b50533, "sub"),   // sub a0, a0, a1
        (0xfe051ce3, "bne"),   // bne a0, x0, -8
        (0x00c02023, "sw"),    // sw a2, 0(x0)
        (0x02b55633, "divu"),  // divu a2, a0, a1
        (0x00000073, "ecall"),
    ];

    let decoder = TableDecoder::new(&reloaded);
    for (word, expected) in program {
        let record = decoder.decode(word).unwrap_or_else(|| panic!("0x{:08x} did not decode", word));
        assert_eq!(record.name, expected, "word 0x{:08x}", word);
    }
}

#[test]
fn test_cpp_header_lists_every_record() {
    let table = build("rv64im", true);
    let header = render(&table, OutputFormat::Cpp, &RenderOptions::default()).unwrap();
    let header = String::from_utf8(header).unwrap();

    for record in &table {
        let entry = format!(
            "{{\"{}\", 0x{:08x}, 0x{:08x}, \"{}\"}}",
            record.name, record.fixed_mask, record.match_bits, record.extension_tag
        );
        assert!(header.contains(&entry), "missing {}", entry);
    }
}

#[test]
fn test_strict_run_over_bundled_data() {
    let fields = load_fields(ARG_LUT, &CompileConfig::STRICT).unwrap();
    let catalog = Catalog::from_json(INSTR_DICT).unwrap();
    let isa = IsaString::parse("rv64im_zicsr").unwrap();
    let selected = catalog.select(&isa.extension_identifiers(), true);

    let compilation = Compiler::new(CompileConfig::STRICT)
        .compile(&selected, &fields)
        .unwrap();
    assert!(compilation.is_clean());
    assert_eq!(compilation.table.len(), 62 + 6 + 5);
}
