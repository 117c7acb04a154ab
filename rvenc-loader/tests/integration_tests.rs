//! Loader tests against the bundled RISC-V data files

use rvenc_loader::{load_fields, Catalog, CatalogSource};
use rvenc_spec::{CompileConfig, IsaString};

const ARG_LUT: &str = include_str!("../../data/arg_lut.csv");
const INSTR_DICT: &str = include_str!("../../data/instr_dict.json");

// ============================================================================
// Field Directory
// ============================================================================

#[test]
fn test_load_bundled_arg_lut() {
    let fields = load_fields(ARG_LUT, &CompileConfig::default()).unwrap();
    assert_eq!(fields.len(), 37);

    let rd = fields.get("rd").unwrap();
    assert_eq!((rd.msb(), rd.lsb()), (11, 7));

    let imm20 = fields.get("imm20").unwrap();
    assert_eq!(imm20.mask(), 0xffff_f000);

    // rt and rs1 share bits 19:15
    assert!(fields.get("rt").unwrap().overlaps(fields.get("rs1").unwrap()));
}

#[test]
fn test_directory_keeps_file_order() {
    let fields = load_fields(ARG_LUT, &CompileConfig::default()).unwrap();
    let first: Vec<&str> = fields.iter().take(4).map(|f| f.name()).collect();
    assert_eq!(first, vec!["rd", "rt", "rs1", "rs2"]);
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_load_bundled_catalog() {
    let catalog = Catalog::from_json(INSTR_DICT).unwrap();
    assert_eq!(catalog.len(), 76);

    let add = catalog
        .definitions()
        .iter()
        .find(|d| d.name == "add")
        .unwrap();
    assert_eq!(add.raw_mask, 0xfe00_707f);
    assert_eq!(add.raw_match, 0x0000_0033);
    assert_eq!(add.variable_fields, vec!["rd", "rs1", "rs2"]);
    assert_eq!(add.extensions, vec!["rv_i"]);
    assert!(add.encoding.is_some());
}

#[test]
fn test_select_rv32i() {
    let catalog = Catalog::from_json(INSTR_DICT).unwrap();
    let isa = IsaString::parse("rv32i").unwrap();

    let base = catalog.select(&isa.extension_identifiers(), false);
    assert_eq!(base.len(), 40);
    assert_eq!(base.first().unwrap().name, "lui");
    assert_eq!(base.last().unwrap().name, "srai");
    assert!(base.iter().all(|d| !d.is_pseudo));

    let with_pseudo = catalog.select(&isa.extension_identifiers(), true);
    assert_eq!(with_pseudo.len(), 45);
}

#[test]
fn test_select_rv64im_excludes_rv32_only() {
    let catalog = Catalog::from_json(INSTR_DICT).unwrap();
    let isa = IsaString::parse("rv64im").unwrap();

    let selected = catalog.select(&isa.extension_identifiers(), false);
    assert_eq!(selected.len(), 62);
    assert!(selected.iter().all(|d| d.name != "slli"));
    assert!(selected.iter().any(|d| d.name == "mulw"));
}

#[test]
fn test_select_unrequested_extension_is_empty() {
    let catalog = Catalog::from_json(INSTR_DICT).unwrap();
    let selected = catalog.select(&["rv_v".to_string()], true);
    assert!(selected.is_empty());
}
