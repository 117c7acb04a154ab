//! RISC-V Encoding Table Loaders
//!
//! Read the two inputs of the encoding table compiler: the operand field
//! directory (`arg_lut.csv` rows) and the opcode catalog (`instr_dict.json`).
//!
//! ## Example
//!
//! ```rust
//! use rvenc_loader::{load_fields, Catalog, CatalogSource};
//! use rvenc_spec::CompileConfig;
//!
//! let fields = load_fields(r#"
//!     "rd", 11, 7
//!     "rs1", 19, 15
//! "#, &CompileConfig::default()).unwrap();
//!
//! let catalog = Catalog::from_json(r#"{
//!     "addi": {"variable_fields": ["rd", "rs1", "imm12"], "extension": ["rv_i"],
//!              "match": "0x13", "mask": "0x707f"}
//! }"#).unwrap();
//!
//! let requested = vec!["rv_i".to_string(), "rv32_i".to_string()];
//! let definitions = catalog.select(&requested, false);
//! assert_eq!(fields.len(), 2);
//! assert_eq!(definitions.len(), 1);
//! ```

pub mod error;
pub mod lexer;
pub mod fields;
pub mod catalog;

pub use error::{LoaderError, Result};
pub use fields::{load_fields, parse_field_row};
pub use catalog::{Catalog, CatalogSource};
