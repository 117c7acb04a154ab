//! # Encoding Table Renderers
//!
//! Consumers of a compiled [`EncodingTable`]:
//!
//! - [`TableDecoder`] classifies raw instruction words, first match wins
//! - [`render`] emits the table as a C++ header, Rust source, JSON or a
//!   bincode blob
//! - [`listing`] annotates a sequence of words with what they decode to
//!
//! ## Example
//!
//! ```rust
//! use rvenc_compiler::EncodingTable;
//! use rvenc_render::{render, OutputFormat, RenderOptions, TableDecoder};
//! use rvenc_spec::{EncodingRecord, ExtensionTag};
//!
//! let table = EncodingTable::new(vec![EncodingRecord {
//!     name: "add".to_string(),
//!     fixed_mask: 0xfe00_707f,
//!     match_bits: 0x0000_0033,
//!     extension_tag: ExtensionTag::Named("RV_I".to_string()),
//! }]);
//!
//! let decoder = TableDecoder::new(&table);
//! assert_eq!(decoder.decode(0x0073_02b3).unwrap().name, "add");
//!
//! let header = render(&table, OutputFormat::Cpp, &RenderOptions::default()).unwrap();
//! assert!(String::from_utf8(header).unwrap().contains("NUM_ENCODINGS"));
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod listing;

pub use error::{RenderError, Result};
pub use decoder::TableDecoder;
pub use formatter::{
    render, render_bin, render_cpp, render_json, render_rust, table_from_bin, table_from_json,
    write_table, OutputFormat, RenderOptions, DEFAULT_NAMESPACE,
};
pub use listing::listing;
