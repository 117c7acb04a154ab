//! Encoding table output formats

use rvenc_compiler::EncodingTable;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

use crate::error::{RenderError, Result};

/// Namespace the C++ header is emitted into unless told otherwise
pub const DEFAULT_NAMESPACE: &str = "rvpin::encoding";

/// Output syntax for a compiled table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// C++ header with a `constexpr` array
    #[default]
    Cpp,
    /// Rust source with a `const` slice
    Rust,
    /// Pretty-printed JSON array
    Json,
    /// bincode blob
    Bin,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Cpp,
        OutputFormat::Rust,
        OutputFormat::Json,
        OutputFormat::Bin,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Cpp => "cpp",
            OutputFormat::Rust => "rust",
            OutputFormat::Json => "json",
            OutputFormat::Bin => "bin",
        }
    }

    /// Usual file extension for this format
    pub const fn extension(self) -> &'static str {
        match self {
            OutputFormat::Cpp => "hpp",
            OutputFormat::Rust => "rs",
            OutputFormat::Json => "json",
            OutputFormat::Bin => "bin",
        }
    }

    #[inline]
    pub const fn is_text(self) -> bool {
        !matches!(self, OutputFormat::Bin)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cpp" | "c++" | "hpp" => Ok(OutputFormat::Cpp),
            "rust" | "rs" => Ok(OutputFormat::Rust),
            "json" => Ok(OutputFormat::Json),
            "bin" | "binary" => Ok(OutputFormat::Bin),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// `::`-separated C++ namespace path
    pub namespace: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Render `table` in the requested format
pub fn render(table: &EncodingTable, format: OutputFormat, options: &RenderOptions) -> Result<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Cpp => render_cpp(table, &options.namespace).into_bytes(),
        OutputFormat::Rust => render_rust(table).into_bytes(),
        OutputFormat::Json => render_json(table)?.into_bytes(),
        OutputFormat::Bin => render_bin(table)?,
    };
    debug!(format = %format, records = table.len(), bytes = bytes.len(), "rendered table");
    Ok(bytes)
}

/// Render straight into a writer
pub fn write_table<W: Write>(
    table: &EncodingTable,
    format: OutputFormat,
    options: &RenderOptions,
    out: &mut W,
) -> Result<()> {
    out.write_all(&render(table, format, options)?)?;
    out.flush()?;
    Ok(())
}

// ============================================================================
// C++
// ============================================================================

fn escape_c(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// C++ header: `InstructionEncoding` struct, `INSTRUCTION_ENCODINGS[]` and
/// `NUM_ENCODINGS`, nested in `namespace`
pub fn render_cpp(table: &EncodingTable, namespace: &str) -> String {
    let scopes: Vec<&str> = namespace
        .split("::")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut output = String::new();
    output.push_str("// Auto-generated RISC-V instruction encoding file\n");
    output.push_str("// DO NOT EDIT MANUALLY\n");
    output.push('\n');
    output.push_str("#pragma once\n");
    output.push_str("#include <cstdint>\n");
    output.push_str("#include <cstddef>\n");
    output.push('\n');

    for scope in &scopes {
        output.push_str(&format!("namespace {} {{\n", scope));
    }
    if !scopes.is_empty() {
        output.push('\n');
    }

    output.push_str("struct InstructionEncoding {\n");
    output.push_str("    const char* name;\n");
    output.push_str("    uint32_t mask;\n");
    output.push_str("    uint32_t match;\n");
    output.push_str("    const char* extension;\n");
    output.push_str("};\n");
    output.push('\n');

    output.push_str("constexpr InstructionEncoding INSTRUCTION_ENCODINGS[] = {\n");
    let entries: Vec<String> = table
        .iter()
        .map(|r| {
            format!(
                "    {{\"{}\", 0x{:08x}, 0x{:08x}, \"{}\"}}",
                escape_c(&r.name),
                r.fixed_mask,
                r.match_bits,
                escape_c(r.extension_tag.as_str())
            )
        })
        .collect();
    output.push_str(&entries.join(",\n"));
    output.push_str("\n};\n");
    output.push('\n');
    output.push_str(
        "constexpr size_t NUM_ENCODINGS = sizeof(INSTRUCTION_ENCODINGS) / sizeof(InstructionEncoding);\n",
    );

    if !scopes.is_empty() {
        output.push('\n');
    }
    for scope in scopes.iter().rev() {
        output.push_str(&format!("}} // namespace {}\n", scope));
    }

    output
}

// ============================================================================
// Rust
// ============================================================================

/// Rust module source with an `INSTRUCTION_ENCODINGS` slice
pub fn render_rust(table: &EncodingTable) -> String {
    let mut output = String::new();
    output.push_str("// Auto-generated RISC-V instruction encoding table\n");
    output.push_str("// DO NOT EDIT MANUALLY\n");
    output.push('\n');
    output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
    output.push_str("pub struct InstructionEncoding {\n");
    output.push_str("    pub name: &'static str,\n");
    output.push_str("    pub mask: u32,\n");
    output.push_str("    pub match_bits: u32,\n");
    output.push_str("    pub extension: &'static str,\n");
    output.push_str("}\n");
    output.push('\n');

    output.push_str("pub const INSTRUCTION_ENCODINGS: &[InstructionEncoding] = &[\n");
    for r in table {
        // Debug formatting yields a valid Rust string literal
        output.push_str(&format!(
            "    InstructionEncoding {{ name: {:?}, mask: 0x{:08x}, match_bits: 0x{:08x}, extension: {:?} }},\n",
            r.name,
            r.fixed_mask,
            r.match_bits,
            r.extension_tag.as_str()
        ));
    }
    output.push_str("];\n");
    output.push('\n');
    output.push_str("pub const NUM_ENCODINGS: usize = INSTRUCTION_ENCODINGS.len();\n");

    output
}

// ============================================================================
// Serialized
// ============================================================================

pub fn render_json(table: &EncodingTable) -> Result<String> {
    let mut json = serde_json::to_string_pretty(table)?;
    json.push('\n');
    Ok(json)
}

pub fn table_from_json(json: &str) -> Result<EncodingTable> {
    Ok(serde_json::from_str(json)?)
}

pub fn render_bin(table: &EncodingTable) -> Result<Vec<u8>> {
    Ok(bincode::serialize(table)?)
}

pub fn table_from_bin(bytes: &[u8]) -> Result<EncodingTable> {
    Ok(bincode::deserialize(bytes)?)
}
