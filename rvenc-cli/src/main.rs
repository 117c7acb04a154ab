//! `rvenc`: generate a RISC-V instruction encoding table.
//!
//! Reads an `instr_dict.json` catalog and an `arg_lut.csv` field directory,
//! selects the instructions of the requested ISA, compiles fixed masks and
//! writes the table in one of the supported output formats.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use rvenc_compiler::{find_ambiguities, summarize_tags, Compiler};
use rvenc_loader::{load_fields, Catalog, CatalogSource};
use rvenc_render::{listing, render, OutputFormat, RenderOptions, DEFAULT_NAMESPACE};
use rvenc_spec::encoding::parse_hex_word;
use rvenc_spec::{CompileConfig, IsaString, Policy};

#[derive(Parser, Debug)]
#[command(
    name = "rvenc",
    author,
    version,
    about = "Generate RISC-V instruction encoding tables",
    long_about = "Compile riscv-opcodes instruction definitions into a table of fixed masks and match values.\n\nExamples:\n  rvenc --isa rv32i --catalog instr_dict.json --fields arg_lut.csv -o encoding.hpp\n  rvenc --isa rv64im_zicsr --include-pseudo --catalog instr_dict.json --fields arg_lut.csv --format json\n  rvenc --isa rv32i --catalog instr_dict.json --fields arg_lut.csv --decode 0x007302b3 0x00000073"
)]
struct Cli {
    /// RISC-V ISA string (e.g. rv32i, rv64imac_zicsr, rv64g)
    #[arg(long, default_value = "rv32i")]
    isa: String,

    /// Include pseudo-instructions
    #[arg(long)]
    include_pseudo: bool,

    /// Instruction catalog (riscv-opcodes instr_dict.json)
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,

    /// Operand field directory (riscv-opcodes arg_lut.csv)
    #[arg(long, value_name = "FILE")]
    fields: PathBuf,

    /// Output format (cpp, rust, json, bin)
    #[arg(short, long, default_value = "cpp")]
    format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// C++ namespace for the generated header
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// JSON file with compile policies; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat every inconsistency as an error
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// Ignore every inconsistency
    #[arg(long)]
    lenient: bool,

    /// Policy for variable fields missing from the directory (allow, warn, deny)
    #[arg(long, value_name = "POLICY")]
    unknown_field: Option<Policy>,

    /// Policy for field names listed twice in the directory (allow, warn, deny)
    #[arg(long, value_name = "POLICY")]
    duplicate_field: Option<Policy>,

    /// Policy for match bits outside the fixed mask (allow, warn, deny)
    #[arg(long, value_name = "POLICY")]
    match_outside_mask: Option<Policy>,

    /// Report records that can match the same instruction word
    #[arg(long)]
    report_ambiguities: bool,

    /// Classify these instruction words against the table instead of writing it
    #[arg(long, value_name = "WORD", num_args = 1.., value_parser = parse_word)]
    decode: Vec<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_word(text: &str) -> std::result::Result<u32, String> {
    parse_hex_word(text).ok_or_else(|| format!("'{}' is not a 32-bit hex word", text))
}

impl Cli {
    /// Effective configuration: file, then preset, then individual flags
    fn compile_config(&self) -> Result<CompileConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => CompileConfig::DEFAULT,
        };

        if self.strict {
            config = CompileConfig::STRICT;
        } else if self.lenient {
            config = CompileConfig::LENIENT;
        }

        if let Some(policy) = self.unknown_field {
            config = config.with_unknown_field(policy);
        }
        if let Some(policy) = self.duplicate_field {
            config = config.with_duplicate_field(policy);
        }
        if let Some(policy) = self.match_outside_mask {
            config = config.with_match_outside_mask(policy);
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.compile_config()?;
    debug!(%config, "compile configuration");

    let isa = IsaString::parse(&cli.isa)?;
    let extensions = isa.extension_identifiers();
    info!(isa = %isa, ?extensions, "Using extensions");

    let fields_text = fs::read_to_string(&cli.fields)
        .with_context(|| format!("Failed to read field directory {}", cli.fields.display()))?;
    let fields = load_fields(&fields_text, &config)
        .with_context(|| format!("Failed to load field directory {}", cli.fields.display()))?;
    info!("Loaded {} argument positions", fields.len());

    let catalog_text = fs::read_to_string(&cli.catalog)
        .with_context(|| format!("Failed to read catalog {}", cli.catalog.display()))?;
    let catalog = Catalog::from_json(&catalog_text)
        .with_context(|| format!("Failed to load catalog {}", cli.catalog.display()))?;

    let selected = catalog.select(&extensions, cli.include_pseudo);
    if selected.is_empty() {
        warn!(isa = %isa, "no catalog entries for the requested extensions");
    }

    let compilation = Compiler::new(config).compile(&selected, &fields)?;
    let table = compilation.table;
    if !compilation.warnings.is_empty() {
        warn!("{} warnings while compiling", compilation.warnings.len());
    }
    for (tag, count) in summarize_tags(&table) {
        debug!(tag = %tag, count, "records per extension");
    }

    if cli.report_ambiguities {
        let ambiguities = find_ambiguities(&table);
        for ambiguity in &ambiguities {
            warn!("{}", ambiguity);
        }
        info!("{} ambiguous record pairs", ambiguities.len());
    }

    if !cli.decode.is_empty() {
        let text = listing(&table, &cli.decode, 0);
        io::stdout().write_all(text.as_bytes())?;
        return Ok(());
    }

    let options = RenderOptions {
        namespace: cli.namespace.clone(),
    };
    let bytes = render(&table, cli.format, &options)?;

    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                "Generated {} with {} instruction encodings for ISA {}",
                path.display(),
                table.len(),
                isa
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let base = ["rvenc", "--catalog", "instr_dict.json", "--fields", "arg_lut.csv"];
        Cli::try_parse_from(base.iter().chain(args.iter())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.isa, "rv32i");
        assert_eq!(cli.format, OutputFormat::Cpp);
        assert_eq!(cli.namespace, DEFAULT_NAMESPACE);
        assert!(!cli.include_pseudo);
        assert_eq!(cli.compile_config().unwrap(), CompileConfig::DEFAULT);
    }

    #[test]
    fn test_policy_overrides() {
        let cli = parse(&["--strict", "--unknown-field", "warn"]);
        let config = cli.compile_config().unwrap();
        assert_eq!(config.unknown_field, Policy::Warn);
        assert_eq!(config.duplicate_field, Policy::Deny);
        assert_eq!(config.match_outside_mask, Policy::Deny);

        let cli = parse(&["--match-outside-mask", "allow"]);
        assert_eq!(cli.compile_config().unwrap().match_outside_mask, Policy::Allow);
    }

    #[test]
    fn test_decode_words() {
        let cli = parse(&["--decode", "0x007302b3", "73"]);
        assert_eq!(cli.decode, vec![0x0073_02b3, 0x73]);

        let base = ["rvenc", "--catalog", "c", "--fields", "f", "--decode", "xyz"];
        assert!(Cli::try_parse_from(base).is_err());
    }

    #[test]
    fn test_bad_policy_rejected() {
        let args = ["rvenc", "--catalog", "c", "--fields", "f", "--unknown-field", "sometimes"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_strict_conflicts_with_lenient() {
        let args = ["rvenc", "--catalog", "c", "--fields", "f", "--strict", "--lenient"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
