//! Word listing: classify raw instruction words against a table

use rvenc_compiler::EncodingTable;
use crate::decoder::TableDecoder;

/// Annotate each word with the record it decodes to.
///
/// `base` is the address of the first word; words are assumed 4 bytes apart.
pub fn listing(table: &EncodingTable, words: &[u32], base: u32) -> String {
    let decoder = TableDecoder::new(table);
    let mut output = String::new();

    output.push_str("; RISC-V encoding table listing\n");
    output.push_str(&format!("; Table: {} records\n", table.len()));
    output.push_str(&format!("; Words: {}\n", words.len()));
    output.push('\n');

    let mut addr = base;

    for &word in words {
        output.push_str(&format!("0x{:08x}:  ", addr));
        output.push_str(&format!("{:08x}  ", word));

        let matches = decoder.decode_all(word);
        match matches.split_first() {
            Some((first, rest)) => {
                output.push_str(&format!("{:<12} {}", first.name, first.extension_tag));
                if !rest.is_empty() {
                    let others: Vec<&str> = rest.iter().map(|r| r.name.as_str()).collect();
                    output.push_str(&format!("  ; also {}", others.join(", ")));
                }
            }
            None => output.push_str("; no matching encoding"),
        }

        output.push('\n');
        addr = addr.wrapping_add(4);
    }

    output
}
