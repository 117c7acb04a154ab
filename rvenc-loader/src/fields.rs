//! Field directory loader

use logos::Logos;
use rvenc_spec::{CompileConfig, FieldDirectory, FieldRange, Policy, SpecError, WORD_BITS};
use tracing::{debug, warn};

use crate::error::{LoaderError, Result};
use crate::lexer::Token;

/// Load a field directory from `arg_lut.csv`-style text.
///
/// Each non-blank row is `name, msb, lsb`. Repeated names follow
/// `config.duplicate_field`; `Allow` and `Warn` keep the last row.
pub fn load_fields(source: &str, config: &CompileConfig) -> Result<FieldDirectory> {
    let mut directory = FieldDirectory::new();

    for (line, tokens) in split_rows(source)? {
        let range = parse_field_row(line, &tokens)?;

        if directory.contains(range.name()) {
            match config.duplicate_field {
                Policy::Deny => {
                    return Err(LoaderError::DuplicateField {
                        line,
                        name: range.name().to_string(),
                    });
                }
                Policy::Warn => {
                    warn!(field = range.name(), line, "duplicate field definition, keeping the last one");
                }
                Policy::Allow => {}
            }
        }
        directory.insert(range);
    }

    debug!(fields = directory.len(), "loaded field directory");
    Ok(directory)
}

/// Parse the tokens of one row into a field range
pub fn parse_field_row(line: usize, tokens: &[Token]) -> Result<FieldRange> {
    let columns: Vec<&[Token]> = tokens.split(|t| *t == Token::Comma).collect();
    if columns.len() > 3 {
        return Err(LoaderError::MalformedRow {
            line,
            message: format!("expected 3 columns, found {}", columns.len()),
        });
    }

    let name = match columns[0] {
        [Token::Quoted(name)] | [Token::Identifier(name)] if !name.is_empty() => name.clone(),
        _ => {
            return Err(LoaderError::MalformedRow {
                line,
                message: "expected a field name in the first column".to_string(),
            })
        }
    };

    let msb = parse_index(line, &name, "msb", columns.get(1).copied())?;
    let lsb = parse_index(line, &name, "lsb", columns.get(2).copied())?;

    FieldRange::new(name, msb, lsb).map_err(|err| match err {
        SpecError::MalformedRange { name, fault } => LoaderError::MalformedRange {
            line,
            name,
            reason: fault.to_string(),
        },
        other => LoaderError::MalformedRow {
            line,
            message: other.to_string(),
        },
    })
}

fn parse_index(line: usize, name: &str, which: &str, column: Option<&[Token]>) -> Result<u32> {
    let malformed = |reason: String| LoaderError::MalformedRange {
        line,
        name: name.to_string(),
        reason,
    };

    match column {
        None | Some([]) => Err(malformed(format!("missing {}", which))),
        Some([Token::Number(text)]) if text.starts_with('-') => {
            Err(malformed(format!("{} {} is negative", which, text)))
        }
        Some([Token::Number(text)]) => match text.parse::<u32>() {
            Ok(index) if index < WORD_BITS => Ok(index),
            _ => Err(malformed(format!(
                "{} {} is outside the 32-bit instruction word",
                which, text
            ))),
        },
        Some(other) => {
            let text: Vec<String> = other.iter().map(Token::to_string).collect();
            Err(malformed(format!("{} '{}' is not a bit index", which, text.join(" "))))
        }
    }
}

/// Group tokens into non-empty rows, keeping 1-based line numbers
fn split_rows(source: &str) -> Result<Vec<(usize, Vec<Token>)>> {
    let mut rows = Vec::new();
    let mut current = Vec::new();
    let mut line = 1;

    let mut lexer = Token::lexer(source);
    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Newline) => {
                if !current.is_empty() {
                    rows.push((line, std::mem::take(&mut current)));
                }
                line += 1;
            }
            Ok(token) => current.push(token),
            Err(()) => {
                return Err(LoaderError::MalformedRow {
                    line,
                    message: format!("unexpected input '{}'", lexer.slice()),
                });
            }
        }
    }
    if !current.is_empty() {
        rows.push((line, current));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_simple() {
        let source = "\"rd\",11,7\n\"rs1\",19,15\n\"rs2\",24,20\n";
        let dir = load_fields(source, &CompileConfig::default()).unwrap();
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.get("rs2").unwrap().mask(), 0x01f0_0000);
    }

    #[test]
    fn test_blank_lines_and_comments() {
        let source = r#"
            # register operands
            "rd", 11, 7

            "rs1", 19, 15   # first source
        "#;
        let dir = load_fields(source, &CompileConfig::default()).unwrap();
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn test_inverted_range_reports_line() {
        let source = "\"rd\",11,7\n\"rs1\",15,19\n";
        let err = load_fields(source, &CompileConfig::default()).unwrap_err();
        match err {
            LoaderError::MalformedRange { line, name, reason } => {
                assert_eq!(line, 2);
                assert_eq!(name, "rs1");
                assert!(reason.contains("below"));
            }
            other => panic!("Expected MalformedRange, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_index() {
        let err = load_fields("\"rd\",eleven,7", &CompileConfig::default()).unwrap_err();
        assert!(matches!(err, LoaderError::MalformedRange { line: 1, .. }));
        assert!(err.to_string().contains("not a bit index"));
    }

    #[test]
    fn test_missing_index() {
        let err = load_fields("\"rd\",11", &CompileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("missing lsb"));

        let err = load_fields("\"rd\",,7", &CompileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("missing msb"));
    }

    #[test]
    fn test_duplicate_policies() {
        let source = "\"rd\",11,7\n\"rd\",12,8\n";

        let err = load_fields(source, &CompileConfig::DEFAULT).unwrap_err();
        assert!(matches!(err, LoaderError::DuplicateField { line: 2, .. }));

        let config = CompileConfig::DEFAULT.with_duplicate_field(Policy::Warn);
        let dir = load_fields(source, &config).unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get("rd").unwrap().lsb(), 8);
    }

    #[test]
    fn test_extra_column_rejected() {
        let err = load_fields("\"rd\",11,7,3", &CompileConfig::default()).unwrap_err();
        assert!(matches!(err, LoaderError::MalformedRow { line: 1, .. }));
    }
}
