//! Parser for `KEY=value` environment files.
//!
//! Responsibilities:
//! - Turn the text of a single `.env`-style file into ordered key/value pairs.
//! - Report malformed lines with their line number.
//!
//! Does NOT handle:
//! - Writing into an environment table (see `loader`).
//! - `$VAR` interpolation (see `expand`); `\$` and other unknown escapes are kept verbatim.
//!
//! The line rules follow the Node `dotenv` package, minus its interpolation.
//!
//! Invariants:
//! - Parse errors NEVER include raw line contents, to prevent secret leakage.
//! - A NUL character anywhere in the input is rejected; no returned key or value contains one.
//! - A later assignment to the same key within one file replaces the earlier one.
//! - The returned order is the order of first appearance.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// What was wrong with a line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected `KEY=value`")]
    MissingEquals,

    #[error("invalid variable name")]
    InvalidKey,

    #[error("unterminated quoted value")]
    UnterminatedQuote,

    #[error("unexpected characters after closing quote")]
    TrailingCharacters,

    #[error("NUL character is not allowed")]
    NulCharacter,
}

/// A syntax error in an environment file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid syntax in {} on line {line}: {kind}", display_path(.path))]
pub struct ParseError {
    /// File the error came from, when parsing from disk.
    pub path: Option<PathBuf>,
    /// 1-based line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self {
            path: None,
            line,
            kind,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<input>".to_string(),
    }
}

/// Errors from [`parse_file`].
#[derive(Error, Debug)]
pub enum ParseFileError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Syntax(#[from] ParseError),
}

/// Read and parse the file at `path`.
pub fn parse_file(path: &Path) -> Result<Vec<(String, String)>, ParseFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ParseFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&contents).map_err(|mut e| {
        e.path = Some(path.to_path_buf());
        ParseFileError::Syntax(e)
    })
}

/// Parse the text of an environment file.
pub fn parse_str(input: &str) -> Result<Vec<(String, String)>, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    if let Some((idx, _)) = input.lines().enumerate().find(|(_, line)| line.contains('\0')) {
        return Err(ParseError::new(idx + 1, ParseErrorKind::NulCharacter));
    }
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut lines = input.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    while let Some((line_no, raw)) = lines.next() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = strip_export(line);

        let (key, rest) = line
            .split_once('=')
            .ok_or_else(|| ParseError::new(line_no, ParseErrorKind::MissingEquals))?;
        let key = key.trim();
        if !is_valid_key(key) {
            return Err(ParseError::new(line_no, ParseErrorKind::InvalidKey));
        }

        let trimmed = rest.trim_start();
        let value = if let Some(body) = trimmed.strip_prefix('\'') {
            let end = body
                .find('\'')
                .ok_or_else(|| ParseError::new(line_no, ParseErrorKind::UnterminatedQuote))?;
            check_trailing(&body[end + 1..], line_no)?;
            body[..end].to_string()
        } else if let Some(body) = trimmed.strip_prefix('"') {
            parse_double_quoted(body, line_no, &mut lines)?
        } else {
            unquoted_value(rest)
        };

        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value,
            None => pairs.push((key.to_string(), value)),
        }
    }

    Ok(pairs)
}

fn strip_export(line: &str) -> &str {
    line.strip_prefix("export")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
        .unwrap_or(line)
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Only whitespace or a comment may follow a closing quote.
fn check_trailing(rest: &str, line_no: usize) -> Result<(), ParseError> {
    let rest = rest.trim_start();
    if rest.is_empty() || rest.starts_with('#') {
        Ok(())
    } else {
        Err(ParseError::new(line_no, ParseErrorKind::TrailingCharacters))
    }
}

/// `#` starts a comment only when preceded by whitespace.
fn unquoted_value(rest: &str) -> String {
    let mut prev_is_space = false;
    for (i, c) in rest.char_indices() {
        if c == '#' && prev_is_space {
            return rest[..i].trim().to_string();
        }
        prev_is_space = c.is_whitespace();
    }
    rest.trim().to_string()
}

fn parse_double_quoted<'a, I>(
    first: &'a str,
    start_line: usize,
    lines: &mut I,
) -> Result<String, ParseError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut value = String::new();
    let mut segment = first;
    let mut line_no = start_line;

    loop {
        let mut chars = segment.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, '"')) => value.push('"'),
                    Some((_, other)) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => value.push('\\'),
                },
                '"' => {
                    check_trailing(&segment[i + 1..], line_no)?;
                    return Ok(value);
                }
                _ => value.push(c),
            }
        }

        match lines.next() {
            Some((next_no, next)) => {
                value.push('\n');
                segment = next;
                line_no = next_no;
            }
            None => {
                return Err(ParseError::new(
                    start_line,
                    ParseErrorKind::UnterminatedQuote,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<(String, String)> {
        parse_str(input).expect("input should parse")
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_basic_pairs_comments_and_blank_lines() {
        let pairs = parse("# comment\n\nBASIC=basic\n  SPACED = value  \n");
        assert_eq!(pairs, vec![pair("BASIC", "basic"), pair("SPACED", "value")]);
    }

    #[test]
    fn test_export_prefix_is_stripped() {
        let pairs = parse("export TOKEN=abc\nexport=kept\n");
        assert_eq!(pairs, vec![pair("TOKEN", "abc"), pair("export", "kept")]);
    }

    #[test]
    fn test_inline_comment_requires_preceding_whitespace() {
        let pairs = parse("A=value # trailing\nB=#not-a-comment\nC=a#b\n");
        assert_eq!(
            pairs,
            vec![pair("A", "value"), pair("B", "#not-a-comment"), pair("C", "a#b")]
        );
    }

    #[test]
    fn test_empty_values() {
        let pairs = parse("EMPTY=\nQUOTED=\"\"\nSINGLE=''\n");
        assert_eq!(
            pairs,
            vec![pair("EMPTY", ""), pair("QUOTED", ""), pair("SINGLE", "")]
        );
    }

    #[test]
    fn test_single_quotes_are_literal() {
        let pairs = parse(r#"RAW='a\nb ${HOME} # x'"#);
        assert_eq!(pairs, vec![pair("RAW", r"a\nb ${HOME} # x")]);
    }

    #[test]
    fn test_double_quote_escapes() {
        let pairs = parse(r#"MSG="line1\nline2\t\"quoted\" \$HOME""#);
        assert_eq!(
            pairs,
            vec![pair("MSG", "line1\nline2\t\"quoted\" \\$HOME")]
        );
    }

    #[test]
    fn test_double_quoted_value_spans_lines() {
        let pairs = parse("CERT=\"first\nsecond\"\nNEXT=1\n");
        assert_eq!(pairs, vec![pair("CERT", "first\nsecond"), pair("NEXT", "1")]);
    }

    #[test]
    fn test_duplicate_key_last_assignment_wins() {
        let pairs = parse("A=1\nB=2\nA=3\n");
        assert_eq!(pairs, vec![pair("A", "3"), pair("B", "2")]);
    }

    #[test]
    fn test_crlf_and_bom() {
        let pairs = parse("\u{feff}A=1\r\nB=2\r\n");
        assert_eq!(pairs, vec![pair("A", "1"), pair("B", "2")]);
    }

    #[test]
    fn test_missing_equals_reports_line_number() {
        let err = parse_str("A=1\nINVALID_LINE_WITHOUT_EQUALS\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::MissingEquals);
    }

    #[test]
    fn test_invalid_key() {
        let err = parse_str("1BAD=x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidKey);

        let err = parse_str("BAD KEY=x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidKey);
    }

    #[test]
    fn test_unterminated_quotes() {
        let err = parse_str("A='open").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedQuote);

        let err = parse_str("A=1\nB=\"open\nstill open").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedQuote);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_trailing_characters_after_quote() {
        let err = parse_str("A=\"x\" y").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingCharacters);

        // A comment after the closing quote is fine.
        assert_eq!(parse("A=\"x\" # note"), vec![pair("A", "x")]);
    }

    #[test]
    fn test_nul_character_rejected_with_line_number() {
        let err = parse_str("A=1\nKEY=a\0b\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NulCharacter);
        assert_eq!(err.line, 2);

        // Inside a multi-line double-quoted value too.
        let err = parse_str("A=\"first\nsecond\0\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NulCharacter);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_error_does_not_leak_line_contents() {
        let secret = "supersecret_token_12345";
        let err = parse_str(&format!("TOKEN={secret}\nBROKEN {secret}\n")).unwrap_err();
        let message = err.to_string();
        assert!(!message.contains(secret), "leaked secret: {message}");
        assert!(message.contains("line 2"), "missing line number: {message}");
    }

    #[test]
    fn test_parse_file_sets_path_on_syntax_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "NOPE").unwrap();

        match parse_file(&path) {
            Err(ParseFileError::Syntax(err)) => {
                assert_eq!(err.path.as_deref(), Some(path.as_path()));
                assert!(err.to_string().contains(".env"));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
}
