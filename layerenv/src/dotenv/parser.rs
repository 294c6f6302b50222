//! Line-oriented `.env` parsing.

use crate::context::EnvMap;

/// Options controlling [`parse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Log lines that do not look like `KEY=VALUE`.
    pub debug: bool,
}

impl ParseOptions {
    /// Options with debug logging enabled.
    #[must_use]
    pub const fn debug() -> Self {
        Self { debug: true }
    }
}

/// Parse the contents of a `.env` file into a flat map.
///
/// Each line of the form `KEY=VALUE` contributes one entry. Keys consist of
/// ASCII word characters, dots and hyphens. Values wrapped in matching single
/// or double quotes lose their quotes; double-quoted values additionally have
/// literal `\n` sequences expanded to newlines. Unquoted values are trimmed.
/// Lines that don't match are skipped, and later duplicates win.
///
/// # Examples
///
/// ```
/// use layerenv::dotenv::{parse, ParseOptions};
///
/// let vars = parse("PORT=8080\nGREETING=\"hello\\nworld\"\n# comment", &ParseOptions::default());
/// assert_eq!(vars["PORT"], "8080");
/// assert_eq!(vars["GREETING"], "hello\nworld");
/// assert_eq!(vars.len(), 2);
/// ```
#[must_use]
pub fn parse(source: impl AsRef<[u8]>, options: &ParseOptions) -> EnvMap {
    let text = String::from_utf8_lossy(source.as_ref());
    let mut vars = EnvMap::new();

    for (idx, line) in text.split(['\n', '\r']).enumerate() {
        match split_line(line) {
            Some((key, raw)) => {
                vars.insert(key.to_string(), unquote(raw));
            }
            None if options.debug => {
                log::debug!(
                    "did not match key and value when parsing line {}: {line}",
                    idx + 1
                );
            }
            None => {}
        }
    }

    vars
}

/// Characters permitted in a key.
fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Whitespace for the purpose of splitting a line. A byte order mark counts.
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Split a line into its key and raw (still quoted) value.
///
/// Leading whitespace before the value is consumed; trailing whitespace is
/// kept so that quote detection sees the value exactly as written.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start_matches(is_space);
    let key_len = line.find(|c: char| !is_key_char(c)).unwrap_or(line.len());
    if key_len == 0 {
        return None;
    }
    let (key, rest) = line.split_at(key_len);
    let value = rest.trim_start_matches(is_space).strip_prefix('=')?;
    Some((key, value.trim_start_matches(is_space)))
}

/// Apply quote stripping, newline expansion or trimming to a raw value.
fn unquote(raw: &str) -> String {
    let double = raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"');
    let single = raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'');

    if double {
        raw[1..raw.len() - 1].replace("\\n", "\n")
    } else if single {
        raw[1..raw.len() - 1].to_string()
    } else {
        raw.trim().to_string()
    }
}
