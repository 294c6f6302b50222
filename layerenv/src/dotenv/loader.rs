//! Reading `.env` files from disk.
//!
//! Read failures are expected (most projects don't ship a `.env` file), so
//! they are returned as a [`LoadError`] value rather than a library
//! [`Error`](crate::Error).

use crate::context::EnvMap;
use crate::dotenv::parser::{parse, ParseOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file name looked up in the current working directory.
pub const DEFAULT_FILE_NAME: &str = ".env";

/// Text encoding of a `.env` file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8; invalid sequences are replaced rather than rejected.
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// ISO-8859-1, one byte per character.
    #[serde(alias = "iso-8859-1")]
    Latin1,
}

impl Encoding {
    /// Decode raw file bytes into text.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// Options for [`config`].
///
/// # Examples
///
/// ```
/// use layerenv::dotenv::{DotenvConfig, Encoding};
///
/// let config = DotenvConfig::default()
///     .with_path("/srv/app/.env")
///     .with_encoding(Encoding::Latin1);
/// assert!(!config.debug);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotenvConfig {
    /// File to read. `None` means `.env` in the current working directory.
    pub path: Option<PathBuf>,
    /// Encoding of the file.
    pub encoding: Encoding,
    /// Log unparseable lines and shadowed keys.
    pub debug: bool,
}

impl DotenvConfig {
    /// Use an explicit file path. A leading `~` is expanded to the home directory.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Use the given encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Enable or disable debug logging.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Resolve the file this configuration points at.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the working directory or home directory
    /// cannot be determined.
    pub fn resolve_path(&self) -> Result<PathBuf, LoadError> {
        match &self.path {
            Some(path) => expand_tilde(path),
            None => env::current_dir()
                .map(|cwd| cwd.join(DEFAULT_FILE_NAME))
                .map_err(|e| LoadError::from_io(Path::new(DEFAULT_FILE_NAME), &e)),
        }
    }
}

/// Broad classification of a read failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    /// The file does not exist.
    NotFound,
    /// The file exists but cannot be read.
    PermissionDenied,
    /// The file could not be decoded.
    InvalidData,
    /// Any other failure.
    Other,
}

impl From<io::ErrorKind> for LoadErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::InvalidData => Self::InvalidData,
            _ => Self::Other,
        }
    }
}

/// A failure to read a `.env` file, kept as data in the context.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("failed to read {}: {message}", path.display())]
pub struct LoadError {
    /// The path that was read.
    pub path: PathBuf,
    /// What went wrong.
    pub kind: LoadErrorKind,
    /// The underlying error message.
    pub message: String,
}

impl LoadError {
    /// Build a load error from an I/O failure.
    #[must_use]
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: err.kind().into(),
            message: err.to_string(),
        }
    }

    /// Check if the failure was a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == LoadErrorKind::NotFound
    }
}

/// Read and parse a `.env` file.
///
/// Never panics and never mutates the process environment. Any failure to
/// read the file is returned as `Err(LoadError)`.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be located or read.
///
/// # Examples
///
/// ```
/// use layerenv::dotenv::{config, DotenvConfig};
///
/// let outcome = config(&DotenvConfig::default().with_path("/definitely/not/here/.env"));
/// assert!(outcome.unwrap_err().is_not_found());
/// ```
pub fn config(options: &DotenvConfig) -> Result<EnvMap, LoadError> {
    let path = options.resolve_path()?;
    let bytes = fs::read(&path).map_err(|e| LoadError::from_io(&path, &e))?;
    let text = options.encoding.decode(&bytes);

    let parse_options = ParseOptions {
        debug: options.debug,
    };
    let parsed = parse(text, &parse_options);
    log::debug!("loaded {} variable(s) from {}", parsed.len(), path.display());
    Ok(parsed)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> Result<PathBuf, LoadError> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| LoadError {
        path: path.to_path_buf(),
        kind: LoadErrorKind::Other,
        message: "cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str
        .strip_prefix("~/")
        .or_else(|| path_str.strip_prefix("~\\"))
    {
        Ok(home.join(rest))
    } else {
        // ~user syntax not supported
        Err(LoadError {
            path: path.to_path_buf(),
            kind: LoadErrorKind::Other,
            message: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}
