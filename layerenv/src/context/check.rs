//! Required-variable checks.

use crate::error::{Error, Result};
use crate::logging::Logger;

/// What to do when required names are missing.
///
/// The three behaviours are independent and can be combined. When both
/// `throw_on_miss` and `exit_on_miss` are set, the recoverable error wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Log one line per missing name.
    pub log_on_miss: bool,
    /// Report a fatal [`Error::RequiredUnmet`].
    pub exit_on_miss: bool,
    /// Report a recoverable [`Error::MissingRequired`].
    pub throw_on_miss: bool,
}

impl CheckOptions {
    /// No side effects; the check only returns `false` on a miss.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            log_on_miss: false,
            exit_on_miss: false,
            throw_on_miss: false,
        }
    }

    /// The profile used by [`EnvContext::ensure`](super::EnvContext::ensure).
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            throw_on_miss: true,
            ..Self::new()
        }
    }

    /// The profile used for the `ensure` option of an update: log, then fail fatally.
    #[must_use]
    pub const fn bootstrap() -> Self {
        Self {
            log_on_miss: true,
            exit_on_miss: true,
            ..Self::new()
        }
    }
}

/// Names in `expected` that are absent from `actual`, in `expected` order.
#[must_use]
pub fn missing_names<E, A>(expected: &[E], actual: &[A]) -> Vec<String>
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    expected
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !actual.iter().any(|a| a.as_ref() == *name))
        .map(str::to_string)
        .collect()
}

/// Check `expected` against `actual` and apply `options` on a miss.
///
/// Returns `Ok(true)` when nothing is missing and `Ok(false)` when names are
/// missing but neither error behaviour was requested.
///
/// # Errors
///
/// Returns [`Error::MissingRequired`] when `throw_on_miss` is set, otherwise
/// [`Error::RequiredUnmet`] when `exit_on_miss` is set.
pub fn check<E, A>(expected: &[E], actual: &[A], options: CheckOptions, logger: &Logger) -> Result<bool>
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    let missing = missing_names(expected, actual);
    if missing.is_empty() {
        return Ok(true);
    }

    if options.log_on_miss {
        for name in &missing {
            logger.error(&format!("missing required env var {{{name}}}"));
        }
    }

    if options.throw_on_miss {
        return Err(Error::MissingRequired { missing });
    }

    if options.exit_on_miss {
        return Err(Error::RequiredUnmet { missing });
    }

    Ok(false)
}
