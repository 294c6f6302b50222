//! Process-boundary handling for required variables.
//!
//! Library code never exits the process. When an update's `ensure` list is
//! not satisfied it returns the fatal [`Error::RequiredUnmet`]; the program's
//! entry point decides what to do with it. [`bootstrap`] is that decision for
//! the common case: run the update and terminate through a [`Terminate`]
//! hook on a fatal miss.

use crate::context::{EnvContext, EnvList, EnvOptions};
use crate::error::{Error, Result};

/// Exit status used when required variables are missing.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Something that can end the program.
///
/// The real implementation is [`ProcessExit`]; tests and embedders can
/// substitute their own.
pub trait Terminate {
    /// End the program with `code`. Implementations used in tests may return.
    fn terminate(&self, code: i32);
}

/// Terminates via [`std::process::exit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminate for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}

/// Update `ctx` with `options`, terminating through `hook` on a fatal miss.
///
/// Returns `Ok(Some(list))` on success and `Ok(None)` if the hook returned
/// after being asked to terminate. Missing names have already been logged by
/// the context's logger at that point.
///
/// # Errors
///
/// Returns any non-fatal error from [`EnvContext::update`].
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use layerenv::{bootstrap, EnvContext, EnvOptions, LogLevel, Logger, MapEnv, Terminate};
///
/// struct Record(Cell<Option<i32>>);
/// impl Terminate for Record {
///     fn terminate(&self, code: i32) {
///         self.0.set(Some(code));
///     }
/// }
///
/// let ctx = EnvContext::builder()
///     .with_env_source(MapEnv::default())
///     .with_logger(Logger::new(LogLevel::Quiet))
///     .build();
/// let hook = Record(Cell::new(None));
///
/// let outcome = bootstrap(&ctx, &EnvOptions::new().without_dotenv().ensure("TOKEN"), &hook).unwrap();
/// assert!(outcome.is_none());
/// assert_eq!(hook.0.get(), Some(1));
/// ```
pub fn bootstrap(
    ctx: &EnvContext,
    options: &EnvOptions,
    hook: &dyn Terminate,
) -> Result<Option<EnvList>> {
    match ctx.update(options) {
        Ok(list) => Ok(Some(list)),
        Err(err) if err.is_fatal() => {
            log::debug!("terminating: {err}");
            hook.terminate(FATAL_EXIT_CODE);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Translate a fatal error into termination, passing everything else through.
///
/// Useful at an entry point that calls [`EnvContext::update`] itself.
///
/// # Errors
///
/// Returns `result` unchanged unless it holds a fatal error.
pub fn exit_on_fatal<T>(result: Result<T>, hook: &dyn Terminate) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err @ Error::RequiredUnmet { .. }) => {
            log::debug!("terminating: {err}");
            hook.terminate(FATAL_EXIT_CODE);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
