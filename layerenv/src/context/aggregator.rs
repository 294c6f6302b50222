//! The shared context handle and its update/reset/check operations.

use crate::context::check::{self, CheckOptions};
use crate::context::layer::{EnvMap, Layer};
use crate::context::merger::LayerMerger;
use crate::context::options::EnvOptions;
use crate::context::source::{EnvSource, ProcessEnv};
use crate::context::state::Context;
use crate::context::view::{EnvList, LiveView, Snapshot};
use crate::dotenv::{self, DotenvConfig, LoadError};
use crate::error::Result;
use crate::logging::Logger;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared, mutable configuration context.
///
/// Cloning an `EnvContext` yields another handle to the *same* context;
/// [`EnvContext::new`] creates an independent one. Every operation runs to
/// completion before returning.
///
/// # Examples
///
/// ```
/// use layerenv::{EnvContext, EnvOptions, MapEnv};
///
/// let ctx = EnvContext::builder()
///     .with_env_source(MapEnv::from_pairs([("ONE", "one")]))
///     .build();
///
/// let env = ctx
///     .update(
///         &EnvOptions::new()
///             .without_dotenv()
///             .with_default("THREE", "three")
///             .with_constant("ONE", "override"),
///     )
///     .unwrap();
///
/// assert_eq!(env.snapshot().get("ONE"), Some("override"));
/// assert_eq!(env.snapshot().get("THREE"), Some("three"));
/// ```
#[derive(Clone)]
pub struct EnvContext {
    state: Arc<RwLock<Context>>,
    source: Arc<dyn EnvSource>,
    dotenv: DotenvConfig,
    logger: Logger,
}

impl fmt::Debug for EnvContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvContext")
            .field("state", &*self.read())
            .field("dotenv", &self.dotenv)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

impl Default for EnvContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvContext {
    /// An empty context reading the real process environment and `./.env`.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a context with custom sources.
    #[must_use]
    pub fn builder() -> EnvContextBuilder {
        EnvContextBuilder::new()
    }

    /// Merge `options` into the context and return the merged result.
    ///
    /// The `process` layer is replaced with a fresh environment snapshot,
    /// `defaults` and `constants` are merged cumulatively, and the `.env`
    /// file is loaded when `options.dotenv` is set. A missing `.env` file
    /// is recorded in the context, never reported as an error.
    ///
    /// # Errors
    ///
    /// Returns the fatal [`Error::RequiredUnmet`](crate::Error::RequiredUnmet)
    /// (after logging each missing name) if any `options.ensure` name is
    /// absent from the result. The context stays updated in that case.
    pub fn update(&self, options: &EnvOptions) -> Result<EnvList> {
        {
            let mut state = self.write();
            state.process = self.source.snapshot();
            LayerMerger::merge_into(&mut state.defaults, &options.defaults);
            LayerMerger::merge_into(&mut state.constants, &options.constants);
        }

        if options.dotenv {
            // The outcome is recorded in the context either way.
            let _ = self.load();
        }

        let merged = self.merged();
        log::debug!("merged {} variable(s)", merged.len());

        if !options.ensure.is_empty() {
            let actual: Vec<&String> = merged.keys().collect();
            check::check(
                options.ensure.as_slice(),
                actual.as_slice(),
                CheckOptions::bootstrap(),
                &self.logger,
            )?;
        }

        Ok(EnvList::new(
            Snapshot::new(merged),
            self.live_view(options.miss_value.clone()),
        ))
    }

    /// Clear the context, then [`update`](Self::update) it.
    ///
    /// # Errors
    ///
    /// Same as [`EnvContext::update`].
    pub fn reset(&self, options: &EnvOptions) -> Result<EnvList> {
        self.write().clear();
        self.update(options)
    }

    /// Check required names.
    ///
    /// `actual` defaults to the names in the current merged result.
    ///
    /// # Errors
    ///
    /// See [`check::check`].
    ///
    /// # Examples
    ///
    /// ```
    /// use layerenv::{CheckOptions, EnvContext};
    ///
    /// let ctx = EnvContext::new();
    /// let present = vec!["A".to_string()];
    ///
    /// assert!(ctx.check(&["A"], Some(present.as_slice()), CheckOptions::new()).unwrap());
    /// let err = ctx
    ///     .check(&["A", "B"], Some(present.as_slice()), CheckOptions::strict())
    ///     .unwrap_err();
    /// assert!(err.to_string().contains('B'));
    /// ```
    pub fn check<E: AsRef<str>>(
        &self,
        expected: &[E],
        actual: Option<&[String]>,
        options: CheckOptions,
    ) -> Result<bool> {
        match actual {
            Some(actual) => check::check(expected, actual, options, &self.logger),
            None => {
                let merged = self.merged();
                let actual: Vec<&String> = merged.keys().collect();
                check::check(expected, actual.as_slice(), options, &self.logger)
            }
        }
    }

    /// Require names to be present in the current merged result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequired`](crate::Error::MissingRequired)
    /// listing every absent name.
    pub fn ensure<E: AsRef<str>>(&self, expected: &[E]) -> Result<bool> {
        self.check(expected, None, CheckOptions::strict())
    }

    /// Read the `.env` file into the `dotenv` layer.
    ///
    /// Parsed values are merged cumulatively; a failure is stored under
    /// [`Layer::Dotenv`] in the context's errors. The real process
    /// environment is never modified.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] that was recorded, for callers that want it.
    pub fn load(&self) -> std::result::Result<EnvMap, LoadError> {
        let outcome = dotenv::config(&self.dotenv);
        let mut state = self.write();

        match &outcome {
            Ok(parsed) => {
                if self.dotenv.debug {
                    for key in parsed.keys().filter(|k| state.process.contains_key(*k)) {
                        log::debug!("\"{key}\" is already defined in the process environment and takes precedence");
                    }
                }
                LayerMerger::merge_into(&mut state.dotenv, parsed);
            }
            Err(err) => {
                log::debug!("no .env values loaded: {err}");
                state.errors.insert(Layer::Dotenv, err.clone());
            }
        }

        outcome
    }

    /// A copy of the current context.
    #[must_use]
    pub fn ctx(&self) -> Context {
        self.read().clone()
    }

    /// The current merge of all layers.
    #[must_use]
    pub fn merged(&self) -> EnvMap {
        self.read().merged()
    }

    /// Which layer currently supplies `name`, and its value.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<(Layer, String)> {
        self.read()
            .resolve(name)
            .map(|(layer, value)| (layer, value.to_string()))
    }

    /// A live view over this context.
    #[must_use]
    pub fn live_view(&self, miss_value: impl Into<Value>) -> LiveView {
        LiveView::new(self.clone(), miss_value)
    }

    /// The logger used to report missing names.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The `.env` settings used by [`load`](Self::load).
    #[must_use]
    pub const fn dotenv_config(&self) -> &DotenvConfig {
        &self.dotenv
    }

    fn read(&self) -> RwLockReadGuard<'_, Context> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Context> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builder for [`EnvContext`].
///
/// # Examples
///
/// ```
/// use layerenv::{EnvContext, LogLevel, Logger, MapEnv};
///
/// let ctx = EnvContext::builder()
///     .with_env_source(MapEnv::from_pairs([("HOME", "/home/test")]))
///     .with_dotenv_path("/srv/app/.env")
///     .with_logger(Logger::new(LogLevel::Quiet))
///     .build();
///
/// assert!(ctx.ctx().is_empty());
/// ```
pub struct EnvContextBuilder {
    source: Arc<dyn EnvSource>,
    dotenv: DotenvConfig,
    logger: Logger,
}

impl Default for EnvContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvContextBuilder {
    /// Defaults: real process environment, `./.env`, normal logging.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: Arc::new(ProcessEnv),
            dotenv: DotenvConfig::default(),
            logger: Logger::default(),
        }
    }

    /// Read the `process` layer from `source`.
    #[must_use]
    pub fn with_env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Replace all `.env` settings.
    #[must_use]
    pub fn with_dotenv_config(mut self, config: DotenvConfig) -> Self {
        self.dotenv = config;
        self
    }

    /// Read `.env` values from `path` instead of `./.env`.
    #[must_use]
    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv.path = Some(path.into());
        self
    }

    /// Report missing names through `logger`.
    #[must_use]
    pub const fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Create the (empty) context.
    #[must_use]
    pub fn build(self) -> EnvContext {
        EnvContext {
            state: Arc::new(RwLock::new(Context::default())),
            source: self.source,
            dotenv: self.dotenv,
            logger: self.logger,
        }
    }
}

/// Build a fresh default context and run one update against it.
///
/// This is the one-call entry point for scripts: the returned list's live
/// view keeps the context alive.
///
/// # Errors
///
/// Same as [`EnvContext::update`].
///
/// # Examples
///
/// ```
/// use layerenv::{aggregate, EnvOptions};
///
/// let env = aggregate(&EnvOptions::new().without_dotenv().with_constant("MODE", "test")).unwrap();
/// assert_eq!(env.snapshot().get("MODE"), Some("test"));
/// ```
pub fn aggregate(options: &EnvOptions) -> Result<EnvList> {
    EnvContext::new().update(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::source::MapEnv;
    use crate::logging::LogLevel;
    use crate::Error;
    use std::fs;
    use tempfile::TempDir;

    /// A context over a fixed environment with its `.env` inside a temp dir.
    fn fixture(env: &[(&str, &str)], dotenv: Option<&str>) -> (TempDir, EnvContext) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        if let Some(contents) = dotenv {
            fs::write(&path, contents).unwrap();
        }
        let ctx = EnvContext::builder()
            .with_env_source(MapEnv::from_pairs(env.iter().copied()))
            .with_dotenv_path(path)
            .with_logger(Logger::new(LogLevel::Quiet))
            .build();
        (dir, ctx)
    }

    #[test]
    fn test_scenario_merge() {
        let (_dir, ctx) = fixture(&[("ONE", "one")], Some("TWO=two\n"));
        let env = ctx
            .update(
                &EnvOptions::new()
                    .with_default("THREE", "three")
                    .with_constant("ONE", "override"),
            )
            .unwrap();

        let expected = EnvMap::from([
            ("ONE".to_string(), "override".to_string()),
            ("TWO".to_string(), "two".to_string()),
            ("THREE".to_string(), "three".to_string()),
        ]);
        assert_eq!(env.snapshot().as_map(), &expected);
    }

    #[test]
    fn test_precedence_chain() {
        let (_dir, ctx) = fixture(&[("K", "process")], Some("K=dotenv\n"));
        let options = EnvOptions::new().with_default("K", "defaults");

        let env = ctx
            .update(&options.clone().with_constant("K", "constants"))
            .unwrap();
        assert_eq!(env.snapshot().get("K"), Some("constants"));

        let env = ctx.reset(&options).unwrap();
        assert_eq!(env.snapshot().get("K"), Some("process"));
    }

    #[test]
    fn test_dotenv_beats_defaults() {
        let (_dir, ctx) = fixture(&[], Some("K=dotenv\n"));
        let env = ctx
            .update(&EnvOptions::new().with_default("K", "defaults"))
            .unwrap();
        assert_eq!(env.snapshot().get("K"), Some("dotenv"));
    }

    #[test]
    fn test_cumulative_defaults() {
        let (_dir, ctx) = fixture(&[], None);
        let base = EnvOptions::new().without_dotenv();

        ctx.update(&base.clone().with_default("A", "1")).unwrap();
        let env = ctx.update(&base.clone().with_default("B", "2")).unwrap();
        assert_eq!(env.snapshot().get("A"), Some("1"));
        assert_eq!(env.snapshot().get("B"), Some("2"));

        let env = ctx.update(&base.with_default("A", "3")).unwrap();
        assert_eq!(env.snapshot().get("A"), Some("3"));
        assert_eq!(env.snapshot().get("B"), Some("2"));
    }

    #[test]
    fn test_process_layer_is_replaced() {
        let (_dir, ctx) = fixture(&[("P", "1")], None);
        ctx.update(&EnvOptions::new().without_dotenv()).unwrap();
        ctx.write().process.insert("STALE".to_string(), "x".to_string());

        ctx.update(&EnvOptions::new().without_dotenv()).unwrap();
        assert!(!ctx.ctx().process.contains_key("STALE"));
        assert_eq!(ctx.ctx().process["P"], "1");
    }

    #[test]
    fn test_missing_dotenv_recorded_not_raised() {
        let (_dir, ctx) = fixture(&[("A", "1")], None);
        let env = ctx.update(&EnvOptions::new()).unwrap();

        assert_eq!(env.snapshot().get("A"), Some("1"));
        let snapshot = ctx.ctx();
        assert!(snapshot.error(Layer::Dotenv).unwrap().is_not_found());
        assert!(snapshot.dotenv.is_empty());
    }

    #[test]
    fn test_dotenv_skipped_when_disabled() {
        let (_dir, ctx) = fixture(&[], Some("A=1\n"));
        let env = ctx.update(&EnvOptions::new().without_dotenv()).unwrap();
        assert!(env.snapshot().is_empty());
        assert!(ctx.ctx().errors.is_empty());
    }

    #[test]
    fn test_load_returns_outcome() {
        let (_dir, ctx) = fixture(&[], Some("A=1\nB=2\n"));
        let parsed = ctx.load().unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(ctx.ctx().dotenv, parsed);
    }

    #[test]
    fn test_ensure_option_is_fatal() {
        let (_dir, ctx) = fixture(&[("A", "1")], None);
        let err = ctx
            .update(&EnvOptions::new().without_dotenv().ensure("A").ensure("B"))
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.missing_names(), Some(&["B".to_string()][..]));
        // The context was still updated.
        assert_eq!(ctx.ctx().process["A"], "1");
    }

    #[test]
    fn test_ensure_option_satisfied() {
        let (_dir, ctx) = fixture(&[], None);
        let env = ctx
            .update(
                &EnvOptions::new()
                    .without_dotenv()
                    .with_default("A", "1")
                    .ensure("A"),
            )
            .unwrap();
        assert!(env.snapshot().contains("A"));
    }

    #[test]
    fn test_ensure_throws() {
        let (_dir, ctx) = fixture(&[("A", "1")], None);
        ctx.update(&EnvOptions::new().without_dotenv()).unwrap();

        assert!(ctx.ensure(&["A"]).unwrap());
        let err = ctx.ensure(&["A", "B"]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired { .. }));
    }

    #[test]
    fn test_check_defaults_to_merged_keys() {
        let (_dir, ctx) = fixture(&[], None);
        ctx.update(&EnvOptions::new().without_dotenv().with_constant("C", "1"))
            .unwrap();
        assert!(ctx.check(&["C"], None, CheckOptions::new()).unwrap());
        assert!(!ctx.check(&["D"], None, CheckOptions::new()).unwrap());
    }

    #[test]
    fn test_reset_clears_everything() {
        let (_dir, ctx) = fixture(&[("P", "1")], None);
        ctx.update(&EnvOptions::new().with_default("A", "1")).unwrap();
        assert!(!ctx.ctx().errors.is_empty());

        let env = ctx.reset(&EnvOptions::new().without_dotenv()).unwrap();
        let state = ctx.ctx();
        assert!(state.defaults.is_empty());
        assert!(state.errors.is_empty());
        assert_eq!(env.snapshot().keys().collect::<Vec<_>>(), vec!["P"]);
    }

    #[test]
    fn test_ctx_is_a_copy() {
        let (_dir, ctx) = fixture(&[], None);
        let mut copy = ctx.ctx();
        copy.defaults.insert("X".to_string(), "y".to_string());
        assert!(ctx.ctx().defaults.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let (_dir, ctx) = fixture(&[], None);
        let other = ctx.clone();
        other
            .update(&EnvOptions::new().without_dotenv().with_default("A", "1"))
            .unwrap();
        assert_eq!(ctx.merged()["A"], "1");
    }

    #[test]
    fn test_independent_contexts() {
        let (_dir_a, a) = fixture(&[], None);
        let (_dir_b, b) = fixture(&[], None);
        a.update(&EnvOptions::new().without_dotenv().with_default("A", "1"))
            .unwrap();
        assert!(b.merged().is_empty());
    }

    #[test]
    fn test_resolve() {
        let (_dir, ctx) = fixture(&[("K", "p")], Some("K=d\nD=only\n"));
        ctx.update(&EnvOptions::new()).unwrap();
        assert_eq!(ctx.resolve("K"), Some((Layer::Process, "p".to_string())));
        assert_eq!(ctx.resolve("D"), Some((Layer::Dotenv, "only".to_string())));
        assert_eq!(ctx.resolve("NONE"), None);
    }
}
