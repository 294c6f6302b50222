#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # layerenv
//!
//! A library for merging environment variables from several named sources
//! into one precedence-ordered view.
//!
//! Four layers are kept per context, lowest precedence first: caller
//! defaults, values from a `.env` file, the process environment, and caller
//! constants. Required names can be checked after merging.
//!
//! ## Core Types
//!
//! - [`EnvContext`]: shared context with `update`, `reset`, `check`, `ensure`
//! - [`EnvOptions`]: what a single update merges and requires
//! - [`Snapshot`] and [`LiveView`]: fixed and live read views
//! - [`dotenv`]: the `.env` parser and file loader
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use layerenv::{EnvContext, EnvOptions, MapEnv};
//!
//! let ctx = EnvContext::builder()
//!     .with_env_source(MapEnv::from_pairs([("ONE", "one")]))
//!     .build();
//!
//! let env = ctx
//!     .update(
//!         &EnvOptions::new()
//!             .without_dotenv()
//!             .with_default("THREE", "three")
//!             .with_constant("ONE", "override"),
//!     )
//!     .unwrap();
//!
//! assert_eq!(env.snapshot().get("ONE"), Some("override"));
//! assert_eq!(env.live().get("MISSING"), serde_json::Value::Null);
//! ```

pub mod bootstrap;
pub mod context;
pub mod dotenv;
pub mod error;
pub mod logging;
pub mod output;

// Re-export key types at crate root for convenience
pub use bootstrap::{bootstrap, exit_on_fatal, ProcessExit, Terminate, FATAL_EXIT_CODE};
pub use context::{
    aggregate, CheckOptions, Context, EnvContext, EnvContextBuilder, EnvList, EnvMap, EnvOptions,
    EnvSource, Layer, LayerMerger, LiveView, MapEnv, ProcessEnv, Snapshot,
};
pub use dotenv::{DotenvConfig, Encoding, LoadError, LoadErrorKind};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
