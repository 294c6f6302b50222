//! Layered environment contexts.
//!
//! A context holds four layers of variables plus any errors met while
//! filling them:
//!
//! | layer       | filled by                                  |
//! |-------------|--------------------------------------------|
//! | `defaults`  | [`EnvOptions::defaults`], cumulatively     |
//! | `dotenv`    | the `.env` file, cumulatively              |
//! | `process`   | the process environment, replaced per call |
//! | `constants` | [`EnvOptions::constants`], cumulatively    |
//!
//! # Precedence
//!
//! Layers merge with the following precedence (highest to lowest):
//!
//! 1. Constants
//! 2. Process environment
//! 3. `.env` file
//! 4. Defaults
//!
//! # Examples
//!
//! ```
//! use layerenv::{EnvContext, EnvOptions, MapEnv};
//!
//! let ctx = EnvContext::builder()
//!     .with_env_source(MapEnv::from_pairs([("PORT", "9000")]))
//!     .build();
//!
//! let env = ctx
//!     .update(&EnvOptions::new().without_dotenv().with_default("PORT", "8080"))
//!     .unwrap();
//! assert_eq!(env.snapshot().get("PORT"), Some("9000"));
//!
//! // Required names: recoverable error from `ensure`.
//! assert!(ctx.ensure(&["PORT"]).unwrap());
//! assert!(ctx.ensure(&["HOST"]).is_err());
//! ```

pub mod aggregator;
pub mod check;
pub mod layer;
pub mod merger;
pub mod options;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod proptests;

pub use aggregator::{aggregate, EnvContext, EnvContextBuilder};
pub use check::CheckOptions;
pub use layer::{EnvMap, Layer};
pub use merger::LayerMerger;
pub use options::EnvOptions;
pub use source::{EnvSource, MapEnv, ProcessEnv};
pub use state::Context;
pub use view::{EnvList, LiveView, Snapshot};
