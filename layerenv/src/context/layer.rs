//! Named value layers and their precedence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A flat mapping from variable name to value.
///
/// Ordered so that every rendering of a layer or merge result is deterministic.
pub type EnvMap = BTreeMap<String, String>;

/// One of the four sources of variables held by a [`Context`](super::Context).
///
/// Layers are ordered by precedence: comparing two layers tells you which
/// one wins when both define the same name.
///
/// # Examples
///
/// ```
/// use layerenv::Layer;
///
/// assert!(Layer::Defaults < Layer::Dotenv);
/// assert!(Layer::Dotenv < Layer::Process);
/// assert!(Layer::Process < Layer::Constants);
/// assert_eq!(Layer::Dotenv.to_string(), "dotenv");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Caller-supplied fallbacks.
    Defaults,
    /// Values read from the `.env` file.
    Dotenv,
    /// Snapshot of the process environment.
    Process,
    /// Caller-supplied values that nothing overrides.
    Constants,
}

impl Layer {
    /// All layers, lowest precedence first.
    pub const PRECEDENCE: [Self; 4] = [Self::Defaults, Self::Dotenv, Self::Process, Self::Constants];

    /// The lowercase name of the layer.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Defaults => "defaults",
            Self::Dotenv => "dotenv",
            Self::Process => "process",
            Self::Constants => "constants",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
