//! Where the `process` layer comes from.

use crate::context::layer::EnvMap;
use std::env;

/// A source of environment variables for the `process` layer.
///
/// The default is [`ProcessEnv`]. Embedders and tests can substitute a
/// [`MapEnv`] to run against a fixed environment.
pub trait EnvSource: Send + Sync {
    /// Take a complete copy of the current variables.
    fn snapshot(&self) -> EnvMap;
}

/// Reads the real process environment.
///
/// Variables whose name or value is not valid Unicode are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn snapshot(&self) -> EnvMap {
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// A fixed set of variables.
///
/// # Examples
///
/// ```
/// use layerenv::{EnvSource, MapEnv};
///
/// let source = MapEnv::from_pairs([("HOME", "/home/test")]);
/// assert_eq!(source.snapshot()["HOME"], "/home/test");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv(pub EnvMap);

impl MapEnv {
    /// Build from name/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl EnvSource for MapEnv {
    fn snapshot(&self) -> EnvMap {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_process_env_sees_variables() {
        env::set_var("LAYERENV_SOURCE_TEST", "present");
        let snapshot = ProcessEnv.snapshot();
        env::remove_var("LAYERENV_SOURCE_TEST");

        assert_eq!(snapshot.get("LAYERENV_SOURCE_TEST").map(String::as_str), Some("present"));
    }

    #[test]
    fn test_map_env_is_independent_copy() {
        let source = MapEnv::from_pairs([("A", "1")]);
        let mut snapshot = source.snapshot();
        snapshot.insert("B".to_string(), "2".to_string());
        assert_eq!(source.snapshot().len(), 1);
    }
}
