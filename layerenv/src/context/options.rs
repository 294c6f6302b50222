//! Options accepted by [`EnvContext::update`](super::EnvContext::update).

use crate::context::layer::EnvMap;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// What to merge into the context, and what to require afterwards.
///
/// Only the five fields below exist. When options are read from a document
/// (see [`EnvOptions::from_yaml_str`]) unknown fields and non-string values
/// are rejected before the context is touched.
///
/// # Examples
///
/// ```
/// use layerenv::EnvOptions;
///
/// let options = EnvOptions::new()
///     .without_dotenv()
///     .with_default("PORT", "8080")
///     .with_constant("APP_NAME", "billing")
///     .ensure("DATABASE_URL")
///     .with_miss_value("n/a");
///
/// assert!(!options.dotenv);
/// assert_eq!(options.defaults["PORT"], "8080");
/// assert_eq!(options.ensure, vec!["DATABASE_URL".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EnvOptions {
    /// Whether to read the `.env` file during this update.
    pub dotenv: bool,
    /// Fallback values, merged cumulatively into the `defaults` layer.
    #[serde(deserialize_with = "strict::string_map")]
    pub defaults: EnvMap,
    /// Fixed values, merged cumulatively into the `constants` layer.
    #[serde(deserialize_with = "strict::string_map")]
    pub constants: EnvMap,
    /// Names that must be present in the merged result.
    #[serde(deserialize_with = "strict::string_list")]
    pub ensure: Vec<String>,
    /// Value returned by [`LiveView::get`](super::LiveView::get) on a miss.
    #[serde(rename = "missValue", alias = "miss_value")]
    pub miss_value: Value,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            dotenv: true,
            defaults: EnvMap::new(),
            constants: EnvMap::new(),
            ensure: Vec::new(),
            miss_value: Value::Null,
        }
    }
}

impl EnvOptions {
    /// Default options: read `.env`, add nothing, require nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a YAML (or JSON) document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// document is malformed, names an unknown field, or has non-string
    /// values in `defaults`, `constants` or `ensure`.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerenv::EnvOptions;
    ///
    /// let options = EnvOptions::from_yaml_str("defaults:\n  PORT: \"8080\"\nmissValue: n/a\n").unwrap();
    /// assert_eq!(options.defaults["PORT"], "8080");
    /// assert_eq!(options.miss_value, "n/a");
    ///
    /// assert!(EnvOptions::from_yaml_str("verbose: true").is_err());
    /// ```
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    /// Read options from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file can't be read, or a configuration
    /// error as for [`EnvOptions::from_yaml_str`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Skip reading the `.env` file.
    #[must_use]
    pub fn without_dotenv(mut self) -> Self {
        self.dotenv = false;
        self
    }

    /// Add one default value.
    #[must_use]
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Add several default values.
    #[must_use]
    pub fn with_defaults<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.defaults
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add one constant value.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    /// Add several constant values.
    #[must_use]
    pub fn with_constants<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.constants
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Require a name to be present after merging.
    #[must_use]
    pub fn ensure(mut self, name: impl Into<String>) -> Self {
        self.ensure.push(name.into());
        self
    }

    /// Set the miss value handed to the resulting live view.
    #[must_use]
    pub fn with_miss_value(mut self, value: impl Into<Value>) -> Self {
        self.miss_value = value.into();
        self
    }

    /// Overlay another set of options on top of this one.
    ///
    /// Entries in `other` win in both maps and new `ensure` names are
    /// appended once. Either side can switch `dotenv` off. A null
    /// `miss_value` in `other` keeps the current one.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        self.dotenv &= other.dotenv;
        self.defaults.extend(other.defaults);
        self.constants.extend(other.constants);
        for name in other.ensure {
            if !self.ensure.contains(&name) {
                self.ensure.push(name);
            }
        }
        if !other.miss_value.is_null() {
            self.miss_value = other.miss_value;
        }
        self
    }
}

/// Deserializers that refuse to coerce scalars into strings.
///
/// A plain YAML scalar such as `1` or `true` would otherwise land in a
/// `String` field unchanged. A missing or null field reads as empty.
mod strict {
    use crate::context::layer::EnvMap;
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_yaml::{Mapping, Value};

    fn kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Sequence(_) => "a sequence",
            Value::Mapping(_) => "a mapping",
            Value::Tagged(_) => "a tagged value",
        }
    }

    pub(super) fn string_map<'de, D>(deserializer: D) -> Result<EnvMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default();
        let mut map = EnvMap::new();
        for (key, value) in raw {
            let key = match key {
                Value::String(key) => key,
                other => {
                    return Err(D::Error::custom(format!(
                        "expected string keys, found {}",
                        kind(&other)
                    )))
                }
            };
            let value = match value {
                Value::String(value) => value,
                other => {
                    return Err(D::Error::custom(format!(
                        "expected a string value for {key}, found {}",
                        kind(&other)
                    )))
                }
            };
            map.insert(key, value);
        }
        Ok(map)
    }

    pub(super) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Vec<Value>>::deserialize(deserializer)?
            .unwrap_or_default()
            .into_iter()
            .map(|item| match item {
                Value::String(name) => Ok(name),
                other => Err(D::Error::custom(format!(
                    "expected string items, found {}",
                    kind(&other)
                ))),
            })
            .collect()
    }
}
