//! Layer merging and precedence handling.
//!
//! Two kinds of merge happen in a context:
//! - cumulative updates of a single layer across calls ([`LayerMerger::merge_into`])
//! - the final fold of all layers into one view ([`LayerMerger::merge`])
//!
//! Both follow the same rule: the source overwrites same-named keys in the
//! target and never removes keys.

use crate::context::layer::{EnvMap, Layer};

/// Merges variable maps according to precedence rules.
///
/// # Examples
///
/// ```
/// use layerenv::{EnvMap, LayerMerger};
///
/// let mut target = EnvMap::from([("A".to_string(), "1".to_string())]);
/// let source = EnvMap::from([
///     ("A".to_string(), "2".to_string()),
///     ("B".to_string(), "3".to_string()),
/// ]);
///
/// LayerMerger::merge_into(&mut target, &source);
/// assert_eq!(target["A"], "2");
/// assert_eq!(target["B"], "3");
/// ```
pub struct LayerMerger;

impl LayerMerger {
    /// Merge several maps into one.
    ///
    /// Maps should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge<'a, I>(sources: I) -> EnvMap
    where
        I: IntoIterator<Item = &'a EnvMap>,
    {
        let mut result = EnvMap::new();

        for source in sources {
            Self::merge_into(&mut result, source);
        }

        result
    }

    /// Merge source into target (source overwrites target, nothing is removed).
    pub fn merge_into(target: &mut EnvMap, source: &EnvMap) {
        target.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Find the highest-precedence layer defining `name`.
    ///
    /// `layers` must be given lowest precedence first, as in [`Layer::PRECEDENCE`].
    #[must_use]
    pub fn resolve<'a, I>(layers: I, name: &str) -> Option<(Layer, &'a str)>
    where
        I: IntoIterator<Item = (Layer, &'a EnvMap)>,
        I::IntoIter: DoubleEndedIterator,
    {
        layers
            .into_iter()
            .rev()
            .find_map(|(layer, map)| map.get(name).map(|v| (layer, v.as_str())))
    }
}
