//! The context record: four value layers plus accumulated errors.

use crate::context::layer::{EnvMap, Layer};
use crate::context::merger::LayerMerger;
use crate::dotenv::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated configuration state, grouped by source.
///
/// A `Context` is plain data. Sharing and mutation go through
/// [`EnvContext`](super::EnvContext); callers only ever see copies of it.
///
/// # Examples
///
/// ```
/// use layerenv::{Context, Layer};
///
/// let mut ctx = Context::default();
/// ctx.layer_mut(Layer::Defaults).insert("A".into(), "default".into());
/// ctx.layer_mut(Layer::Constants).insert("A".into(), "constant".into());
///
/// assert_eq!(ctx.merged()["A"], "constant");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Caller-supplied fallbacks, lowest precedence.
    pub defaults: EnvMap,
    /// Values parsed from the `.env` file.
    pub dotenv: EnvMap,
    /// Process environment as of the last update.
    pub process: EnvMap,
    /// Caller-supplied values that are never overridden.
    pub constants: EnvMap,
    /// Errors by source; only cleared by a reset.
    pub errors: BTreeMap<Layer, LoadError>,
}

impl Context {
    /// Borrow one layer.
    #[must_use]
    pub const fn layer(&self, layer: Layer) -> &EnvMap {
        match layer {
            Layer::Defaults => &self.defaults,
            Layer::Dotenv => &self.dotenv,
            Layer::Process => &self.process,
            Layer::Constants => &self.constants,
        }
    }

    /// Mutably borrow one layer.
    pub fn layer_mut(&mut self, layer: Layer) -> &mut EnvMap {
        match layer {
            Layer::Defaults => &mut self.defaults,
            Layer::Dotenv => &mut self.dotenv,
            Layer::Process => &mut self.process,
            Layer::Constants => &mut self.constants,
        }
    }

    /// All layers paired with their name, lowest precedence first.
    pub fn layers(&self) -> impl DoubleEndedIterator<Item = (Layer, &EnvMap)> + '_ {
        Layer::PRECEDENCE
            .into_iter()
            .map(move |layer| (layer, self.layer(layer)))
    }

    /// Merge all layers in precedence order.
    #[must_use]
    pub fn merged(&self) -> EnvMap {
        LayerMerger::merge(self.layers().map(|(_, map)| map))
    }

    /// The layer supplying the merged value of `name`, with that value.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<(Layer, &str)> {
        LayerMerger::resolve(self.layers(), name)
    }

    /// The error recorded for a source, if any.
    #[must_use]
    pub fn error(&self, layer: Layer) -> Option<&LoadError> {
        self.errors.get(&layer)
    }

    /// Check if every layer and the error slot are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers().all(|(_, map)| map.is_empty()) && self.errors.is_empty()
    }

    /// Return to the all-empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
