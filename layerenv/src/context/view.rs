//! Read views over merged variables.
//!
//! An update produces two views with different freshness guarantees:
//!
//! - [`Snapshot`] is the merge computed when it was built. It never changes,
//!   so it suits callers that read their configuration once at startup.
//! - [`LiveView`] keeps a handle on the [`EnvContext`] and re-merges on every
//!   lookup, so it sees later updates. It also carries the miss value.
//!
//! [`EnvList`] bundles both.

use crate::context::aggregator::EnvContext;
use crate::context::layer::EnvMap;
use serde::Serialize;
use serde_json::Value;

/// An immutable merged view.
///
/// # Examples
///
/// ```
/// use layerenv::{EnvMap, Snapshot};
///
/// let snapshot = Snapshot::new(EnvMap::from([("PORT".to_string(), "8080".to_string())]));
/// assert_eq!(snapshot.get("PORT"), Some("8080"));
/// assert!(!snapshot.contains("HOST"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: EnvMap,
}

impl Snapshot {
    /// Wrap an already merged map.
    #[must_use]
    pub const fn new(values: EnvMap) -> Self {
        Self { values }
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Check if a name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Name/value pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &EnvMap {
        &self.values
    }

    /// Take the underlying map.
    #[must_use]
    pub fn into_map(self) -> EnvMap {
        self.values
    }
}

/// A view that reads the shared context at call time.
///
/// # Examples
///
/// ```
/// use layerenv::{EnvContext, EnvOptions, MapEnv};
///
/// let ctx = EnvContext::builder().with_env_source(MapEnv::default()).build();
/// let mut live = ctx.live_view("n/a");
/// assert_eq!(live.get("LATER"), "n/a");
///
/// ctx.update(&EnvOptions::new().without_dotenv().with_default("LATER", "set")).unwrap();
/// assert_eq!(live.get("LATER"), "set");
///
/// live.set_miss_value(0);
/// assert_eq!(live.get("NOT_SET"), 0);
/// ```
#[derive(Debug, Clone)]
pub struct LiveView {
    ctx: EnvContext,
    miss_value: Value,
}

impl LiveView {
    /// Create a view over `ctx`.
    #[must_use]
    pub fn new(ctx: EnvContext, miss_value: impl Into<Value>) -> Self {
        Self {
            ctx,
            miss_value: miss_value.into(),
        }
    }

    /// Current value of `name`, or the miss value if it is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.get_str(name)
            .map_or_else(|| self.miss_value.clone(), Value::String)
    }

    /// Current value of `name`, if present.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<String> {
        self.ctx.resolve(name).map(|(_, value)| value)
    }

    /// Check if `name` is currently present.
    #[must_use]
    pub fn include(&self, name: &str) -> bool {
        self.ctx.resolve(name).is_some()
    }

    /// Alias of [`LiveView::include`].
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        self.include(name)
    }

    /// Replace the miss value.
    pub fn set_miss_value(&mut self, miss_value: impl Into<Value>) {
        self.miss_value = miss_value.into();
    }

    /// The current miss value.
    #[must_use]
    pub const fn miss_value(&self) -> &Value {
        &self.miss_value
    }

    /// The context this view reads.
    #[must_use]
    pub const fn context(&self) -> &EnvContext {
        &self.ctx
    }
}

/// The result of an update: a fixed snapshot plus a live view.
#[derive(Debug, Clone)]
pub struct EnvList {
    snapshot: Snapshot,
    live: LiveView,
}

impl EnvList {
    /// Pair a snapshot with a live view.
    #[must_use]
    pub const fn new(snapshot: Snapshot, live: LiveView) -> Self {
        Self { snapshot, live }
    }

    /// The merge as of the update that produced this list.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// A view that follows later changes to the context.
    #[must_use]
    pub const fn live(&self) -> &LiveView {
        &self.live
    }

    /// Mutable access to the live view, e.g. to change its miss value.
    pub fn live_mut(&mut self) -> &mut LiveView {
        &mut self.live
    }

    /// Keep only the snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Keep only the live view.
    #[must_use]
    pub fn into_live(self) -> LiveView {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::source::MapEnv;
    use crate::EnvOptions;

    fn context() -> EnvContext {
        EnvContext::builder()
            .with_env_source(MapEnv::default())
            .build()
    }

    #[test]
    fn test_snapshot_accessors() {
        let snapshot = Snapshot::new(EnvMap::from([
            ("B".to_string(), "2".to_string()),
            ("A".to_string(), "1".to_string()),
        ]));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(snapshot.iter().next(), Some(("A", "1")));
        assert_eq!(snapshot.get("C"), None);
        assert!(Snapshot::default().is_empty());
    }

    #[test]
    fn test_snapshot_serializes_flat() {
        let snapshot = Snapshot::new(EnvMap::from([("A".to_string(), "1".to_string())]));
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), r#"{"A":"1"}"#);
    }

    #[test]
    fn test_live_view_default_miss_value_is_null() {
        let live = LiveView::new(context(), Value::Null);
        assert_eq!(live.get("MISSING"), Value::Null);
        assert!(!live.include("MISSING"));
    }

    #[test]
    fn test_snapshot_does_not_follow_context() {
        let ctx = context();
        let list = ctx
            .update(&EnvOptions::new().without_dotenv().with_default("A", "1"))
            .unwrap();
        ctx.update(&EnvOptions::new().without_dotenv().with_default("A", "2"))
            .unwrap();

        assert_eq!(list.snapshot().get("A"), Some("1"));
        assert_eq!(list.live().get("A"), "2");
    }

    #[test]
    fn test_live_view_sees_reset() {
        let ctx = context();
        let list = ctx
            .update(&EnvOptions::new().without_dotenv().with_constant("C", "x"))
            .unwrap();
        assert!(list.live().includes("C"));

        ctx.reset(&EnvOptions::new().without_dotenv()).unwrap();
        assert!(!list.live().includes("C"));
        assert!(list.snapshot().contains("C"));
    }

    #[test]
    fn test_miss_value_contract() {
        let ctx = context();
        let mut list = ctx
            .update(&EnvOptions::new().without_dotenv().with_miss_value("n/a"))
            .unwrap();
        assert_eq!(list.live().get("NOT_SET"), "n/a");

        list.live_mut().set_miss_value(0);
        assert_eq!(list.live().get("NOT_SET"), 0);
        assert_eq!(list.live().miss_value(), &Value::from(0));
    }
}
