//! Property-based tests for context merging.

use super::layer::{EnvMap, Layer};
use super::options::EnvOptions;
use super::source::MapEnv;
use super::state::Context;
use super::EnvContext;
use crate::logging::{LogLevel, Logger};
use proptest::prelude::*;

// Small key space so layers overlap often.
fn env_map_strategy() -> impl Strategy<Value = EnvMap> {
    prop::collection::btree_map("[A-E]", "[a-z0-9]{0,6}", 0..5)
}

fn context_strategy() -> impl Strategy<Value = Context> {
    (
        env_map_strategy(),
        env_map_strategy(),
        env_map_strategy(),
        env_map_strategy(),
    )
        .prop_map(|(defaults, dotenv, process, constants)| Context {
            defaults,
            dotenv,
            process,
            constants,
            ..Default::default()
        })
}

fn quiet_context(process: EnvMap) -> EnvContext {
    EnvContext::builder()
        .with_env_source(MapEnv(process))
        .with_logger(Logger::new(LogLevel::Quiet))
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Every merged value comes from the highest layer that defines the key.
    #[test]
    fn merged_value_comes_from_highest_layer(ctx in context_strategy()) {
        let merged = ctx.merged();

        for (key, value) in &merged {
            let winner = Layer::PRECEDENCE
                .into_iter()
                .rev()
                .find(|layer| ctx.layer(*layer).contains_key(key))
                .unwrap();
            prop_assert_eq!(value, &ctx.layer(winner)[key]);
            prop_assert_eq!(ctx.resolve(key), Some((winner, value.as_str())));
        }
    }

    // The merged key set is exactly the union of all layers.
    #[test]
    fn merged_keys_are_union(ctx in context_strategy()) {
        let merged = ctx.merged();
        let union: std::collections::BTreeSet<&String> =
            ctx.layers().flat_map(|(_, map)| map.keys()).collect();
        prop_assert_eq!(merged.keys().collect::<std::collections::BTreeSet<_>>(), union);
    }

    // Successive updates accumulate defaults with last-writer-wins.
    #[test]
    fn defaults_accumulate_across_updates(
        batches in prop::collection::vec(env_map_strategy(), 1..5),
    ) {
        let ctx = quiet_context(EnvMap::new());
        let mut expected = EnvMap::new();

        for batch in &batches {
            expected.extend(batch.clone());
            ctx.update(&EnvOptions {
                dotenv: false,
                defaults: batch.clone(),
                ..Default::default()
            })
            .unwrap();
        }

        prop_assert_eq!(ctx.ctx().defaults, expected);
    }

    // Constants always win over the process environment.
    #[test]
    fn constants_override_process(process in env_map_strategy(), constants in env_map_strategy()) {
        let ctx = quiet_context(process.clone());
        let env = ctx
            .update(&EnvOptions {
                dotenv: false,
                constants: constants.clone(),
                ..Default::default()
            })
            .unwrap();

        for (key, value) in &constants {
            prop_assert_eq!(env.snapshot().get(key), Some(value.as_str()));
        }
        for (key, value) in &process {
            if !constants.contains_key(key) {
                prop_assert_eq!(env.snapshot().get(key), Some(value.as_str()));
            }
        }
    }
}
