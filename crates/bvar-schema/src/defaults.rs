//! # Defaults
//!
//! Fills a parameter payload with the defaults declared by its variables.

use serde_json::{Map, Value};

use bvar_core::BrokerVariable;

/// Add default values for variables missing from `parameters`.
///
/// A key that is already present is never touched, whatever its value
/// (including `null`, `0` or `""`). Variables without a default are skipped.
/// Applying the same variables twice is a no-op the second time.
pub fn apply_defaults(parameters: &mut Map<String, Value>, variables: &[BrokerVariable]) {
    for variable in variables {
        let Some(default) = variable.default_value() else {
            continue;
        };
        if !parameters.contains_key(&variable.field_name) {
            tracing::trace!(field = %variable.field_name, "applying default");
            parameters.insert(variable.field_name.clone(), default.clone());
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use bvar_core::JsonType;
    use proptest::prelude::*;

    proptest! {
        /// A second application changes nothing.
        #[test]
        fn apply_defaults_is_idempotent(
            present in prop::collection::btree_map("[a-d]", any::<i64>(), 0..4),
            defaults in prop::collection::btree_map("[a-f]", any::<i64>(), 0..6),
        ) {
            let vars: Vec<BrokerVariable> = defaults
                .iter()
                .map(|(name, d)| {
                    BrokerVariable::new(name.clone(), JsonType::Integer, "Generated.").with_default(*d)
                })
                .collect();
            let mut params: Map<String, Value> = present
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(*v)))
                .collect();

            apply_defaults(&mut params, &vars);
            let once = params.clone();
            apply_defaults(&mut params, &vars);
            prop_assert_eq!(&params, &once);

            for (k, v) in &present {
                prop_assert_eq!(&params[k], &Value::from(*v));
            }
        }
    }
}
