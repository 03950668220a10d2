//! The synthesis pass: decode the configuration, then build and merge
//! fragments.
//!
//! Runs once per deployment, immediately before deployment artifacts are
//! finalized. The pass is best-effort: any failure is logged as a single
//! warning and the deployment pipeline continues without autoscaling
//! resources.

use dynoscale_core::{Dimension, TableScaling, autoscaling_from_custom};
use dynoscale_template::Resources;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::fragments;

/// Terminal state of one synthesis pass.
///
/// Every variant means the pipeline continues; `Failed` is a warning, not
/// an abort.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum SynthOutcome {
    /// Fragments were merged into the template.
    Merged {
        /// Number of fragments merged (role + targets + policies).
        fragments: usize,
    },
    /// No autoscaling configuration present; the template is untouched.
    Skipped,
    /// Synthesis failed. The warning was logged and the template left as
    /// it was.
    Failed { warning: String },
}

/// Pre-deploy hook: synthesize autoscaling resources into `resources`.
///
/// `custom` is the host project's custom-settings value; the configuration
/// list is expected under its `autoscaling` key. Resolves once, after all
/// merges are applied, and never with an error.
pub async fn before_deploy(custom: &Value, resources: &mut Resources) -> SynthOutcome {
    match try_synthesize(custom, resources) {
        Ok(Some(fragments)) => {
            info!(fragments, "autoscaling resources merged");
            SynthOutcome::Merged { fragments }
        }
        Ok(None) => {
            debug!("no autoscaling configuration, skipping synthesis");
            SynthOutcome::Skipped
        }
        Err(error) => {
            warn!(error = %error, "autoscaling synthesis failed");
            SynthOutcome::Failed {
                warning: error.to_string(),
            }
        }
    }
}

/// `Ok(None)` when no configuration is present, `Ok(Some(n))` after a
/// merge of `n` fragments. Every fallible step funnels through here so the
/// caller has a single catch point.
fn try_synthesize(custom: &Value, resources: &mut Resources) -> anyhow::Result<Option<usize>> {
    let Some(configs) = autoscaling_from_custom(custom)? else {
        return Ok(None);
    };
    Ok(Some(synthesize(&configs, resources)))
}

/// Build and merge every fragment for `configs`, in declaration order.
///
/// The shared role merges first, then per table {read target, read policy,
/// write target, write policy} for each dimension present. Returns the
/// number of fragments merged. Deterministic names make the pass
/// idempotent: re-running overwrites the same keys.
pub fn synthesize(configs: &[TableScaling], resources: &mut Resources) -> usize {
    let mut merged = 0;

    resources.merge(fragments::scaling_role(configs));
    merged += 1;

    for config in configs {
        for (dimension, capacity) in [
            (Dimension::Read, &config.read),
            (Dimension::Write, &config.write),
        ] {
            let Some(capacity) = capacity else { continue };
            resources.merge(fragments::scalable_target(&config.table, capacity, dimension));
            resources.merge(fragments::scaling_policy(&config.table, capacity, dimension));
            merged += 2;
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynoscale_core::CapacitySpec;
    use serde_json::json;

    fn capacity(minimum: u64, maximum: u64, usage: f64) -> CapacitySpec {
        CapacitySpec {
            minimum,
            maximum,
            usage,
            actions: Vec::new(),
        }
    }

    fn config(table: &str, read: Option<CapacitySpec>, write: Option<CapacitySpec>) -> TableScaling {
        TableScaling {
            table: table.to_string(),
            read,
            write,
        }
    }

    #[test]
    fn read_only_config_emits_no_write_resources() {
        let configs = vec![config("Orders", Some(capacity(5, 50, 0.7)), None)];
        let mut resources = Resources::new();

        let merged = synthesize(&configs, &mut resources);

        assert_eq!(merged, 3);
        assert!(resources.contains("OrdersAutoScalableTargetRead"));
        assert!(resources.contains("OrdersAutoScalingPolicyRead"));
        assert!(!resources.contains("OrdersAutoScalableTargetWrite"));
        assert!(!resources.contains("OrdersAutoScalingPolicyWrite"));
    }

    #[test]
    fn both_dimensions_emit_four_resources_plus_role() {
        let configs = vec![config(
            "Orders",
            Some(capacity(5, 50, 0.7)),
            Some(capacity(1, 10, 0.5)),
        )];
        let mut resources = Resources::new();

        let merged = synthesize(&configs, &mut resources);

        assert_eq!(merged, 5);
        assert_eq!(resources.len(), 5);
        for name in [
            "ScalingRole",
            "OrdersAutoScalableTargetRead",
            "OrdersAutoScalingPolicyRead",
            "OrdersAutoScalableTargetWrite",
            "OrdersAutoScalingPolicyWrite",
        ] {
            assert!(resources.contains(name), "missing {name}");
        }
    }

    #[test]
    fn dimensionless_config_still_feeds_the_role() {
        let configs = vec![
            config("Orders", Some(capacity(5, 50, 0.7)), None),
            config("Audit", None, None),
        ];
        let mut resources = Resources::new();

        synthesize(&configs, &mut resources);

        assert!(!resources.contains("AuditAutoScalableTargetRead"));
        assert!(!resources.contains("AuditAutoScalableTargetWrite"));
        let role = resources.get("ScalingRole").unwrap();
        assert_eq!(role.depends_on, vec!["Orders".to_string(), "Audit".to_string()]);
    }

    #[test]
    fn synthesis_is_idempotent() {
        let configs = vec![config(
            "Orders",
            Some(capacity(5, 50, 0.7)),
            Some(capacity(1, 10, 0.5)),
        )];

        let mut once = Resources::new();
        synthesize(&configs, &mut once);

        let mut twice = Resources::new();
        synthesize(&configs, &mut twice);
        synthesize(&configs, &mut twice);

        assert_eq!(
            serde_json::to_value(&once).unwrap(),
            serde_json::to_value(&twice).unwrap()
        );
    }

    #[tokio::test]
    async fn missing_autoscaling_key_skips() {
        let custom = json!({ "some-other-plugin": true });
        let mut resources = Resources::new();

        let outcome = before_deploy(&custom, &mut resources).await;

        assert_eq!(outcome, SynthOutcome::Skipped);
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn null_autoscaling_key_skips() {
        let custom = json!({ "autoscaling": null });
        let mut resources = Resources::new();

        let outcome = before_deploy(&custom, &mut resources).await;

        assert_eq!(outcome, SynthOutcome::Skipped);
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn valid_configuration_merges() {
        let custom = json!({
            "autoscaling": [{
                "table": "Orders",
                "read": { "minimum": 5, "maximum": 50, "usage": 0.7 }
            }]
        });
        let mut resources = Resources::new();

        let outcome = before_deploy(&custom, &mut resources).await;

        assert_eq!(outcome, SynthOutcome::Merged { fragments: 3 });
        assert_eq!(resources.len(), 3);
    }

    #[tokio::test]
    async fn malformed_configuration_resolves_with_warning() {
        let custom = json!({
            "autoscaling": [{
                "table": "Orders",
                "read": { "minimum": 5, "maximum": 50, "usage": "seventy" }
            }]
        });
        let mut resources = Resources::new();

        let outcome = before_deploy(&custom, &mut resources).await;

        let SynthOutcome::Failed { warning } = outcome else {
            panic!("expected Failed, got {outcome:?}");
        };
        assert!(warning.contains("invalid autoscaling configuration"));
        // Nothing merged before the decode failed.
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn empty_configuration_list_merges_only_the_role() {
        let custom = json!({ "autoscaling": [] });
        let mut resources = Resources::new();

        let outcome = before_deploy(&custom, &mut resources).await;

        assert_eq!(outcome, SynthOutcome::Merged { fragments: 1 });
        assert!(resources.contains("ScalingRole"));
        assert!(resources.get("ScalingRole").unwrap().depends_on.is_empty());
    }
}
