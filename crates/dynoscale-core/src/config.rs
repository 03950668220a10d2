//! Autoscaling configuration attached to the host project's custom settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigResult;

/// Key under the host's custom settings holding the scaling config list.
pub const AUTOSCALING_KEY: &str = "autoscaling";

/// Scaling configuration for a single table.
///
/// `read` and `write` are independently optional; a table may scale one
/// dimension, both, or neither. A table with neither emits no target or
/// policy resources but still contributes to the shared scaling role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableScaling {
    /// Logical name of the table resource in the compiled template.
    pub table: String,
    pub read: Option<CapacitySpec>,
    pub write: Option<CapacitySpec>,
}

/// Capacity bounds and utilization target for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySpec {
    /// Lower capacity-unit bound. Assumed `>= 1` and `<= maximum`.
    pub minimum: u64,
    /// Upper capacity-unit bound.
    pub maximum: u64,
    /// Target utilization as a fraction in `(0, 1]`.
    pub usage: f64,
    /// Time-windowed overrides of the capacity bounds.
    #[serde(default)]
    pub actions: Vec<ScheduledAction>,
}

/// A scheduled override of the capacity bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub name: String,
    /// Cron or rate expression understood by Application Auto Scaling.
    pub schedule: String,
    pub minimum: u64,
    pub maximum: u64,
}

/// Extract and decode the autoscaling list from the host's custom settings.
///
/// Returns `Ok(None)` when the key is absent or null, the expected path
/// for projects without autoscaling. A present but malformed value is a
/// decode error for the caller to report.
pub fn autoscaling_from_custom(custom: &Value) -> ConfigResult<Option<Vec<TableScaling>>> {
    match custom.get(AUTOSCALING_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => {
            let configs: Vec<TableScaling> = serde_json::from_value(raw.clone())?;
            Ok(Some(configs))
        }
    }
}
