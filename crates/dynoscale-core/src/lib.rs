//! dynoscale-core — domain types for DynamoDB autoscaling synthesis.
//!
//! Defines the per-table scaling configuration (`TableScaling`,
//! `CapacitySpec`, `ScheduledAction`), the throughput `Dimension` axis,
//! and decoding of the configuration list from the host framework's
//! custom settings.
//!
//! Decoding is the validation boundary: shape errors surface here, while
//! value-level mistakes that still typecheck (such as an inverted
//! minimum/maximum pair) pass through and are rejected later by
//! CloudFormation.

pub mod config;
pub mod dimension;
pub mod error;

pub use config::{AUTOSCALING_KEY, CapacitySpec, ScheduledAction, TableScaling, autoscaling_from_custom};
pub use dimension::Dimension;
pub use error::{ConfigError, ConfigResult};
