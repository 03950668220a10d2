//! dynoscale-synth — synthesizes Application Auto Scaling resources into
//! a compiled CloudFormation template.
//!
//! For every table in the autoscaling configuration, emits a scalable
//! target and a target-tracking scaling policy per configured throughput
//! dimension, plus one IAM role shared by all of them, and merges the
//! result into the template's resource map.
//!
//! # Synthesis pass
//!
//! ```text
//! role fragment                        (depends on every configured table)
//! for each config entry, in order:
//!     read?  → target fragment, policy fragment
//!     write? → target fragment, policy fragment
//! merge each fragment into Resources   (last write wins on collisions)
//! ```
//!
//! Resource names are deterministic functions of table and dimension, so
//! re-running the pass overwrites the same keys instead of duplicating
//! them. Any failure is reported as a single warning and never aborts the
//! deployment pipeline.

pub mod fragments;
pub mod synthesizer;

pub use fragments::{SCALING_ROLE, scalable_target, scaling_policy, scaling_role};
pub use synthesizer::{SynthOutcome, before_deploy, synthesize};
