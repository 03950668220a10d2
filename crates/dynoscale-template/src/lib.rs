//! dynoscale-template — a typed model of the compiled template's resources.
//!
//! CloudFormation property bags mix literal values with late-bound
//! intrinsic functions (`Ref`, `Fn::GetAtt`, `Fn::Join`). `CfnValue`
//! keeps that distinction explicit: the reference variants serialize to
//! intrinsic-function JSON and are only ever resolved by CloudFormation
//! itself, never locally.
//!
//! `Resources` is the owned stand-in for the template's `Resources`
//! section. Fragments merge into it at resource-name granularity with
//! last-write-wins collision semantics; entries not named by a fragment
//! are never touched.

pub mod resource;
pub mod value;

pub use resource::{Fragment, Resource, Resources};
pub use value::CfnValue;
