//! Pure fragment builders, one per resource concern.
//!
//! Each builder maps configuration into a named resource definition with
//! explicit dependencies, encoding the creation order the provisioning
//! engine must respect: table → role → target → policy. Capacity bounds
//! are passed through unchecked; CloudFormation validates them.

use std::collections::BTreeMap;

use dynoscale_core::{CapacitySpec, Dimension, TableScaling};
use dynoscale_template::{CfnValue, Fragment, Resource};

/// Logical name of the IAM role shared by every scalable target.
pub const SCALING_ROLE: &str = "ScalingRole";

/// IAM policy document version.
const POLICY_VERSION: &str = "2012-10-17";

/// Scale-in and scale-out cooldown applied to every policy, in seconds.
/// Intentionally not configurable.
const COOLDOWN_SECS: u64 = 60;

/// Deterministic name of a table's scalable target for one dimension.
pub fn scalable_target_name(table: &str, dimension: Dimension) -> String {
    format!("{table}AutoScalableTarget{dimension}")
}

/// Deterministic name of a table's scaling policy for one dimension.
pub fn scaling_policy_name(table: &str, dimension: Dimension) -> String {
    format!("{table}AutoScalingPolicy{dimension}")
}

/// Register one throughput dimension of a table as a scalable target.
///
/// Depends on the table and the shared role. The scheduled-action list is
/// always emitted, empty when the capacity spec carries no actions.
pub fn scalable_target(table: &str, capacity: &CapacitySpec, dimension: Dimension) -> Fragment {
    let actions: Vec<CfnValue> = capacity
        .actions
        .iter()
        .map(|action| {
            let mut bounds = BTreeMap::new();
            bounds.insert("MinCapacity".to_string(), CfnValue::Int(action.minimum));
            bounds.insert("MaxCapacity".to_string(), CfnValue::Int(action.maximum));

            let mut entry = BTreeMap::new();
            entry.insert("ScalableTargetAction".to_string(), CfnValue::Map(bounds));
            entry.insert(
                "ScheduledActionName".to_string(),
                CfnValue::from(action.name.as_str()),
            );
            entry.insert("Schedule".to_string(), CfnValue::from(action.schedule.as_str()));
            CfnValue::Map(entry)
        })
        .collect();

    let mut properties = BTreeMap::new();
    properties.insert("MinCapacity".to_string(), CfnValue::Int(capacity.minimum));
    properties.insert("MaxCapacity".to_string(), CfnValue::Int(capacity.maximum));
    properties.insert("ScheduledActions".to_string(), CfnValue::List(actions));
    properties.insert(
        "ResourceId".to_string(),
        CfnValue::join(
            "",
            vec![CfnValue::from("table/"), CfnValue::reference(table)],
        ),
    );
    properties.insert("RoleARN".to_string(), CfnValue::get_att(SCALING_ROLE, "Arn"));
    properties.insert(
        "ScalableDimension".to_string(),
        CfnValue::String(dimension.scalable_dimension()),
    );
    properties.insert("ServiceNamespace".to_string(), CfnValue::from("dynamodb"));

    Fragment::of(
        scalable_target_name(table, dimension),
        Resource {
            kind: "AWS::ApplicationAutoScaling::ScalableTarget".to_string(),
            depends_on: vec![table.to_string(), SCALING_ROLE.to_string()],
            properties,
        },
    )
}

/// Bind a scalable target to a target-tracking utilization policy.
///
/// References the target by its deterministic name, so the two fragments
/// bind without a lookup table. The fractional `usage` becomes a
/// percentage target value.
pub fn scaling_policy(table: &str, capacity: &CapacitySpec, dimension: Dimension) -> Fragment {
    let name = scaling_policy_name(table, dimension);
    let target = scalable_target_name(table, dimension);

    let mut metric = BTreeMap::new();
    metric.insert(
        "PredefinedMetricType".to_string(),
        CfnValue::String(dimension.utilization_metric()),
    );

    let mut tracking = BTreeMap::new();
    tracking.insert(
        "PredefinedMetricSpecification".to_string(),
        CfnValue::Map(metric),
    );
    tracking.insert("ScaleInCooldown".to_string(), CfnValue::Int(COOLDOWN_SECS));
    tracking.insert("ScaleOutCooldown".to_string(), CfnValue::Int(COOLDOWN_SECS));
    tracking.insert(
        "TargetValue".to_string(),
        CfnValue::Float(capacity.usage * 100.0),
    );

    let mut properties = BTreeMap::new();
    properties.insert("PolicyName".to_string(), CfnValue::from(name.as_str()));
    properties.insert("PolicyType".to_string(), CfnValue::from("TargetTrackingScaling"));
    properties.insert(
        "ScalingTargetId".to_string(),
        CfnValue::reference(target.as_str()),
    );
    properties.insert(
        "TargetTrackingScalingPolicyConfiguration".to_string(),
        CfnValue::Map(tracking),
    );

    let depends_on = vec![table.to_string(), target];
    Fragment::of(
        name,
        Resource {
            kind: "AWS::ApplicationAutoScaling::ScalingPolicy".to_string(),
            depends_on,
            properties,
        },
    )
}

/// The single IAM role shared by every scalable target.
///
/// Depends on every configured table so it is created only after all of
/// them exist, including tables that scale neither dimension. Alarm
/// permissions are unconditional; table permissions are scoped to the
/// configured tables by account-relative ARN, which stays valid across
/// deployment environments.
pub fn scaling_role(configs: &[TableScaling]) -> Fragment {
    let mut principal = BTreeMap::new();
    principal.insert(
        "Service".to_string(),
        CfnValue::from("application-autoscaling.amazonaws.com"),
    );

    let mut assume_statement = BTreeMap::new();
    assume_statement.insert("Action".to_string(), CfnValue::from("sts:AssumeRole"));
    assume_statement.insert("Effect".to_string(), CfnValue::from("Allow"));
    assume_statement.insert("Principal".to_string(), CfnValue::Map(principal));

    let mut assume_role = BTreeMap::new();
    assume_role.insert("Version".to_string(), CfnValue::from(POLICY_VERSION));
    assume_role.insert(
        "Statement".to_string(),
        CfnValue::List(vec![CfnValue::Map(assume_statement)]),
    );

    let mut alarms = BTreeMap::new();
    alarms.insert(
        "Action".to_string(),
        CfnValue::List(vec![
            "cloudwatch:PutMetricAlarm".into(),
            "cloudwatch:DescribeAlarms".into(),
            "cloudwatch:DeleteAlarms".into(),
            "cloudwatch:GetMetricStatistics".into(),
            "cloudwatch:SetAlarmState".into(),
        ]),
    );
    alarms.insert("Effect".to_string(), CfnValue::from("Allow"));
    alarms.insert("Resource".to_string(), CfnValue::from("*"));

    let mut tables = BTreeMap::new();
    tables.insert(
        "Action".to_string(),
        CfnValue::List(vec![
            "dynamodb:DescribeTable".into(),
            "dynamodb:UpdateTable".into(),
        ]),
    );
    tables.insert("Effect".to_string(), CfnValue::from("Allow"));
    tables.insert(
        "Resource".to_string(),
        CfnValue::List(configs.iter().map(|config| table_arn(&config.table)).collect()),
    );

    let mut policy_document = BTreeMap::new();
    policy_document.insert("Version".to_string(), CfnValue::from(POLICY_VERSION));
    policy_document.insert(
        "Statement".to_string(),
        CfnValue::List(vec![CfnValue::Map(alarms), CfnValue::Map(tables)]),
    );

    let mut policy = BTreeMap::new();
    policy.insert("PolicyName".to_string(), CfnValue::from("ScalingRolePolicy"));
    policy.insert("PolicyDocument".to_string(), CfnValue::Map(policy_document));

    let mut properties = BTreeMap::new();
    properties.insert("AssumeRolePolicyDocument".to_string(), CfnValue::Map(assume_role));
    properties.insert("Policies".to_string(), CfnValue::List(vec![CfnValue::Map(policy)]));

    Fragment::of(
        SCALING_ROLE,
        Resource {
            kind: "AWS::IAM::Role".to_string(),
            depends_on: configs.iter().map(|config| config.table.clone()).collect(),
            properties,
        },
    )
}

/// Account-relative table ARN, resolved by CloudFormation in whichever
/// account the stack deploys into.
fn table_arn(table: &str) -> CfnValue {
    CfnValue::join(
        "",
        vec![
            "arn:aws:dynamodb:*:".into(),
            CfnValue::reference("AWS::AccountId"),
            ":table/".into(),
            CfnValue::reference(table),
        ],
    )
}
