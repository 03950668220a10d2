//! Property values, literal and late-bound.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A CloudFormation property value.
///
/// Literal variants serialize as plain JSON. The `Ref`, `GetAtt`, and
/// `Join` variants serialize to intrinsic-function form and are resolved
/// at deploy time by the provisioning engine.
#[derive(Debug, Clone, PartialEq)]
pub enum CfnValue {
    String(String),
    Int(u64),
    Float(f64),
    List(Vec<CfnValue>),
    Map(BTreeMap<String, CfnValue>),
    /// `{"Ref": name}` — the value of a named resource or pseudo parameter.
    Ref(String),
    /// `{"Fn::GetAtt": [name, attribute]}` — an attribute of a named resource.
    GetAtt(String, String),
    /// `{"Fn::Join": [delimiter, parts]}` — parts concatenated at deploy time.
    Join(String, Vec<CfnValue>),
}

impl CfnValue {
    /// A `Ref` to a named resource or pseudo parameter.
    pub fn reference(name: impl Into<String>) -> Self {
        CfnValue::Ref(name.into())
    }

    /// A `Fn::GetAtt` on a named resource.
    pub fn get_att(name: impl Into<String>, attribute: impl Into<String>) -> Self {
        CfnValue::GetAtt(name.into(), attribute.into())
    }

    /// A `Fn::Join` over the given parts.
    pub fn join(delimiter: impl Into<String>, parts: Vec<CfnValue>) -> Self {
        CfnValue::Join(delimiter.into(), parts)
    }
}

impl From<&str> for CfnValue {
    fn from(s: &str) -> Self {
        CfnValue::String(s.to_string())
    }
}

impl From<String> for CfnValue {
    fn from(s: String) -> Self {
        CfnValue::String(s)
    }
}

impl From<u64> for CfnValue {
    fn from(n: u64) -> Self {
        CfnValue::Int(n)
    }
}

impl From<f64> for CfnValue {
    fn from(x: f64) -> Self {
        CfnValue::Float(x)
    }
}

impl Serialize for CfnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CfnValue::String(s) => serializer.serialize_str(s),
            CfnValue::Int(n) => serializer.serialize_u64(*n),
            CfnValue::Float(x) => serializer.serialize_f64(*x),
            CfnValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            CfnValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            CfnValue::Ref(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", name)?;
                map.end()
            }
            CfnValue::GetAtt(name, attribute) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[name.as_str(), attribute.as_str()])?;
                map.end()
            }
            CfnValue::Join(delimiter, parts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(
                    "Fn::Join",
                    &JoinArgs {
                        delimiter,
                        parts,
                    },
                )?;
                map.end()
            }
        }
    }
}

/// The `[delimiter, [parts...]]` argument pair of `Fn::Join`.
struct JoinArgs<'a> {
    delimiter: &'a str,
    parts: &'a [CfnValue],
}

impl Serialize for JoinArgs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(self.delimiter)?;
        seq.serialize_element(self.parts)?;
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literals_serialize_plain() {
        assert_eq!(serde_json::to_value(CfnValue::from("table/")).unwrap(), json!("table/"));
        assert_eq!(serde_json::to_value(CfnValue::Int(60)).unwrap(), json!(60));
        assert_eq!(serde_json::to_value(CfnValue::Float(70.0)).unwrap(), json!(70.0));
    }

    #[test]
    fn ref_serializes_to_intrinsic_form() {
        assert_eq!(
            serde_json::to_value(CfnValue::reference("Orders")).unwrap(),
            json!({ "Ref": "Orders" })
        );
    }

    #[test]
    fn get_att_serializes_to_intrinsic_form() {
        assert_eq!(
            serde_json::to_value(CfnValue::get_att("ScalingRole", "Arn")).unwrap(),
            json!({ "Fn::GetAtt": ["ScalingRole", "Arn"] })
        );
    }

    #[test]
    fn join_serializes_to_intrinsic_form() {
        let value = CfnValue::join(
            "",
            vec![CfnValue::from("table/"), CfnValue::reference("Orders")],
        );
        assert_eq!(
            serde_json::to_value(value).unwrap(),
            json!({ "Fn::Join": ["", ["table/", { "Ref": "Orders" }]] })
        );
    }

    #[test]
    fn nested_map_serializes() {
        let mut inner = BTreeMap::new();
        inner.insert("MinCapacity".to_string(), CfnValue::Int(1));
        let mut outer = BTreeMap::new();
        outer.insert("ScalableTargetAction".to_string(), CfnValue::Map(inner));

        assert_eq!(
            serde_json::to_value(CfnValue::Map(outer)).unwrap(),
            json!({ "ScalableTargetAction": { "MinCapacity": 1 } })
        );
    }
}
