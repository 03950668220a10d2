//! Resource definitions, fragments, and the mergeable resource map.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::CfnValue;

/// A single resource definition: type tag, dependency list, property bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    /// CloudFormation resource type, e.g. `AWS::IAM::Role`.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Logical names of resources that must exist before this one is created.
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(rename = "Properties")]
    pub properties: BTreeMap<String, CfnValue>,
}

/// An ordered set of named resources produced by one builder, ready to
/// merge into a template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    entries: Vec<(String, Resource)>,
}

impl Fragment {
    /// A fragment holding a single named resource.
    pub fn of(name: impl Into<String>, resource: Resource) -> Self {
        Fragment {
            entries: vec![(name.into(), resource)],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Resource)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Fragment {
    type Item = (String, Resource);
    type IntoIter = std::vec::IntoIter<(String, Resource)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The `Resources` section of a compiled template.
///
/// Owned mapping of logical name to definition. `merge` is additive for
/// new names and last-write-wins for collisions; entries not named by
/// the merged fragment are never touched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Resources {
    entries: BTreeMap<String, Resource>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a resource by logical name.
    pub fn insert(&mut self, name: impl Into<String>, resource: Resource) {
        self.entries.insert(name.into(), resource);
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Merge every entry of `fragment` into the map, replacing any
    /// existing resource with the same logical name.
    pub fn merge(&mut self, fragment: Fragment) {
        for (name, resource) in fragment {
            self.entries.insert(name, resource);
        }
    }
}
