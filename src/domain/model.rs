use serde::{Deserialize, Serialize};
use std::fmt;

/// Record `type` that carries zone membership; all other types are skipped.
pub const ZONE_TYPE: &str = "Zone";

/// A topology record reduced to the fields classification needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopologyRecord {
    pub name: String,
    pub r#type: String,
    pub parent: String,
    pub endpoints: Vec<String>,
}

impl TopologyRecord {
    pub fn is_zone(&self) -> bool {
        self.r#type == ZONE_TYPE
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    properties: Option<WireProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct WireProperties {
    #[serde(default)]
    endpoints: Option<Vec<String>>,
    #[serde(default)]
    parent: Option<String>,
}

impl<'de> Deserialize<'de> for TopologyRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = WireRecord::deserialize(deserializer)?;
        let properties = wire.properties.unwrap_or_default();

        Ok(TopologyRecord {
            name: wire.name.unwrap_or_default(),
            r#type: wire.r#type.unwrap_or_default(),
            parent: properties.parent.unwrap_or_default(),
            endpoints: properties.endpoints.unwrap_or_default(),
        })
    }
}

/// Structural position of a zone in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Root,
    Branch,
    Leaf,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Root, Role::Branch, Role::Leaf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::Branch => "branch",
            Role::Leaf => "leaf",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data handed to a template for a single endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointContext {
    pub name: String,
    pub name_hex: String,
}

impl EndpointContext {
    pub fn new(endpoint: &str) -> Self {
        Self {
            name: endpoint.to_string(),
            name_hex: hex::encode(endpoint.as_bytes()),
        }
    }
}
