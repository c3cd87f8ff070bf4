use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Connector instance definition: one configured input or output endpoint.
///
/// `properties` holds connector-specific key/value pairs (host URL,
/// credentials, index name). The broker `kind` is immutable once the broker
/// has been created; update paths must carry the stored value forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EntityDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl EntityDefinition {
    /// Properties never shown in derived labels.
    const HIDDEN_PROPERTIES: [&'static str; 3] =
        ["cred-username", "cred-password", "folder-cleanup"];

    /// Human label: the explicit label when present, otherwise the connector
    /// type followed by the visible properties.
    pub fn display_label(&self) -> String {
        if let Some(label) = self.label.as_deref() {
            if !label.is_empty() {
                return label.to_string();
            }
        }
        let kind = if self.kind.is_empty() {
            "???"
        } else {
            self.kind.as_str()
        };
        format!("{} {}", kind, self.properties_label())
    }

    fn properties_label(&self) -> String {
        let joined = self
            .properties
            .iter()
            .filter(|(k, _)| !Self::HIDDEN_PROPERTIES.contains(&k.as_str()))
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(",");
        format!("[{}]", joined)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BrokerCategory {
    Inbound,
    Outbound,
}

impl std::fmt::Display for BrokerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrokerCategory::Inbound => f.write_str("inbound"),
            BrokerCategory::Outbound => f.write_str("outbound"),
        }
    }
}

/// A broker as returned by the backend: definition plus assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerInfo {
    pub uuid: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<BrokerCategory>,

    #[serde(rename = "brokerDefinition")]
    pub broker_definition: EntityDefinition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_prefers_explicit_label() {
        let def = EntityDefinition {
            label: Some("My CSW".into()),
            kind: "CSW".into(),
            ..Default::default()
        };
        assert_eq!(def.display_label(), "My CSW");
    }

    #[test]
    fn display_label_falls_back_to_type_and_properties() {
        let mut props = BTreeMap::new();
        props.insert("csw-url".to_string(), "http://example.com/csw".to_string());
        props.insert("cred-password".to_string(), "hunter2".to_string());
        let def = EntityDefinition {
            kind: "CSW".into(),
            properties: props,
            ..Default::default()
        };
        assert_eq!(def.display_label(), "CSW [http://example.com/csw]");
    }

    #[test]
    fn category_wire_format_is_uppercase() {
        let json = serde_json::to_string(&BrokerCategory::Inbound).unwrap();
        assert_eq!(json, r#""INBOUND""#);
    }
}
