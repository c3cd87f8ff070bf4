use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ISO-8601 period tokens the scheduler understands, in display order.
pub const PERIOD_TOKENS: [&str; 5] = ["PT1H", "P1D", "P1W", "P2W", "P1M"];

const PROP_PERIOD: &str = "t-period";
const PROP_AT_TIME: &str = "t-at-time";

/// Well-known trigger types. `Now` exists on the wire but is not offered
/// as a schedule choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerType {
    #[serde(rename = "NULL")]
    Null,
    #[serde(rename = "NOW")]
    Now,
    #[serde(rename = "PERIOD")]
    Period,
    #[serde(rename = "AT")]
    At,
}

/// A recurring or one-shot schedule attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDefinition {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<Uuid>,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl TriggerDefinition {
    pub fn periodic(period: &str) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(PROP_PERIOD.to_string(), period.to_string());
        TriggerDefinition {
            kind: "PERIOD".to_string(),
            task_id: None,
            properties,
        }
    }

    pub fn at_time(time: &str) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(PROP_AT_TIME.to_string(), time.to_string());
        TriggerDefinition {
            kind: "AT".to_string(),
            task_id: None,
            properties,
        }
    }

    pub fn period(&self) -> Option<&str> {
        self.properties.get(PROP_PERIOD).map(String::as_str)
    }

    pub fn at(&self) -> Option<&str> {
        self.properties.get(PROP_AT_TIME).map(String::as_str)
    }

    /// Human description of the schedule, `None` when the trigger carries
    /// no recognizable scheduling properties.
    pub fn scheduling_info(&self) -> Option<String> {
        if let Some(period) = self.period() {
            let length = match period {
                "PT1H" => "hour",
                "P1D" => "day",
                "P1W" => "week",
                "P2W" => "two weeks",
                "P1M" => "month",
                _ => return None,
            };
            return Some(format!("runs every {}", length));
        }
        if let Some(at) = self.at() {
            return Some(format!("runs at {}", at));
        }
        None
    }
}

/// A trigger as returned by the backend: definition plus assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerInfo {
    pub uuid: Uuid,

    pub trigger_definition: TriggerDefinition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduling_info_for_periods() {
        for (token, expected) in [
            ("PT1H", "runs every hour"),
            ("P1D", "runs every day"),
            ("P1W", "runs every week"),
            ("P2W", "runs every two weeks"),
            ("P1M", "runs every month"),
        ] {
            assert_eq!(
                TriggerDefinition::periodic(token).scheduling_info().as_deref(),
                Some(expected)
            );
        }
    }

    #[test]
    fn scheduling_info_for_fixed_time() {
        let def = TriggerDefinition::at_time("02:30");
        assert_eq!(def.scheduling_info().as_deref(), Some("runs at 02:30"));
    }

    #[test]
    fn unknown_period_has_no_info() {
        assert_eq!(TriggerDefinition::periodic("P3D").scheduling_info(), None);
        assert_eq!(TriggerDefinition::default().scheduling_info(), None);
    }

    #[test]
    fn trigger_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&TriggerType::Null).unwrap(),
            r#""NULL""#
        );
        let t: TriggerType = serde_json::from_str(r#""PERIOD""#).unwrap();
        assert_eq!(t, TriggerType::Period);
    }
}
