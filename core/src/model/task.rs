use serde::{Deserialize, Serialize};

use super::broker::EntityDefinition;

/// One destination slot of a task: either a direct broker action or a
/// fan-out group draining into further links.
///
/// Wire shape is `{ "action": { ... } }` for a leaf and
/// `{ "drains": [ ... ] }` for a group; the tree has no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkDefinition {
    Action { action: EntityDefinition },
    Drains { drains: Vec<LinkDefinition> },
}

impl LinkDefinition {
    pub fn action(entity: EntityDefinition) -> Self {
        LinkDefinition::Action { action: entity }
    }

    pub fn drains(links: Vec<LinkDefinition>) -> Self {
        LinkDefinition::Drains { drains: links }
    }

    /// Flattened label of this link: a leaf renders its broker, a group
    /// joins the labels of its drains with `", "`. Empty groups yield
    /// `None` and are skipped by the caller.
    fn label(&self) -> Option<String> {
        match self {
            LinkDefinition::Action { action } => Some(action.display_label()),
            LinkDefinition::Drains { drains } => {
                let parts: Vec<String> = drains.iter().filter_map(LinkDefinition::label).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
        }
    }
}

/// Source-to-destinations pipeline definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EntityDefinition>,

    #[serde(default)]
    pub destinations: Vec<LinkDefinition>,
}

impl TaskDefinition {
    /// Derives the display label of the task.
    ///
    /// An explicit non-empty `name` wins. Otherwise the label is
    /// `"<source> -> <destinations>"`, where more than one destination is
    /// bracketed (`[A, B]`) and a single one stays bare.
    pub fn label(&self) -> String {
        if let Some(name) = self.name.as_deref() {
            if !name.is_empty() {
                return name.to_string();
            }
        }
        let source_label = match &self.source {
            Some(source) => source.display_label(),
            None => "undefined".to_string(),
        };
        let parts: Vec<String> = self
            .destinations
            .iter()
            .filter_map(LinkDefinition::label)
            .collect();
        let mut dest_label = parts.join(", ");
        if self.destinations.len() > 1 {
            dest_label = format!("[{}]", dest_label);
        }
        format!("{} -> {}", source_label, dest_label)
    }
}

/// A task as returned by the backend: definition plus assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub uuid: uuid::Uuid,

    pub task_definition: TaskDefinition,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entity(label: &str) -> EntityDefinition {
        EntityDefinition {
            label: Some(label.to_string()),
            ..Default::default()
        }
    }

    fn task(source: &str, destinations: Vec<LinkDefinition>) -> TaskDefinition {
        TaskDefinition {
            name: None,
            source: Some(entity(source)),
            destinations,
        }
    }

    #[test]
    fn explicit_name_wins() {
        let mut t = task("A", vec![LinkDefinition::action(entity("B"))]);
        t.name = Some("nightly sync".into());
        assert_eq!(t.label(), "nightly sync");
    }

    #[test]
    fn empty_name_is_ignored() {
        let mut t = task("A", vec![LinkDefinition::action(entity("B"))]);
        t.name = Some(String::new());
        assert_eq!(t.label(), "A -> B");
    }

    #[test]
    fn single_destination_is_bare() {
        let t = task("A", vec![LinkDefinition::action(entity("B"))]);
        assert_eq!(t.label(), "A -> B");
    }

    #[test]
    fn multiple_destinations_are_bracketed() {
        let t = task(
            "A",
            vec![
                LinkDefinition::action(entity("B")),
                LinkDefinition::action(entity("C")),
            ],
        );
        assert_eq!(t.label(), "A -> [B, C]");
    }

    #[test]
    fn drains_flatten_into_parent() {
        let t = task(
            "A",
            vec![LinkDefinition::drains(vec![
                LinkDefinition::action(entity("B")),
                LinkDefinition::drains(vec![LinkDefinition::action(entity("C"))]),
            ])],
        );
        assert_eq!(t.label(), "A -> B, C");
    }

    #[test]
    fn missing_source_renders_undefined() {
        let t = TaskDefinition {
            destinations: vec![LinkDefinition::action(entity("B"))],
            ..Default::default()
        };
        assert_eq!(t.label(), "undefined -> B");
    }

    #[test]
    fn link_wire_shapes_round_trip() {
        let leaf: LinkDefinition = serde_json::from_str(r#"{"action":{"type":"SINK"}}"#).unwrap();
        assert!(matches!(leaf, LinkDefinition::Action { .. }));

        let group: LinkDefinition =
            serde_json::from_str(r#"{"drains":[{"action":{"type":"SINK"}}]}"#).unwrap();
        match &group {
            LinkDefinition::Drains { drains } => assert_eq!(drains.len(), 1),
            other => panic!("expected drains, got {:?}", other),
        }

        let json = serde_json::to_value(&group).unwrap();
        assert!(json.get("drains").is_some());
    }
}
