use serde::{Deserialize, Serialize};

/// Kind of form control backing an argument. Closed set: a wire value
/// outside this list fails template deserialization instead of producing
/// a silently inert field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    String,
    Text,
    Integer,
    Bool,
    Choice,
    Temporal,
    Periodical,
    Button,
    Hidden,
}

impl ArgumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ArgumentType::String => "string",
            ArgumentType::Text => "text",
            ArgumentType::Integer => "integer",
            ArgumentType::Bool => "bool",
            ArgumentType::Choice => "choice",
            ArgumentType::Temporal => "temporal",
            ArgumentType::Periodical => "periodical",
            ArgumentType::Button => "button",
            ArgumentType::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One option of a choice argument. `name` is the stored value, `value`
/// the label shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

/// Backend-declared schema of a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ArgumentType,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_exp: Option<String>,

    #[serde(default)]
    pub password: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ArgumentDescriptor {
    pub fn new(name: &str, kind: ArgumentType, label: &str) -> Self {
        ArgumentDescriptor {
            name: name.to_string(),
            kind,
            label: label.to_string(),
            required: false,
            default_value: None,
            choices: None,
            reg_exp: None,
            password: false,
            hint: None,
        }
    }
}

/// Argument schema template advertised by the backend for one connector
/// or trigger type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorTemplate {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub arguments: Vec<ArgumentDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_deserializes_from_wire_shape() {
        let json = r#"{
            "name": "csw-url",
            "type": "string",
            "label": "URL",
            "required": true,
            "regExp": "^https?://.*$",
            "hint": "catalog endpoint"
        }"#;
        let arg: ArgumentDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(arg.name, "csw-url");
        assert_eq!(arg.kind, ArgumentType::String);
        assert!(arg.required);
        assert!(!arg.password);
        assert_eq!(arg.reg_exp.as_deref(), Some("^https?://.*$"));
    }

    #[test]
    fn unknown_argument_type_is_rejected() {
        let json = r#"{"name": "x", "type": "matrix", "label": "X"}"#;
        let err = serde_json::from_str::<ArgumentDescriptor>(json);
        assert!(err.is_err());
    }
}
