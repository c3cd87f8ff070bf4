use chrono::NaiveTime;
use regex::Regex;

use super::ValueMap;
use crate::error::FormError;
use crate::model::{ArgumentDescriptor, ArgumentType, Choice};
use crate::model::PERIOD_TOKENS;
use crate::scramble;

/// One live form field.
///
/// `init` pushes the stored value (or the descriptor default) into the
/// control, `read` pulls the coerced current value back into the map,
/// `set` feeds raw operator input in, `violation` reports why the field
/// would not submit, and `destroy` releases control state.
pub trait Control {
    fn name(&self) -> &str;
    fn init(&mut self, values: &ValueMap);
    fn read(&self, values: &mut ValueMap);
    fn set(&mut self, raw: &str);
    fn violation(&self) -> Option<String>;
    fn destroy(&mut self);
}

pub(super) fn build(arg: &ArgumentDescriptor) -> Result<Box<dyn Control>, FormError> {
    let control: Box<dyn Control> = match arg.kind {
        ArgumentType::String | ArgumentType::Text => Box::new(StringControl::new(arg)?),
        ArgumentType::Integer => Box::new(IntegerControl::new(arg)),
        ArgumentType::Bool => Box::new(BoolControl::new(arg)),
        ArgumentType::Choice => Box::new(ChoiceControl::new(arg)),
        ArgumentType::Temporal => Box::new(TemporalControl::new(arg)),
        ArgumentType::Periodical => Box::new(PeriodicalControl::new(arg)),
        ArgumentType::Hidden => Box::new(HiddenControl::new(arg)),
        // Buttons carry no value; the control exists so the field is
        // accounted for rather than silently dropped.
        ArgumentType::Button => Box::new(ButtonControl::new(arg)),
    };
    Ok(control)
}

struct StringControl {
    name: String,
    label: String,
    required: bool,
    password: bool,
    pattern: Option<Regex>,
    default_value: Option<String>,
    value: String,
}

impl StringControl {
    fn new(arg: &ArgumentDescriptor) -> Result<Self, FormError> {
        let pattern = match arg.reg_exp.as_deref() {
            Some(p) => Some(Regex::new(p).map_err(|source| FormError::BadPattern {
                name: arg.name.clone(),
                pattern: p.to_string(),
                source,
            })?),
            None => None,
        };
        Ok(StringControl {
            name: arg.name.clone(),
            label: arg.label.clone(),
            required: arg.required,
            password: arg.password,
            pattern,
            default_value: arg.default_value.clone(),
            value: String::new(),
        })
    }
}

impl Control for StringControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, values: &ValueMap) {
        let raw = values
            .get(&self.name)
            .cloned()
            .or_else(|| self.default_value.clone())
            .unwrap_or_default();
        self.value = if self.password {
            scramble::decode_or_raw(&raw)
        } else {
            raw
        };
    }

    fn read(&self, values: &mut ValueMap) {
        let out = if self.password && !self.value.is_empty() {
            scramble::encode(&self.value)
        } else {
            self.value.clone()
        };
        values.insert(self.name.clone(), out);
    }

    fn set(&mut self, raw: &str) {
        self.value = raw.to_string();
    }

    fn violation(&self) -> Option<String> {
        if self.required && self.value.is_empty() {
            return Some(format!("{} is required", self.label));
        }
        if !self.value.is_empty() {
            if let Some(pattern) = &self.pattern {
                if !pattern.is_match(&self.value) {
                    return Some(format!("{} does not match {}", self.label, pattern.as_str()));
                }
            }
        }
        None
    }

    fn destroy(&mut self) {
        self.value.clear();
    }
}

struct IntegerControl {
    name: String,
    label: String,
    required: bool,
    default_value: Option<String>,
    text: String,
}

impl IntegerControl {
    fn new(arg: &ArgumentDescriptor) -> Self {
        IntegerControl {
            name: arg.name.clone(),
            label: arg.label.clone(),
            required: arg.required,
            default_value: arg.default_value.clone(),
            text: String::new(),
        }
    }

    fn parsed(&self) -> Option<i64> {
        self.text.trim().parse().ok()
    }
}

impl Control for IntegerControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, values: &ValueMap) {
        self.text = values
            .get(&self.name)
            .cloned()
            .or_else(|| self.default_value.clone())
            .unwrap_or_default();
    }

    fn read(&self, values: &mut ValueMap) {
        let out = match self.parsed() {
            Some(n) => n.to_string(),
            None => self.text.clone(),
        };
        values.insert(self.name.clone(), out);
    }

    fn set(&mut self, raw: &str) {
        self.text = raw.to_string();
    }

    fn violation(&self) -> Option<String> {
        if self.text.trim().is_empty() {
            if self.required {
                return Some(format!("{} is required", self.label));
            }
            return None;
        }
        if self.parsed().is_none() {
            return Some(format!("{} is not an integer: {}", self.label, self.text));
        }
        None
    }

    fn destroy(&mut self) {
        self.text.clear();
    }
}

struct BoolControl {
    name: String,
    default_value: Option<String>,
    checked: bool,
}

impl BoolControl {
    fn new(arg: &ArgumentDescriptor) -> Self {
        BoolControl {
            name: arg.name.clone(),
            default_value: arg.default_value.clone(),
            checked: false,
        }
    }
}

impl Control for BoolControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, values: &ValueMap) {
        let raw = values
            .get(&self.name)
            .cloned()
            .or_else(|| self.default_value.clone())
            .unwrap_or_default();
        self.checked = raw.eq_ignore_ascii_case("true");
    }

    fn read(&self, values: &mut ValueMap) {
        let out = if self.checked { "true" } else { "false" };
        values.insert(self.name.clone(), out.to_string());
    }

    fn set(&mut self, raw: &str) {
        self.checked = raw.eq_ignore_ascii_case("true");
    }

    fn violation(&self) -> Option<String> {
        None
    }

    fn destroy(&mut self) {
        self.checked = false;
    }
}

struct ChoiceControl {
    name: String,
    label: String,
    required: bool,
    choices: Vec<Choice>,
    selected: String,
    default_value: Option<String>,
}

impl ChoiceControl {
    fn new(arg: &ArgumentDescriptor) -> Self {
        ChoiceControl {
            name: arg.name.clone(),
            label: arg.label.clone(),
            required: arg.required,
            choices: arg.choices.clone().unwrap_or_default(),
            selected: String::new(),
            default_value: arg.default_value.clone(),
        }
    }

    fn is_known(&self, name: &str) -> bool {
        self.choices.iter().any(|c| c.name == name)
    }
}

impl Control for ChoiceControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, values: &ValueMap) {
        let raw = values
            .get(&self.name)
            .cloned()
            .or_else(|| self.default_value.clone())
            .unwrap_or_default();
        self.selected = if self.is_known(&raw) {
            raw
        } else {
            // A select control always shows its first option.
            self.choices
                .first()
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };
    }

    fn read(&self, values: &mut ValueMap) {
        if !self.selected.is_empty() {
            values.insert(self.name.clone(), self.selected.clone());
        }
    }

    fn set(&mut self, raw: &str) {
        self.selected = raw.to_string();
    }

    fn violation(&self) -> Option<String> {
        if self.selected.is_empty() {
            if self.required {
                return Some(format!("{} is required", self.label));
            }
            return None;
        }
        if !self.is_known(&self.selected) {
            return Some(format!(
                "{} has no option named {}",
                self.label, self.selected
            ));
        }
        None
    }

    fn destroy(&mut self) {
        self.selected.clear();
    }
}

struct TemporalControl {
    name: String,
    label: String,
    required: bool,
    default_value: Option<String>,
    value: String,
}

impl TemporalControl {
    fn new(arg: &ArgumentDescriptor) -> Self {
        TemporalControl {
            name: arg.name.clone(),
            label: arg.label.clone(),
            required: arg.required,
            default_value: arg.default_value.clone(),
            value: String::new(),
        }
    }

    fn normalized(&self) -> Option<String> {
        normalize_time(&self.value)
    }
}

/// Coerces operator input to zero-padded `HH:mm`.
fn normalize_time(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, format) {
            return Some(t.format("%H:%M").to_string());
        }
    }
    None
}

impl Control for TemporalControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, values: &ValueMap) {
        self.value = values
            .get(&self.name)
            .cloned()
            .or_else(|| self.default_value.clone())
            .unwrap_or_default();
    }

    fn read(&self, values: &mut ValueMap) {
        let out = match self.normalized() {
            Some(t) => t,
            None => self.value.clone(),
        };
        values.insert(self.name.clone(), out);
    }

    fn set(&mut self, raw: &str) {
        self.value = raw.to_string();
    }

    fn violation(&self) -> Option<String> {
        if self.value.trim().is_empty() {
            if self.required {
                return Some(format!("{} is required", self.label));
            }
            return None;
        }
        if self.normalized().is_none() {
            return Some(format!("{} is not a time (HH:mm): {}", self.label, self.value));
        }
        None
    }

    fn destroy(&mut self) {
        self.value.clear();
    }
}

struct PeriodicalControl {
    name: String,
    label: String,
    required: bool,
    default_value: Option<String>,
    selected: Option<usize>,
}

impl PeriodicalControl {
    fn new(arg: &ArgumentDescriptor) -> Self {
        PeriodicalControl {
            name: arg.name.clone(),
            label: arg.label.clone(),
            required: arg.required,
            default_value: arg.default_value.clone(),
            selected: None,
        }
    }
}

impl Control for PeriodicalControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, values: &ValueMap) {
        let raw = values
            .get(&self.name)
            .cloned()
            .or_else(|| self.default_value.clone())
            .unwrap_or_default();
        // A token outside the radio set checks nothing.
        self.selected = PERIOD_TOKENS.iter().position(|t| *t == raw);
    }

    fn read(&self, values: &mut ValueMap) {
        if let Some(index) = self.selected {
            values.insert(self.name.clone(), PERIOD_TOKENS[index].to_string());
        }
    }

    fn set(&mut self, raw: &str) {
        self.selected = PERIOD_TOKENS.iter().position(|t| *t == raw);
    }

    fn violation(&self) -> Option<String> {
        if self.required && self.selected.is_none() {
            return Some(format!("{} is required", self.label));
        }
        None
    }

    fn destroy(&mut self) {
        self.selected = None;
    }
}

struct HiddenControl {
    name: String,
    default_value: Option<String>,
    value: String,
}

impl HiddenControl {
    fn new(arg: &ArgumentDescriptor) -> Self {
        HiddenControl {
            name: arg.name.clone(),
            default_value: arg.default_value.clone(),
            value: String::new(),
        }
    }
}

impl Control for HiddenControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, values: &ValueMap) {
        self.value = values
            .get(&self.name)
            .cloned()
            .or_else(|| self.default_value.clone())
            .unwrap_or_default();
    }

    fn read(&self, values: &mut ValueMap) {
        values.insert(self.name.clone(), self.value.clone());
    }

    fn set(&mut self, raw: &str) {
        self.value = raw.to_string();
    }

    fn violation(&self) -> Option<String> {
        None
    }

    fn destroy(&mut self) {
        self.value.clear();
    }
}

struct ButtonControl {
    name: String,
}

impl ButtonControl {
    fn new(arg: &ArgumentDescriptor) -> Self {
        ButtonControl {
            name: arg.name.clone(),
        }
    }
}

impl Control for ButtonControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, _values: &ValueMap) {}

    fn read(&self, _values: &mut ValueMap) {}

    fn set(&mut self, _raw: &str) {}

    fn violation(&self) -> Option<String> {
        None
    }

    fn destroy(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_time_pads_and_truncates_seconds() {
        assert_eq!(normalize_time("9:05").as_deref(), Some("09:05"));
        assert_eq!(normalize_time("23:59:59").as_deref(), Some("23:59"));
        assert_eq!(normalize_time("07:00").as_deref(), Some("07:00"));
        assert_eq!(normalize_time("25:00"), None);
        assert_eq!(normalize_time("noon"), None);
        assert_eq!(normalize_time(""), None);
    }
}
