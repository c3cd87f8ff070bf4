//! Schema-driven argument forms.
//!
//! The backend advertises connector and trigger argument schemas as lists
//! of [`ArgumentDescriptor`]s; [`Form::render`] turns such a list into one
//! typed control per descriptor and mediates value transfer in both
//! directions without the caller knowing which control kind backs a field.

mod controls;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::FormError;
use crate::model::ArgumentDescriptor;

pub use controls::Control;

/// Property bag the controls read from and write into.
pub type ValueMap = BTreeMap<String, String>;

/// Aggregate handle over the rendered controls of one schema.
///
/// `init`, `read` and `destroy` fan out to every child in descriptor
/// order; that is the only ordering guarantee.
pub struct Form {
    controls: Vec<Box<dyn Control>>,
}

impl Form {
    /// Builds one control per descriptor. Fails loudly on a descriptor
    /// without a name or on a duplicated name; an invalid validation
    /// pattern is rejected here rather than at submit time.
    pub fn render(args: &[ArgumentDescriptor]) -> Result<Form, FormError> {
        let mut seen = BTreeSet::new();
        let mut controls: Vec<Box<dyn Control>> = Vec::with_capacity(args.len());
        for (index, arg) in args.iter().enumerate() {
            if arg.name.is_empty() {
                return Err(FormError::MissingName { index });
            }
            if !seen.insert(arg.name.clone()) {
                return Err(FormError::DuplicateName {
                    name: arg.name.clone(),
                });
            }
            controls.push(controls::build(arg)?);
        }
        tracing::debug!(target: "harvester.forms", fields = controls.len(), "form rendered");
        Ok(Form { controls })
    }

    pub fn from_controls(controls: Vec<Box<dyn Control>>) -> Form {
        Form { controls }
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Field names in descriptor order.
    pub fn names(&self) -> Vec<&str> {
        self.controls.iter().map(|c| c.name()).collect()
    }

    /// Pushes `values[name]` (or the descriptor default) into every control.
    pub fn init(&mut self, values: &ValueMap) {
        for control in &mut self.controls {
            control.init(values);
        }
    }

    /// Pulls every control's current value back into `values`, coercing
    /// per control type.
    pub fn read(&self, values: &mut ValueMap) {
        for control in &self.controls {
            control.read(values);
        }
    }

    /// Feeds operator input into the named control. Returns `false` when
    /// no control carries that name.
    pub fn set(&mut self, name: &str, raw: &str) -> bool {
        match self.controls.iter_mut().find(|c| c.name() == name) {
            Some(control) => {
                control.set(raw);
                true
            }
            None => false,
        }
    }

    /// All current validation violations, empty when the form would submit.
    pub fn validate(&self) -> Vec<String> {
        self.controls
            .iter()
            .filter_map(|c| c.violation())
            .collect()
    }

    /// Tears the controls down. Consuming `self` makes a second fan-out
    /// impossible; every child is destroyed exactly once.
    pub fn destroy(mut self) {
        for control in &mut self.controls {
            control.destroy();
        }
    }
}
