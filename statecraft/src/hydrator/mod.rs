// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! The hydrator rebuilds a model from a JSON state machine document.
//!
//! States are resolved through a [`Registry`] keyed by their `Type`. Any
//! unknown discriminator, unknown error code or wrongly shaped key is a hard
//! failure; nothing is skipped. Transitions stay plain names, so states may
//! refer to states decoded after them.
//!
//! States of a `States` object are added in document order.

mod decode;
pub mod registry;

pub use decode::Object;
pub use registry::{Constructor, Hydrate, Registry};

use crate::collection::StateCollection;
use crate::config::STATECRAFT_ASL_VERSION;
use crate::error::Result;
use crate::machine::StateMachine;
use crate::states::State;
use decode::{as_object, get_object, get_str, get_u32, malformed};
use log::{debug, warn};
use serde_json::Value;

/// Decodes state machines and states from JSON values.
#[derive(Debug, Clone)]
pub struct Hydrator {
    registry: Registry,
}

impl Hydrator {
    /// Returns a hydrator that knows every state type of the States language.
    pub fn new() -> Self {
        Self::with_registry(Registry::step_functions())
    }

    /// Returns a hydrator resolving state types through `registry`.
    pub fn with_registry(registry: Registry) -> Self {
        Hydrator { registry }
    }

    /// The registry used to resolve state types.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Rebuilds a whole machine from its document.
    pub fn hydrate_state_machine(&self, document: &Value) -> Result<StateMachine> {
        let object = as_object(document, "state machine")?;
        let mut machine = StateMachine::from(self.hydrate_collection(object)?);

        if let Some(comment) = get_str(object, "Comment")? {
            machine.set_comment(comment);
        }
        if let Some(timeout) = get_u32(object, "TimeoutSeconds")? {
            machine.set_timeout(timeout)?;
        }
        if let Some(version) = get_str(object, "Version")? {
            if version != STATECRAFT_ASL_VERSION.as_str() {
                warn!(
                    "Document targets States language version {}, expected {}",
                    version, *STATECRAFT_ASL_VERSION
                );
            }
            machine.set_version(version);
        }
        Ok(machine)
    }

    /// Rebuilds the state called `name` from its wire object.
    pub fn hydrate_state(&self, name: &str, value: &Value) -> Result<State> {
        let object = as_object(value, name)?;
        let type_name = get_str(object, "Type")?
            .ok_or_else(|| malformed(format!("State {} has no Type", name)))?;
        let constructor = self.registry.get(type_name)?;

        debug!("Hydrating {} state {}", type_name, name);
        constructor(self, name, object)
    }

    /// Rebuilds `{StartAt, States}` of a machine or a parallel branch.
    pub(crate) fn hydrate_collection(&self, object: &Object) -> Result<StateCollection> {
        let mut collection = StateCollection::with_autolink(false);
        if let Some(states) = get_object(object, "States")? {
            for (name, value) in states {
                collection.add(self.hydrate_state(name, value)?)?;
            }
        }
        if let Some(start_at) = get_str(object, "StartAt")? {
            collection.set_start_at(start_at);
        }
        Ok(collection)
    }
}

impl Default for Hydrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatecraftError;
    use crate::states::StateKind;
    use serde_json::json;

    #[test]
    fn unknown_type_is_rejected() {
        let hydrator = Hydrator::new();
        assert_eq!(
            hydrator.hydrate_state("x", &json!({ "Type": "Bogus" })),
            Err(StatecraftError::UnknownStateType("Bogus".to_string()))
        );
        assert!(matches!(
            hydrator.hydrate_state("x", &json!({ "Next": "y" })),
            Err(StatecraftError::MalformedDocument(_))
        ));
    }

    #[test]
    fn states_keep_document_order() -> Result<()> {
        let document = json!({
            "StartAt": "b",
            "States": {
                "c": { "Type": "Pass", "Next": "a" },
                "a": { "Type": "Pass", "Next": "b" },
                "b": { "Type": "Succeed" }
            }
        });
        let machine = Hydrator::new().hydrate_state_machine(&document)?;
        let names = machine
            .states()
            .states()
            .iter()
            .map(State::name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(machine.start_at(), Some("b"));
        assert!(machine.validate().is_empty());
        Ok(())
    }

    #[test]
    fn end_true_is_not_rewired() -> Result<()> {
        let document = json!({
            "StartAt": "a",
            "States": {
                "a": { "Type": "Wait", "Seconds": 1, "End": true },
                "b": { "Type": "Wait", "Seconds": 2, "End": true }
            }
        });
        let machine = Hydrator::new().hydrate_state_machine(&document)?;
        let a = machine.states().get("a").and_then(State::next_field);
        assert_eq!(a.map(|next| next.is_end()), Some(true));
        assert_eq!(
            machine.states().get("b").map(State::kind),
            Some(StateKind::Wait)
        );
        Ok(())
    }

    #[test]
    fn custom_registry_limits_types() {
        let mut registry = Registry::new();
        registry.register::<crate::states::Succeed>();
        let hydrator = Hydrator::with_registry(registry);
        assert!(hydrator
            .hydrate_state("done", &json!({ "Type": "Succeed" }))
            .is_ok());
        assert_eq!(
            hydrator.hydrate_state("wait", &json!({ "Type": "Wait", "Seconds": 1 })),
            Err(StatecraftError::UnknownStateType("Wait".to_string()))
        );
    }
}
