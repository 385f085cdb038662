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

//! A State Machine is represented by a JSON Object.
//!
//! The operation of a state machine is specified by states, which are
//! represented by JSON objects, fields in the top-level "States" object. The
//! interpreter starts running the machine at the state named by "StartAt".

use crate::collection::StateCollection;
use crate::error::{Result, StatecraftError};
use crate::states::State;
use crate::states::task::positive;

/// The root of a workflow definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateMachine {
    states:          StateCollection,
    /// A State Machine MAY have a string field named "Comment", provided for
    /// human-readable description of the machine.
    comment:         Option<String>,
    /// A State Machine MAY have an integer field named "TimeoutSeconds". If
    /// provided, it provides the maximum number of seconds the machine is
    /// allowed to run.
    timeout_seconds: Option<u32>,
    /// A State Machine MAY have a string field named "Version", which gives
    /// the version of the States language used in the machine.
    version:         Option<String>,
}

impl StateMachine {
    /// Returns an empty machine following the configured autolink mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an empty machine, chaining states as they are added when
    /// `autolink` is set.
    pub fn with_autolink(autolink: bool) -> Self {
        StateMachine {
            states: StateCollection::with_autolink(autolink),
            ..Default::default()
        }
    }

    /// Adds a state. The first state added becomes the starting state.
    pub fn add(&mut self, state: impl Into<State>) -> Result<&mut Self> {
        self.states.add(state)?;
        Ok(self)
    }

    /// Chains every state without a transition, see [`StateCollection::link`].
    pub fn link(&mut self) -> Result<&mut Self> {
        self.states.link()?;
        Ok(self)
    }

    /// Overrides the starting state.
    pub fn set_start_at(&mut self, name: impl Into<String>) -> &mut Self {
        self.states.set_start_at(name);
        self
    }

    /// The name of the starting state.
    pub fn start_at(&self) -> Option<&str> {
        self.states.start_at()
    }

    /// The states of the machine.
    pub fn states(&self) -> &StateCollection {
        &self.states
    }

    /// The states of the machine.
    pub fn states_mut(&mut self) -> &mut StateCollection {
        &mut self.states
    }

    /// Sets the human-readable description.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    /// The human-readable description.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Sets the maximum number of seconds an execution may run.
    pub fn set_timeout(&mut self, seconds: u32) -> Result<&mut Self> {
        self.timeout_seconds = Some(positive("TimeoutSeconds", seconds)?);
        Ok(self)
    }

    /// The maximum number of seconds an execution may run.
    pub fn timeout(&self) -> Option<u32> {
        self.timeout_seconds
    }

    /// Sets the States language version.
    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    /// The States language version.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns every problem in the machine, depth-first.
    pub fn validate(&self) -> Vec<StatecraftError> {
        self.states.validate()
    }
}

impl From<StateCollection> for StateMachine {
    fn from(states: StateCollection) -> Self {
        StateMachine {
            states,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{Pass, Succeed};

    #[test]
    fn machine_metadata() -> Result<()> {
        let mut machine = StateMachine::new();
        machine
            .set_comment("A simple minimal example")
            .set_version("1.0")
            .set_timeout(60)?
            .add(Succeed::new("Hello World"))?;

        assert_eq!(machine.comment(), Some("A simple minimal example"));
        assert_eq!(machine.version(), Some("1.0"));
        assert_eq!(machine.timeout(), Some(60));
        assert_eq!(machine.start_at(), Some("Hello World"));
        assert!(machine.validate().is_empty());
        assert!(machine.set_timeout(0).is_err());
        Ok(())
    }

    #[test]
    fn machine_validation_is_idempotent() -> Result<()> {
        let mut machine = StateMachine::with_autolink(false);
        assert_eq!(
            machine.validate(),
            vec![StatecraftError::EmptyCollection("States".to_string())]
        );

        machine.add(Pass::new("a"))?.add(Pass::new("b"))?;
        let errors = machine.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(machine.validate(), errors);

        machine.link()?;
        assert!(machine.validate().is_empty());
        Ok(())
    }

    #[test]
    fn unknown_start_state_is_reported() -> Result<()> {
        let mut machine = StateMachine::with_autolink(true);
        machine.add(Pass::new("a"))?.set_start_at("ghost");
        assert_eq!(
            machine.validate(),
            vec![StatecraftError::InvalidValue(
                "StartAt names the unknown state ghost".to_string()
            )]
        );
        Ok(())
    }
}
