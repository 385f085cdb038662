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

//! An ordered, name-unique set of states with a starting state.
//!
//! Transitions refer to states by name only, so states may be added in any
//! order and may point forward at states added later.

use crate::config::STATECRAFT_AUTOLINK;
use crate::error::{Result, StatecraftError};
use crate::fields::Field;
use crate::states::State;
use log::trace;
use std::collections::HashMap;

/// The states of a machine or of a parallel branch.
///
/// Two collections are equal when they hold equal states in the same order
/// and start at the same state, whatever their autolink mode.
#[derive(Debug, Clone)]
pub struct StateCollection {
    states:   Vec<State>,
    index:    HashMap<String, usize>,
    start_at: Option<String>,
    /// In autolink mode, states added without a transition are chained in
    /// insertion order and the last one ends the execution.
    autolink: bool,
}

impl StateCollection {
    /// Returns an empty collection.
    pub fn with_autolink(autolink: bool) -> Self {
        StateCollection {
            states:   vec![],
            index:    HashMap::new(),
            start_at: None,
            autolink,
        }
    }

    /// Whether states are chained as they are added.
    pub fn is_autolink(&self) -> bool {
        self.autolink
    }

    /// Adds a state, rejecting names already in use. The first state added
    /// becomes the starting state.
    pub fn add(&mut self, state: impl Into<State>) -> Result<&mut Self> {
        let mut state = state.into();
        let name = state.name().to_string();
        if self.index.contains_key(&name) {
            return Err(StatecraftError::DuplicateName(name));
        }

        if self.autolink {
            if let Some(next) = state.next_field_mut() {
                if !next.is_configured() {
                    next.end()?;
                }
            }
            if let Some(next) = self.states.last_mut().and_then(State::next_field_mut) {
                if next.is_end() {
                    trace!("Linking the previous state to {}", name);
                    next.set_target(name.clone())?;
                }
            }
        }

        if self.start_at.is_none() {
            self.start_at = Some(name.clone());
        }
        self.index.insert(name, self.states.len());
        self.states.push(state);
        Ok(self)
    }

    /// Chains every state without a transition to the state added after it.
    /// The last such state ends the execution.
    pub fn link(&mut self) -> Result<&mut Self> {
        let names = self
            .states
            .iter()
            .map(|state| state.name().to_string())
            .collect::<Vec<_>>();
        for (i, state) in self.states.iter_mut().enumerate() {
            if let Some(next) = state.next_field_mut() {
                if next.is_configured() {
                    continue;
                }
                match names.get(i + 1) {
                    Some(following) => next.set_target(following.clone())?,
                    None => next.end()?,
                }
            }
        }
        Ok(self)
    }

    /// Overrides the starting state.
    pub fn set_start_at(&mut self, name: impl Into<String>) -> &mut Self {
        self.start_at = Some(name.into());
        self
    }

    /// The name of the starting state.
    pub fn start_at(&self) -> Option<&str> {
        self.start_at.as_deref()
    }

    /// The states in insertion order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Looks up a state by name.
    pub fn get(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|&i| &self.states[i])
    }

    /// Looks up a state by name for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut State> {
        match self.index.get(name) {
            Some(&i) => self.states.get_mut(i),
            None => None,
        }
    }

    /// The number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state has been added.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns every problem of every state in insertion order, followed by
    /// a problem with the starting state, or an
    /// [`StatecraftError::EmptyCollection`] when there is no state at all.
    pub fn validate(&self) -> Vec<StatecraftError> {
        let mut errors = self
            .states
            .iter()
            .flat_map(State::validate)
            .collect::<Vec<_>>();
        if self.states.is_empty() {
            errors.push(StatecraftError::EmptyCollection("States".to_string()));
            return errors;
        }
        match self.start_at.as_deref() {
            None => errors.push(StatecraftError::ConfigurationMissing("StartAt".to_string())),
            Some(name) if !self.index.contains_key(name) => {
                errors.push(StatecraftError::InvalidValue(format!(
                    "StartAt names the unknown state {}",
                    name
                )))
            }
            Some(_) => {}
        }
        errors
    }
}

impl PartialEq for StateCollection {
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states && self.start_at == other.start_at
    }
}

impl Default for StateCollection {
    /// Follows the `[collection] autolink` setting.
    fn default() -> Self {
        Self::with_autolink(*STATECRAFT_AUTOLINK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{Pass, Succeed, Task};

    #[test]
    fn first_state_is_the_start() -> Result<()> {
        let mut states = StateCollection::with_autolink(false);
        states.add(Succeed::new("b"))?.add(Succeed::new("a"))?;
        assert_eq!(states.start_at(), Some("b"));
        assert_eq!(states.len(), 2);
        assert_eq!(states.get("a").map(State::name), Some("a"));

        states.set_start_at("a");
        assert_eq!(states.start_at(), Some("a"));
        Ok(())
    }

    #[test]
    fn duplicate_names_are_rejected() -> Result<()> {
        let mut states = StateCollection::with_autolink(false);
        states.add(Pass::new("a"))?;
        assert_eq!(
            states.add(Succeed::new("a")).err(),
            Some(StatecraftError::DuplicateName("a".to_string()))
        );
        assert_eq!(states.len(), 1);
        Ok(())
    }

    #[test]
    fn empty_collection_is_reported() {
        let states = StateCollection::with_autolink(true);
        assert!(states.is_empty());
        assert_eq!(
            states.validate(),
            vec![StatecraftError::EmptyCollection("States".to_string())]
        );
    }

    #[test]
    fn start_must_name_a_held_state() -> Result<()> {
        let mut states = StateCollection::with_autolink(true);
        states.add(Pass::new("a"))?.set_start_at("ghost");
        assert_eq!(
            states.validate(),
            vec![StatecraftError::InvalidValue(
                "StartAt names the unknown state ghost".to_string()
            )]
        );

        states.set_start_at("a");
        assert!(states.validate().is_empty());
        Ok(())
    }

    #[test]
    fn autolink_chains_added_states() -> Result<()> {
        let mut states = StateCollection::with_autolink(true);
        states.add(Pass::new("A"))?.add(Pass::new("B"))?;

        let a = states.get("A").and_then(State::next_field);
        let b = states.get("B").and_then(State::next_field);
        assert_eq!(a.and_then(|next| next.target()), Some("B"));
        assert_eq!(b.map(|next| next.is_end()), Some(true));
        assert!(states.validate().is_empty());
        Ok(())
    }

    #[test]
    fn autolink_keeps_explicit_transitions() -> Result<()> {
        let mut first = Task::new("A");
        first.set_resource("XY").next().to("C")?;

        let mut states = StateCollection::with_autolink(true);
        states
            .add(first)?
            .add(Pass::new("B"))?
            .add(Succeed::new("C"))?;

        let target = |name: &str| {
            states
                .get(name)
                .and_then(State::next_field)
                .and_then(|next| next.target())
        };
        assert_eq!(target("A"), Some("C"));
        assert_eq!(target("B"), Some("C"));
        assert!(states.validate().is_empty());
        Ok(())
    }

    #[test]
    fn link_chains_existing_states() -> Result<()> {
        let mut states = StateCollection::with_autolink(false);
        states
            .add(Pass::new("A"))?
            .add(Succeed::new("B"))?
            .add(Pass::new("C"))?;
        assert_eq!(states.validate().len(), 2);

        states.link()?;
        let next = |name: &str| states.get(name).and_then(State::next_field).cloned();
        assert_eq!(
            next("A").and_then(|n| n.target().map(String::from)),
            Some("B".to_string())
        );
        assert_eq!(next("C").map(|n| n.is_end()), Some(true));
        assert!(states.validate().is_empty());
        Ok(())
    }
}
