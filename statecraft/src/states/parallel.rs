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

//! The Parallel state ("Type": "Parallel") causes parallel execution of
//! "branches".
//!
//! Each branch is an independent state collection with its own `StartAt`.
//! State names are scoped to a branch: two sibling branches, or a branch and
//! the enclosing machine, may reuse the same name.

use crate::collection::StateCollection;
use crate::error::{Result, StatecraftError};
use crate::fields::*;
use crate::states::State;

/// One branch of a Parallel state.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelBranch {
    states: StateCollection,
}

impl ParallelBranch {
    /// Returns an empty branch following the configured autolink mode.
    pub fn new() -> Self {
        ParallelBranch {
            states: StateCollection::default(),
        }
    }

    /// Adds a state to this branch. The first state added is the start.
    pub fn add(&mut self, state: impl Into<State>) -> Result<&mut Self> {
        self.states.add(state)?;
        Ok(self)
    }

    /// Overrides the starting state of this branch.
    pub fn set_start_at(&mut self, name: impl Into<String>) -> &mut Self {
        self.states.set_start_at(name);
        self
    }

    /// The states of this branch.
    pub fn states(&self) -> &StateCollection {
        &self.states
    }

    /// The states of this branch.
    pub fn states_mut(&mut self) -> &mut StateCollection {
        &mut self.states
    }

    /// Returns every problem in this branch.
    pub fn validate(&self) -> Vec<StatecraftError> {
        self.states.validate()
    }
}

impl Default for ParallelBranch {
    fn default() -> Self {
        Self::new()
    }
}

impl From<StateCollection> for ParallelBranch {
    fn from(states: StateCollection) -> Self {
        ParallelBranch { states }
    }
}

/// The Parallel state.
#[derive(Debug, Clone, PartialEq)]
pub struct Parallel {
    name:        String,
    comment:     Option<String>,
    path:        PathField,
    result_path: ResultPathField,
    next:        NextField,
    branches:    Vec<ParallelBranch>,
}

impl Parallel {
    /// Returns a Parallel state without branches.
    pub fn new(name: impl Into<String>) -> Self {
        Parallel {
            name:        name.into(),
            comment:     None,
            path:        PathField::new(),
            result_path: ResultPathField::new(),
            next:        NextField::new(),
            branches:    vec![],
        }
    }

    /// The state name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human-readable comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Sets the human-readable comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    /// Input and output paths.
    pub fn path(&mut self) -> FieldRef<'_, Self, PathField> {
        FieldRef::new(self, |s| &mut s.path)
    }

    /// Where the array of branch outputs is placed in the input.
    pub fn result_path(&mut self) -> FieldRef<'_, Self, ResultPathField> {
        FieldRef::new(self, |s| &mut s.result_path)
    }

    /// The transition.
    pub fn next(&mut self) -> FieldRef<'_, Self, NextField> {
        FieldRef::new(self, |s| &mut s.next)
    }

    /// Appends an empty branch and returns it for population.
    pub fn add_branch(&mut self) -> &mut ParallelBranch {
        self.branches.push(ParallelBranch::new());
        let last = self.branches.len() - 1;
        &mut self.branches[last]
    }

    /// Appends an already populated branch.
    pub fn push_branch(&mut self, branch: impl Into<ParallelBranch>) -> &mut Self {
        self.branches.push(branch.into());
        self
    }

    /// The branches in insertion order.
    pub fn branches(&self) -> &[ParallelBranch] {
        &self.branches
    }

    /// The declared fields, in order.
    pub fn fields(&self) -> Vec<FieldSlot<'_>> {
        vec![
            FieldSlot::Next(&self.next),
            FieldSlot::Path(&self.path),
            FieldSlot::ResultPath(&self.result_path),
        ]
    }

    pub(crate) fn fields_mut(&mut self) -> Vec<FieldSlotMut<'_>> {
        vec![
            FieldSlotMut::Next(&mut self.next),
            FieldSlotMut::Path(&mut self.path),
            FieldSlotMut::ResultPath(&mut self.result_path),
        ]
    }

    pub(crate) fn next_field(&self) -> &NextField {
        &self.next
    }

    pub(crate) fn next_field_mut(&mut self) -> &mut NextField {
        &mut self.next
    }

    /// Returns every problem with this state. The order is fixed on purpose:
    /// field errors first, then the errors of each branch in order.
    pub fn validate(&self) -> Vec<StatecraftError> {
        let mut errors = validate_fields(&self.fields());
        if self.branches.is_empty() {
            errors.push(StatecraftError::EmptyCollection("Branches".to_string()));
        }
        errors.extend(self.branches.iter().flat_map(ParallelBranch::validate));
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{Pass, Succeed};

    #[test]
    fn parallel_requires_branches() -> Result<()> {
        let mut parallel = Parallel::new("fan-out");
        parallel.next().end()?;
        assert_eq!(
            parallel.validate(),
            vec![StatecraftError::EmptyCollection("Branches".to_string())]
        );
        Ok(())
    }

    #[test]
    fn branch_names_are_scoped() -> Result<()> {
        let mut parallel = Parallel::new("fan-out");
        parallel.next().end()?;
        parallel.add_branch().add(Succeed::new("done"))?;
        parallel.add_branch().add(Succeed::new("done"))?;
        assert!(parallel.validate().is_empty());
        assert_eq!(parallel.branches().len(), 2);

        let branch = parallel.add_branch();
        branch.add(Succeed::new("done"))?;
        assert!(matches!(
            branch.add(Succeed::new("done")),
            Err(StatecraftError::DuplicateName(_))
        ));
        Ok(())
    }

    #[test]
    fn branch_start_must_exist() -> Result<()> {
        let mut parallel = Parallel::new("fan-out");
        parallel.next().end()?;
        parallel
            .add_branch()
            .add(Succeed::new("done"))?
            .set_start_at("missing");
        assert_eq!(
            parallel.validate(),
            vec![StatecraftError::InvalidValue(
                "StartAt names the unknown state missing".to_string()
            )]
        );
        Ok(())
    }

    #[test]
    fn branch_errors_follow_field_errors() -> Result<()> {
        let mut parallel = Parallel::new("fan-out");
        parallel.add_branch();
        parallel.add_branch().add(Pass::new("lookup"))?;

        assert_eq!(
            parallel.validate(),
            vec![
                StatecraftError::ConfigurationMissing("Next".to_string()),
                StatecraftError::EmptyCollection("States".to_string()),
                StatecraftError::ConfigurationMissing("Next".to_string()),
            ]
        );
        Ok(())
    }
}
