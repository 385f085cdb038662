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

//! Transitions link states together, defining the control flow for the
//! state machine. After executing a non-terminal state, the interpreter
//! follows a transition to the state named by the "Next" field, while a
//! terminal state declares "End": true instead. Only one of the two can be
//! used by a state.

use super::{Field, FieldKind, FieldRef};
use crate::error::{Result, StatecraftError};

/// The configured value of a [`NextField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Continue with the state of the given name.
    Next(String),
    /// Stop the execution after this state.
    End,
}

/// Holds either a successor state name or the terminal marker.
///
/// A locked field belongs to a context that forbids transitions, such as a
/// choice expression nested inside a logic rule. It always validates and is
/// never serialized.
///
/// A field built with [`NextField::without_end`] only accepts a successor,
/// as for the top-level rules of a Choice state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NextField {
    transition:    Option<Transition>,
    locked:        bool,
    end_forbidden: bool,
}

impl NextField {
    /// Returns an unconfigured field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a field that refuses every transition.
    pub fn locked() -> Self {
        NextField {
            locked: true,
            ..Default::default()
        }
    }

    /// Returns an unconfigured field that refuses `End`.
    pub fn without_end() -> Self {
        NextField {
            end_forbidden: true,
            ..Default::default()
        }
    }

    /// Whether this field refuses configuration.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether this field marks the end of the execution.
    pub fn is_end(&self) -> bool {
        matches!(self.transition, Some(Transition::End))
    }

    /// The name of the successor state, if any.
    pub fn target(&self) -> Option<&str> {
        match self.transition {
            Some(Transition::Next(ref name)) => Some(name),
            _ => None,
        }
    }

    /// The configured transition.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Points the transition at the state called `target`.
    pub fn set_target(&mut self, target: impl Into<String>) -> Result<()> {
        self.assert_unlocked()?;
        self.transition = Some(Transition::Next(target.into()));
        Ok(())
    }

    /// Marks the owner as a terminal state.
    pub fn end(&mut self) -> Result<()> {
        self.assert_unlocked()?;
        if self.end_forbidden {
            return Err(StatecraftError::LockedField("End".to_string()));
        }
        self.transition = Some(Transition::End);
        Ok(())
    }

    fn assert_unlocked(&self) -> Result<()> {
        if self.locked {
            Err(StatecraftError::LockedField(FieldKind::Next.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Field for NextField {
    fn kind(&self) -> FieldKind {
        FieldKind::Next
    }

    fn is_configured(&self) -> bool {
        self.transition.is_some()
    }

    fn is_required(&self) -> bool {
        !self.locked
    }
}

impl<'a, O> FieldRef<'a, O, NextField> {
    /// Transitions to the state called `target`.
    pub fn to(self, target: impl Into<String>) -> Result<&'a mut O> {
        self.try_apply(|next| next.set_target(target))
    }

    /// Ends the execution after the owner.
    pub fn end(self) -> Result<&'a mut O> {
        self.try_apply(|next| next.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_and_end_are_exclusive() -> Result<()> {
        let mut next = NextField::new();
        assert!(!next.is_configured());

        next.set_target("foo")?;
        assert_eq!(next.target(), Some("foo"));
        assert!(!next.is_end());

        next.end()?;
        assert_eq!(next.target(), None);
        assert!(next.is_end());
        assert!(next.is_configured());
        assert_eq!(next.validate(), None);
        Ok(())
    }

    #[test]
    fn locked_field_rejects_setup() {
        let mut next = NextField::locked();
        assert_eq!(next.validate(), None);
        assert_eq!(
            next.end(),
            Err(StatecraftError::LockedField("Next".to_string()))
        );
        assert_eq!(
            next.set_target("foo"),
            Err(StatecraftError::LockedField("Next".to_string()))
        );
        assert!(!next.is_configured());
    }

    #[test]
    fn end_can_be_forbidden() -> Result<()> {
        let mut next = NextField::without_end();
        assert_eq!(
            next.end(),
            Err(StatecraftError::LockedField("End".to_string()))
        );
        assert_eq!(
            next.validate(),
            Some(StatecraftError::ConfigurationMissing("Next".to_string()))
        );
        next.set_target("foo")?;
        assert_eq!(next.target(), Some("foo"));
        Ok(())
    }
}
