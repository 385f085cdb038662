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

//! A Wait state ("Type": "Wait") delays the state machine from continuing
//! for a specified number of seconds.

use super::task::positive;
use crate::error::{Result, StatecraftError};
use crate::fields::*;

/// The Wait state.
#[derive(Debug, Clone, PartialEq)]
pub struct Wait {
    name:    String,
    comment: Option<String>,
    next:    NextField,
    seconds: Option<u32>,
}

impl Wait {
    /// Returns an unconfigured Wait state.
    pub fn new(name: impl Into<String>) -> Self {
        Wait {
            name:    name.into(),
            comment: None,
            next:    NextField::new(),
            seconds: None,
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

    /// Sets the delay. Zero is rejected right away.
    pub fn set_seconds(&mut self, seconds: u32) -> Result<&mut Self> {
        self.seconds = Some(positive("Seconds", seconds)?);
        Ok(self)
    }

    /// Alias of [`Wait::set_seconds`] that reads well in a chain.
    pub fn wait_for(&mut self, seconds: u32) -> Result<&mut Self> {
        self.set_seconds(seconds)
    }

    /// The delay in seconds.
    pub fn seconds(&self) -> Option<u32> {
        self.seconds
    }

    /// The transition.
    pub fn next(&mut self) -> FieldRef<'_, Self, NextField> {
        FieldRef::new(self, |s| &mut s.next)
    }

    /// The declared fields, in order.
    pub fn fields(&self) -> Vec<FieldSlot<'_>> {
        vec![FieldSlot::Next(&self.next)]
    }

    pub(crate) fn fields_mut(&mut self) -> Vec<FieldSlotMut<'_>> {
        vec![FieldSlotMut::Next(&mut self.next)]
    }

    pub(crate) fn next_field(&self) -> &NextField {
        &self.next
    }

    pub(crate) fn next_field_mut(&mut self) -> &mut NextField {
        &mut self.next
    }

    /// Returns every problem with this state.
    pub fn validate(&self) -> Vec<StatecraftError> {
        let mut errors = validate_fields(&self.fields());
        if self.seconds.is_none() {
            errors.push(StatecraftError::ConfigurationMissing(
                "Seconds".to_string(),
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_requires_seconds() -> Result<()> {
        let mut wait = Wait::new("test");
        wait.next().end()?;
        assert_eq!(
            wait.validate(),
            vec![StatecraftError::ConfigurationMissing("Seconds".to_string())]
        );

        assert!(wait.set_seconds(0).is_err());
        wait.wait_for(10)?;
        assert_eq!(wait.seconds(), Some(10));
        assert!(wait.validate().is_empty());
        Ok(())
    }
}
