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

//! A Task state ("Type": "Task") represents a single unit of work performed
//! by a state machine.

use crate::error::{Result, StatecraftError};
use crate::fields::*;

/// The Task state.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    name:              String,
    comment:           Option<String>,
    path:              PathField,
    result_path:       ResultPathField,
    result:            ResultField,
    next:              NextField,
    retry:             RetryField,
    catch:             CatchField,
    /// A Task State MUST include a "Resource" field, whose value MUST be a URI
    /// that uniquely identifies the specific task to execute. The States
    /// language does not constrain the URI scheme nor any other part of the
    /// URI.
    resource:          Option<String>,
    /// Tasks can optionally specify timeouts. Timeouts (the "TimeoutSeconds"
    /// and "HeartbeatSeconds" fields) are specified in seconds and MUST be
    /// positive integers.
    timeout_seconds:   Option<u32>,
    /// If provided, the "HeartbeatSeconds" interval MUST be smaller than the
    /// "TimeoutSeconds" value.
    heartbeat_seconds: Option<u32>,
}

impl Task {
    /// Returns an unconfigured Task state.
    pub fn new(name: impl Into<String>) -> Self {
        Task {
            name:              name.into(),
            comment:           None,
            path:              PathField::new(),
            result_path:       ResultPathField::new(),
            result:            ResultField::new(),
            next:              NextField::new(),
            retry:             RetryField::new(),
            catch:             CatchField::new(),
            resource:          None,
            timeout_seconds:   None,
            heartbeat_seconds: None,
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

    /// Sets the URI of the resource to execute.
    pub fn set_resource(&mut self, resource: impl Into<String>) -> &mut Self {
        self.resource = Some(resource.into());
        self
    }

    /// The URI of the resource to execute.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Sets the maximum number of seconds the task may run.
    pub fn set_timeout(&mut self, seconds: u32) -> Result<&mut Self> {
        self.timeout_seconds = Some(positive("TimeoutSeconds", seconds)?);
        Ok(self)
    }

    /// The maximum number of seconds the task may run.
    pub fn timeout(&self) -> Option<u32> {
        self.timeout_seconds
    }

    /// Sets the maximum number of seconds between two heartbeats.
    pub fn set_heartbeat(&mut self, seconds: u32) -> Result<&mut Self> {
        self.heartbeat_seconds = Some(positive("HeartbeatSeconds", seconds)?);
        Ok(self)
    }

    /// The maximum number of seconds between two heartbeats.
    pub fn heartbeat(&self) -> Option<u32> {
        self.heartbeat_seconds
    }

    /// Input and output paths.
    pub fn path(&mut self) -> FieldRef<'_, Self, PathField> {
        FieldRef::new(self, |s| &mut s.path)
    }

    /// Where the task result is placed in the input.
    pub fn result_path(&mut self) -> FieldRef<'_, Self, ResultPathField> {
        FieldRef::new(self, |s| &mut s.result_path)
    }

    /// A fixed result.
    pub fn result(&mut self) -> FieldRef<'_, Self, ResultField> {
        FieldRef::new(self, |s| &mut s.result)
    }

    /// The transition.
    pub fn next(&mut self) -> FieldRef<'_, Self, NextField> {
        FieldRef::new(self, |s| &mut s.next)
    }

    /// The retry policies.
    pub fn retry(&mut self) -> FieldRef<'_, Self, RetryField> {
        FieldRef::new(self, |s| &mut s.retry)
    }

    /// The error handlers.
    pub fn catch(&mut self) -> FieldRef<'_, Self, CatchField> {
        FieldRef::new(self, |s| &mut s.catch)
    }

    /// The declared fields, in order.
    pub fn fields(&self) -> Vec<FieldSlot<'_>> {
        vec![
            FieldSlot::Path(&self.path),
            FieldSlot::ResultPath(&self.result_path),
            FieldSlot::Result(&self.result),
            FieldSlot::Next(&self.next),
            FieldSlot::Retry(&self.retry),
            FieldSlot::Catch(&self.catch),
        ]
    }

    pub(crate) fn fields_mut(&mut self) -> Vec<FieldSlotMut<'_>> {
        vec![
            FieldSlotMut::Path(&mut self.path),
            FieldSlotMut::ResultPath(&mut self.result_path),
            FieldSlotMut::Result(&mut self.result),
            FieldSlotMut::Next(&mut self.next),
            FieldSlotMut::Retry(&mut self.retry),
            FieldSlotMut::Catch(&mut self.catch),
        ]
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
        if self.resource.is_none() {
            errors.push(StatecraftError::ConfigurationMissing(
                "Resource".to_string(),
            ));
        }
        if let (Some(timeout), Some(heartbeat)) = (self.timeout_seconds, self.heartbeat_seconds) {
            if heartbeat >= timeout {
                errors.push(StatecraftError::InvalidValue(format!(
                    "HeartbeatSeconds ({}) must be smaller than TimeoutSeconds ({})",
                    heartbeat, timeout
                )));
            }
        }
        errors
    }
}

/// Rejects zero for a field that must be a positive integer.
pub(crate) fn positive(key: &str, seconds: u32) -> Result<u32> {
    if seconds == 0 {
        Err(StatecraftError::InvalidValue(format!(
            "{} must be a positive integer",
            key
        )))
    } else {
        Ok(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_requires_resource_and_transition() -> Result<()> {
        let mut task = Task::new("foo");
        assert_eq!(
            task.validate(),
            vec![
                StatecraftError::ConfigurationMissing("Next".to_string()),
                StatecraftError::ConfigurationMissing("Resource".to_string()),
            ]
        );

        task.next().end()?.set_resource("arn:aws:lambda:us-east-1:1:function:foo");
        assert!(task.validate().is_empty());
        Ok(())
    }

    #[test]
    fn heartbeat_must_be_below_timeout() -> Result<()> {
        let mut task = Task::new("foo");
        task.set_resource("XY").next().end()?;
        task.set_timeout(10)?.set_heartbeat(10)?;
        assert_eq!(task.validate().len(), 1);
        assert!(matches!(
            task.validate()[0],
            StatecraftError::InvalidValue(_)
        ));

        task.set_heartbeat(5)?;
        assert!(task.validate().is_empty());
        assert!(task.set_timeout(0).is_err());
        assert_eq!(task.timeout(), Some(10));
        Ok(())
    }

    #[test]
    fn retry_and_catch_errors_surface() -> Result<()> {
        let mut task = Task::new("foo");
        task.set_resource("XY").next().end()?;
        task.retry().add(Retrier::all().with_max_attempts(2));
        task.catch().add(Catcher::new(["States.ALL"])?);

        assert_eq!(
            task.validate(),
            vec![StatecraftError::ConfigurationMissing("Next".to_string())]
        );
        Ok(())
    }
}
