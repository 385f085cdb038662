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

//! A Fail state ("Type": "Fail") stops the execution of the state machine
//! and marks it as a failure.

use crate::error::StatecraftError;

/// The Fail state. It is terminal, so it has no transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Fail {
    name:    String,
    comment: Option<String>,
    /// An error name that can be used for error handling.
    error:   Option<String>,
    /// A human-readable message describing the error.
    cause:   Option<String>,
}

impl Fail {
    /// Returns an unconfigured Fail state.
    pub fn new(name: impl Into<String>) -> Self {
        Fail {
            name:    name.into(),
            comment: None,
            error:   None,
            cause:   None,
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

    /// Sets both the error name and its cause.
    pub fn with(&mut self, error: impl Into<String>, cause: impl Into<String>) -> &mut Self {
        self.set_error(error).set_cause(cause)
    }

    /// Sets the error name.
    pub fn set_error(&mut self, error: impl Into<String>) -> &mut Self {
        self.error = Some(error.into());
        self
    }

    /// Sets the error cause.
    pub fn set_cause(&mut self, cause: impl Into<String>) -> &mut Self {
        self.cause = Some(cause.into());
        self
    }

    /// The error name.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The error cause.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Returns every problem with this state.
    pub fn validate(&self) -> Vec<StatecraftError> {
        let mut errors = vec![];
        if self.error.is_none() {
            errors.push(StatecraftError::ConfigurationMissing("Error".to_string()));
        }
        if self.cause.is_none() {
            errors.push(StatecraftError::ConfigurationMissing("Cause".to_string()));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_requires_error_and_cause() {
        let mut fail = Fail::new("test");
        assert_eq!(fail.validate().len(), 2);

        fail.set_error("TestError");
        assert_eq!(
            fail.validate(),
            vec![StatecraftError::ConfigurationMissing("Cause".to_string())]
        );

        fail.with("TestError", "something broke");
        assert!(fail.validate().is_empty());
        assert_eq!(fail.cause(), Some("something broke"));
    }
}
