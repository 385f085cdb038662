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

//! Task and Parallel states can recover from runtime errors by retrying.
//!
//! A state's `Retry` field holds an ordered list of retriers. Each retrier
//! names the errors it applies to with predefined error codes and may bound
//! the interval before the first retry, the multiplier applied to that
//! interval on every attempt, and the number of attempts.

use super::{Field, FieldKind, FieldRef};
use crate::error::{Result, StatecraftError};
use serde_json::Number;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The predefined error names of the States language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A Task State either ran longer than the "TimeoutSeconds" value, or
    /// failed to heartbeat for a time longer than the "HeartbeatSeconds"
    /// value.
    Timeout,
    /// A wild-card which matches any error name.
    All,
    /// A Task State failed during the execution.
    TaskFailed,
    /// A Task State failed because it had insufficient privileges to execute
    /// the specified code.
    Permissions,
    /// A state's "ResultPath" field cannot be applied to the input the state
    /// received.
    ResultPathMatchFailure,
    /// A branch of a Parallel state failed.
    BranchFailed,
    /// A Choice state failed to find a match for the condition field
    /// extracted from its input.
    NoChoiceMatched,
}

/// Every predefined error code.
pub const ERROR_CODES: [ErrorCode; 7] = [
    ErrorCode::Timeout,
    ErrorCode::All,
    ErrorCode::TaskFailed,
    ErrorCode::Permissions,
    ErrorCode::ResultPathMatchFailure,
    ErrorCode::BranchFailed,
    ErrorCode::NoChoiceMatched,
];

impl ErrorCode {
    /// The serialized name, e.g. `States.Timeout`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Timeout => "States.Timeout",
            ErrorCode::All => "States.ALL",
            ErrorCode::TaskFailed => "States.TaskFailed",
            ErrorCode::Permissions => "States.Permissions",
            ErrorCode::ResultPathMatchFailure => "States.ResultPathMatchFailure",
            ErrorCode::BranchFailed => "States.BranchFailed",
            ErrorCode::NoChoiceMatched => "States.NoChoiceMatched",
        }
    }
}

impl FromStr for ErrorCode {
    type Err = StatecraftError;

    fn from_str(s: &str) -> Result<Self> {
        ERROR_CODES
            .iter()
            .find(|code| code.as_str() == s)
            .copied()
            .ok_or_else(|| StatecraftError::UnsupportedErrorCode(s.to_string()))
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single retry policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrier {
    errors:       Vec<ErrorCode>,
    interval:     Option<u32>,
    backoff_rate: Option<Number>,
    max_attempts: Option<u32>,
}

impl Retrier {
    /// Returns a retrier for the given error codes.
    pub fn new(errors: impl IntoIterator<Item = ErrorCode>) -> Self {
        Retrier {
            errors:       errors.into_iter().collect(),
            interval:     None,
            backoff_rate: None,
            max_attempts: None,
        }
    }

    /// Retries on `States.Timeout`.
    pub fn timeout() -> Self {
        Self::new([ErrorCode::Timeout])
    }

    /// Retries on any error (`States.ALL`).
    pub fn all() -> Self {
        Self::new([ErrorCode::All])
    }

    /// Retries on `States.TaskFailed`.
    pub fn task_failed() -> Self {
        Self::new([ErrorCode::TaskFailed])
    }

    /// Retries on `States.Permissions`.
    pub fn permissions() -> Self {
        Self::new([ErrorCode::Permissions])
    }

    /// Retries on `States.ResultPathMatchFailure`.
    pub fn result_path_match_failure() -> Self {
        Self::new([ErrorCode::ResultPathMatchFailure])
    }

    /// Retries on `States.BranchFailed`.
    pub fn branch_failed() -> Self {
        Self::new([ErrorCode::BranchFailed])
    }

    /// Retries on `States.NoChoiceMatched`.
    pub fn no_choice_matched() -> Self {
        Self::new([ErrorCode::NoChoiceMatched])
    }

    /// Sets the number of seconds before the first retry attempt.
    pub fn with_interval(mut self, seconds: u32) -> Result<Self> {
        if seconds == 0 {
            return Err(StatecraftError::InvalidValue(
                "IntervalSeconds must be a positive integer".to_string(),
            ));
        }
        self.interval = Some(seconds);
        Ok(self)
    }

    /// Sets the multiplier by which the retry interval increases on every
    /// attempt. The rate must be at least 1.0.
    pub fn with_backoff_rate(self, rate: f64) -> Result<Self> {
        let number = Number::from_f64(rate).ok_or_else(|| {
            StatecraftError::InvalidValue(format!("BackoffRate {} is not a finite number", rate))
        })?;
        self.with_backoff_number(number)
    }

    /// Sets the backoff rate keeping the number's wire representation.
    pub(crate) fn with_backoff_number(mut self, rate: Number) -> Result<Self> {
        match rate.as_f64() {
            Some(value) if value >= 1.0 => {
                self.backoff_rate = Some(rate);
                Ok(self)
            }
            _ => Err(StatecraftError::InvalidValue(format!(
                "BackoffRate must be greater than or equal to 1.0, got {}",
                rate
            ))),
        }
    }

    /// Sets the maximum number of retry attempts. Zero disables retries.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// The error codes this retrier applies to.
    pub fn errors(&self) -> &[ErrorCode] {
        &self.errors
    }

    /// Seconds before the first retry attempt.
    pub fn interval(&self) -> Option<u32> {
        self.interval
    }

    /// The backoff multiplier.
    pub fn backoff_rate(&self) -> Option<f64> {
        self.backoff_rate.as_ref().and_then(Number::as_f64)
    }

    pub(crate) fn backoff_number(&self) -> Option<&Number> {
        self.backoff_rate.as_ref()
    }

    /// The maximum number of retry attempts.
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Returns the first problem with this retrier, if any.
    pub fn validate(&self) -> Option<StatecraftError> {
        if self.errors.is_empty() {
            Some(StatecraftError::ConfigurationMissing(
                "ErrorEquals".to_string(),
            ))
        } else {
            None
        }
    }
}

/// The ordered retry policies of a state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryField {
    retriers: Vec<Retrier>,
}

impl RetryField {
    /// Returns an unconfigured field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a retrier.
    pub fn push(&mut self, retrier: Retrier) {
        self.retriers.push(retrier);
    }

    /// The retriers in insertion order.
    pub fn retriers(&self) -> &[Retrier] {
        &self.retriers
    }
}

impl Field for RetryField {
    fn kind(&self) -> FieldKind {
        FieldKind::Retry
    }

    fn is_configured(&self) -> bool {
        !self.retriers.is_empty()
    }

    fn validate(&self) -> Option<StatecraftError> {
        self.retriers.iter().find_map(Retrier::validate)
    }
}

impl<'a, O> FieldRef<'a, O, RetryField> {
    /// Appends a retrier.
    pub fn add(self, retrier: Retrier) -> &'a mut O {
        self.apply(|field| field.push(retrier)).0
    }
}
