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

//! When a state reports an error and either there is no `Retry` field, or
//! retries have failed to resolve the error, the interpreter scans through
//! the catchers in array order. The first catcher naming the error sends
//! the execution to the catcher's `Next` state, optionally placing the error
//! output at its `ResultPath`.

use super::{Field, FieldKind, FieldRef, NextField, ResultPathField};
use crate::error::{Result, StatecraftError};
use crate::fields::ErrorCode;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Names reserved for predefined errors start with this prefix.
const RESERVED_PREFIX: &str = "States.";

/// An error a catcher responds to: either a predefined error code or an
/// error raised by the task itself, such as `NotFoundError`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorName {
    /// One of the predefined `States.*` errors.
    Predefined(ErrorCode),
    /// A user-defined error name.
    Custom(String),
}

impl ErrorName {
    /// The serialized name.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorName::Predefined(code) => code.as_str(),
            ErrorName::Custom(name) => name,
        }
    }
}

impl FromStr for ErrorName {
    type Err = StatecraftError;

    /// Names in the reserved `States.` namespace must be predefined codes.
    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with(RESERVED_PREFIX) {
            s.parse::<ErrorCode>().map(ErrorName::Predefined)
        } else {
            Ok(ErrorName::Custom(s.to_string()))
        }
    }
}

impl From<ErrorCode> for ErrorName {
    fn from(code: ErrorCode) -> Self {
        ErrorName::Predefined(code)
    }
}

impl Display for ErrorName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fallback transition for a set of errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Catcher {
    errors:      Vec<ErrorName>,
    next:        NextField,
    result_path: ResultPathField,
}

impl Catcher {
    /// Returns a catcher for the given error names.
    pub fn new<I, S>(errors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let errors = errors
            .into_iter()
            .map(|name| name.as_ref().parse::<ErrorName>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::with_errors(errors))
    }

    /// Returns a catcher for already resolved error names.
    pub fn with_errors(errors: impl IntoIterator<Item = ErrorName>) -> Self {
        Catcher {
            errors:      errors.into_iter().collect(),
            next:        NextField::new(),
            result_path: ResultPathField::new(),
        }
    }

    /// The errors this catcher responds to.
    pub fn errors(&self) -> &[ErrorName] {
        &self.errors
    }

    /// The fallback transition.
    pub fn next(&mut self) -> FieldRef<'_, Catcher, NextField> {
        FieldRef::new(self, |catcher| &mut catcher.next)
    }

    /// Where the error output is placed.
    pub fn result_path(&mut self) -> FieldRef<'_, Catcher, ResultPathField> {
        FieldRef::new(self, |catcher| &mut catcher.result_path)
    }

    /// The fallback transition.
    pub fn next_field(&self) -> &NextField {
        &self.next
    }

    /// Where the error output is placed.
    pub fn result_path_field(&self) -> &ResultPathField {
        &self.result_path
    }

    pub(crate) fn next_field_mut(&mut self) -> &mut NextField {
        &mut self.next
    }

    pub(crate) fn result_path_field_mut(&mut self) -> &mut ResultPathField {
        &mut self.result_path
    }

    /// Returns the first problem with this catcher, if any.
    pub fn validate(&self) -> Option<StatecraftError> {
        if self.errors.is_empty() {
            return Some(StatecraftError::ConfigurationMissing(
                "ErrorEquals".to_string(),
            ));
        }
        self.next.validate().or_else(|| self.result_path.validate())
    }
}

/// The ordered error handlers of a state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatchField {
    catchers: Vec<Catcher>,
}

impl CatchField {
    /// Returns an unconfigured field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a catcher.
    pub fn push(&mut self, catcher: Catcher) {
        self.catchers.push(catcher);
    }

    /// The catchers in insertion order.
    pub fn catchers(&self) -> &[Catcher] {
        &self.catchers
    }
}

impl Field for CatchField {
    fn kind(&self) -> FieldKind {
        FieldKind::Catch
    }

    fn is_configured(&self) -> bool {
        !self.catchers.is_empty()
    }

    fn validate(&self) -> Option<StatecraftError> {
        self.catchers.iter().find_map(Catcher::validate)
    }
}

impl<'a, O> FieldRef<'a, O, CatchField> {
    /// Appends a catcher.
    pub fn add(self, catcher: Catcher) -> &'a mut O {
        self.apply(|field| field.push(catcher)).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_names() -> Result<()> {
        assert_eq!(
            "States.ALL".parse::<ErrorName>()?,
            ErrorName::Predefined(ErrorCode::All)
        );
        assert_eq!(
            "NotFoundError".parse::<ErrorName>()?,
            ErrorName::Custom("NotFoundError".to_string())
        );
        assert_eq!(
            "States.Bogus".parse::<ErrorName>(),
            Err(StatecraftError::UnsupportedErrorCode(
                "States.Bogus".to_string()
            ))
        );
        Ok(())
    }

    #[test]
    fn catcher_requires_a_transition() -> Result<()> {
        let mut catcher = Catcher::new(["FatalError", "ServerError"])?;
        assert_eq!(
            catcher.validate(),
            Some(StatecraftError::ConfigurationMissing("Next".to_string()))
        );

        catcher
            .next()
            .to("fatalErrorHandler")?
            .result_path()
            .set("$.errorMessage")?;
        assert_eq!(catcher.validate(), None);
        assert_eq!(catcher.next_field().target(), Some("fatalErrorHandler"));
        assert_eq!(catcher.result_path_field().get(), Some("$.errorMessage"));
        Ok(())
    }

    #[test]
    fn catch_field_reports_first_broken_catcher() -> Result<()> {
        let mut field = CatchField::new();
        let mut handled = Catcher::new(["NotFoundError"])?;
        handled.next().to("notFoundHandler")?;
        field.push(handled);
        field.push(Catcher::with_errors(vec![]));

        assert!(field.is_configured());
        assert_eq!(
            field.validate(),
            Some(StatecraftError::ConfigurationMissing(
                "ErrorEquals".to_string()
            ))
        );
        Ok(())
    }
}
