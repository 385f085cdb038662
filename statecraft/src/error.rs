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

//! Statecraft error types

use std::error;
use std::fmt::{Display, Formatter};
use std::result;

/// Result type for operations that could result in an [StatecraftError]
pub type Result<T> = result::Result<T, StatecraftError>;

/// Statecraft error
#[derive(Debug, Clone, PartialEq)]
pub enum StatecraftError {
    /// A required field or property was never configured. The payload names
    /// the missing item by its wire key, e.g. `Next` or `Resource`.
    ConfigurationMissing(String),
    /// A path string was rejected by the path-expression validator.
    InvalidPathExpression(String),
    /// A choice comparator received a literal whose type its rule can not
    /// compare against.
    UnsupportedOperandForRule(String),
    /// A logic expression has the wrong number of children for its rule.
    ArityError(String),
    /// A state name is already taken within the same collection.
    DuplicateName(String),
    /// A collection that must hold at least one item is empty.
    EmptyCollection(String),
    /// The wire `Type` discriminator does not match any registered state.
    UnknownStateType(String),
    /// A serialized error name is not part of the predefined error codes.
    UnsupportedErrorCode(String),
    /// Returned when configuring a transition that its context forbids, such
    /// as the `Next` of a nested choice expression.
    LockedField(String),
    /// A value is out of its allowed range.
    InvalidValue(String),
    /// The wire document does not have the shape of a States language
    /// document.
    MalformedDocument(String),
}

impl Display for StatecraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            StatecraftError::ConfigurationMissing(ref desc) => {
                write!(f, "The field {} requires configuration setup", desc)
            }
            StatecraftError::InvalidPathExpression(ref desc) => {
                write!(f, "Invalid path expression \"{}\"", desc)
            }
            StatecraftError::UnsupportedOperandForRule(ref desc) => {
                write!(f, "Unsupported operand: {}", desc)
            }
            StatecraftError::ArityError(ref desc) => write!(f, "Arity error: {}", desc),
            StatecraftError::DuplicateName(ref desc) => {
                write!(f, "State {} already exists in this collection", desc)
            }
            StatecraftError::EmptyCollection(ref desc) => {
                write!(f, "{} requires at least 1 item", desc)
            }
            StatecraftError::UnknownStateType(ref desc) => {
                write!(f, "No state registered with type {}", desc)
            }
            StatecraftError::UnsupportedErrorCode(ref desc) => write!(
                f,
                "Serialized error code {} is not supported, hydration failed",
                desc
            ),
            StatecraftError::LockedField(ref desc) => {
                write!(f, "{} field is currently locked, setup is not allowed", desc)
            }
            StatecraftError::InvalidValue(ref desc) => write!(f, "Invalid value: {}", desc),
            StatecraftError::MalformedDocument(ref desc) => {
                write!(f, "Malformed document: {}", desc)
            }
        }
    }
}

impl error::Error for StatecraftError {}
