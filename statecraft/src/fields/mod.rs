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

//! Fields are the optionally configured values a state is built from.
//!
//! Every field starts unconfigured. A setter that successfully applies a
//! value marks the field configured and hands the owning value back, so that
//! configuration can be chained through a [`FieldRef`]:
//!
//! ```
//! use statecraft::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut task = Task::new("foo");
//! task.next().end()?.set_resource("XY").path().input("$.payload")?;
//! assert!(task.validate().is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! States declare their fields in a fixed order through [`FieldSlot`]s. The
//! validator, the generator and the hydrator all iterate that list, so a
//! state's behavior never depends on runtime introspection.

pub mod catch;
pub mod next;
pub mod path;
pub mod result;
pub mod result_path;
pub mod retry;

pub use catch::{CatchField, Catcher, ErrorName};
pub use next::{NextField, Transition};
pub use path::PathField;
pub use result::ResultField;
pub use result_path::ResultPathField;
pub use retry::{ErrorCode, Retrier, RetryField};

use crate::error::StatecraftError;
use std::fmt::{Display, Formatter};

/// The kinds of field a state can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// The transition to the following state.
    Next,
    /// Input and output path projections.
    Path,
    /// A fixed payload.
    Result,
    /// Where a result is merged into the input.
    ResultPath,
    /// Retry policies.
    Retry,
    /// Error handlers.
    Catch,
}

impl FieldKind {
    /// The name used to report this field in errors.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Next => "Next",
            FieldKind::Path => "Path",
            FieldKind::Result => "Result",
            FieldKind::ResultPath => "ResultPath",
            FieldKind::Retry => "Retry",
            FieldKind::Catch => "Catch",
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Behavior shared by all fields.
pub trait Field {
    /// The kind of this field.
    fn kind(&self) -> FieldKind;

    /// Whether a value has been applied to this field.
    fn is_configured(&self) -> bool;

    /// Whether the owner is incomplete until this field is configured.
    fn is_required(&self) -> bool {
        false
    }

    /// Returns the first problem with this field, if any.
    fn validate(&self) -> Option<StatecraftError> {
        if self.is_required() && !self.is_configured() {
            Some(StatecraftError::ConfigurationMissing(
                self.kind().name().to_string(),
            ))
        } else {
            None
        }
    }
}

/// A read-only view of one declared field.
#[derive(Debug, Clone, Copy)]
pub enum FieldSlot<'a> {
    /// A transition field.
    Next(&'a NextField),
    /// A path projection field.
    Path(&'a PathField),
    /// A fixed result field.
    Result(&'a ResultField),
    /// A result placement field.
    ResultPath(&'a ResultPathField),
    /// A retry policy field.
    Retry(&'a RetryField),
    /// An error handler field.
    Catch(&'a CatchField),
}

impl<'a> FieldSlot<'a> {
    /// The slot's field as a trait object.
    pub fn field(&self) -> &'a dyn Field {
        match *self {
            FieldSlot::Next(f) => f,
            FieldSlot::Path(f) => f,
            FieldSlot::Result(f) => f,
            FieldSlot::ResultPath(f) => f,
            FieldSlot::Retry(f) => f,
            FieldSlot::Catch(f) => f,
        }
    }
}

/// A mutable view of one declared field, used while decoding.
#[derive(Debug)]
pub enum FieldSlotMut<'a> {
    /// A transition field.
    Next(&'a mut NextField),
    /// A path projection field.
    Path(&'a mut PathField),
    /// A fixed result field.
    Result(&'a mut ResultField),
    /// A result placement field.
    ResultPath(&'a mut ResultPathField),
    /// A retry policy field.
    Retry(&'a mut RetryField),
    /// An error handler field.
    Catch(&'a mut CatchField),
}

/// Collects the validation errors of every declared field, in order.
pub fn validate_fields(slots: &[FieldSlot<'_>]) -> Vec<StatecraftError> {
    slots
        .iter()
        .filter_map(|slot| slot.field().validate())
        .collect()
}

/// A mutable handle on field `F` of owner `O`.
///
/// Setters consume the handle and return the owner, which keeps builder
/// chains type-checked without any back-reference stored in the field.
pub struct FieldRef<'a, O, F> {
    owner:   &'a mut O,
    project: fn(&mut O) -> &mut F,
}

impl<'a, O, F> FieldRef<'a, O, F> {
    pub(crate) fn new(owner: &'a mut O, project: fn(&mut O) -> &mut F) -> Self {
        FieldRef { owner, project }
    }

    /// Applies `f` to the field, then returns the owner with `f`'s result.
    pub(crate) fn apply<R>(self, f: impl FnOnce(&mut F) -> R) -> (&'a mut O, R) {
        let FieldRef { owner, project } = self;
        let ret = f(project(&mut *owner));
        (owner, ret)
    }

    /// Like [`FieldRef::apply`] for setters that can fail.
    pub(crate) fn try_apply(
        self,
        f: impl FnOnce(&mut F) -> crate::error::Result<()>,
    ) -> crate::error::Result<&'a mut O> {
        let (owner, ret) = self.apply(f);
        ret.map(|_| owner)
    }

    /// Returns the owner without touching the field.
    pub fn owner(self) -> &'a mut O {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_unconfigured_field_is_missing() {
        let next = NextField::new();
        assert_eq!(
            next.validate(),
            Some(StatecraftError::ConfigurationMissing("Next".to_string()))
        );

        let path = PathField::new();
        assert_eq!(path.validate(), None);
    }

    #[test]
    fn validate_fields_keeps_declaration_order() {
        let next = NextField::new();
        let catch = CatchField::new();

        let slots = [FieldSlot::Catch(&catch), FieldSlot::Next(&next)];
        assert_eq!(
            validate_fields(&slots),
            vec![StatecraftError::ConfigurationMissing("Next".to_string())]
        );
        assert_eq!(slots[0].field().kind(), FieldKind::Catch);
    }
}
