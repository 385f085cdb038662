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

//! A Pass state ("Type": "Pass") passes its input to its output, without
//! performing work. Pass states are useful when constructing and debugging
//! state machines.

use crate::error::StatecraftError;
use crate::fields::*;

/// The Pass state.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    name:        String,
    comment:     Option<String>,
    path:        PathField,
    result_path: ResultPathField,
    result:      ResultField,
    next:        NextField,
}

impl Pass {
    /// Returns an unconfigured Pass state.
    pub fn new(name: impl Into<String>) -> Self {
        Pass {
            name:        name.into(),
            comment:     None,
            path:        PathField::new(),
            result_path: ResultPathField::new(),
            result:      ResultField::new(),
            next:        NextField::new(),
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

    /// Where the result is placed in the input.
    pub fn result_path(&mut self) -> FieldRef<'_, Self, ResultPathField> {
        FieldRef::new(self, |s| &mut s.result_path)
    }

    /// The fixed output of the state.
    pub fn result(&mut self) -> FieldRef<'_, Self, ResultField> {
        FieldRef::new(self, |s| &mut s.result)
    }

    /// The transition.
    pub fn next(&mut self) -> FieldRef<'_, Self, NextField> {
        FieldRef::new(self, |s| &mut s.next)
    }

    /// The declared fields, in order.
    pub fn fields(&self) -> Vec<FieldSlot<'_>> {
        vec![
            FieldSlot::Path(&self.path),
            FieldSlot::ResultPath(&self.result_path),
            FieldSlot::Result(&self.result),
            FieldSlot::Next(&self.next),
        ]
    }

    pub(crate) fn fields_mut(&mut self) -> Vec<FieldSlotMut<'_>> {
        vec![
            FieldSlotMut::Path(&mut self.path),
            FieldSlotMut::ResultPath(&mut self.result_path),
            FieldSlotMut::Result(&mut self.result),
            FieldSlotMut::Next(&mut self.next),
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
        validate_fields(&self.fields())
    }
}
