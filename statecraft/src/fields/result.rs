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

//! The `Result` field of a state.

use super::{Field, FieldKind, FieldRef};
use serde_json::Value;

/// A fixed payload treated as the output of a virtual task. It is emitted
/// verbatim under the `Result` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultField {
    value: Option<Value>,
}

impl ResultField {
    /// Returns an unconfigured field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payload. `null` is a valid payload.
    pub fn set(&mut self, value: impl Into<Value>) {
        self.value = Some(value.into());
    }

    /// The configured payload.
    pub fn get(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl Field for ResultField {
    fn kind(&self) -> FieldKind {
        FieldKind::Result
    }

    fn is_configured(&self) -> bool {
        self.value.is_some()
    }
}

impl<'a, O> FieldRef<'a, O, ResultField> {
    /// Sets the payload.
    pub fn set(self, value: impl Into<Value>) -> &'a mut O {
        self.apply(|field| field.set(value)).0
    }
}
