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

//! A Succeed state ("Type": "Succeed") stops an execution successfully. The
//! Succeed state is a useful target for Choice state branches that don't do
//! anything but stop the execution.

use crate::error::StatecraftError;

/// The Succeed state. It is terminal and carries no fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Succeed {
    name:    String,
    comment: Option<String>,
}

impl Succeed {
    /// Returns a Succeed state.
    pub fn new(name: impl Into<String>) -> Self {
        Succeed {
            name:    name.into(),
            comment: None,
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

    /// A Succeed state is always valid.
    pub fn validate(&self) -> Vec<StatecraftError> {
        vec![]
    }
}
