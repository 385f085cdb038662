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

//! Input and output processing paths of a state.

use super::{Field, FieldKind, FieldRef};
use crate::error::Result;
use crate::paths::validate_path;

/// `InputPath` selects the portion of the state's input handed to its work,
/// and `OutputPath` the portion of its output passed on. Both are optional
/// and independent of each other; an omitted path designates the entire
/// document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathField {
    input:      Option<String>,
    output:     Option<String>,
    configured: bool,
}

impl PathField {
    /// Returns an unconfigured field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `InputPath`, rejecting invalid path expressions.
    pub fn set_input(&mut self, path: impl Into<String>) -> Result<()> {
        let path = path.into();
        validate_path(&path)?;
        self.input = Some(path);
        self.configured = true;
        Ok(())
    }

    /// Sets the `OutputPath`, rejecting invalid path expressions.
    pub fn set_output(&mut self, path: impl Into<String>) -> Result<()> {
        let path = path.into();
        validate_path(&path)?;
        self.output = Some(path);
        self.configured = true;
        Ok(())
    }

    /// The configured `InputPath`.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// The configured `OutputPath`.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

impl Field for PathField {
    fn kind(&self) -> FieldKind {
        FieldKind::Path
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

impl<'a, O> FieldRef<'a, O, PathField> {
    /// Sets the `InputPath`.
    pub fn input(self, path: impl Into<String>) -> Result<&'a mut O> {
        self.try_apply(|field| field.set_input(path))
    }

    /// Sets the `OutputPath`.
    pub fn output(self, path: impl Into<String>) -> Result<&'a mut O> {
        self.try_apply(|field| field.set_output(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatecraftError;

    #[test]
    fn paths_are_checked_at_the_setter() -> Result<()> {
        let mut field = PathField::new();
        assert_eq!(
            field.set_input("payload"),
            Err(StatecraftError::InvalidPathExpression("payload".to_string()))
        );
        assert!(!field.is_configured());

        field.set_output("$.result")?;
        assert!(field.is_configured());
        assert_eq!(field.input(), None);
        assert_eq!(field.output(), Some("$.result"));
        Ok(())
    }
}
