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

//! The `ResultPath` field of a state.

use super::{Field, FieldKind, FieldRef};
use crate::error::Result;
use crate::paths::validate_path;

/// `ResultPath` specifies where in the input the result is placed. Discarding
/// the result keeps the input untouched and serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPathField {
    path:    Option<String>,
    discard: bool,
}

impl ResultPathField {
    /// Returns an unconfigured field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the result at `path`.
    pub fn set(&mut self, path: impl Into<String>) -> Result<()> {
        let path = path.into();
        validate_path(&path)?;
        self.path = Some(path);
        self.discard = false;
        Ok(())
    }

    /// Drops the result and passes the input through.
    pub fn discard(&mut self) {
        self.path = None;
        self.discard = true;
    }

    /// The configured path. `None` when unconfigured or discarded.
    pub fn get(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Whether the result is discarded.
    pub fn is_discard(&self) -> bool {
        self.discard
    }
}

impl Field for ResultPathField {
    fn kind(&self) -> FieldKind {
        FieldKind::ResultPath
    }

    fn is_configured(&self) -> bool {
        self.discard || self.path.is_some()
    }
}

impl<'a, O> FieldRef<'a, O, ResultPathField> {
    /// Places the result at `path`.
    pub fn set(self, path: impl Into<String>) -> Result<&'a mut O> {
        self.try_apply(|field| field.set(path))
    }

    /// Discards the result.
    pub fn discard(self) -> &'a mut O {
        self.apply(|field| field.discard()).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatecraftError;

    #[test]
    fn discard_and_path_replace_each_other() -> Result<()> {
        let mut field = ResultPathField::new();
        field.discard();
        assert!(field.is_configured());
        assert!(field.is_discard());
        assert_eq!(field.get(), None);

        field.set("$.errorMessage")?;
        assert!(!field.is_discard());
        assert_eq!(field.get(), Some("$.errorMessage"));

        assert_eq!(
            field.set("errorMessage"),
            Err(StatecraftError::InvalidPathExpression(
                "errorMessage".to_string()
            ))
        );
        assert_eq!(field.get(), Some("$.errorMessage"));
        Ok(())
    }
}
