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

//! Path expressions select a portion of a state's JSON input or output.
//!
//! Only the minimal reference-path syntax is accepted: the root selector `$`
//! followed by at least one dotted (`.field`) or bracketed (`[0]`, `[*]`,
//! `['field']`) segment.

use crate::error::{Result, StatecraftError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PATH_EXPRESSION: Regex =
        Regex::new(r#"^\$(\.[^.\[\]\s]+|\[(\d+|\*|'[^']*'|"[^"]*")\])+$"#).unwrap();
}

/// Returns true if `path` is a valid path expression.
pub fn is_valid_path(path: &str) -> bool {
    PATH_EXPRESSION.is_match(path)
}

/// Checks `path`, failing with [`StatecraftError::InvalidPathExpression`].
pub fn validate_path(path: &str) -> Result<()> {
    if is_valid_path(path) {
        Ok(())
    } else {
        Err(StatecraftError::InvalidPathExpression(path.to_string()))
    }
}
