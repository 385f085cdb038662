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

#![warn(missing_docs, clippy::needless_borrow)]
// Clippy lints, some should be disabled incrementally
#![allow(
    clippy::new_without_default,
    clippy::should_implement_trait,
    clippy::module_inception,
    clippy::upper_case_acronyms
)]

//! Statecraft is a strongly-typed object model of the Amazon States Language.
//!
//! State machines are built programmatically, validated as a whole, encoded
//! to their JSON document by the [`generator`], and decoded back by the
//! [`hydrator`]:
//!
//! ```
//! use statecraft::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<()> {
//! let mut machine = StateMachine::with_autolink(true);
//! machine
//!     .add(Pass::new("Hello"))?
//!     .add(Succeed::new("World"))?;
//!
//! let document = Generator::new().encode_machine(&machine)?;
//! assert_eq!(
//!     document,
//!     json!({
//!         "StartAt": "Hello",
//!         "States": {
//!             "Hello": { "Type": "Pass", "Next": "World" },
//!             "World": { "Type": "Succeed" }
//!         }
//!     })
//! );
//! assert_eq!(Hydrator::new().hydrate_state_machine(&document)?, machine);
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod fields;
pub mod generator;
pub mod hydrator;
pub mod machine;
pub mod paths;
pub mod prelude;
pub mod states;

#[cfg(test)]
mod tests;
