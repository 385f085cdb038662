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

//! A "prelude" for users of the statecraft crate.
//!
//! Like the standard library's prelude, this module simplifies importing of
//! common items. Unlike the standard prelude, the contents of this module must
//! be imported manually:
//!
//! ```
//! use statecraft::prelude::*;
//! ```

pub use crate::collection::StateCollection;
pub use crate::error::{Result, StatecraftError};
pub use crate::fields::{
    CatchField, Catcher, ErrorCode, ErrorName, Field, FieldKind, FieldRef, FieldSlot, NextField,
    PathField, ResultField, ResultPathField, Retrier, RetryField, Transition,
};
pub use crate::generator::Generator;
pub use crate::hydrator::{Hydrate, Hydrator, Registry};
pub use crate::machine::StateMachine;
pub use crate::paths::{is_valid_path, validate_path};
pub use crate::states::choice::{
    ChoiceExpression, ComparatorExpression, ComparatorRule, LogicExpression, LogicRule,
};
pub use crate::states::*;
