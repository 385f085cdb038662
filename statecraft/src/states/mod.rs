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

//! States are the elements of a state machine. A state is referred to by
//! its name, which must be unique within its collection, and its type
//! determines the fields it declares.

pub mod choice;
pub mod fail;
pub mod parallel;
pub mod pass;
pub mod succeed;
pub mod task;
pub mod wait;

pub use choice::Choice;
pub use fail::Fail;
pub use parallel::{Parallel, ParallelBranch};
pub use pass::Pass;
pub use succeed::Succeed;
pub use task::Task;
pub use wait::Wait;

use crate::error::StatecraftError;
use crate::fields::{FieldSlot, FieldSlotMut, NextField};
use std::fmt::{Display, Formatter};

/// The `Type` discriminator of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// Passes input to output.
    Pass,
    /// Performs work.
    Task,
    /// Delays execution.
    Wait,
    /// Stops successfully.
    Succeed,
    /// Stops with an error.
    Fail,
    /// Branches on the input.
    Choice,
    /// Runs branches concurrently.
    Parallel,
}

impl StateKind {
    /// Every state kind.
    pub const ALL: [StateKind; 7] = [
        StateKind::Pass,
        StateKind::Task,
        StateKind::Wait,
        StateKind::Succeed,
        StateKind::Fail,
        StateKind::Choice,
        StateKind::Parallel,
    ];

    /// The wire discriminator.
    pub fn type_name(&self) -> &'static str {
        match self {
            StateKind::Pass => "Pass",
            StateKind::Task => "Task",
            StateKind::Wait => "Wait",
            StateKind::Succeed => "Succeed",
            StateKind::Fail => "Fail",
            StateKind::Choice => "Choice",
            StateKind::Parallel => "Parallel",
        }
    }
}

impl Display for StateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Any state of a state machine.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum State {
    Pass(Pass),
    Task(Task),
    Wait(Wait),
    Succeed(Succeed),
    Fail(Fail),
    Choice(Choice),
    Parallel(Parallel),
}

macro_rules! dispatch {
    ($state:expr, $inner:ident => $body:expr) => {
        match $state {
            State::Pass($inner) => $body,
            State::Task($inner) => $body,
            State::Wait($inner) => $body,
            State::Succeed($inner) => $body,
            State::Fail($inner) => $body,
            State::Choice($inner) => $body,
            State::Parallel($inner) => $body,
        }
    };
}

impl State {
    /// The state name.
    pub fn name(&self) -> &str {
        dispatch!(self, s => s.name())
    }

    /// The human-readable comment.
    pub fn comment(&self) -> Option<&str> {
        dispatch!(self, s => s.comment())
    }

    /// Sets the human-readable comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        dispatch!(self, s => {
            s.set_comment(comment);
        });
        self
    }

    /// The `Type` discriminator.
    pub fn kind(&self) -> StateKind {
        match self {
            State::Pass(_) => StateKind::Pass,
            State::Task(_) => StateKind::Task,
            State::Wait(_) => StateKind::Wait,
            State::Succeed(_) => StateKind::Succeed,
            State::Fail(_) => StateKind::Fail,
            State::Choice(_) => StateKind::Choice,
            State::Parallel(_) => StateKind::Parallel,
        }
    }

    /// The declared fields, in order. Empty for states without fields.
    pub fn fields(&self) -> Vec<FieldSlot<'_>> {
        match self {
            State::Pass(s) => s.fields(),
            State::Task(s) => s.fields(),
            State::Wait(s) => s.fields(),
            State::Parallel(s) => s.fields(),
            State::Succeed(_) | State::Fail(_) | State::Choice(_) => vec![],
        }
    }

    pub(crate) fn fields_mut(&mut self) -> Vec<FieldSlotMut<'_>> {
        match self {
            State::Pass(s) => s.fields_mut(),
            State::Task(s) => s.fields_mut(),
            State::Wait(s) => s.fields_mut(),
            State::Parallel(s) => s.fields_mut(),
            State::Succeed(_) | State::Fail(_) | State::Choice(_) => vec![],
        }
    }

    /// The state's own transition, for kinds that declare one.
    pub fn next_field(&self) -> Option<&NextField> {
        match self {
            State::Pass(s) => Some(s.next_field()),
            State::Task(s) => Some(s.next_field()),
            State::Wait(s) => Some(s.next_field()),
            State::Parallel(s) => Some(s.next_field()),
            State::Succeed(_) | State::Fail(_) | State::Choice(_) => None,
        }
    }

    pub(crate) fn next_field_mut(&mut self) -> Option<&mut NextField> {
        match self {
            State::Pass(s) => Some(s.next_field_mut()),
            State::Task(s) => Some(s.next_field_mut()),
            State::Wait(s) => Some(s.next_field_mut()),
            State::Parallel(s) => Some(s.next_field_mut()),
            State::Succeed(_) | State::Fail(_) | State::Choice(_) => None,
        }
    }

    /// Returns every problem with this state.
    pub fn validate(&self) -> Vec<StatecraftError> {
        dispatch!(self, s => s.validate())
    }
}

macro_rules! impl_from_state {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for State {
                fn from(state: $variant) -> Self {
                    State::$variant(state)
                }
            }
        )*
    };
}

impl_from_state!(Pass, Task, Wait, Succeed, Fail, Choice, Parallel);
