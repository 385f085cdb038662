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

//! Maps `Type` discriminators to state constructors.

use super::decode::*;
use super::Hydrator;
use crate::error::{Result, StatecraftError};
use crate::states::*;
use std::collections::HashMap;

/// Builds a populated state from its name and wire object.
pub type Constructor = fn(&Hydrator, &str, &Object) -> Result<State>;

/// A state type that can be rebuilt from its wire object.
///
/// Only the variant keys are decoded here. `Comment` and the declared fields
/// are decoded generically through [`State::fields_mut`].
pub trait Hydrate: Into<State> {
    /// The discriminator the type is registered under.
    const KIND: StateKind;

    /// Returns an unconfigured state.
    fn bare(name: &str) -> Self;

    /// Populates the variant keys of the state from `object`.
    fn hydrate(&mut self, _hydrator: &Hydrator, _object: &Object) -> Result<()> {
        Ok(())
    }
}

/// A table of known state types.
#[derive(Clone, Default)]
pub struct Registry {
    constructors: HashMap<&'static str, Constructor>,
}

impl Registry {
    /// Returns an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a registry that knows every state type of the States language.
    pub fn step_functions() -> Self {
        let mut registry = Self::new();
        registry
            .register::<Pass>()
            .register::<Task>()
            .register::<Wait>()
            .register::<Succeed>()
            .register::<Fail>()
            .register::<Choice>()
            .register::<Parallel>();
        registry
    }

    /// Registers `T` under its discriminator.
    pub fn register<T: Hydrate>(&mut self) -> &mut Self {
        self.register_constructor(T::KIND.type_name(), construct::<T>)
    }

    /// Registers an arbitrary constructor under `type_name`.
    pub fn register_constructor(
        &mut self,
        type_name: &'static str,
        constructor: Constructor,
    ) -> &mut Self {
        self.constructors.insert(type_name, constructor);
        self
    }

    /// Looks up the constructor of `type_name`.
    pub fn get(&self, type_name: &str) -> Result<Constructor> {
        self.constructors
            .get(type_name)
            .copied()
            .ok_or_else(|| StatecraftError::UnknownStateType(type_name.to_string()))
    }

    /// The registered discriminators.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names = self.constructors.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.type_names())
            .finish()
    }
}

fn construct<T: Hydrate>(hydrator: &Hydrator, name: &str, object: &Object) -> Result<State> {
    let mut bare = T::bare(name);
    bare.hydrate(hydrator, object)?;

    let mut state: State = bare.into();
    if let Some(comment) = get_str(object, "Comment")? {
        state.set_comment(comment);
    }
    for slot in state.fields_mut() {
        decode_field(slot, object)?;
    }
    Ok(state)
}

impl Hydrate for Pass {
    const KIND: StateKind = StateKind::Pass;

    fn bare(name: &str) -> Self {
        Pass::new(name)
    }
}

impl Hydrate for Succeed {
    const KIND: StateKind = StateKind::Succeed;

    fn bare(name: &str) -> Self {
        Succeed::new(name)
    }
}

impl Hydrate for Task {
    const KIND: StateKind = StateKind::Task;

    fn bare(name: &str) -> Self {
        Task::new(name)
    }

    fn hydrate(&mut self, _hydrator: &Hydrator, object: &Object) -> Result<()> {
        if let Some(resource) = get_str(object, "Resource")? {
            self.set_resource(resource);
        }
        if let Some(timeout) = get_u32(object, "TimeoutSeconds")? {
            self.set_timeout(timeout)?;
        }
        if let Some(heartbeat) = get_u32(object, "HeartbeatSeconds")? {
            self.set_heartbeat(heartbeat)?;
        }
        Ok(())
    }
}

impl Hydrate for Wait {
    const KIND: StateKind = StateKind::Wait;

    fn bare(name: &str) -> Self {
        Wait::new(name)
    }

    fn hydrate(&mut self, _hydrator: &Hydrator, object: &Object) -> Result<()> {
        if let Some(seconds) = get_u32(object, "Seconds")? {
            self.set_seconds(seconds)?;
        }
        Ok(())
    }
}

impl Hydrate for Fail {
    const KIND: StateKind = StateKind::Fail;

    fn bare(name: &str) -> Self {
        Fail::new(name)
    }

    fn hydrate(&mut self, _hydrator: &Hydrator, object: &Object) -> Result<()> {
        if let Some(error) = get_str(object, "Error")? {
            self.set_error(error);
        }
        if let Some(cause) = get_str(object, "Cause")? {
            self.set_cause(cause);
        }
        Ok(())
    }
}

impl Hydrate for Choice {
    const KIND: StateKind = StateKind::Choice;

    fn bare(name: &str) -> Self {
        Choice::new(name)
    }

    fn hydrate(&mut self, _hydrator: &Hydrator, object: &Object) -> Result<()> {
        if let Some(rules) = get_array(object, "Choices")? {
            decode_choices(self, rules)?;
        }
        if let Some(default) = get_str(object, "Default")? {
            self.default_to(default);
        }
        Ok(())
    }
}

impl Hydrate for Parallel {
    const KIND: StateKind = StateKind::Parallel;

    fn bare(name: &str) -> Self {
        Parallel::new(name)
    }

    fn hydrate(&mut self, hydrator: &Hydrator, object: &Object) -> Result<()> {
        for item in get_array(object, "Branches")?.unwrap_or_default() {
            let branch = as_object(item, "Branches item")?;
            self.push_branch(hydrator.hydrate_collection(branch)?);
        }
        Ok(())
    }
}
