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

//! The generator turns a validated model into its JSON document.
//!
//! Every entry point validates first and aborts on the first problem, so a
//! partial document is never produced. Only configured fields contribute
//! keys; that is how optional keys are left out.

use crate::collection::StateCollection;
use crate::error::{Result, StatecraftError};
use crate::fields::*;
use crate::machine::StateMachine;
use crate::states::choice::{ChoiceExpression, LogicRule};
use crate::states::State;
use log::debug;
use serde_json::{Map, Value};

/// Encodes state machines and states into JSON values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Generator;

impl Generator {
    /// Returns a generator.
    pub fn new() -> Self {
        Generator
    }

    /// Encodes a whole machine:
    /// `{StartAt, States, [Comment], [TimeoutSeconds], [Version]}`.
    pub fn encode_machine(&self, machine: &StateMachine) -> Result<Value> {
        first_error(machine.validate())?;

        let mut document = self.encode_collection(machine.states())?;
        if let Some(comment) = machine.comment() {
            document.insert("Comment".to_string(), comment.into());
        }
        if let Some(timeout) = machine.timeout() {
            document.insert("TimeoutSeconds".to_string(), timeout.into());
        }
        if let Some(version) = machine.version() {
            document.insert("Version".to_string(), version.into());
        }
        Ok(Value::Object(document))
    }

    /// Encodes a single state, without its name.
    pub fn encode_state(&self, state: &State) -> Result<Value> {
        first_error(state.validate())?;
        debug!("Encoding {} state {}", state.kind(), state.name());

        let mut object = Map::new();
        object.insert("Type".to_string(), state.kind().type_name().into());
        if let Some(comment) = state.comment() {
            object.insert("Comment".to_string(), comment.into());
        }

        match state {
            State::Pass(_) | State::Succeed(_) => {}
            State::Task(task) => {
                if let Some(resource) = task.resource() {
                    object.insert("Resource".to_string(), resource.into());
                }
                if let Some(timeout) = task.timeout() {
                    object.insert("TimeoutSeconds".to_string(), timeout.into());
                }
                if let Some(heartbeat) = task.heartbeat() {
                    object.insert("HeartbeatSeconds".to_string(), heartbeat.into());
                }
            }
            State::Wait(wait) => {
                if let Some(seconds) = wait.seconds() {
                    object.insert("Seconds".to_string(), seconds.into());
                }
            }
            State::Fail(fail) => {
                if let Some(error) = fail.error() {
                    object.insert("Error".to_string(), error.into());
                }
                if let Some(cause) = fail.cause() {
                    object.insert("Cause".to_string(), cause.into());
                }
            }
            State::Choice(choice) => {
                let choices = choice.choices().iter().map(encode_choice).collect();
                object.insert("Choices".to_string(), Value::Array(choices));
                if let Some(default) = choice.default() {
                    object.insert("Default".to_string(), default.into());
                }
            }
            State::Parallel(parallel) => {
                let branches = parallel
                    .branches()
                    .iter()
                    .map(|branch| self.encode_collection(branch.states()).map(Value::Object))
                    .collect::<Result<Vec<_>>>()?;
                object.insert("Branches".to_string(), Value::Array(branches));
            }
        }

        state
            .fields()
            .iter()
            .filter(|slot| slot.field().is_configured())
            .for_each(|slot| object.extend(encode_field(slot)));

        Ok(Value::Object(object))
    }

    /// `{StartAt, States}` of a machine or a parallel branch.
    fn encode_collection(&self, collection: &StateCollection) -> Result<Map<String, Value>> {
        let start_at = collection.start_at().ok_or_else(|| {
            StatecraftError::ConfigurationMissing("StartAt".to_string())
        })?;

        let mut states = Map::new();
        for state in collection.states() {
            states.insert(state.name().to_string(), self.encode_state(state)?);
        }

        let mut object = Map::new();
        object.insert("StartAt".to_string(), start_at.into());
        object.insert("States".to_string(), Value::Object(states));
        Ok(object)
    }
}

fn first_error(errors: Vec<StatecraftError>) -> Result<()> {
    match errors.into_iter().next() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// The keys a single configured field contributes to its owner.
pub fn encode_field(slot: &FieldSlot<'_>) -> Map<String, Value> {
    match *slot {
        FieldSlot::Next(next) => encode_next(next),
        FieldSlot::Path(path) => {
            let mut object = Map::new();
            if let Some(input) = path.input() {
                object.insert("InputPath".to_string(), input.into());
            }
            if let Some(output) = path.output() {
                object.insert("OutputPath".to_string(), output.into());
            }
            object
        }
        FieldSlot::Result(result) => {
            let mut object = Map::new();
            if let Some(value) = result.get() {
                object.insert("Result".to_string(), value.clone());
            }
            object
        }
        FieldSlot::ResultPath(result_path) => encode_result_path(result_path),
        FieldSlot::Retry(retry) => {
            let retriers = retry.retriers().iter().map(encode_retrier).collect();
            let mut object = Map::new();
            object.insert("Retry".to_string(), Value::Array(retriers));
            object
        }
        FieldSlot::Catch(catch) => {
            let catchers = catch.catchers().iter().map(encode_catcher).collect();
            let mut object = Map::new();
            object.insert("Catch".to_string(), Value::Array(catchers));
            object
        }
    }
}

fn encode_next(next: &NextField) -> Map<String, Value> {
    let mut object = Map::new();
    match next.transition() {
        _ if next.is_locked() => {}
        Some(Transition::End) => {
            object.insert("End".to_string(), Value::Bool(true));
        }
        Some(Transition::Next(target)) => {
            object.insert("Next".to_string(), target.as_str().into());
        }
        None => {}
    }
    object
}

fn encode_result_path(result_path: &ResultPathField) -> Map<String, Value> {
    let mut object = Map::new();
    if result_path.is_discard() {
        object.insert("ResultPath".to_string(), Value::Null);
    } else if let Some(path) = result_path.get() {
        object.insert("ResultPath".to_string(), path.into());
    }
    object
}

fn encode_retrier(retrier: &Retrier) -> Value {
    let mut object = Map::new();
    let errors = retrier
        .errors()
        .iter()
        .map(|code| Value::from(code.as_str()))
        .collect();
    object.insert("ErrorEquals".to_string(), Value::Array(errors));
    if let Some(interval) = retrier.interval() {
        object.insert("IntervalSeconds".to_string(), interval.into());
    }
    if let Some(rate) = retrier.backoff_number() {
        object.insert("BackoffRate".to_string(), Value::Number(rate.clone()));
    }
    if let Some(attempts) = retrier.max_attempts() {
        object.insert("MaxAttempts".to_string(), attempts.into());
    }
    Value::Object(object)
}

fn encode_catcher(catcher: &Catcher) -> Value {
    let mut object = Map::new();
    let errors = catcher
        .errors()
        .iter()
        .map(|name| Value::from(name.as_str()))
        .collect();
    object.insert("ErrorEquals".to_string(), Value::Array(errors));
    object.extend(encode_next(catcher.next_field()));
    object.extend(encode_result_path(catcher.result_path_field()));
    Value::Object(object)
}

/// Encodes a choice rule depth-first. Nested rules never carry a transition.
fn encode_choice(expression: &ChoiceExpression) -> Value {
    let mut object = Map::new();
    match expression {
        ChoiceExpression::Logic(logic) => {
            let operand = match logic.rule() {
                LogicRule::Not => logic
                    .children()
                    .first()
                    .map(encode_choice)
                    .unwrap_or(Value::Null),
                LogicRule::And | LogicRule::Or => {
                    Value::Array(logic.children().iter().map(encode_choice).collect())
                }
            };
            object.insert(logic.rule().keyword().to_string(), operand);
        }
        ChoiceExpression::Comparator(comparator) => {
            if let Some(variable) = comparator.variable() {
                object.insert("Variable".to_string(), variable.into());
            }
            if let Some(literal) = comparator.literal() {
                object.insert(comparator.rule().keyword().to_string(), literal.clone());
            }
        }
    }
    object.extend(encode_next(expression.next_field()));
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::choice::ComparatorRule;
    use crate::states::{Choice, Pass, Task};
    use serde_json::json;

    #[test]
    fn unconfigured_fields_add_no_keys() -> Result<()> {
        let mut pass = Pass::new("foo");
        pass.next().end()?;
        let value = Generator::new().encode_state(&pass.into())?;
        assert_eq!(value, json!({ "Type": "Pass", "End": true }));
        Ok(())
    }

    #[test]
    fn invalid_state_is_not_encoded() {
        let task = Task::new("foo");
        assert_eq!(
            Generator::new().encode_state(&task.into()),
            Err(StatecraftError::ConfigurationMissing("Next".to_string()))
        );
    }

    #[test]
    fn discarded_result_path_is_null() -> Result<()> {
        let mut task = Task::new("foo");
        task.set_resource("XY")
            .next()
            .to("bar")?
            .result_path()
            .discard()
            .retry()
            .add(Retrier::all().with_max_attempts(0));

        let value = Generator::new().encode_state(&task.into())?;
        assert_eq!(
            value,
            json!({
                "Type": "Task",
                "Resource": "XY",
                "Next": "bar",
                "ResultPath": null,
                "Retry": [{ "ErrorEquals": ["States.ALL"], "MaxAttempts": 0 }]
            })
        );
        Ok(())
    }

    #[test]
    fn nested_choice_rules_have_no_transition() -> Result<()> {
        let mut choice = Choice::new("branch");
        let or = choice.add_logic(LogicRule::Or).next().to("Public")?;
        or.add_comparator(ComparatorRule::StringEquals)
            .set_variable("$.type")?
            .set_literal("Public")?;
        or.add_comparator(ComparatorRule::NumericGreaterThanEquals)
            .set_variable("$.value")?
            .set_literal(20)?;
        choice.default_to("Private");

        let value = Generator::new().encode_state(&choice.into())?;
        assert_eq!(
            value,
            json!({
                "Type": "Choice",
                "Choices": [{
                    "Or": [
                        { "Variable": "$.type", "StringEquals": "Public" },
                        { "Variable": "$.value", "NumericGreaterThanEquals": 20 }
                    ],
                    "Next": "Public"
                }],
                "Default": "Private"
            })
        );
        Ok(())
    }
}
