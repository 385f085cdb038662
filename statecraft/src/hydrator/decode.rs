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

//! Typed accessors over wire objects and the field decoders.
//!
//! Field decoders are the inverse of the generator's field encoders: a key
//! that is absent leaves its field unconfigured, a key of the wrong JSON type
//! is a [`StatecraftError::MalformedDocument`].

use crate::error::{Result, StatecraftError};
use crate::fields::*;
use crate::states::choice::{
    Choice, ComparatorExpression, ComparatorRule, LogicExpression, LogicRule,
};
use serde_json::{Map, Number, Value};

/// A JSON object as found in a state machine document.
pub type Object = Map<String, Value>;

pub(crate) fn malformed(message: impl Into<String>) -> StatecraftError {
    StatecraftError::MalformedDocument(message.into())
}

pub(crate) fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| malformed(format!("{} must be a JSON object", context)))
}

pub(crate) fn get_str<'a>(object: &'a Object, key: &str) -> Result<Option<&'a str>> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(malformed(format!("{} must be a string, got {}", key, other))),
    }
}

pub(crate) fn get_u32(object: &Object, key: &str) -> Result<Option<u32>> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                malformed(format!("{} must be a non-negative integer, got {}", key, value))
            }),
    }
}

pub(crate) fn get_number<'a>(object: &'a Object, key: &str) -> Result<Option<&'a Number>> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n)),
        Some(other) => Err(malformed(format!("{} must be a number, got {}", key, other))),
    }
}

pub(crate) fn get_array<'a>(object: &'a Object, key: &str) -> Result<Option<&'a [Value]>> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(malformed(format!("{} must be an array, got {}", key, other))),
    }
}

pub(crate) fn get_object<'a>(object: &'a Object, key: &str) -> Result<Option<&'a Object>> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => as_object(value, key).map(Some),
    }
}

fn get_strings<'a>(object: &'a Object, key: &str) -> Result<Vec<&'a str>> {
    get_array(object, key)?
        .unwrap_or_default()
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| malformed(format!("{} must only hold strings", key)))
        })
        .collect()
}

/// Populates one declared field from the keys of `object`.
pub(crate) fn decode_field(slot: FieldSlotMut<'_>, object: &Object) -> Result<()> {
    match slot {
        FieldSlotMut::Next(next) => decode_next(next, object),
        FieldSlotMut::Path(path) => {
            if let Some(input) = get_str(object, "InputPath")? {
                path.set_input(input)?;
            }
            if let Some(output) = get_str(object, "OutputPath")? {
                path.set_output(output)?;
            }
            Ok(())
        }
        FieldSlotMut::Result(result) => {
            if let Some(value) = object.get("Result") {
                result.set(value.clone());
            }
            Ok(())
        }
        FieldSlotMut::ResultPath(result_path) => decode_result_path(result_path, object),
        FieldSlotMut::Retry(retry) => {
            for item in get_array(object, "Retry")?.unwrap_or_default() {
                retry.push(decode_retrier(as_object(item, "Retry item")?)?);
            }
            Ok(())
        }
        FieldSlotMut::Catch(catch) => {
            for item in get_array(object, "Catch")?.unwrap_or_default() {
                catch.push(decode_catcher(as_object(item, "Catch item")?)?);
            }
            Ok(())
        }
    }
}

/// `{End: true}` ends, `{Next: name}` transitions, anything else leaves the
/// field unconfigured.
pub(crate) fn decode_next(next: &mut NextField, object: &Object) -> Result<()> {
    if object.get("End") == Some(&Value::Bool(true)) {
        next.end()
    } else if let Some(target) = get_str(object, "Next")? {
        next.set_target(target)
    } else {
        Ok(())
    }
}

fn decode_result_path(result_path: &mut ResultPathField, object: &Object) -> Result<()> {
    match object.get("ResultPath") {
        None => Ok(()),
        Some(Value::Null) => {
            result_path.discard();
            Ok(())
        }
        Some(Value::String(path)) => result_path.set(path.as_str()),
        Some(other) => Err(malformed(format!(
            "ResultPath must be a string or null, got {}",
            other
        ))),
    }
}

fn decode_retrier(object: &Object) -> Result<Retrier> {
    let errors = get_strings(object, "ErrorEquals")?
        .into_iter()
        .map(str::parse::<ErrorCode>)
        .collect::<Result<Vec<_>>>()?;

    let mut retrier = Retrier::new(errors);
    if let Some(interval) = get_u32(object, "IntervalSeconds")? {
        retrier = retrier.with_interval(interval)?;
    }
    if let Some(rate) = get_number(object, "BackoffRate")? {
        retrier = retrier.with_backoff_number(rate.clone())?;
    }
    if let Some(attempts) = get_u32(object, "MaxAttempts")? {
        retrier = retrier.with_max_attempts(attempts);
    }
    Ok(retrier)
}

fn decode_catcher(object: &Object) -> Result<Catcher> {
    let mut catcher = Catcher::new(get_strings(object, "ErrorEquals")?)?;
    decode_next(catcher.next_field_mut(), object)?;
    decode_result_path(catcher.result_path_field_mut(), object)?;
    Ok(catcher)
}

/// The operator a wire choice rule encodes.
enum Operator {
    Logic(LogicRule),
    Comparator(ComparatorRule),
}

/// Logic keywords take priority over comparators, each family in the order
/// of its `ALL` table.
fn operator(object: &Object) -> Result<Operator> {
    if let Some(rule) = LogicRule::ALL
        .iter()
        .find(|rule| object.contains_key(rule.keyword()))
    {
        return Ok(Operator::Logic(*rule));
    }
    ComparatorRule::ALL
        .iter()
        .find(|rule| object.contains_key(rule.keyword()))
        .map(|rule| Operator::Comparator(*rule))
        .ok_or_else(|| malformed("choice rule has no operator"))
}

/// Anything choice rules can be appended to.
trait RuleList {
    fn push_logic(&mut self, rule: LogicRule) -> &mut LogicExpression;
    fn push_comparator(&mut self, rule: ComparatorRule) -> &mut ComparatorExpression;
}

impl RuleList for Choice {
    fn push_logic(&mut self, rule: LogicRule) -> &mut LogicExpression {
        self.add_logic(rule)
    }

    fn push_comparator(&mut self, rule: ComparatorRule) -> &mut ComparatorExpression {
        self.add_comparator(rule)
    }
}

impl RuleList for LogicExpression {
    fn push_logic(&mut self, rule: LogicRule) -> &mut LogicExpression {
        self.add_logic(rule)
    }

    fn push_comparator(&mut self, rule: ComparatorRule) -> &mut ComparatorExpression {
        self.add_comparator(rule)
    }
}

/// Decodes the `Choices` array of a Choice state.
pub(crate) fn decode_choices(choice: &mut Choice, rules: &[Value]) -> Result<()> {
    rules.iter().try_for_each(|rule| decode_rule(choice, rule))
}

/// Appends the rule encoded by `value` to `list`, recursing into nested
/// rules. Nested rules are locked, so a `Next` on them is rejected.
fn decode_rule<L: RuleList>(list: &mut L, value: &Value) -> Result<()> {
    let object = as_object(value, "choice rule")?;
    match operator(object)? {
        Operator::Logic(rule) => {
            let logic = list.push_logic(rule);
            match (rule, &object[rule.keyword()]) {
                (LogicRule::Not, operand @ Value::Object(_)) => decode_rule(logic, operand)?,
                (LogicRule::And | LogicRule::Or, Value::Array(operands)) => {
                    for operand in operands {
                        decode_rule(logic, operand)?;
                    }
                }
                (_, other) => {
                    return Err(malformed(format!(
                        "{} has an operand of the wrong shape: {}",
                        rule, other
                    )))
                }
            }
            logic
                .next()
                .try_apply(|next| decode_next(next, object))
                .map(|_| ())
        }
        Operator::Comparator(rule) => {
            let comparator = list.push_comparator(rule);
            if let Some(variable) = get_str(object, "Variable")? {
                comparator.set_variable(variable)?;
            }
            comparator.set_literal(object[rule.keyword()].clone())?;
            comparator
                .next()
                .try_apply(|next| decode_next(next, object))
                .map(|_| ())
        }
    }
}
