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

//! Choice rules form a tree. Logic rules (`And`, `Or`, `Not`) combine nested
//! rules, comparators test one input variable against a literal. Only the
//! root of a tree may carry a transition; every nested rule is created with a
//! locked [`NextField`].

use crate::error::{Result, StatecraftError};
use crate::fields::{Field, FieldRef, NextField};
use crate::paths::validate_path;
use chrono::DateTime;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Boolean combinators over nested choice rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicRule {
    /// Every nested rule matches. Needs at least two rules.
    And,
    /// Any nested rule matches. Needs at least two rules.
    Or,
    /// The single nested rule does not match.
    Not,
}

impl LogicRule {
    /// Every logic rule, in decoding priority order.
    pub const ALL: [LogicRule; 3] = [LogicRule::And, LogicRule::Or, LogicRule::Not];

    /// The wire keyword of the rule.
    pub fn keyword(&self) -> &'static str {
        match self {
            LogicRule::And => "And",
            LogicRule::Or => "Or",
            LogicRule::Not => "Not",
        }
    }
}

impl Display for LogicRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// The class of literal a comparator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    /// `true` or `false`.
    Boolean,
    /// Any JSON string.
    String,
    /// A JSON string holding an RFC 3339 timestamp.
    Timestamp,
    /// Any JSON number.
    Numeric,
}

impl OperandType {
    /// Whether `value` belongs to this class.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (OperandType::Boolean, Value::Bool(_)) => true,
            (OperandType::String, Value::String(_)) => true,
            (OperandType::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s).is_ok(),
            (OperandType::Numeric, Value::Number(_)) => true,
            _ => false,
        }
    }
}

/// Typed comparisons between an input variable and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ComparatorRule {
    StringEquals,
    StringLessThan,
    StringGreaterThan,
    StringLessThanEquals,
    StringGreaterThanEquals,
    NumericEquals,
    NumericLessThan,
    NumericGreaterThan,
    NumericLessThanEquals,
    NumericGreaterThanEquals,
    BooleanEquals,
    TimestampEquals,
    TimestampLessThan,
    TimestampGreaterThan,
    TimestampLessThanEquals,
    TimestampGreaterThanEquals,
}

impl ComparatorRule {
    /// Every comparator, in decoding priority order.
    pub const ALL: [ComparatorRule; 16] = [
        ComparatorRule::StringEquals,
        ComparatorRule::StringLessThan,
        ComparatorRule::StringGreaterThan,
        ComparatorRule::StringLessThanEquals,
        ComparatorRule::StringGreaterThanEquals,
        ComparatorRule::NumericEquals,
        ComparatorRule::NumericLessThan,
        ComparatorRule::NumericGreaterThan,
        ComparatorRule::NumericLessThanEquals,
        ComparatorRule::NumericGreaterThanEquals,
        ComparatorRule::BooleanEquals,
        ComparatorRule::TimestampEquals,
        ComparatorRule::TimestampLessThan,
        ComparatorRule::TimestampGreaterThan,
        ComparatorRule::TimestampLessThanEquals,
        ComparatorRule::TimestampGreaterThanEquals,
    ];

    /// The wire keyword of the rule.
    pub fn keyword(&self) -> &'static str {
        match self {
            ComparatorRule::StringEquals => "StringEquals",
            ComparatorRule::StringLessThan => "StringLessThan",
            ComparatorRule::StringGreaterThan => "StringGreaterThan",
            ComparatorRule::StringLessThanEquals => "StringLessThanEquals",
            ComparatorRule::StringGreaterThanEquals => "StringGreaterThanEquals",
            ComparatorRule::NumericEquals => "NumericEquals",
            ComparatorRule::NumericLessThan => "NumericLessThan",
            ComparatorRule::NumericGreaterThan => "NumericGreaterThan",
            ComparatorRule::NumericLessThanEquals => "NumericLessThanEquals",
            ComparatorRule::NumericGreaterThanEquals => "NumericGreaterThanEquals",
            ComparatorRule::BooleanEquals => "BooleanEquals",
            ComparatorRule::TimestampEquals => "TimestampEquals",
            ComparatorRule::TimestampLessThan => "TimestampLessThan",
            ComparatorRule::TimestampGreaterThan => "TimestampGreaterThan",
            ComparatorRule::TimestampLessThanEquals => "TimestampLessThanEquals",
            ComparatorRule::TimestampGreaterThanEquals => "TimestampGreaterThanEquals",
        }
    }

    /// The class of literal the rule compares against.
    pub fn operand_type(&self) -> OperandType {
        use ComparatorRule::*;
        match self {
            StringEquals | StringLessThan | StringGreaterThan | StringLessThanEquals
            | StringGreaterThanEquals => OperandType::String,
            NumericEquals | NumericLessThan | NumericGreaterThan | NumericLessThanEquals
            | NumericGreaterThanEquals => OperandType::Numeric,
            BooleanEquals => OperandType::Boolean,
            TimestampEquals | TimestampLessThan | TimestampGreaterThan
            | TimestampLessThanEquals | TimestampGreaterThanEquals => OperandType::Timestamp,
        }
    }
}

impl Display for ComparatorRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A node of a choice rule tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceExpression {
    /// A boolean combination of nested rules.
    Logic(LogicExpression),
    /// A single comparison.
    Comparator(ComparatorExpression),
}

impl ChoiceExpression {
    /// The transition taken when the rule matches.
    pub fn next_field(&self) -> &NextField {
        match self {
            ChoiceExpression::Logic(logic) => &logic.next,
            ChoiceExpression::Comparator(comparator) => &comparator.next,
        }
    }

    /// The wire keyword of the node's rule.
    pub fn keyword(&self) -> &'static str {
        match self {
            ChoiceExpression::Logic(logic) => logic.rule.keyword(),
            ChoiceExpression::Comparator(comparator) => comparator.rule.keyword(),
        }
    }

    /// Returns every problem in this tree, depth-first.
    pub fn validate(&self) -> Vec<StatecraftError> {
        let mut errors = vec![];
        self.validate_into(&mut errors);
        errors
    }

    fn validate_into(&self, errors: &mut Vec<StatecraftError>) {
        match self {
            ChoiceExpression::Logic(logic) => {
                logic.validate_node(errors);
                logic
                    .children
                    .iter()
                    .for_each(|child| child.validate_into(errors));
            }
            ChoiceExpression::Comparator(comparator) => comparator.validate_node(errors),
        }
    }
}

/// `And`, `Or` or `Not` over nested choice rules.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicExpression {
    rule:     LogicRule,
    children: Vec<ChoiceExpression>,
    next:     NextField,
}

impl LogicExpression {
    pub(crate) fn new(rule: LogicRule, next: NextField) -> Self {
        LogicExpression {
            rule,
            children: vec![],
            next,
        }
    }

    /// The combinator.
    pub fn rule(&self) -> LogicRule {
        self.rule
    }

    /// The nested rules in insertion order.
    pub fn children(&self) -> &[ChoiceExpression] {
        &self.children
    }

    /// Appends a nested logic rule.
    pub fn add_logic(&mut self, rule: LogicRule) -> &mut LogicExpression {
        push_logic(
            &mut self.children,
            LogicExpression::new(rule, NextField::locked()),
        )
    }

    /// Appends a nested comparator.
    pub fn add_comparator(&mut self, rule: ComparatorRule) -> &mut ComparatorExpression {
        push_comparator(
            &mut self.children,
            ComparatorExpression::new(rule, NextField::locked()),
        )
    }

    /// The transition. Locked unless this rule is a root.
    pub fn next(&mut self) -> FieldRef<'_, Self, NextField> {
        FieldRef::new(self, |s| &mut s.next)
    }

    fn validate_node(&self, errors: &mut Vec<StatecraftError>) {
        let count = self.children.len();
        match self.rule {
            LogicRule::And | LogicRule::Or if count < 2 => {
                errors.push(StatecraftError::ArityError(format!(
                    "{} requires at least 2 choice rules, found {}",
                    self.rule, count
                )))
            }
            LogicRule::Not if count != 1 => errors.push(StatecraftError::ArityError(format!(
                "Not requires exactly 1 choice rule, found {}",
                count
            ))),
            _ => {}
        }
        errors.extend(self.next.validate());
    }
}

/// Compares the input at `Variable` against a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparatorExpression {
    rule:     ComparatorRule,
    variable: Option<String>,
    literal:  Option<Value>,
    next:     NextField,
}

impl ComparatorExpression {
    pub(crate) fn new(rule: ComparatorRule, next: NextField) -> Self {
        ComparatorExpression {
            rule,
            variable: None,
            literal: None,
            next,
        }
    }

    /// The comparison.
    pub fn rule(&self) -> ComparatorRule {
        self.rule
    }

    /// Sets the path of the input value to compare.
    pub fn set_variable(&mut self, path: impl Into<String>) -> Result<&mut Self> {
        let path = path.into();
        validate_path(&path)?;
        self.variable = Some(path);
        Ok(self)
    }

    /// The path of the input value to compare.
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    /// Sets the literal, which must match the rule's operand type.
    pub fn set_literal(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        let value = value.into();
        let expected = self.rule.operand_type();
        if !expected.accepts(&value) {
            return Err(StatecraftError::UnsupportedOperandForRule(format!(
                "{} expects a {:?} operand, got {}",
                self.rule, expected, value
            )));
        }
        self.literal = Some(value);
        Ok(self)
    }

    /// The literal compared against.
    pub fn literal(&self) -> Option<&Value> {
        self.literal.as_ref()
    }

    /// The transition. Locked unless this rule is a root.
    pub fn next(&mut self) -> FieldRef<'_, Self, NextField> {
        FieldRef::new(self, |s| &mut s.next)
    }

    fn validate_node(&self, errors: &mut Vec<StatecraftError>) {
        if self.variable.is_none() {
            errors.push(StatecraftError::ConfigurationMissing(
                "Variable".to_string(),
            ));
        }
        if self.literal.is_none() {
            errors.push(StatecraftError::ConfigurationMissing(
                "Literal".to_string(),
            ));
        }
        errors.extend(self.next.validate());
    }
}

pub(crate) fn push_logic(
    rules: &mut Vec<ChoiceExpression>,
    logic: LogicExpression,
) -> &mut LogicExpression {
    rules.push(ChoiceExpression::Logic(logic));
    match rules.last_mut() {
        Some(ChoiceExpression::Logic(logic)) => logic,
        _ => unreachable!("a logic rule was just pushed"),
    }
}

pub(crate) fn push_comparator(
    rules: &mut Vec<ChoiceExpression>,
    comparator: ComparatorExpression,
) -> &mut ComparatorExpression {
    rules.push(ChoiceExpression::Comparator(comparator));
    match rules.last_mut() {
        Some(ChoiceExpression::Comparator(comparator)) => comparator,
        _ => unreachable!("a comparator was just pushed"),
    }
}
