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

//! A Choice state ("Type": "Choice") adds branching logic to a state machine.
//!
//! A Choice state holds a non-empty list of choice rules. The interpreter
//! evaluates them in order and follows the transition of the first rule that
//! matches; when none does, it follows the `Default` state if one is given.
//! Choice states never carry `End` themselves.

pub mod expression;

pub use expression::{
    ChoiceExpression, ComparatorExpression, ComparatorRule, LogicExpression, LogicRule,
    OperandType,
};

use crate::error::StatecraftError;
use crate::fields::NextField;
use expression::{push_comparator, push_logic};

/// The Choice state.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    name:    String,
    comment: Option<String>,
    choices: Vec<ChoiceExpression>,
    default: Option<String>,
}

impl Choice {
    /// Returns a Choice state without rules.
    pub fn new(name: impl Into<String>) -> Self {
        Choice {
            name:    name.into(),
            comment: None,
            choices: vec![],
            default: None,
        }
    }

    /// The state name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human-readable comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Sets the human-readable comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    /// Appends a top-level logic rule. Its transition must name a state.
    pub fn add_logic(&mut self, rule: LogicRule) -> &mut LogicExpression {
        push_logic(
            &mut self.choices,
            LogicExpression::new(rule, NextField::without_end()),
        )
    }

    /// Appends a top-level comparator. Its transition must name a state.
    pub fn add_comparator(&mut self, rule: ComparatorRule) -> &mut ComparatorExpression {
        push_comparator(
            &mut self.choices,
            ComparatorExpression::new(rule, NextField::without_end()),
        )
    }

    /// The top-level rules in evaluation order.
    pub fn choices(&self) -> &[ChoiceExpression] {
        &self.choices
    }

    /// Sets the state taken when no rule matches.
    pub fn default_to(&mut self, state: impl Into<String>) -> &mut Self {
        self.default = Some(state.into());
        self
    }

    /// The state taken when no rule matches.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Returns every problem with this state. Each rule tree is reported
    /// depth-first, trees in evaluation order.
    pub fn validate(&self) -> Vec<StatecraftError> {
        if self.choices.is_empty() {
            return vec![StatecraftError::EmptyCollection("Choices".to_string())];
        }
        self.choices
            .iter()
            .flat_map(ChoiceExpression::validate)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::fields::Field;

    #[test]
    fn choice_needs_rules() {
        let choice = Choice::new("branch");
        assert_eq!(
            choice.validate(),
            vec![StatecraftError::EmptyCollection("Choices".to_string())]
        );
    }

    #[test]
    fn top_level_rules_own_the_transition() -> Result<()> {
        let mut choice = Choice::new("branch");
        choice
            .add_logic(LogicRule::Not)
            .next()
            .to("bar")?
            .add_comparator(ComparatorRule::BooleanEquals)
            .set_variable("$.test")?
            .set_literal(false)?;
        choice
            .add_comparator(ComparatorRule::NumericGreaterThan)
            .set_variable("$.n")?
            .set_literal(10)?;
        choice.default_to("fallback");

        assert_eq!(
            choice.validate(),
            vec![StatecraftError::ConfigurationMissing("Next".to_string())]
        );
        assert_eq!(choice.choices()[0].next_field().target(), Some("bar"));
        assert!(!choice.choices()[1].next_field().is_configured());
        assert_eq!(choice.default(), Some("fallback"));
        Ok(())
    }

    #[test]
    fn top_level_rules_cannot_end() {
        let mut choice = Choice::new("branch");
        let comparator = choice.add_comparator(ComparatorRule::NumericEquals);
        assert_eq!(
            comparator.next().end().err(),
            Some(StatecraftError::LockedField("End".to_string()))
        );
        assert!(choice.add_logic(LogicRule::And).next().end().is_err());
    }
}
