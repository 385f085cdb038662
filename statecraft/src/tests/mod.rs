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

//! End-to-end tests of the builder, the generator and the hydrator.

use crate::prelude::*;
use indoc::indoc;
use serde_json::{json, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixture(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

fn round_trip(document: &Value) -> Result<Value> {
    init_logging();
    let machine = Hydrator::new().hydrate_state_machine(document)?;
    assert!(machine.validate().is_empty(), "{:?}", machine.validate());
    Generator::new().encode_machine(&machine)
}

#[test]
fn fixtures_round_trip() -> Result<()> {
    for raw in [
        include_str!("data/order_pipeline.json"),
        include_str!("data/routing.json"),
        include_str!("data/fan_out.json"),
    ] {
        let document = fixture(raw);
        assert_eq!(round_trip(&document)?, document);
    }
    Ok(())
}

#[test]
fn hydrated_fixture_is_inspectable() -> Result<()> {
    let document = fixture(include_str!("data/order_pipeline.json"));
    let machine = Hydrator::new().hydrate_state_machine(&document)?;

    assert_eq!(machine.start_at(), Some("LookupOrder"));
    assert_eq!(machine.timeout(), Some(3600));
    assert_eq!(machine.states().len(), 6);

    let lookup = match machine.states().get("LookupOrder") {
        Some(State::Task(task)) => task,
        other => panic!("unexpected state {:?}", other),
    };
    assert_eq!(lookup.heartbeat(), Some(10));

    let retry = lookup
        .fields()
        .into_iter()
        .find_map(|slot| match slot {
            FieldSlot::Retry(retry) => Some(retry),
            _ => None,
        })
        .map(RetryField::retriers)
        .unwrap_or_default();
    assert_eq!(retry.len(), 2);
    assert_eq!(retry[0].backoff_rate(), Some(3.0));
    assert_eq!(
        retry[1].errors(),
        &[ErrorCode::TaskFailed, ErrorCode::Permissions]
    );
    Ok(())
}

#[test]
fn branches_hydrate_independently() -> Result<()> {
    let document = fixture(include_str!("data/fan_out.json"));
    let machine = Hydrator::new().hydrate_state_machine(&document)?;

    let parallel = match machine.states().get("FanOut") {
        Some(State::Parallel(parallel)) => parallel,
        other => panic!("unexpected state {:?}", other),
    };
    let starts = parallel
        .branches()
        .iter()
        .map(|branch| branch.states().start_at())
        .collect::<Vec<_>>();
    assert_eq!(starts, vec![Some("Prepare"), Some("Work")]);
    assert_eq!(
        parallel.comment(),
        Some("Both branches may reuse the same state names")
    );
    Ok(())
}

#[test]
fn pass_needs_a_transition() -> Result<()> {
    let mut pass = Pass::new("foo");
    assert_eq!(
        pass.validate(),
        vec![StatecraftError::ConfigurationMissing("Next".to_string())]
    );
    pass.next().end()?;
    assert_eq!(pass.validate(), vec![]);
    Ok(())
}

#[test]
fn task_with_custom_catcher() -> Result<()> {
    let mut catcher = Catcher::new(["NotFoundError"])?;
    catcher.next().to("notFoundHandler")?;

    let mut task = Task::new("foo");
    task.set_resource("XY").next().end()?.catch().add(catcher);

    let expected: Value = serde_json::from_str(indoc! {r#"
        {
            "Type": "Task",
            "Resource": "XY",
            "End": true,
            "Catch": [
                {
                    "ErrorEquals": ["NotFoundError"],
                    "Next": "notFoundHandler"
                }
            ]
        }
    "#})
    .unwrap();
    assert_eq!(Generator::new().encode_state(&task.into())?, expected);
    Ok(())
}

#[test]
fn nested_choice_rules() -> Result<()> {
    let mut choice = Choice::new("isFoo");
    let and = choice.add_logic(LogicRule::And).next().to("foo")?;
    and.add_comparator(ComparatorRule::StringEquals)
        .set_variable("$.type")?
        .set_literal("foo")?;
    and.add_logic(LogicRule::Not)
        .add_comparator(ComparatorRule::BooleanEquals)
        .set_variable("$.test")?
        .set_literal(false)?;
    choice.default_to("bar");

    assert_eq!(
        Generator::new().encode_state(&choice.into())?,
        json!({
            "Type": "Choice",
            "Choices": [
                {
                    "And": [
                        { "Variable": "$.type", "StringEquals": "foo" },
                        { "Not": { "Variable": "$.test", "BooleanEquals": false } }
                    ],
                    "Next": "foo"
                }
            ],
            "Default": "bar"
        })
    );
    Ok(())
}

#[test]
fn unknown_type_builds_nothing() {
    let document = json!({
        "StartAt": "a",
        "States": {
            "a": { "Type": "Pass", "End": true },
            "b": { "Type": "Map", "End": true }
        }
    });
    assert_eq!(
        Hydrator::new().hydrate_state_machine(&document),
        Err(StatecraftError::UnknownStateType("Map".to_string()))
    );
}

#[test]
fn unknown_retry_code_is_fatal() {
    let document = json!({
        "StartAt": "a",
        "States": {
            "a": {
                "Type": "Task",
                "Resource": "XY",
                "End": true,
                "Retry": [{ "ErrorEquals": ["NotFoundError"] }]
            }
        }
    });
    assert_eq!(
        Hydrator::new().hydrate_state_machine(&document),
        Err(StatecraftError::UnsupportedErrorCode(
            "NotFoundError".to_string()
        ))
    );
}

#[test]
fn generator_stops_at_the_first_problem() -> Result<()> {
    let mut machine = StateMachine::with_autolink(false);
    machine
        .add(Task::new("work"))?
        .add(Wait::new("pause"))?;

    let errors = machine.validate();
    assert_eq!(
        errors,
        vec![
            StatecraftError::ConfigurationMissing("Next".to_string()),
            StatecraftError::ConfigurationMissing("Resource".to_string()),
            StatecraftError::ConfigurationMissing("Next".to_string()),
            StatecraftError::ConfigurationMissing("Seconds".to_string()),
        ]
    );
    assert_eq!(machine.validate(), errors);
    assert_eq!(
        Generator::new().encode_machine(&machine),
        Err(errors[0].clone())
    );
    Ok(())
}

#[test]
fn builder_errors_are_immediate() -> Result<()> {
    let mut task = Task::new("foo");
    assert_eq!(
        task.path().input("payload").err(),
        Some(StatecraftError::InvalidPathExpression("payload".to_string()))
    );

    let mut choice = Choice::new("branch");
    assert!(matches!(
        choice
            .add_comparator(ComparatorRule::NumericEquals)
            .set_literal(true),
        Err(StatecraftError::UnsupportedOperandForRule(_))
    ));

    let mut machine = StateMachine::new();
    machine.add(Succeed::new("done"))?;
    assert!(matches!(
        machine.add(Fail::new("done")),
        Err(StatecraftError::DuplicateName(_))
    ));
    Ok(())
}

#[test]
fn autolinked_machine_encodes_a_chain() -> Result<()> {
    let mut wait = Wait::new("pause");
    wait.set_seconds(3)?;
    let mut fail = Fail::new("boom");
    fail.with("Broken", "Nothing works");

    let mut machine = StateMachine::with_autolink(true);
    machine
        .set_comment("chain")
        .add(Pass::new("start"))?
        .add(wait)?
        .add(fail)?;

    let document = Generator::new().encode_machine(&machine)?;
    assert_eq!(
        document,
        json!({
            "Comment": "chain",
            "StartAt": "start",
            "States": {
                "start": { "Type": "Pass", "Next": "pause" },
                "pause": { "Type": "Wait", "Seconds": 3, "Next": "boom" },
                "boom": { "Type": "Fail", "Error": "Broken", "Cause": "Nothing works" }
            }
        })
    );
    assert_eq!(Hydrator::new().hydrate_state_machine(&document)?, machine);
    Ok(())
}

#[test]
fn branch_may_reuse_an_outer_name() -> Result<()> {
    init_logging();
    let mut parallel = Parallel::new("FanOut");
    parallel.next().to("Collect")?;
    parallel
        .add_branch()
        .add(Succeed::new("Collect"))?
        .add(Succeed::new("FanOut"))?;

    let mut machine = StateMachine::with_autolink(false);
    machine.add(parallel)?.add(Succeed::new("Collect"))?;
    assert!(machine.validate().is_empty());

    let document = Generator::new().encode_machine(&machine)?;
    assert_eq!(
        document["States"]["FanOut"]["Branches"][0]["States"]["Collect"],
        json!({ "Type": "Succeed" })
    );
    assert_eq!(Hydrator::new().hydrate_state_machine(&document)?, machine);
    Ok(())
}

#[test]
fn dangling_start_is_not_encoded() -> Result<()> {
    init_logging();
    let document = json!({
        "StartAt": "ghost",
        "States": { "a": { "Type": "Pass", "End": true } }
    });
    let machine = Hydrator::new().hydrate_state_machine(&document)?;
    let expected = StatecraftError::InvalidValue(
        "StartAt names the unknown state ghost".to_string(),
    );
    assert_eq!(machine.validate(), vec![expected.clone()]);
    assert_eq!(Generator::new().encode_machine(&machine), Err(expected));
    Ok(())
}
