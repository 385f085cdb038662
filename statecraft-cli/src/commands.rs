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

//! The `validate` and `fmt` subcommands.

use anyhow::{Context, Result};
use log::info;
use serde_json::Value;
use statecraft::prelude::*;

fn parse(raw: &str) -> Result<StateMachine> {
    let document: Value = serde_json::from_str(raw).context("not a JSON document")?;
    Ok(Hydrator::new().hydrate_state_machine(&document)?)
}

/// Returns every problem of the state machine in `raw`, one message each.
pub fn validate(raw: &str) -> Result<Vec<String>> {
    let machine = parse(raw)?;
    let errors = machine
        .validate()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    info!(
        "{} states checked, {} problem(s) found",
        machine.states().len(),
        errors.len()
    );
    Ok(errors)
}

/// Re-encodes the state machine in `raw` in canonical form.
pub fn format(raw: &str, pretty: bool) -> Result<String> {
    let machine = parse(raw)?;
    let document = Generator::new().encode_machine(&machine)?;
    let text = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = r#"{
        "StartAt": "Hello",
        "States": {
            "Hello": { "Next": "World", "Type": "Pass" },
            "World": { "Type": "Succeed" }
        }
    }"#;

    #[test]
    fn valid_document_has_no_problems() -> Result<()> {
        assert!(validate(HELLO)?.is_empty());
        Ok(())
    }

    #[test]
    fn problems_are_listed() -> Result<()> {
        let raw = r#"{ "StartAt": "a", "States": { "a": { "Type": "Wait" } } }"#;
        assert_eq!(
            validate(raw)?,
            vec![
                "The field Next requires configuration setup".to_string(),
                "The field Seconds requires configuration setup".to_string(),
            ]
        );
        assert!(format(raw, true).is_err());
        Ok(())
    }

    #[test]
    fn compact_output_is_canonical() -> Result<()> {
        assert_eq!(
            format(HELLO, false)?,
            r#"{"StartAt":"Hello","States":{"Hello":{"Type":"Pass","Next":"World"},"World":{"Type":"Succeed"}}}"#
        );
        assert!(format(HELLO, true)?.contains('\n'));
        Ok(())
    }

    #[test]
    fn unknown_types_fail() {
        let raw = r#"{ "StartAt": "a", "States": { "a": { "Type": "Map" } } }"#;
        assert!(validate(raw).is_err());
        assert!(validate("not json").is_err());
    }
}
