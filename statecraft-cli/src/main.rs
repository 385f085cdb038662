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

mod args;
mod commands;
mod config;

use anyhow::{bail, Context, Result};
use clap::{crate_version, App, AppSettings, Arg};
use config::Settings;
use log::debug;
use std::fs;

pub fn main() -> Result<()> {
    // Command line arg parsing and configuration.
    let matches = App::new("statecraft")
        .version(crate_version!())
        .about("Validates and formats Amazon States Language documents")
        .author("UMD Database Group")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .args(args::get_args())
        .subcommand(
            App::new("validate")
                .about("Reports every problem of a state machine document")
                .arg(
                    Arg::new("FILE")
                        .help("The state machine document")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            App::new("fmt")
                .about("Prints a state machine document in canonical form")
                .arg(
                    Arg::new("FILE")
                        .help("The state machine document")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Prints the document on a single line")
                        .takes_value(false),
                ),
        )
        .get_matches();

    let settings = match matches.value_of("config") {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    args::get_logging(&matches, &settings.log_level)?.init();
    debug!("Settings: {:?}", settings);

    match matches.subcommand() {
        Some(("validate", sub_matches)) => {
            let path = sub_matches.value_of("FILE").unwrap_or_default();
            let raw = fs::read_to_string(path).with_context(|| format!("cannot read {}", path))?;
            let errors = commands::validate(&raw)?;
            for error in &errors {
                println!("{}", error);
            }
            if !errors.is_empty() {
                bail!("{} problem(s) found in {}", errors.len(), path);
            }
        }
        Some(("fmt", sub_matches)) => {
            let path = sub_matches.value_of("FILE").unwrap_or_default();
            let raw = fs::read_to_string(path).with_context(|| format!("cannot read {}", path))?;
            let pretty = settings.pretty && !sub_matches.is_present("compact");
            println!("{}", commands::format(&raw, pretty)?);
        }
        _ => unreachable!("a subcommand is required"),
    }

    Ok(())
}
