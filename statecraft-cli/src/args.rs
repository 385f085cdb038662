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

use anyhow::Result;
use clap::{Arg, ArgMatches};
use std::io::Write;

pub fn get_args() -> Vec<Arg<'static>> {
    let config = Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("Sets a custom config file")
        .global(true)
        .takes_value(true);
    get_logging_args().into_iter().chain(vec![config]).collect()
}

fn get_logging_args() -> Vec<Arg<'static>> {
    [
        Arg::new("log-level")
            .short('L')
            .long("log-level")
            .possible_values(["error", "warn", "info", "debug", "trace", "off"])
            .help("Log level [default: info]")
            .global(true)
            .takes_value(true),
        Arg::new("trace")
            .long("trace")
            .help("Log ultra-verbose (trace level) information")
            .global(true)
            .takes_value(false),
        Arg::new("silent")
            .long("silent")
            .help("Suppress all output")
            .global(true)
            .takes_value(false),
    ]
    .to_vec()
}

fn parse_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some("off") => log::LevelFilter::Off,
        _ => log::LevelFilter::Info,
    }
}

/// `--trace` and `--silent` win over `--log-level`, which wins over the
/// configured level.
pub fn get_logging(matches: &ArgMatches, configured: &str) -> Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();

    let level = if matches.is_present("trace") {
        log::LevelFilter::Trace
    } else if matches.is_present("silent") {
        log::LevelFilter::Off
    } else {
        parse_level(matches.value_of("log-level").or(Some(configured)))
    };
    builder.filter(None, level);

    if level == log::LevelFilter::Trace {
        builder.format_timestamp_secs();
    } else {
        builder.format(|f, record| {
            writeln!(
                f,
                "[{}] {}",
                record.level().to_string().to_lowercase(),
                record.args()
            )
        });
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::App;

    fn matches(argv: &[&str]) -> ArgMatches {
        App::new("statecraft")
            .args(get_args())
            .get_matches_from(argv.to_vec())
    }

    #[test]
    fn log_level_precedence() {
        assert_eq!(parse_level(Some("warn")), log::LevelFilter::Warn);
        assert_eq!(parse_level(Some("bogus")), log::LevelFilter::Info);

        let m = matches(&["statecraft", "--log-level", "debug"]);
        assert_eq!(m.value_of("log-level"), Some("debug"));
        assert!(get_logging(&m, "error").is_ok());

        let m = matches(&["statecraft", "--silent", "-c", "statecraft.toml"]);
        assert!(m.is_present("silent"));
        assert_eq!(m.value_of("config"), Some("statecraft.toml"));
    }
}
