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

//! Command line settings: the `[cli]` section of the embedded configuration,
//! optionally replaced by a file given with `--config`.

use anyhow::{Context, Result};
use ini::Ini;
use lazy_static::lazy_static;
use statecraft::config::STATECRAFT_CONF;

lazy_static! {
    /// Pretty-print formatted documents unless told otherwise.
    pub static ref STATECRAFT_CLI_PRETTY: bool = STATECRAFT_CONF["cli"]["pretty"].parse::<bool>().unwrap();
    /// The log level used when no logging flag is given.
    pub static ref STATECRAFT_CLI_LOG_LEVEL: String = STATECRAFT_CONF["cli"]["log_level"].to_string();
}

/// Effective command line settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pretty:    bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            pretty:    *STATECRAFT_CLI_PRETTY,
            log_level: STATECRAFT_CLI_LOG_LEVEL.clone(),
        }
    }
}

impl Settings {
    /// Loads the `[cli]` section of `path`. Missing keys keep their defaults.
    pub fn load(path: &str) -> Result<Self> {
        let conf = Ini::load_from_file(path).with_context(|| format!("cannot read {}", path))?;
        Self::from_ini(&conf)
    }

    fn from_ini(conf: &Ini) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(section) = conf.section(Some("cli")) {
            if let Some(pretty) = section.get("pretty") {
                settings.pretty = pretty
                    .parse::<bool>()
                    .with_context(|| format!("[cli] pretty must be a boolean, got {}", pretty))?;
            }
            if let Some(level) = section.get("log_level") {
                settings.log_level = level.to_string();
            }
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_embedded_file() {
        let settings = Settings::default();
        assert!(settings.pretty);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn override_file() -> Result<()> {
        let conf = Ini::load_from_str("[cli]\npretty = false\n")?;
        let settings = Settings::from_ini(&conf)?;
        assert!(!settings.pretty);
        assert_eq!(settings.log_level, "info");

        let conf = Ini::load_from_str("[cli]\npretty = maybe\n")?;
        assert!(Settings::from_ini(&conf).is_err());
        Ok(())
    }
}
