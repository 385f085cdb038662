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

//! Configuration settings that affect all crates in current system.

use ini::Ini;
use lazy_static::lazy_static;

lazy_static! {
    /// Global settings.
    pub static ref STATECRAFT_CONF: Ini = Ini::load_from_str(include_str!("./config.toml")).unwrap();
    /// The States language version the model targets.
    pub static ref STATECRAFT_ASL_VERSION: String = STATECRAFT_CONF["asl"]["version"].to_string();
    /// Default auto-link mode of a new state machine.
    pub static ref STATECRAFT_AUTOLINK: bool = STATECRAFT_CONF["collection"]["autolink"].parse::<bool>().unwrap();
}
