// Copyright 2019 The Grin Developers
// Copyright 2024 The Mwc Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Main for building the binary of mwc-pay

#[macro_use]
extern crate clap;

#[macro_use]
extern crate log;
use crate::config::ChainTypes;
use clap::{App, AppSettings};
use mwc_pay_config as config;
use std::path::PathBuf;

use mwc_pay::cmd;
use mwc_pay_util::{init_logger, LoggingConfig};

// include build information
pub mod built_info {
	include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub fn info_strings() -> (String, String) {
	(
		format!(
			"This is mwc-pay version {}{}, built for {} by {}.",
			built_info::PKG_VERSION,
			built_info::GIT_VERSION.map_or_else(|| "".to_owned(), |v| format!(" (git {})", v)),
			built_info::TARGET,
			built_info::RUSTC_VERSION,
		),
		format!(
			"Built with profile \"{}\", features \"{}\".",
			built_info::PROFILE,
			built_info::FEATURES_STR,
		),
	)
}

fn log_build_info() {
	let (basic_info, detailed_info) = info_strings();
	info!("{}", basic_info);
	debug!("{}", detailed_info);
}

fn main() {
	let exit_code = real_main();
	std::process::exit(exit_code);
}

fn real_main() -> i32 {
	let yml = load_yaml!("mwc-pay.yml");
	let args = App::from_yaml(yml)
		.version(built_info::PKG_VERSION)
		.setting(AppSettings::VersionlessSubcommands)
		.setting(AppSettings::SubcommandRequiredElseHelp)
		.get_matches();

	let chain_type = if args.is_present("floonet") {
		ChainTypes::Floonet
	} else {
		ChainTypes::Mainnet
	};

	let config_path = args.value_of("config").map(PathBuf::from);

	// Load relevant config, use defaults if the config file is not found
	let config = match config::initial_setup(&chain_type, config_path) {
		Ok(c) => c,
		Err(e) => {
			println!("Unable to load mwc-pay configuration: {}", e);
			return 1;
		}
	};

	// Load logging config
	let l = config
		.members
		.logging
		.clone()
		.unwrap_or_else(LoggingConfig::default);
	if let Err(e) = init_logger(&l) {
		println!("Invalid logs configuration, {}", e);
		return 1;
	}

	info!(
		"Using mwc-pay configuration file at {}",
		config
			.config_file_path
			.as_ref()
			.and_then(|p| p.to_str())
			.unwrap_or("<DEFAULTS>")
	);

	log_build_info();

	cmd::wallet_command(&args, config)
}
