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

//! Configuration file management

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{ChainTypes, ConfigError, GlobalPayConfig};

/// Wallet home directory under the user home
pub const MWC_HOME: &str = ".mwc";
/// Config file name
pub const CONFIG_FILE_NAME: &str = "mwc-pay.toml";
/// Owner API secret file name, written by the wallet
pub const OWNER_API_SECRET_FILE_NAME: &str = ".owner_api_secret";

/// `~/.mwc/<main|floo>`
pub fn get_mwc_path(chain_type: &ChainTypes) -> Result<PathBuf, ConfigError> {
	let mut path = dirs::home_dir()
		.ok_or_else(|| ConfigError::PathNotFoundError("user home directory".to_string()))?;
	path.push(MWC_HOME);
	path.push(chain_type.shortname());
	Ok(path)
}

/// Expand a leading `~` to the user home directory
pub fn expand_home(path: &str) -> Result<PathBuf, ConfigError> {
	if path == "~" || path.starts_with("~/") {
		let mut home = dirs::home_dir()
			.ok_or_else(|| ConfigError::PathNotFoundError("user home directory".to_string()))?;
		if path.len() > 2 {
			home.push(&path[2..]);
		}
		Ok(home)
	} else {
		Ok(PathBuf::from(path))
	}
}

/// Load the config from `config_path`, or from the default location for the
/// chain when no path is given. A missing default file yields defaults, a
/// missing explicit file is an error.
pub fn initial_setup(
	chain_type: &ChainTypes,
	config_path: Option<PathBuf>,
) -> Result<GlobalPayConfig, ConfigError> {
	let mut config = match config_path {
		Some(path) => {
			if !path.exists() {
				return Err(ConfigError::FileNotFoundError(
					path.to_string_lossy().to_string(),
				));
			}
			GlobalPayConfig::from_file(&path)?
		}
		None => {
			let path = get_mwc_path(chain_type)?.join(CONFIG_FILE_NAME);
			if path.exists() {
				GlobalPayConfig::from_file(&path)?
			} else {
				debug!("No config at {}, using defaults", path.display());
				GlobalPayConfig::default()
			}
		}
	};
	config.members.wallet.chain_type = Some(*chain_type);
	config.resolve_log_path(chain_type)?;
	Ok(config)
}

impl GlobalPayConfig {
	/// Read and parse a toml config file
	pub fn from_file(path: &Path) -> Result<GlobalPayConfig, ConfigError> {
		let contents = fs::read_to_string(path)?;
		let mut config = GlobalPayConfig::from_toml(&contents)
			.map_err(|e| ConfigError::ParseError(path.to_string_lossy().to_string(), e))?;
		config.config_file_path = Some(path.to_path_buf());
		info!("Using configuration file at {}", path.display());
		Ok(config)
	}

	fn from_toml(contents: &str) -> Result<GlobalPayConfig, String> {
		let members = toml::from_str(contents).map_err(|e| format!("{}", e))?;
		Ok(GlobalPayConfig {
			config_file_path: None,
			members,
		})
	}

	/// Relative log file paths live next to the config
	fn resolve_log_path(&mut self, chain_type: &ChainTypes) -> Result<(), ConfigError> {
		if let Some(logging) = self.members.logging.as_mut() {
			let path = expand_home(&logging.log_file_path)?;
			let path = if path.is_absolute() {
				path
			} else {
				match self.config_file_path.as_ref().and_then(|p| p.parent()) {
					Some(dir) => dir.join(path),
					None => get_mwc_path(chain_type)?.join(path),
				}
			};
			logging.log_file_path = path.to_string_lossy().to_string();
		}
		Ok(())
	}
}
