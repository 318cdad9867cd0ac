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

//! Public types for config modules

use std::io;
use std::path::PathBuf;

use mwc_pay_util::LoggingConfig;

/// Default Owner API v3 endpoint of a locally running wallet
pub const DEFAULT_OWNER_API_URL: &str = "http://127.0.0.1:3420/v3/owner";
/// Basic auth user name the wallet expects on the Owner API
pub const DEFAULT_OWNER_API_USER: &str = "mwc";

/// Chain the wallet is running on. Only selects the data directory, the
/// wallet itself enforces the network rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChainTypes {
	/// Main production network
	Mainnet,
	/// Test network
	Floonet,
}

impl ChainTypes {
	/// Directory name under `~/.mwc`
	pub fn shortname(&self) -> &'static str {
		match self {
			ChainTypes::Mainnet => "main",
			ChainTypes::Floonet => "floo",
		}
	}
}

impl Default for ChainTypes {
	fn default() -> ChainTypes {
		ChainTypes::Mainnet
	}
}

/// Where and how to reach the wallet Owner API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletConfig {
	/// Chain parameters (default to Mainnet if none at the moment)
	pub chain_type: Option<ChainTypes>,
	/// Owner API v3 endpoint
	pub owner_api_url: Option<String>,
	/// Basic auth user for the Owner API
	pub owner_api_user: Option<String>,
	/// Location of the secret for basic auth on the Owner API.
	/// None means `~/.mwc/<chain>/.owner_api_secret`
	pub api_secret_path: Option<String>,
	/// Wallet instance name passed to `open_wallet`
	pub wallet_name: Option<String>,
	/// Whole request timeout in seconds. None means no timeout.
	pub http_timeout_secs: Option<u64>,
	/// Table colors for a dark terminal
	pub dark_background_color_scheme: Option<bool>,
}

impl Default for WalletConfig {
	fn default() -> WalletConfig {
		WalletConfig {
			chain_type: Some(ChainTypes::Mainnet),
			owner_api_url: Some(DEFAULT_OWNER_API_URL.to_string()),
			owner_api_user: Some(DEFAULT_OWNER_API_USER.to_string()),
			api_secret_path: None,
			wallet_name: None,
			http_timeout_secs: None,
			dark_background_color_scheme: Some(true),
		}
	}
}

impl WalletConfig {
	/// Chain, Mainnet when not set
	pub fn chain_type(&self) -> ChainTypes {
		self.chain_type.unwrap_or_default()
	}

	/// Use value from config file, defaulting to sensible value if missing.
	pub fn owner_api_url(&self) -> String {
		self.owner_api_url
			.clone()
			.unwrap_or_else(|| DEFAULT_OWNER_API_URL.to_string())
	}

	/// Owner API user, `mwc` if missing
	pub fn owner_api_user(&self) -> String {
		self.owner_api_user
			.clone()
			.unwrap_or_else(|| DEFAULT_OWNER_API_USER.to_string())
	}
}

/// Transaction building parameters handed to the wallet on every send
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SendConfig {
	/// Minimum confirmations of the outputs to spend
	pub minimum_confirmations: u64,
	/// Max number of inputs the wallet may select
	pub max_outputs: u32,
	/// Number of change outputs to create
	pub num_change_outputs: u32,
	/// Spend all outputs instead of the smallest set
	pub selection_strategy_is_use_all: bool,
	/// Blocks after which an unconfirmed slate is dropped by the wallet
	pub ttl_blocks: Option<u64>,
	/// Lock outputs at finalize time instead of at init time
	pub late_lock: bool,
	/// Slate version to produce, wallet default if None
	pub target_slate_version: Option<u16>,
	/// Broadcast with dandelion fluff
	pub fluff: bool,
}

impl Default for SendConfig {
	fn default() -> SendConfig {
		SendConfig {
			minimum_confirmations: 1,
			max_outputs: 500,
			num_change_outputs: 1,
			selection_strategy_is_use_all: false,
			ttl_blocks: Some(1440),
			late_lock: true,
			target_slate_version: None,
			fluff: false,
		}
	}
}

/// Error type wrapping config errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Error with parsing of config file (file_name, message)
	#[error("Error parsing configuration file at {0}, {1}")]
	ParseError(String, String),

	/// Error with fileIO while reading config file
	/// (file_name, message)
	#[error("Config IO error, {0}")]
	FileIOError(#[from] io::Error),

	/// No file found (file_name)
	#[error("Configuration file not found: {0}")]
	FileNotFoundError(String),

	/// Path doesn't exist
	#[error("Not found expected path {0}")]
	PathNotFoundError(String),

	/// Owner API secret can't be used (path, reason)
	#[error("Unable to load Owner API secret from {0}, {1}")]
	Credential(String, String),
}

/// Top level of `mwc-pay.toml`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GlobalPayConfig {
	/// Keep track of the file we've read
	pub config_file_path: Option<PathBuf>,
	/// Config members
	pub members: GlobalPayConfigMembers,
}

/// Sections of the config file
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GlobalPayConfigMembers {
	/// Config file version (None == version 1)
	#[serde(default)]
	pub config_file_version: Option<u32>,
	/// Owner API configuration
	#[serde(default)]
	pub wallet: WalletConfig,
	/// Send defaults
	#[serde(default)]
	pub send: SendConfig,
	/// Logging config
	pub logging: Option<LoggingConfig>,
}

impl Default for GlobalPayConfig {
	fn default() -> GlobalPayConfig {
		GlobalPayConfig {
			config_file_path: None,
			members: GlobalPayConfigMembers {
				config_file_version: Some(1),
				logging: Some(LoggingConfig::default()),
				..GlobalPayConfigMembers::default()
			},
		}
	}
}
