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

//! Owner API credentials. Loaded once at startup and passed explicitly to the
//! session constructor.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use mwc_pay_util::ZeroingString;

use crate::config::{expand_home, get_mwc_path, OWNER_API_SECRET_FILE_NAME};
use crate::types::{ChainTypes, ConfigError, WalletConfig};

/// Everything needed to authenticate against the wallet Owner API
#[derive(Clone)]
pub struct OwnerApiCredentials {
	/// Owner API v3 endpoint
	pub url: String,
	/// Basic auth user
	pub user: String,
	secret: ZeroingString,
}

impl OwnerApiCredentials {
	/// Build credentials from already known values
	pub fn new(url: &str, user: &str, secret: ZeroingString) -> OwnerApiCredentials {
		OwnerApiCredentials {
			url: url.to_string(),
			user: user.to_string(),
			secret,
		}
	}

	/// Basic auth password
	pub fn secret(&self) -> &str {
		&self.secret
	}
}

impl fmt::Debug for OwnerApiCredentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OwnerApiCredentials")
			.field("url", &self.url)
			.field("user", &self.user)
			.field("secret", &"<hidden>")
			.finish()
	}
}

/// Location of the secret file for the config and chain
pub fn api_secret_path(
	config: &WalletConfig,
	chain_type: &ChainTypes,
) -> Result<PathBuf, ConfigError> {
	match &config.api_secret_path {
		Some(p) => expand_home(p),
		None => Ok(get_mwc_path(chain_type)?.join(OWNER_API_SECRET_FILE_NAME)),
	}
}

/// Read a secret file. The content is trimmed and must not be empty.
pub fn read_api_secret(path: &Path) -> Result<ZeroingString, ConfigError> {
	let path_str = path.to_string_lossy().to_string();
	if !path.exists() {
		return Err(ConfigError::Credential(path_str, "file not found".to_string()));
	}
	let contents = ZeroingString::new(
		fs::read_to_string(path)
			.map_err(|e| ConfigError::Credential(path_str.clone(), format!("{}", e)))?,
	);
	let secret = contents.trim();
	if secret.is_empty() {
		return Err(ConfigError::Credential(path_str, "file is empty".to_string()));
	}
	Ok(ZeroingString::new(secret.to_string()))
}

/// Resolve url, user and secret for the Owner API
pub fn load_owner_credentials(
	config: &WalletConfig,
	chain_type: &ChainTypes,
) -> Result<OwnerApiCredentials, ConfigError> {
	let path = api_secret_path(config, chain_type)?;
	let secret = read_api_secret(&path)?;
	debug!(
		"Loaded Owner API secret from {} for {}",
		path.display(),
		config.owner_api_url()
	);
	Ok(OwnerApiCredentials::new(
		&config.owner_api_url(),
		&config.owner_api_user(),
		secret,
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn config_for(path: &Path) -> WalletConfig {
		WalletConfig {
			api_secret_path: Some(path.to_string_lossy().to_string()),
			..WalletConfig::default()
		}
	}

	#[test]
	fn secret_is_trimmed() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(OWNER_API_SECRET_FILE_NAME);
		fs::write(&path, "  s3cr3tV4lue\n").unwrap();

		let creds = load_owner_credentials(&config_for(&path), &ChainTypes::Mainnet).unwrap();
		assert_eq!(creds.secret(), "s3cr3tV4lue");
		assert_eq!(creds.user, "mwc");
		assert_eq!(creds.url, "http://127.0.0.1:3420/v3/owner");
		assert!(!format!("{:?}", creds).contains("s3cr3t"));
	}

	#[test]
	fn missing_secret_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent");
		match load_owner_credentials(&config_for(&path), &ChainTypes::Mainnet) {
			Err(ConfigError::Credential(p, _)) => assert_eq!(p, path.to_string_lossy()),
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn empty_secret_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(OWNER_API_SECRET_FILE_NAME);
		fs::write(&path, " \n\t\n").unwrap();
		let res = load_owner_credentials(&config_for(&path), &ChainTypes::Mainnet);
		assert!(matches!(res, Err(ConfigError::Credential(_, _))));
	}

	#[test]
	fn default_secret_location() {
		let path = api_secret_path(&WalletConfig::default(), &ChainTypes::Floonet).unwrap();
		assert!(path.ends_with(".mwc/floo/.owner_api_secret"));
		let path = api_secret_path(&WalletConfig::default(), &ChainTypes::Mainnet).unwrap();
		assert!(path.ends_with(".mwc/main/.owner_api_secret"));
	}
}
