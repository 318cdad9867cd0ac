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

//! Controller for owner API sessions used by the commands

use crate::config::OwnerApiCredentials;
use crate::impls::OwnerV3Client;
use crate::Error;
use std::time::Duration;

/// Open a secure session with the wallet, unlock it, run `f` and close the
/// wallet again. The wallet is closed even when `f` fails.
pub fn owner_single_use<F, T>(
	credentials: OwnerApiCredentials,
	timeout: Option<Duration>,
	wallet_name: Option<&str>,
	password: &str,
	f: F,
) -> Result<T, Error>
where
	F: FnOnce(&OwnerV3Client) -> Result<T, Error>,
{
	let mut owner = OwnerV3Client::new(credentials, timeout)?;
	owner.init_secure_api()?;
	owner.open_wallet(wallet_name, password)?;
	debug!("Wallet at {} is open", owner.url());

	let res = f(&owner);

	if let Err(e) = owner.close_wallet() {
		warn!("Unable to close wallet at {}, {}", owner.url(), e);
	}
	res
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::ZeroingString;

	#[test]
	fn unreachable_wallet_skips_command() {
		let creds = OwnerApiCredentials::new(
			"http://127.0.0.1:9/v3/owner",
			"mwc",
			ZeroingString::from("secret".to_string()),
		);
		let mut called = false;
		let res = owner_single_use(creds, None, None, "password", |_| {
			called = true;
			Ok(())
		});
		assert!(matches!(res, Err(Error::Impls(_))));
		assert!(!called);
	}
}
