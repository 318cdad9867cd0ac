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

/// HTTP Foreign API sender
use crate::client_utils::json_rpc;
use crate::client_utils::{Client, ClientError};
use crate::error::Error;
use mwc_pay_libwallet::{self as libwallet, ForeignEndpoint, Slatepack};
use serde_json::{json, Value};
use std::time::Duration;

/// Sends slatepacks to a recipient wallet listening on http(s). Unauthenticated.
#[derive(Clone)]
pub struct HttpDataSender {
	base_url: String,
	client: Client,
}

impl HttpDataSender {
	/// Create, return Err if scheme is not "http"
	pub fn plain_http(base_url: &str, timeout: Option<Duration>) -> Result<HttpDataSender, Error> {
		if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
			return Err(Error::ArgumentError(format!(
				"Invalid http url: {}",
				base_url
			)));
		}
		Ok(HttpDataSender {
			base_url: Self::build_url_str(base_url),
			client: Client::new(timeout)?,
		})
	}

	/// Check version of the listening wallet
	pub fn check_other_version(&self) -> Result<u16, Error> {
		let req = json_rpc::request(1, "check_version", json!([]));
		let res = self.post(&req).map_err(|e| {
			let report = match &e {
				Error::Client(ClientError::HttpStatus(404, _)) => {
					"Other wallet is incompatible and requires an upgrade. \
					 Please urge the other wallet owner to upgrade and try the transaction again."
						.to_string()
				}
				_ => format!("Performing version check (is recipient listening?): {}", e),
			};
			Error::ClientCallback(report)
		})?;

		let resp_value = json_rpc::result_ok(&res)
			.map_err(|e| Error::ClientCallback(format!("Checking version: {}", e)))?;
		trace!("resp_value: {}", resp_value);
		let foreign_api_version: u16 =
			serde_json::from_value(resp_value["foreign_api_version"].clone()).map_err(|e| {
				Error::ClientCallback(format!(
					"Unable to read respond foreign_api_version value {}, {}",
					res, e
				))
			})?;
		debug!(
			"Recipient at {} runs Foreign API v{}",
			self.base_url, foreign_api_version
		);
		Ok(foreign_api_version)
	}

	/// Deliver the slatepack with `receive_tx`, return the recipient response
	pub fn send_tx(&self, slatepack: &Slatepack) -> Result<Slatepack, Error> {
		let req = json_rpc::request(1, "receive_tx", json!([slatepack.as_str(), null, null]));
		trace!("Sending receive_tx request to {}", self.base_url);

		let res = self.post(&req).map_err(|e| {
			let report = format!("Posting transaction slate (is recipient listening?): {}", e);
			error!("{}", report);
			Error::ClientCallback(report)
		})?;

		let slate_value = json_rpc::result_ok(&res).map_err(|e| {
			let report = format!("Posting transaction slate: {}", e);
			error!("{}", report);
			Error::ClientCallback(report)
		})?;

		match slate_value {
			Value::String(s) if !s.trim().is_empty() => Ok(Slatepack::new(s)),
			other => {
				let report = format!("Unable to parse receiver wallet response {}", other);
				error!("{}", report);
				Err(Error::ClientCallback(report))
			}
		}
	}

	fn post(&self, input: &Value) -> Result<Value, Error> {
		Ok(self.client.post(&self.base_url, None, input)?)
	}

	fn build_url_str(base_url: &str) -> String {
		let trailing = match base_url.ends_with('/') {
			true => "",
			false => "/",
		};
		format!("{}{}v2/foreign", base_url, trailing)
	}
}

impl ForeignEndpoint for HttpDataSender {
	fn url(&self) -> &str {
		&self.base_url
	}

	fn check_version(&self) -> Result<u16, libwallet::Error> {
		self.check_other_version()
			.map_err(|e| libwallet::Error::Delivery(format!("{}", e)))
	}

	fn receive_tx(&self, slatepack: &Slatepack) -> Result<Slatepack, libwallet::Error> {
		self.send_tx(slatepack)
			.map_err(|e| libwallet::Error::Delivery(format!("{}", e)))
	}
}
