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

//! Owner API v3 client. Every call after `init_secure_api` travels inside
//! `encrypted_request_v3`.

use crate::client_utils::json_rpc;
use crate::client_utils::Client;
use crate::error::Error;
use crate::secure::{EcdhKeypair, EncryptedBody, SharedKey};
use mwc_pay_config::OwnerApiCredentials;
use mwc_pay_libwallet::{
	self as libwallet, InitTxArgs, OwnerSession, Slate, SlateId, SlateOrSlatepack, SlatePurpose,
	Slatepack, SlatepackAddress, SlatepackInfo, TxLogEntry,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Authenticated, encrypted session with a running wallet
pub struct OwnerV3Client {
	client: Client,
	credentials: OwnerApiCredentials,
	keypair: EcdhKeypair,
	shared_key: Option<SharedKey>,
	// keychain mask returned by open_wallet, null when the wallet has none
	token: Option<Value>,
	wallet_name: Option<String>,
	next_id: AtomicU32,
}

impl OwnerV3Client {
	/// Session for the credentials. Nothing is sent until `init_secure_api`.
	pub fn new(
		credentials: OwnerApiCredentials,
		timeout: Option<Duration>,
	) -> Result<OwnerV3Client, Error> {
		let keypair = EcdhKeypair::generate()?;
		OwnerV3Client::with_keypair(credentials, timeout, keypair)
	}

	fn with_keypair(
		credentials: OwnerApiCredentials,
		timeout: Option<Duration>,
		keypair: EcdhKeypair,
	) -> Result<OwnerV3Client, Error> {
		Ok(OwnerV3Client {
			client: Client::new(timeout)?,
			credentials,
			keypair,
			shared_key: None,
			token: None,
			wallet_name: None,
			next_id: AtomicU32::new(1),
		})
	}

	/// Owner API url
	pub fn url(&self) -> &str {
		&self.credentials.url
	}

	/// Key exchange with the wallet
	pub fn init_secure_api(&mut self) -> Result<(), Error> {
		let params = json!({ "ecdh_pubkey": self.keypair.public_key_hex() });
		let req = json_rpc::request(self.next_id(), "init_secure_api", params);
		let res = self.post(&req)?;
		let wallet_key = json_rpc::result_ok(&res).map_err(Error::WalletComms)?;
		let wallet_key = wallet_key.as_str().ok_or_else(|| {
			Error::WalletComms(format!("Unexpected init_secure_api result {}", wallet_key))
		})?;
		self.shared_key = Some(self.keypair.shared_key(wallet_key)?);
		info!("Secure Owner API session established with {}", self.url());
		Ok(())
	}

	/// Open the wallet, the token is kept for the following calls
	pub fn open_wallet(&mut self, name: Option<&str>, password: &str) -> Result<(), Error> {
		let token: Value = self.call(
			"open_wallet",
			json!({
				"name": name,
				"password": password,
			}),
		)?;
		self.token = Some(token);
		self.wallet_name = name.map(|n| n.to_string());
		debug!("Wallet {} opened", name.unwrap_or("default"));
		Ok(())
	}

	/// Close the opened wallet
	pub fn close_wallet(&mut self) -> Result<(), Error> {
		if self.token.is_none() {
			return Ok(());
		}
		let _: Value = self.call("close_wallet", json!({ "name": self.wallet_name }))?;
		self.token = None;
		debug!("Wallet closed");
		Ok(())
	}

	fn next_id(&self) -> u32 {
		self.next_id.fetch_add(1, Ordering::SeqCst)
	}

	fn post(&self, req: &Value) -> Result<Value, Error> {
		let auth = Some((
			self.credentials.user.as_str(),
			self.credentials.secret(),
		));
		Ok(self.client.post(&self.credentials.url, auth, req)?)
	}

	fn token(&self) -> Result<Value, Error> {
		self.token.clone().ok_or(Error::WalletNotOpened)
	}

	/// Encrypted JSON-RPC call, returns `result.Ok` of the decrypted response
	fn call<T>(&self, method: &str, params: Value) -> Result<T, Error>
	where
		T: DeserializeOwned,
	{
		let key = self.shared_key.as_ref().ok_or(Error::NoSecureSession)?;
		let id = self.next_id();
		trace!("Owner API call {} id {}", method, id);

		let body = EncryptedBody::from_json(&json_rpc::request(id, method, params), key)?;
		let req = json_rpc::request(id, "encrypted_request_v3", serde_json::to_value(&body)?);
		let res = self.post(&req)?;

		let enc = json_rpc::result_ok(&res).map_err(|e| {
			Error::WalletComms(format!("{} failed, {}", method, e))
		})?;
		let enc: EncryptedBody = serde_json::from_value(enc)?;
		let inner = enc.decrypt(key)?;

		let value = json_rpc::result_ok(&inner).map_err(|e| {
			Error::WalletComms(format!("{} failed, {}", method, e))
		})?;
		Ok(serde_json::from_value(value)?)
	}

	/// Authenticated call with the open wallet token added to the params
	fn call_with_token<T>(&self, method: &str, mut params: Value) -> Result<T, Error>
	where
		T: DeserializeOwned,
	{
		params["token"] = self.token()?;
		self.call(method, params)
	}
}

fn owner_err(e: Error) -> libwallet::Error {
	libwallet::Error::OwnerApi(format!("{}", e))
}

impl OwnerSession for OwnerV3Client {
	fn init_send_tx(&self, args: &InitTxArgs) -> Result<Slate, libwallet::Error> {
		self.call_with_token("init_send_tx", json!({ "args": args }))
			.map_err(owner_err)
	}

	fn tx_lock_outputs(&self, slate: &Slate) -> Result<(), libwallet::Error> {
		self.call_with_token::<Value>(
			"tx_lock_outputs",
			json!({ "slate": slate, "participant_id": 0 }),
		)
		.map(|_| ())
		.map_err(owner_err)
	}

	fn encode_slatepack_message(
		&self,
		slate: &Slate,
		content: SlatePurpose,
		recipient: Option<&SlatepackAddress>,
	) -> Result<Slatepack, libwallet::Error> {
		self.call_with_token(
			"encode_slatepack_message",
			json!({
				"slate": slate,
				"content": content,
				"recipient": recipient,
				"address_index": null,
			}),
		)
		.map_err(owner_err)
	}

	fn decode_slatepack_message(
		&self,
		slatepack: &Slatepack,
	) -> Result<SlatepackInfo, libwallet::Error> {
		self.call_with_token(
			"decode_slatepack_message",
			json!({ "message": slatepack, "address_index": null }),
		)
		.map_err(owner_err)
	}

	fn finalize_tx(&self, slatepack: &Slatepack) -> Result<SlateOrSlatepack, libwallet::Error> {
		self.call_with_token("finalize_tx", json!({ "slate": slatepack }))
			.map_err(owner_err)
	}

	fn post_tx(&self, tx: &Value, fluff: bool) -> Result<bool, libwallet::Error> {
		// the wallet answers Ok(null) once the node accepted the transaction
		self.call_with_token::<Value>("post_tx", json!({ "tx": tx, "fluff": fluff }))
			.map(|_| true)
			.map_err(owner_err)
	}

	fn retrieve_txs(
		&self,
		refresh_from_node: bool,
		tx_id: Option<u32>,
		tx_slate_id: Option<&SlateId>,
	) -> Result<(bool, Vec<TxLogEntry>), libwallet::Error> {
		self.call_with_token(
			"retrieve_txs",
			json!({
				"refresh_from_node": refresh_from_node,
				"tx_id": tx_id,
				"tx_slate_id": tx_slate_id,
			}),
		)
		.map_err(owner_err)
	}

	fn cancel_tx(
		&self,
		tx_id: Option<u32>,
		tx_slate_id: Option<&SlateId>,
	) -> Result<(), libwallet::Error> {
		self.call_with_token::<Value>(
			"cancel_tx",
			json!({ "tx_id": tx_id, "tx_slate_id": tx_slate_id }),
		)
		.map(|_| ())
		.map_err(owner_err)
	}
}
