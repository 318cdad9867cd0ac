// Copyright 2019 The Grin Developers
// Copyright 2024 The Mwc Developers
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

//! common functions for tests (in-memory wallet and recipient, mostly)
#![allow(dead_code)]

use mwc_pay_libwallet::{
	Error, ForeignEndpoint, InitTxArgs, OwnerSession, Slate, SlateId, SlateOrSlatepack,
	SlatePurpose, Slatepack, SlatepackAddress, SlatepackInfo, TxLogEntry, TxLogEntryType,
};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};

pub fn setup() {
	mwc_pay_util::init_test_logger();
}

/// Slatepack text the mock wallet produces for a slate and purpose
pub fn packet(slate_id: &str, purpose: SlatePurpose) -> Slatepack {
	Slatepack::new(format!(
		"BEGINSLATEPACK. {} {}. ENDSLATEPACK.",
		slate_id, purpose
	))
}

fn parse_packet(packet: &Slatepack) -> Option<(String, SlatePurpose)> {
	let body = packet
		.as_str()
		.trim()
		.strip_prefix("BEGINSLATEPACK.")?
		.strip_suffix("ENDSLATEPACK.")?
		.trim()
		.trim_end_matches('.');
	let mut parts = body.split_whitespace();
	let id = parts.next()?.to_string();
	let purpose = match parts.next()? {
		"SendInitial" => SlatePurpose::SendInitial,
		"SendResponse" => SlatePurpose::SendResponse,
		"InvoiceInitial" => SlatePurpose::InvoiceInitial,
		"InvoiceResponse" => SlatePurpose::InvoiceResponse,
		"FullSlate" => SlatePurpose::FullSlate,
		_ => return None,
	};
	Some((id, purpose))
}

/// Owner API stand-in. Every call is recorded by method name.
pub struct MockWallet {
	slate_id: String,
	calls: RefCell<Vec<String>>,
	init_args: RefCell<Option<InitTxArgs>>,
	txs: RefCell<Vec<TxLogEntry>>,
	/// Answer of `post_tx`
	pub post_accepted: Cell<bool>,
	/// Reject `init_send_tx` with this message
	pub init_error: RefCell<Option<String>>,
}

impl MockWallet {
	pub fn new(slate_id: &str) -> MockWallet {
		MockWallet {
			slate_id: slate_id.to_string(),
			calls: RefCell::new(vec![]),
			init_args: RefCell::new(None),
			txs: RefCell::new(vec![]),
			post_accepted: Cell::new(true),
			init_error: RefCell::new(None),
		}
	}

	/// Times `method` was called
	pub fn calls(&self, method: &str) -> usize {
		self.calls.borrow().iter().filter(|c| *c == method).count()
	}

	pub fn call_log(&self) -> Vec<String> {
		self.calls.borrow().clone()
	}

	pub fn init_args(&self) -> Option<InitTxArgs> {
		self.init_args.borrow().clone()
	}

	/// Add a transaction log entry for `slate_id`
	pub fn add_tx(&self, slate_id: &str, tx_type: TxLogEntryType, confirmed: bool, debited: u64) {
		let mut txs = self.txs.borrow_mut();
		let entry: TxLogEntry = serde_json::from_value(json!({
			"id": txs.len() as u32,
			"tx_slate_id": slate_id,
			"tx_type": tx_type,
			"creation_ts": "2024-05-01T10:00:00Z",
			"confirmation_ts": null,
			"confirmed": confirmed,
			"output_height": 0,
			"num_inputs": 1,
			"num_outputs": 1,
			"amount_credited": "0",
			"amount_debited": debited.to_string(),
			"fee": "8000000",
			"ttl_cutoff_height": 2000,
			"stored_tx": null
		}))
		.unwrap();
		txs.push(entry);
	}

	pub fn tx_type(&self, slate_id: &str) -> Option<TxLogEntryType> {
		self.txs
			.borrow()
			.iter()
			.find(|t| t.tx_slate_id.as_ref().map(|s| s.as_str()) == Some(slate_id))
			.map(|t| t.tx_type)
	}

	fn record(&self, method: &str) {
		self.calls.borrow_mut().push(method.to_string());
	}

	fn slate(id: &str, purpose: SlatePurpose) -> Slate {
		let tx = match purpose {
			SlatePurpose::FullSlate => json!({"body": {"inputs": [], "outputs": [], "kernels": []}}),
			_ => Value::Null,
		};
		Slate::from_value(json!({"version_info": {"version": 3}, "id": id, "tx": tx}))
	}
}

impl OwnerSession for MockWallet {
	fn init_send_tx(&self, args: &InitTxArgs) -> Result<Slate, Error> {
		self.record("init_send_tx");
		if let Some(msg) = self.init_error.borrow().clone() {
			return Err(Error::OwnerApi(msg));
		}
		*self.init_args.borrow_mut() = Some(args.clone());
		self.add_tx(&self.slate_id, TxLogEntryType::TxSent, false, args.amount);
		Ok(MockWallet::slate(&self.slate_id, SlatePurpose::SendInitial))
	}

	fn tx_lock_outputs(&self, _slate: &Slate) -> Result<(), Error> {
		self.record("tx_lock_outputs");
		Ok(())
	}

	fn encode_slatepack_message(
		&self,
		slate: &Slate,
		purpose: SlatePurpose,
		_recipient: Option<&SlatepackAddress>,
	) -> Result<Slatepack, Error> {
		self.record("encode_slatepack_message");
		Ok(packet(slate.id()?.as_str(), purpose))
	}

	fn decode_slatepack_message(&self, slatepack: &Slatepack) -> Result<SlatepackInfo, Error> {
		self.record("decode_slatepack_message");
		let (id, purpose) = parse_packet(slatepack)
			.ok_or_else(|| Error::OwnerApi(format!("Unable to decode {}", slatepack)))?;
		Ok(SlatepackInfo {
			content: purpose,
			sender: None,
			recipient: None,
			slate: MockWallet::slate(&id, purpose),
		})
	}

	fn finalize_tx(&self, slatepack: &Slatepack) -> Result<SlateOrSlatepack, Error> {
		self.record("finalize_tx");
		match parse_packet(slatepack) {
			Some((id, SlatePurpose::SendResponse)) => Ok(SlateOrSlatepack::Slatepack(packet(
				&id,
				SlatePurpose::FullSlate,
			))),
			_ => Err(Error::OwnerApi("Slate is not a send response".to_string())),
		}
	}

	fn post_tx(&self, _tx: &Value, _fluff: bool) -> Result<bool, Error> {
		self.record("post_tx");
		Ok(self.post_accepted.get())
	}

	fn retrieve_txs(
		&self,
		_refresh_from_node: bool,
		tx_id: Option<u32>,
		tx_slate_id: Option<&SlateId>,
	) -> Result<(bool, Vec<TxLogEntry>), Error> {
		self.record("retrieve_txs");
		let txs = self
			.txs
			.borrow()
			.iter()
			.filter(|t| tx_id.map(|id| id == t.id).unwrap_or(true))
			.filter(|t| tx_slate_id.map(|id| t.tx_slate_id.as_ref() == Some(id)).unwrap_or(true))
			.cloned()
			.collect();
		Ok((true, txs))
	}

	fn cancel_tx(&self, _tx_id: Option<u32>, tx_slate_id: Option<&SlateId>) -> Result<(), Error> {
		self.record("cancel_tx");
		let mut txs = self.txs.borrow_mut();
		let tx = txs
			.iter_mut()
			.find(|t| t.tx_slate_id.as_ref() == tx_slate_id)
			.ok_or_else(|| Error::OwnerApi("Transaction doesn't exist".to_string()))?;
		tx.tx_type = TxLogEntryType::TxSentCancelled;
		Ok(())
	}
}

/// Recipient Foreign API stand-in
pub struct MockRecipient {
	pub version: u16,
	response: Result<Slatepack, Error>,
	pub received: RefCell<Vec<Slatepack>>,
}

impl MockRecipient {
	/// Answers with the response slatepack of `slate_id`
	pub fn responding(slate_id: &str) -> MockRecipient {
		MockRecipient {
			version: 2,
			response: Ok(packet(slate_id, SlatePurpose::SendResponse)),
			received: RefCell::new(vec![]),
		}
	}

	/// Answers with `reply` whatever it holds
	pub fn replying(reply: &str) -> MockRecipient {
		MockRecipient {
			version: 2,
			response: Ok(Slatepack::new(reply)),
			received: RefCell::new(vec![]),
		}
	}

	/// Fails the delivery with `error`
	pub fn failing(error: Error) -> MockRecipient {
		MockRecipient {
			version: 2,
			response: Err(error),
			received: RefCell::new(vec![]),
		}
	}
}

impl ForeignEndpoint for MockRecipient {
	fn url(&self) -> &str {
		"http://recipient.test/v2/foreign"
	}

	fn check_version(&self) -> Result<u16, Error> {
		Ok(self.version)
	}

	fn receive_tx(&self, slatepack: &Slatepack) -> Result<Slatepack, Error> {
		self.received.borrow_mut().push(slatepack.clone());
		self.response.clone()
	}
}
