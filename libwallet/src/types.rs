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

//! Wallet API argument and result types, and the traits the workflow uses to
//! reach the wallet and the recipient.

use crate::error::Error;
use crate::ser;
use crate::slate::{
	Slate, SlateId, SlateOrSlatepack, SlatePurpose, Slatepack, SlatepackAddress, SlatepackInfo,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;

/// Authenticated wallet operations. Implemented by the Owner API client, and
/// by mocks in tests.
pub trait OwnerSession {
	/// Build a send slate
	fn init_send_tx(&self, args: &InitTxArgs) -> Result<Slate, Error>;

	/// Lock the outputs the slate spends
	fn tx_lock_outputs(&self, slate: &Slate) -> Result<(), Error>;

	/// Encode a slate, encrypted when a recipient is given
	fn encode_slatepack_message(
		&self,
		slate: &Slate,
		content: SlatePurpose,
		recipient: Option<&SlatepackAddress>,
	) -> Result<Slatepack, Error>;

	/// Decode (and decrypt) a slatepack
	fn decode_slatepack_message(&self, slatepack: &Slatepack) -> Result<SlatepackInfo, Error>;

	/// Finalize a send from the recipient response
	fn finalize_tx(&self, slatepack: &Slatepack) -> Result<SlateOrSlatepack, Error>;

	/// Push a finalized transaction to the node. False if it wasn't accepted.
	fn post_tx(&self, tx: &Value, fluff: bool) -> Result<bool, Error>;

	/// Transaction log, optionally filtered by log id or slate id. The flag
	/// tells whether the data was refreshed from the node.
	fn retrieve_txs(
		&self,
		refresh_from_node: bool,
		tx_id: Option<u32>,
		tx_slate_id: Option<&SlateId>,
	) -> Result<(bool, Vec<TxLogEntry>), Error>;

	/// Cancel an unconfirmed transaction and release its outputs
	fn cancel_tx(&self, tx_id: Option<u32>, tx_slate_id: Option<&SlateId>) -> Result<(), Error>;
}

/// Recipient wallet Foreign API
pub trait ForeignEndpoint {
	/// Endpoint url, for reporting
	fn url(&self) -> &str;

	/// Foreign API version of the recipient
	fn check_version(&self) -> Result<u16, Error>;

	/// Hand over the initial slatepack, get the response slatepack back
	fn receive_tx(&self, slatepack: &Slatepack) -> Result<Slatepack, Error>;
}

/// Arguments of `init_send_tx`, as the wallet expects them
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InitTxArgs {
	/// Account to send from, the default account if None
	pub src_acct_name: Option<String>,
	/// Amount in nano MWC
	#[serde(with = "ser::string_or_u64")]
	pub amount: u64,
	/// Minimum confirmations of spent outputs
	#[serde(with = "ser::string_or_u64")]
	pub minimum_confirmations: u64,
	/// Max number of inputs
	pub max_outputs: u32,
	/// Number of change outputs
	pub num_change_outputs: u32,
	/// Spend everything instead of the smallest set
	pub selection_strategy_is_use_all: bool,
	/// Message stored with the transaction
	pub message: Option<String>,
	/// Slate version to produce
	pub target_slate_version: Option<u16>,
	/// Payment proof recipient
	pub payment_proof_recipient_address: Option<String>,
	/// Slate time to live
	#[serde(with = "ser::opt_string_or_u64")]
	pub ttl_blocks: Option<u64>,
	/// Recipient address stored in the log
	pub address: Option<String>,
	/// Only estimate fees and inputs
	pub estimate_only: Option<bool>,
	/// Wallet side sending, unused
	pub send_args: Option<Value>,
	/// Lock outputs at finalize time
	pub late_lock: Option<bool>,
	/// Encrypt slatepacks for this recipient
	pub slatepack_recipient: Option<SlatepackAddress>,
}

impl Default for InitTxArgs {
	fn default() -> InitTxArgs {
		InitTxArgs {
			src_acct_name: None,
			amount: 0,
			minimum_confirmations: 1,
			max_outputs: 500,
			num_change_outputs: 1,
			selection_strategy_is_use_all: false,
			message: None,
			target_slate_version: None,
			payment_proof_recipient_address: None,
			ttl_blocks: None,
			address: None,
			estimate_only: None,
			send_args: None,
			late_lock: Some(false),
			slatepack_recipient: None,
		}
	}
}

/// Kind of a transaction log entry
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxLogEntryType {
	/// A coinbase transaction becomes confirmed
	ConfirmedCoinbase,
	/// Outputs created when a transaction is received
	TxReceived,
	/// Inputs locked + change outputs when a transaction is created
	TxSent,
	/// Received transaction that was rolled back by user
	TxReceivedCancelled,
	/// Sent transaction that was rolled back by user
	TxSentCancelled,
	/// Received transaction that was reverted on-chain
	TxReverted,
}

impl fmt::Display for TxLogEntryType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			TxLogEntryType::ConfirmedCoinbase => "Confirmed \nCoinbase",
			TxLogEntryType::TxReceived => "Received Tx",
			TxLogEntryType::TxSent => "Sent Tx",
			TxLogEntryType::TxReceivedCancelled => "Received Tx\n- Cancelled",
			TxLogEntryType::TxSentCancelled => "Sent Tx\n- Cancelled",
			TxLogEntryType::TxReverted => "Received Tx\n- Reverted",
		};
		f.write_str(name)
	}
}

/// Wallet transaction log entry. Fields the wallet adds beyond these are
/// ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TxLogEntry {
	/// Log id
	pub id: u32,
	/// Slate id
	pub tx_slate_id: Option<SlateId>,
	/// Entry kind
	pub tx_type: TxLogEntryType,
	/// Counterparty address
	#[serde(default)]
	pub address: Option<String>,
	/// Creation time
	pub creation_ts: DateTime<Utc>,
	/// Confirmation time
	#[serde(default)]
	pub confirmation_ts: Option<DateTime<Utc>>,
	/// Confirmed on chain
	pub confirmed: bool,
	/// Block height of the outputs
	#[serde(with = "ser::string_or_u64", default)]
	pub output_height: u64,
	/// Number of inputs
	#[serde(default)]
	pub num_inputs: usize,
	/// Number of outputs
	#[serde(default)]
	pub num_outputs: usize,
	/// Amount credited, nano MWC
	#[serde(with = "ser::string_or_u64")]
	pub amount_credited: u64,
	/// Amount debited, nano MWC
	#[serde(with = "ser::string_or_u64")]
	pub amount_debited: u64,
	/// Fee, nano MWC
	#[serde(with = "ser::opt_string_or_u64", default)]
	pub fee: Option<u64>,
	/// Height after which the wallet drops the unconfirmed slate
	#[serde(with = "ser::opt_string_or_u64", default)]
	pub ttl_cutoff_height: Option<u64>,
	/// Finalized transaction is stored in the wallet
	#[serde(default)]
	pub stored_tx: Option<String>,
}

impl TxLogEntry {
	/// Credited minus debited, negative for a sent transaction
	pub fn net_change(&self) -> i128 {
		self.amount_credited as i128 - self.amount_debited as i128
	}

	/// Sent or received and not confirmed or cancelled yet
	pub fn is_cancellable(&self) -> bool {
		!self.confirmed
			&& matches!(
				self.tx_type,
				TxLogEntryType::TxSent | TxLogEntryType::TxReceived
			)
	}
}
