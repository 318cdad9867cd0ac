// Copyright 2021 The Mwc Developers
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

//! Error types for libwallet

use mwc_pay_util::AmountError;
use std::mem;

/// Payment errors. Each workflow stage fails with its own kind, the message
/// carries the underlying cause.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error, Serialize, Deserialize)]
pub enum Error {
	/// Amount can't be converted to nano MWC
	#[error("Invalid amount, {0}")]
	InvalidAmount(String),

	/// Wallet refused to build the transaction
	#[error("Transaction init error, {0}")]
	TransactionInit(String),

	/// Slatepack could not be delivered or the recipient answer is unusable
	#[error("Delivery error, {0}")]
	Delivery(String),

	/// Response slatepack rejected or finalization failed
	#[error("Transaction finalize error, {0}")]
	TransactionFinalize(String),

	/// Node didn't accept the finalized transaction
	#[error("Broadcast error, {0}")]
	Broadcast(String),

	/// Owner API call failed outside of a workflow stage
	#[error("Owner API error, {0}")]
	OwnerApi(String),

	/// An error in the format of the JSON structures exchanged by the wallet
	#[error("JSON format error, {0}")]
	Format(String),

	/// Transition requested in the wrong workflow state
	#[error("Invalid workflow state, expected {expected}, found {found}")]
	InvalidState {
		/// State the transition needs
		expected: String,
		/// Current state
		found: String,
	},

	/// Transaction cancelled on request
	#[error("Transaction {0} was cancelled")]
	Cancelled(String),

	/// Other
	#[error("Argument Error: {0}")]
	ArgumentError(String),
}

impl Error {
	/// Report `self` as a failure of the stage `kind`. Errors that already
	/// are of that kind are kept as they are.
	pub fn into_stage(self, kind: fn(String) -> Error) -> Error {
		if mem::discriminant(&self) == mem::discriminant(&kind(String::new())) {
			self
		} else {
			kind(format!("{}", self))
		}
	}
}

impl From<AmountError> for Error {
	fn from(error: AmountError) -> Error {
		Error::InvalidAmount(format!("{}", error))
	}
}

impl From<serde_json::Error> for Error {
	fn from(error: serde_json::Error) -> Error {
		Error::Format(format!("{}", error))
	}
}
