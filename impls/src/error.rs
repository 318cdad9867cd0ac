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

//! Implementation specific error types
use crate::client_utils::ClientError;

/// Owner and Foreign API client errors
#[derive(Clone, thiserror::Error, Eq, PartialEq, Debug)]
pub enum Error {
	/// HTTP level failure
	#[error("{0}")]
	Client(#[from] ClientError),

	/// Secp Error
	#[error("Secp error, {0}")]
	Secp(String),

	/// Enc/Decryption Error
	#[error("Enc/Decryption error (check Owner API secret?), {0}")]
	Encryption(String),

	/// Error when formatting json
	#[error("Serde JSON error, {0}")]
	Format(String),

	/// JSON-RPC error reported by the wallet API
	#[error("Wallet Communication Error: {0}")]
	WalletComms(String),

	/// Secure API is not initialized yet
	#[error("Owner API secure session is not initialized, call init_secure_api first")]
	NoSecureSession,

	/// Wallet is not opened
	#[error("Wallet is not opened, call open_wallet first")]
	WalletNotOpened,

	/// Recipient wallet error
	#[error("Adapter Callback Error, {0}")]
	ClientCallback(String),

	/// Command line argument error
	#[error("{0}")]
	ArgumentError(String),
}

impl From<serde_json::Error> for Error {
	fn from(e: serde_json::Error) -> Error {
		Error::Format(format!("{}", e))
	}
}
