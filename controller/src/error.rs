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
use crate::config;
use crate::impls;
use crate::libwallet;

/// Command errors, mostly wrappers around the wallet and transport errors.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum Error {
	/// Impls error
	#[error("Impls Error, {0}")]
	Impls(#[from] impls::Error),

	/// LibWallet Error, keeps the stage of a failed payment
	#[error("LibWallet Error, {0}")]
	LibWallet(#[from] libwallet::Error),

	/// Configuration or credentials
	#[error("Config Error, {0}")]
	Config(String),

	/// IO Error
	#[error("IO error, {0}")]
	IO(String),

	/// Command line argument error
	#[error("Invalid argument: {0}")]
	ArgumentError(String),
}

impl From<config::ConfigError> for Error {
	fn from(error: config::ConfigError) -> Error {
		Error::Config(format!("{}", error))
	}
}

impl From<std::io::Error> for Error {
	fn from(error: std::io::Error) -> Error {
		Error::IO(format!("{}", error))
	}
}
