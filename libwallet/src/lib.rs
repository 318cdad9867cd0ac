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

//! Wallet API types and the payment workflow. The wallet itself lives in a
//! separate process, everything here talks to it through the `OwnerSession`
//! and `ForeignEndpoint` traits.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

mod error;
pub mod ser;
mod slate;
mod types;
pub mod workflow;

pub use crate::error::Error;
pub use crate::slate::{
	Slate, SlateId, SlateOrSlatepack, SlatePurpose, Slatepack, SlatepackAddress, SlatepackInfo,
};
pub use crate::types::{ForeignEndpoint, InitTxArgs, OwnerSession, TxLogEntry, TxLogEntryType};
pub use crate::workflow::{PaymentWorkflow, SendParams, WorkflowState};
