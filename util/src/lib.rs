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

//! Utilities shared by the mwc-pay crates

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate serde_derive;

mod amount;
pub mod logger;
mod tokio_runtime;

pub use amount::{amount_from_hr_string, amount_to_hr_string, AmountError, MWC_BASE};
pub use logger::{init_logger, init_test_logger, LogLevel, LoggingConfig};
pub use tokio_runtime::RUNTIME;

/// Password or secret that is wiped from memory on drop
pub type ZeroingString = zeroize::Zeroizing<String>;
