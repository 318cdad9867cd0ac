// Copyright 2024 The MWC Developers
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

//! Process wide tokio runtime
use lazy_static::lazy_static;
use std::sync::{Arc, Mutex};

use tokio::runtime::{Builder, Runtime};

lazy_static! {
	/// Runtime that the blocking HTTP client drives its reqwest futures on.
	/// mwc-pay is a synchronous tool, every wallet call blocks the caller until
	/// the runtime finishes the request.
	pub static ref RUNTIME: Arc<Mutex<Runtime>> = Arc::new(Mutex::new(
		Builder::new_multi_thread()
			.enable_all()
			.build()
			.expect("Unable to build tokio runtime")
	));
}
