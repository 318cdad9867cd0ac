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

//! Interactive send, driven step by step:
//!
//! ```text
//! Uninitialized -> Initialized -> Exchanged -> Finalized -> Broadcast
//!        \______________\_____________\____________\______-> Failed
//! ```
//!
//! Every step returns its result or the error of its stage. A failed
//! workflow stays failed. Nothing is retried and locked outputs are only
//! released by an explicit `cancel`.

use crate::error::Error;
use crate::slate::{Slate, SlateId, SlateOrSlatepack, SlatePurpose, Slatepack, SlatepackAddress};
use crate::types::{ForeignEndpoint, InitTxArgs, OwnerSession};
use serde_json::Value;

/// Lowest recipient Foreign API version that accepts slatepacks
pub const MIN_FOREIGN_API_VERSION: u16 = 2;

/// Transaction building parameters, fixed for the life of a workflow
#[derive(Debug, Clone, PartialEq)]
pub struct SendParams {
	/// Account to send from, default account if None
	pub src_acct_name: Option<String>,
	/// Minimum confirmations of spent outputs
	pub minimum_confirmations: u64,
	/// Max number of inputs
	pub max_outputs: u32,
	/// Number of change outputs
	pub num_change_outputs: u32,
	/// Spend all outputs
	pub selection_strategy_is_use_all: bool,
	/// Slate time to live in blocks
	pub ttl_blocks: Option<u64>,
	/// Lock outputs at finalize time. When off they are locked right after
	/// the slate is built.
	pub late_lock: bool,
	/// Slate version to produce
	pub target_slate_version: Option<u16>,
	/// Message stored with the transaction
	pub message: Option<String>,
}

impl Default for SendParams {
	fn default() -> SendParams {
		SendParams {
			src_acct_name: None,
			minimum_confirmations: 1,
			max_outputs: 500,
			num_change_outputs: 1,
			selection_strategy_is_use_all: false,
			ttl_blocks: Some(1440),
			late_lock: true,
			target_slate_version: None,
			message: None,
		}
	}
}

impl SendParams {
	fn init_tx_args(&self, amount: u64, recipient: Option<&SlatepackAddress>) -> InitTxArgs {
		InitTxArgs {
			src_acct_name: self.src_acct_name.clone(),
			amount,
			minimum_confirmations: self.minimum_confirmations,
			max_outputs: self.max_outputs,
			num_change_outputs: self.num_change_outputs,
			selection_strategy_is_use_all: self.selection_strategy_is_use_all,
			message: self.message.clone(),
			target_slate_version: self.target_slate_version,
			ttl_blocks: self.ttl_blocks,
			late_lock: Some(self.late_lock),
			slatepack_recipient: recipient.cloned(),
			..InitTxArgs::default()
		}
	}
}

/// Where a payment is
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
	/// Nothing happened yet
	Uninitialized,
	/// Slate built, initial slatepack ready for the recipient
	Initialized {
		/// Slate id
		slate_id: SlateId,
		/// SendInitial slatepack
		packet: Slatepack,
		/// Outputs locked already
		outputs_locked: bool,
	},
	/// Recipient answered
	Exchanged {
		/// Slate id
		slate_id: SlateId,
		/// SendResponse slatepack
		response: Slatepack,
	},
	/// Transaction signed by both parties
	Finalized {
		/// Slate id
		slate_id: SlateId,
		/// Final slatepack
		packet: Slatepack,
		/// Finalized transaction
		tx: Value,
	},
	/// Posted to the node
	Broadcast {
		/// Slate id
		slate_id: SlateId,
		/// Final slatepack
		packet: Slatepack,
	},
	/// Stopped, the error says at which stage
	Failed {
		/// Slate id if the wallet created a slate before the failure
		slate_id: Option<SlateId>,
		/// Cause
		error: Error,
	},
}

impl WorkflowState {
	/// State name
	pub fn name(&self) -> &'static str {
		match self {
			WorkflowState::Uninitialized => "Uninitialized",
			WorkflowState::Initialized { .. } => "Initialized",
			WorkflowState::Exchanged { .. } => "Exchanged",
			WorkflowState::Finalized { .. } => "Finalized",
			WorkflowState::Broadcast { .. } => "Broadcast",
			WorkflowState::Failed { .. } => "Failed",
		}
	}

	/// Slate id known in this state
	pub fn slate_id(&self) -> Option<&SlateId> {
		match self {
			WorkflowState::Uninitialized => None,
			WorkflowState::Initialized { slate_id, .. }
			| WorkflowState::Exchanged { slate_id, .. }
			| WorkflowState::Finalized { slate_id, .. }
			| WorkflowState::Broadcast { slate_id, .. } => Some(slate_id),
			WorkflowState::Failed { slate_id, .. } => slate_id.as_ref(),
		}
	}

	/// Error of a failed workflow
	pub fn error(&self) -> Option<&Error> {
		match self {
			WorkflowState::Failed { error, .. } => Some(error),
			_ => None,
		}
	}
}

/// One send payment against one wallet
pub struct PaymentWorkflow<'a, O>
where
	O: OwnerSession + ?Sized,
{
	owner: &'a O,
	params: SendParams,
	state: WorkflowState,
	// set as soon as the wallet returns a slate, so a failure after that
	// point can still be cancelled
	slate_id: Option<SlateId>,
}

impl<'a, O> PaymentWorkflow<'a, O>
where
	O: OwnerSession + ?Sized,
{
	/// New workflow in `Uninitialized` state
	pub fn new(owner: &'a O, params: SendParams) -> Self {
		PaymentWorkflow {
			owner,
			params,
			state: WorkflowState::Uninitialized,
			slate_id: None,
		}
	}

	/// Pick up a send at `Exchanged` from a response slatepack received out
	/// of band. The active slate id is taken from the response.
	pub fn resume(owner: &'a O, params: SendParams, response: Slatepack) -> Result<Self, Error> {
		if response.is_empty() {
			return Err(Error::TransactionFinalize(
				"Response slatepack is empty".to_string(),
			));
		}
		let info = owner
			.decode_slatepack_message(&response)
			.map_err(|e| e.into_stage(Error::TransactionFinalize))?;
		let slate_id = info
			.slate
			.id()
			.map_err(|e| e.into_stage(Error::TransactionFinalize))?;
		debug!("Resuming slate {} from a {} slatepack", slate_id, info.content);
		Ok(PaymentWorkflow {
			owner,
			params,
			state: WorkflowState::Exchanged {
				slate_id: slate_id.clone(),
				response,
			},
			slate_id: Some(slate_id),
		})
	}

	/// Current state
	pub fn state(&self) -> &WorkflowState {
		&self.state
	}

	/// Slate id, once the wallet created one
	pub fn slate_id(&self) -> Option<&SlateId> {
		self.slate_id.as_ref()
	}

	/// Parameters the slate is built with
	pub fn params(&self) -> &SendParams {
		&self.params
	}

	/// Build the slate and encode the initial slatepack for `recipient`
	pub fn initialize(
		&mut self,
		amount: u64,
		recipient: Option<&SlatepackAddress>,
	) -> Result<(SlateId, Slatepack), Error> {
		if self.state != WorkflowState::Uninitialized {
			return Err(self.invalid_state("Uninitialized"));
		}
		if amount == 0 {
			return Err(self.fail(Error::TransactionInit(
				"Amount must be greater than zero".to_string(),
			)));
		}

		let args = self.params.init_tx_args(amount, recipient);
		let slate = match self.owner.init_send_tx(&args) {
			Ok(slate) => slate,
			Err(e) => return Err(self.fail(e.into_stage(Error::TransactionInit))),
		};
		let slate_id = match slate.id() {
			Ok(id) => id,
			Err(e) => return Err(self.fail(e.into_stage(Error::TransactionInit))),
		};
		self.slate_id = Some(slate_id.clone());
		debug!("Wallet created slate {} for {} nano MWC", slate_id, amount);

		let outputs_locked = !self.params.late_lock;
		if outputs_locked {
			if let Err(e) = self.owner.tx_lock_outputs(&slate) {
				return Err(self.fail(e.into_stage(Error::TransactionInit)));
			}
			debug!("Outputs of slate {} are locked", slate_id);
		}

		let packet =
			match self
				.owner
				.encode_slatepack_message(&slate, SlatePurpose::SendInitial, recipient)
			{
				Ok(packet) if !packet.is_empty() => packet,
				Ok(_) => {
					return Err(self.fail(Error::TransactionInit(
						"Wallet returned an empty slatepack".to_string(),
					)))
				}
				Err(e) => return Err(self.fail(e.into_stage(Error::TransactionInit))),
			};

		info!("Slate {} initialized", slate_id);
		self.state = WorkflowState::Initialized {
			slate_id: slate_id.clone(),
			packet: packet.clone(),
			outputs_locked,
		};
		Ok((slate_id, packet))
	}

	/// Deliver the initial slatepack to the recipient Foreign API and keep
	/// the response
	pub fn exchange<F>(&mut self, foreign: &F) -> Result<Slatepack, Error>
	where
		F: ForeignEndpoint + ?Sized,
	{
		let (slate_id, packet) = match &self.state {
			WorkflowState::Initialized {
				slate_id, packet, ..
			} => (slate_id.clone(), packet.clone()),
			_ => return Err(self.invalid_state("Initialized")),
		};

		let version = match foreign.check_version() {
			Ok(v) => v,
			Err(e) => return Err(self.fail(e.into_stage(Error::Delivery))),
		};
		if version < MIN_FOREIGN_API_VERSION {
			return Err(self.fail(Error::Delivery(format!(
				"Recipient at {} runs Foreign API v{}, at least v{} is required",
				foreign.url(),
				version,
				MIN_FOREIGN_API_VERSION
			))));
		}

		let response = match foreign.receive_tx(&packet) {
			Ok(response) => response,
			Err(e) => return Err(self.fail(e.into_stage(Error::Delivery))),
		};
		if response.is_empty() {
			return Err(self.fail(Error::Delivery(format!(
				"Recipient at {} returned an empty slatepack",
				foreign.url()
			))));
		}
		if let Err(e) = check_response(self.owner, &response) {
			return Err(self.fail(e));
		}

		info!("Slate {} delivered to {}", slate_id, foreign.url());
		self.state = WorkflowState::Exchanged {
			slate_id,
			response: response.clone(),
		};
		Ok(response)
	}

	/// Take a response slatepack the caller got from the recipient by other
	/// means
	pub fn accept_response(&mut self, response: Slatepack) -> Result<(), Error> {
		let slate_id = match &self.state {
			WorkflowState::Initialized { slate_id, .. } => slate_id.clone(),
			_ => return Err(self.invalid_state("Initialized")),
		};
		if response.is_empty() {
			return Err(self.fail(Error::Delivery(
				"Response slatepack is empty".to_string(),
			)));
		}
		if let Err(e) = check_response(self.owner, &response) {
			return Err(self.fail(e));
		}
		self.state = WorkflowState::Exchanged { slate_id, response };
		Ok(())
	}

	/// Check the response belongs to the active slate and finalize it
	pub fn finalize(&mut self) -> Result<(SlateId, Slatepack), Error> {
		let (slate_id, response) = match &self.state {
			WorkflowState::Exchanged { slate_id, response } => (slate_id.clone(), response.clone()),
			_ => return Err(self.invalid_state("Exchanged")),
		};

		match finalize_response(self.owner, &slate_id, &response) {
			Ok((packet, tx)) => {
				info!("Slate {} finalized", slate_id);
				self.state = WorkflowState::Finalized {
					slate_id: slate_id.clone(),
					packet: packet.clone(),
					tx,
				};
				Ok((slate_id, packet))
			}
			Err(e) => Err(self.fail(e.into_stage(Error::TransactionFinalize))),
		}
	}

	/// Post the finalized transaction
	pub fn broadcast(&mut self, fluff: bool) -> Result<(), Error> {
		let (slate_id, packet, tx) = match &self.state {
			WorkflowState::Finalized {
				slate_id,
				packet,
				tx,
			} => (slate_id.clone(), packet.clone(), tx.clone()),
			_ => return Err(self.invalid_state("Finalized")),
		};

		match self.owner.post_tx(&tx, fluff) {
			Ok(true) => {
				info!("Transaction for slate {} posted, fluff: {}", slate_id, fluff);
				self.state = WorkflowState::Broadcast { slate_id, packet };
				Ok(())
			}
			Ok(false) => Err(self.fail(Error::Broadcast(format!(
				"Node did not accept transaction for slate {}",
				slate_id
			)))),
			Err(e) => Err(self.fail(e.into_stage(Error::Broadcast))),
		}
	}

	/// All four steps. Returns the slate id and the final slatepack.
	pub fn run<F>(
		&mut self,
		amount: u64,
		recipient: Option<&SlatepackAddress>,
		foreign: &F,
		fluff: bool,
	) -> Result<(SlateId, Slatepack), Error>
	where
		F: ForeignEndpoint + ?Sized,
	{
		self.initialize(amount, recipient)?;
		self.exchange(foreign)?;
		let (slate_id, packet) = self.finalize()?;
		self.broadcast(fluff)?;
		Ok((slate_id, packet))
	}

	/// Cancel the slate in the wallet, releasing its outputs. Possible in any
	/// state with a known slate except `Broadcast`.
	pub fn cancel(&mut self) -> Result<(), Error> {
		if let WorkflowState::Broadcast { .. } = self.state {
			return Err(self.invalid_state("a state before Broadcast"));
		}
		let slate_id = match &self.slate_id {
			Some(id) => id.clone(),
			None => return Err(self.invalid_state("a state with a slate")),
		};

		self.owner.cancel_tx(None, Some(&slate_id))?;
		warn!("Slate {} cancelled in state {}", slate_id, self.state.name());
		if self.state.error().is_none() {
			self.state = WorkflowState::Failed {
				error: Error::Cancelled(slate_id.to_string()),
				slate_id: Some(slate_id),
			};
		}
		Ok(())
	}

	fn invalid_state(&self, expected: &str) -> Error {
		Error::InvalidState {
			expected: expected.to_string(),
			found: self.state.name().to_string(),
		}
	}

	fn fail(&mut self, error: Error) -> Error {
		error!(
			"Payment failed in state {}, {}",
			self.state.name(),
			error
		);
		self.state = WorkflowState::Failed {
			slate_id: self.slate_id.clone(),
			error: error.clone(),
		};
		error
	}
}

/// The recipient answer must be an armored slatepack the wallet decodes as
/// a send response
fn check_response<O>(owner: &O, response: &Slatepack) -> Result<(), Error>
where
	O: OwnerSession + ?Sized,
{
	if !response.is_armored() {
		return Err(Error::Delivery(
			"Response is not an armored slatepack".to_string(),
		));
	}
	let info = owner
		.decode_slatepack_message(response)
		.map_err(|e| e.into_stage(Error::Delivery))?;
	match info.content {
		SlatePurpose::SendResponse => Ok(()),
		other => Err(Error::Delivery(format!(
			"Expected a SendResponse slatepack, got {}",
			other
		))),
	}
}

fn finalize_response<O>(
	owner: &O,
	slate_id: &SlateId,
	response: &Slatepack,
) -> Result<(Slatepack, Value), Error>
where
	O: OwnerSession + ?Sized,
{
	let info = owner.decode_slatepack_message(response)?;
	match info.content {
		SlatePurpose::SendResponse | SlatePurpose::FullSlate => {}
		other => {
			return Err(Error::TransactionFinalize(format!(
				"Expected a SendResponse slatepack, got {}",
				other
			)))
		}
	}
	check_slate_id(slate_id, &info.slate)?;

	let (slate, packet) = match owner.finalize_tx(response)? {
		SlateOrSlatepack::Slatepack(packet) => {
			let info = owner.decode_slatepack_message(&packet)?;
			(info.slate, packet)
		}
		SlateOrSlatepack::Slate(slate) => {
			let packet = owner.encode_slatepack_message(&slate, SlatePurpose::FullSlate, None)?;
			(slate, packet)
		}
	};
	check_slate_id(slate_id, &slate)?;

	let tx = slate.tx().cloned().ok_or_else(|| {
		Error::TransactionFinalize(format!(
			"Finalized slate {} has no transaction",
			slate_id
		))
	})?;
	Ok((packet, tx))
}

fn check_slate_id(expected: &SlateId, slate: &Slate) -> Result<(), Error> {
	let found = slate.id()?;
	if &found != expected {
		return Err(Error::TransactionFinalize(format!(
			"Slate {} does not belong to the active slate {}",
			found, expected
		)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::slate::SlatepackInfo;
	use crate::types::TxLogEntry;
	use pretty_assertions::assert_eq;
	use serde_json::json;
	use std::cell::RefCell;

	// Packets carry "Stage:slate_id" inside the armor, enough to track what
	// the wallet saw.
	fn pack(body: &str) -> String {
		format!("BEGINSLATEPACK. {}. ENDSLATEPACK.", body)
	}

	#[derive(Default)]
	struct TestOwner {
		calls: RefCell<Vec<String>>,
		fail_init: bool,
		post_ok: bool,
		finalized_id: Option<String>,
	}

	impl TestOwner {
		fn new() -> Self {
			TestOwner {
				post_ok: true,
				..TestOwner::default()
			}
		}
		fn calls(&self) -> Vec<String> {
			self.calls.borrow().clone()
		}
		fn log(&self, call: &str) {
			self.calls.borrow_mut().push(call.to_string());
		}
	}

	impl OwnerSession for TestOwner {
		fn init_send_tx(&self, args: &InitTxArgs) -> Result<Slate, Error> {
			self.log("init_send_tx");
			if self.fail_init {
				return Err(Error::OwnerApi("Not enough funds".to_string()));
			}
			Ok(Slate::from_value(json!({"id": "abc-123", "amount": args.amount.to_string()})))
		}
		fn tx_lock_outputs(&self, _slate: &Slate) -> Result<(), Error> {
			self.log("tx_lock_outputs");
			Ok(())
		}
		fn encode_slatepack_message(
			&self,
			slate: &Slate,
			content: SlatePurpose,
			_recipient: Option<&SlatepackAddress>,
		) -> Result<Slatepack, Error> {
			self.log("encode_slatepack_message");
			Ok(Slatepack::new(pack(&format!("{}:{}", content, slate.id()?))))
		}
		fn decode_slatepack_message(&self, slatepack: &Slatepack) -> Result<SlatepackInfo, Error> {
			self.log("decode_slatepack_message");
			let text = slatepack
				.as_str()
				.trim()
				.trim_start_matches("BEGINSLATEPACK.")
				.trim_end_matches("ENDSLATEPACK.")
				.trim()
				.trim_end_matches('.');
			let mut parts = text.splitn(2, ':');
			let content = parts.next().unwrap_or_default();
			let id = parts.next().unwrap_or_default();
			Ok(SlatepackInfo {
				content: serde_json::from_value(json!(content))?,
				sender: None,
				recipient: None,
				slate: Slate::from_value(json!({"id": id, "tx": {"kernels": []}})),
			})
		}
		fn finalize_tx(&self, slatepack: &Slatepack) -> Result<SlateOrSlatepack, Error> {
			self.log("finalize_tx");
			let info = self.decode_slatepack_message(slatepack)?;
			let id = match &self.finalized_id {
				Some(id) => id.clone(),
				None => info.slate.id()?.to_string(),
			};
			Ok(SlateOrSlatepack::Slatepack(Slatepack::new(pack(&format!(
				"FullSlate:{}",
				id
			)))))
		}
		fn post_tx(&self, _tx: &Value, _fluff: bool) -> Result<bool, Error> {
			self.log("post_tx");
			Ok(self.post_ok)
		}
		fn retrieve_txs(
			&self,
			_refresh_from_node: bool,
			_tx_id: Option<u32>,
			_tx_slate_id: Option<&SlateId>,
		) -> Result<(bool, Vec<TxLogEntry>), Error> {
			Ok((true, vec![]))
		}
		fn cancel_tx(&self, _tx_id: Option<u32>, _slate_id: Option<&SlateId>) -> Result<(), Error> {
			self.log("cancel_tx");
			Ok(())
		}
	}

	struct TestForeign {
		version: u16,
		response: Result<Slatepack, Error>,
	}

	impl ForeignEndpoint for TestForeign {
		fn url(&self) -> &str {
			"http://recipient:3415/v2/foreign"
		}
		fn check_version(&self) -> Result<u16, Error> {
			Ok(self.version)
		}
		fn receive_tx(&self, _slatepack: &Slatepack) -> Result<Slatepack, Error> {
			self.response.clone()
		}
	}

	fn responding(packet: &str) -> TestForeign {
		TestForeign {
			version: 2,
			response: Ok(Slatepack::new(packet)),
		}
	}

	#[test]
	fn full_run() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		let (slate_id, packet) = wf
			.run(1_230_000_000, None, &responding(&pack("SendResponse:abc-123")), false)
			.unwrap();
		assert_eq!(slate_id, SlateId::new("abc-123"));
		assert_eq!(packet.as_str(), pack("FullSlate:abc-123"));
		assert_eq!(wf.state().name(), "Broadcast");
		// late lock is on by default
		assert!(!owner.calls().contains(&"tx_lock_outputs".to_string()));
	}

	#[test]
	fn lock_now_locks_once_before_encoding() {
		let owner = TestOwner::new();
		let params = SendParams {
			late_lock: false,
			..SendParams::default()
		};
		let mut wf = PaymentWorkflow::new(&owner, params);
		wf.initialize(5, None).unwrap();
		assert_eq!(
			owner.calls(),
			vec!["init_send_tx", "tx_lock_outputs", "encode_slatepack_message"]
		);
		match wf.state() {
			WorkflowState::Initialized { outputs_locked, .. } => assert!(outputs_locked),
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn zero_amount() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		assert!(matches!(wf.initialize(0, None), Err(Error::TransactionInit(_))));
		assert!(owner.calls().is_empty());
		assert_eq!(wf.state().name(), "Failed");
	}

	#[test]
	fn wallet_refuses_init() {
		let owner = TestOwner {
			fail_init: true,
			..TestOwner::new()
		};
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		let err = wf.initialize(5, None).unwrap_err();
		assert_eq!(
			err,
			Error::TransactionInit("Owner API error, Not enough funds".to_string())
		);
		assert_eq!(wf.slate_id(), None);
		// failed is absorbing
		assert!(matches!(
			wf.initialize(5, None),
			Err(Error::InvalidState { .. })
		));
	}

	#[test]
	fn wrong_state_has_no_side_effects() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		assert_eq!(
			wf.finalize().unwrap_err(),
			Error::InvalidState {
				expected: "Exchanged".to_string(),
				found: "Uninitialized".to_string()
			}
		);
		assert_eq!(wf.state(), &WorkflowState::Uninitialized);
		assert!(owner.calls().is_empty());
	}

	#[test]
	fn delivery_failure_stops_the_payment() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		let foreign = TestForeign {
			version: 2,
			response: Err(Error::Delivery("status 500".to_string())),
		};
		assert_eq!(
			wf.exchange(&foreign).unwrap_err(),
			Error::Delivery("status 500".to_string())
		);
		assert!(matches!(wf.finalize(), Err(Error::InvalidState { .. })));
		assert!(!owner.calls().contains(&"finalize_tx".to_string()));
		assert_eq!(wf.state().slate_id(), Some(&SlateId::new("abc-123")));
	}

	#[test]
	fn old_recipient_and_empty_response() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		let foreign = TestForeign {
			version: 1,
			response: Ok(Slatepack::new(pack("SendResponse:abc-123"))),
		};
		assert!(matches!(wf.exchange(&foreign), Err(Error::Delivery(_))));

		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		assert!(matches!(
			wf.exchange(&responding("  ")),
			Err(Error::Delivery(_))
		));
	}

	#[test]
	fn response_for_another_slate() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		wf.accept_response(Slatepack::new(pack("SendResponse:zzz-999")))
			.unwrap();
		assert!(matches!(
			wf.finalize(),
			Err(Error::TransactionFinalize(_))
		));
		assert!(!owner.calls().contains(&"finalize_tx".to_string()));
		assert!(matches!(wf.broadcast(true), Err(Error::InvalidState { .. })));
		assert!(!owner.calls().contains(&"post_tx".to_string()));
	}

	#[test]
	fn initial_packet_is_not_a_response() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		assert!(matches!(
			wf.accept_response(Slatepack::new(pack("SendInitial:abc-123"))),
			Err(Error::Delivery(_))
		));
		assert_eq!(wf.state().name(), "Failed");
		assert!(matches!(wf.finalize(), Err(Error::InvalidState { .. })));
		assert!(!owner.calls().contains(&"finalize_tx".to_string()));
	}

	#[test]
	fn recipient_echoes_the_initial_packet() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		let (_, packet) = wf.initialize(5, None).unwrap();
		let err = wf.exchange(&responding(packet.as_str())).unwrap_err();
		assert_eq!(
			err,
			Error::Delivery("Expected a SendResponse slatepack, got SendInitial".to_string())
		);
		assert_eq!(wf.state().error(), Some(&err));
		assert!(!owner.calls().contains(&"finalize_tx".to_string()));
	}

	#[test]
	fn garbage_response_never_reaches_exchanged() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		assert!(matches!(
			wf.exchange(&responding("<html>502 Bad Gateway</html>")),
			Err(Error::Delivery(_))
		));
		assert_eq!(wf.state().name(), "Failed");
		assert_eq!(wf.state().slate_id(), Some(&SlateId::new("abc-123")));

		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		assert!(matches!(
			wf.accept_response(Slatepack::new("not a slatepack")),
			Err(Error::Delivery(_))
		));
		assert_eq!(wf.state().name(), "Failed");

		// armored but undecodable
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		assert!(matches!(
			wf.accept_response(Slatepack::new(pack("Garbled:abc-123"))),
			Err(Error::Delivery(_))
		));
		assert!(!owner.calls().contains(&"finalize_tx".to_string()));
	}

	#[test]
	fn finalized_slate_mismatch() {
		let owner = TestOwner {
			finalized_id: Some("other".to_string()),
			..TestOwner::new()
		};
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.initialize(5, None).unwrap();
		wf.accept_response(Slatepack::new(pack("SendResponse:abc-123")))
			.unwrap();
		assert!(matches!(
			wf.finalize(),
			Err(Error::TransactionFinalize(_))
		));
	}

	#[test]
	fn broadcast_rejected() {
		let owner = TestOwner {
			post_ok: false,
			..TestOwner::new()
		};
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		let err = wf
			.run(5, None, &responding(&pack("SendResponse:abc-123")), true)
			.unwrap_err();
		assert!(matches!(err, Error::Broadcast(_)));
		assert_eq!(wf.state().error(), Some(&err));
	}

	#[test]
	fn cancel_after_failure() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		assert!(matches!(wf.cancel(), Err(Error::InvalidState { .. })));

		wf.initialize(5, None).unwrap();
		let foreign = TestForeign {
			version: 2,
			response: Err(Error::Delivery("refused".to_string())),
		};
		let _ = wf.exchange(&foreign);
		wf.cancel().unwrap();
		assert_eq!(owner.calls().last().unwrap(), "cancel_tx");
		assert_eq!(
			wf.state().error(),
			Some(&Error::Delivery("refused".to_string()))
		);
	}

	#[test]
	fn no_cancel_after_broadcast() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::new(&owner, SendParams::default());
		wf.run(5, None, &responding(&pack("SendResponse:abc-123")), false)
			.unwrap();
		assert!(matches!(wf.cancel(), Err(Error::InvalidState { .. })));
	}

	#[test]
	fn resume_from_response() {
		let owner = TestOwner::new();
		let mut wf = PaymentWorkflow::resume(
			&owner,
			SendParams::default(),
			Slatepack::new(pack("SendResponse:abc-123")),
		)
		.unwrap();
		assert_eq!(wf.slate_id(), Some(&SlateId::new("abc-123")));
		let (id, packet) = wf.finalize().unwrap();
		assert_eq!(id.as_str(), "abc-123");
		assert_eq!(packet.as_str(), pack("FullSlate:abc-123"));
		wf.broadcast(false).unwrap();
	}
}
