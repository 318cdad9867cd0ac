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

//! Mwc-pay commands. Each takes an open owner session, the CLI wraps them
//! in `controller::owner_single_use`.

use crate::display;
use crate::impls::HttpDataSender;
use crate::libwallet::{
	ForeignEndpoint, OwnerSession, PaymentWorkflow, SendParams, SlateId, Slatepack,
	SlatepackAddress, TxLogEntry, WorkflowState,
};
use crate::Error;
use std::time::Duration;

/// Arguments for the send command
#[derive(Clone, Debug)]
pub struct SendArgs {
	/// Amount in nano MWC
	pub amount: u64,
	/// Recipient Foreign API url. The slatepack is exchanged by hand when None.
	pub dest: Option<String>,
	/// Recipient slatepack address, encrypts the slatepack for it
	pub recipient: Option<SlatepackAddress>,
	/// Transaction building parameters
	pub params: SendParams,
	/// Skip the dandelion stem phase
	pub fluff: bool,
	/// Post the finalized transaction
	pub post: bool,
}

/// Arguments for the finalize command
#[derive(Clone, Debug)]
pub struct FinalizeArgs {
	/// Response slatepack from the recipient
	pub response: Slatepack,
	/// Parameters of the original send
	pub params: SendParams,
	/// Skip the dandelion stem phase
	pub fluff: bool,
	/// Post the finalized transaction
	pub post: bool,
}

/// Arguments for the txs command
#[derive(Clone, Debug, Default)]
pub struct TxsArgs {
	/// Show only the transaction of this slate
	pub tx_slate_id: Option<SlateId>,
	/// Refresh from the node before reading the log
	pub refresh: bool,
}

/// Result of a completed send or finalize
#[derive(Clone, Debug, PartialEq)]
pub struct SendOutcome {
	/// Slate of the payment
	pub slate_id: SlateId,
	/// Finalized slatepack
	pub slatepack: Slatepack,
	/// Whether the transaction was posted to the node
	pub posted: bool,
}

/// Send `args.amount`. With a destination url the slatepack goes to the
/// recipient Foreign API. Without one, the initial slatepack is printed and
/// `read_response` supplies the recipient answer.
pub fn send<O, R>(
	owner: &O,
	args: &SendArgs,
	timeout: Option<Duration>,
	read_response: R,
) -> Result<SendOutcome, Error>
where
	O: OwnerSession + ?Sized,
	R: FnOnce(&Slatepack) -> Result<Slatepack, Error>,
{
	match &args.dest {
		Some(url) => {
			let sender = HttpDataSender::plain_http(url, timeout)?;
			send_with(owner, Some(&sender), args, read_response)
		}
		None => send_with::<O, HttpDataSender, R>(owner, None, args, read_response),
	}
}

/// `send` with the foreign endpoint supplied by the caller
pub fn send_with<O, F, R>(
	owner: &O,
	foreign: Option<&F>,
	args: &SendArgs,
	read_response: R,
) -> Result<SendOutcome, Error>
where
	O: OwnerSession + ?Sized,
	F: ForeignEndpoint + ?Sized,
	R: FnOnce(&Slatepack) -> Result<Slatepack, Error>,
{
	let mut workflow = PaymentWorkflow::new(owner, args.params.clone());
	let res = drive_send(&mut workflow, foreign, args, read_response);
	if res.is_err() {
		report_unfinished(&workflow);
	}
	let outcome = res?;
	display::send_result(&outcome);
	Ok(outcome)
}

fn drive_send<O, F, R>(
	workflow: &mut PaymentWorkflow<O>,
	foreign: Option<&F>,
	args: &SendArgs,
	read_response: R,
) -> Result<SendOutcome, Error>
where
	O: OwnerSession + ?Sized,
	F: ForeignEndpoint + ?Sized,
	R: FnOnce(&Slatepack) -> Result<Slatepack, Error>,
{
	let (slate_id, packet) = workflow.initialize(args.amount, args.recipient.as_ref())?;
	match foreign {
		Some(foreign) => {
			workflow.exchange(foreign)?;
			display::slatepack(
				&slate_id,
				&packet,
				&format!("Slatepack delivered to {}", foreign.url()),
			);
		}
		None => {
			display::slatepack(
				&slate_id,
				&packet,
				"Send this slatepack to the recipient and paste back the response",
			);
			let response = read_response(&packet)?;
			workflow.accept_response(response)?;
		}
	}
	complete(workflow, args.fluff, args.post)
}

/// Finalize a response slatepack received out of band and post it
pub fn finalize<O>(owner: &O, args: &FinalizeArgs) -> Result<SendOutcome, Error>
where
	O: OwnerSession + ?Sized,
{
	let mut workflow =
		PaymentWorkflow::resume(owner, args.params.clone(), args.response.clone())?;
	let res = complete(&mut workflow, args.fluff, args.post);
	if res.is_err() {
		report_unfinished(&workflow);
	}
	let outcome = res?;
	display::send_result(&outcome);
	Ok(outcome)
}

fn complete<O>(
	workflow: &mut PaymentWorkflow<O>,
	fluff: bool,
	post: bool,
) -> Result<SendOutcome, Error>
where
	O: OwnerSession + ?Sized,
{
	let (slate_id, slatepack) = workflow.finalize()?;
	if post {
		workflow.broadcast(fluff)?;
	} else {
		info!("Slate {} finalized, transaction is not posted", slate_id);
	}
	Ok(SendOutcome {
		slate_id,
		slatepack,
		posted: post,
	})
}

fn report_unfinished<O>(workflow: &PaymentWorkflow<O>)
where
	O: OwnerSession + ?Sized,
{
	if let WorkflowState::Failed {
		slate_id: Some(slate_id),
		..
	} = workflow.state()
	{
		display::unfinished_slate(slate_id);
	}
}

/// Show the transaction log, return the entries shown
pub fn txs<O>(
	owner: &O,
	args: &TxsArgs,
	dark_background_color_scheme: bool,
) -> Result<Vec<TxLogEntry>, Error>
where
	O: OwnerSession + ?Sized,
{
	let (validated, txs) = owner.retrieve_txs(args.refresh, None, args.tx_slate_id.as_ref())?;
	if let Some(id) = &args.tx_slate_id {
		if txs.is_empty() {
			return Err(Error::ArgumentError(format!(
				"No transaction found for slate {}",
				id
			)));
		}
	}
	display::txs(&txs, validated, dark_background_color_scheme);
	Ok(txs)
}

/// Cancel the transaction of a slate and release its locked outputs
pub fn cancel<O>(owner: &O, slate_id: &SlateId) -> Result<(), Error>
where
	O: OwnerSession + ?Sized,
{
	let (_, txs) = owner.retrieve_txs(false, None, Some(slate_id))?;
	let tx = txs.first().ok_or_else(|| {
		Error::ArgumentError(format!("No transaction found for slate {}", slate_id))
	})?;
	if !tx.is_cancellable() {
		return Err(Error::ArgumentError(format!(
			"Transaction {} of slate {} can't be cancelled, type: {:?}, confirmed: {}",
			tx.id, slate_id, tx.tx_type, tx.confirmed
		)));
	}
	owner.cancel_tx(None, Some(slate_id))?;
	warn!("Transaction for slate {} is cancelled", slate_id);
	Ok(())
}
