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

use crate::command::SendOutcome;
use crate::libwallet::{SlateId, Slatepack, TxLogEntry};
use crate::util::amount_to_hr_string;
use colored::*;

/// Print a slatepack with its slate id
pub fn slatepack(slate_id: &SlateId, packet: &Slatepack, title: &str) {
	println!();
	println!("{}", title.bright_green());
	println!("Slate: {}", slate_id.to_string().bright_blue());
	println!();
	println!("{}", packet);
	println!();
}

/// Print the result of a completed payment with its final slatepack
pub fn send_result(outcome: &SendOutcome) {
	let status = if outcome.posted {
		format!(
			"Transaction for slate {} is finalized and posted",
			outcome.slate_id
		)
		.bright_green()
	} else {
		format!(
			"Transaction for slate {} is finalized but not posted",
			outcome.slate_id
		)
		.bright_yellow()
	};
	println!("{}", status);
	println!();
	println!("{}", outcome.slatepack);
	println!();
}

/// Hint for a payment that stopped after the wallet created its slate
pub fn unfinished_slate(slate_id: &SlateId) {
	eprintln!(
		"{}",
		format!(
			"Payment for slate {} is not completed. If its outputs are locked, \
			 release them with: mwc-pay cancel {}",
			slate_id, slate_id
		)
		.bright_yellow()
	);
}

/// Display transaction log in a pretty way
pub fn txs(txs: &[TxLogEntry], validated: bool, dark_background_color_scheme: bool) {
	println!();
	println!("{}", "Transaction Log".magenta());
	println!();

	let mut table = table!();

	table.set_titles(row![
		bMG->"Id",
		bMG->"Type",
		bMG->"Shared Transaction Id",
		bMG->"Creation Time",
		bMG->"TTL Cutoff Height",
		bMG->"Confirmed?",
		bMG->"Confirmation Time",
		bMG->"Num. \nInputs",
		bMG->"Num. \nOutputs",
		bMG->"Amount \nCredited",
		bMG->"Amount \nDebited",
		bMG->"Fee",
		bMG->"Net \nDifference",
	]);

	for t in txs {
		let id = format!("{}", t.id);
		let slate_id = match &t.tx_slate_id {
			Some(m) => format!("{}", m),
			None => "None".to_owned(),
		};
		let entry_type = format!("{}", t.tx_type);
		let creation_ts = format!("{}", t.creation_ts.format("%Y-%m-%d %H:%M:%S"));
		let ttl_cutoff_height = match t.ttl_cutoff_height {
			Some(b) => format!("{}", b),
			None => "None".to_owned(),
		};
		let confirmation_ts = match t.confirmation_ts {
			Some(m) => format!("{}", m.format("%Y-%m-%d %H:%M:%S")),
			None => "None".to_owned(),
		};
		let confirmed = format!("{}", t.confirmed);
		let num_inputs = format!("{}", t.num_inputs);
		let num_outputs = format!("{}", t.num_outputs);
		let amount_credited = amount_to_hr_string(t.amount_credited, true);
		let amount_debited = amount_to_hr_string(t.amount_debited, true);
		let fee = match t.fee {
			Some(f) => amount_to_hr_string(f, true),
			None => "None".to_owned(),
		};
		let net_diff = match t.net_change() {
			n if n >= 0 => amount_to_hr_string(n as u64, true),
			n => format!("-{}", amount_to_hr_string(n.unsigned_abs() as u64, true)),
		};

		if dark_background_color_scheme {
			table.add_row(row![
				bFC->id,
				bFC->entry_type,
				bFC->slate_id,
				bFB->creation_ts,
				bFB->ttl_cutoff_height,
				bFC->confirmed,
				bFB->confirmation_ts,
				bFC->num_inputs,
				bFC->num_outputs,
				bFG->amount_credited,
				bFR->amount_debited,
				bFR->fee,
				bFY->net_diff,
			]);
		} else if t.confirmed {
			table.add_row(row![
				bFD->id,
				bFb->entry_type,
				bFD->slate_id,
				bFB->creation_ts,
				bFB->ttl_cutoff_height,
				bFg->confirmed,
				bFB->confirmation_ts,
				bFD->num_inputs,
				bFD->num_outputs,
				bFG->amount_credited,
				bFD->amount_debited,
				bFD->fee,
				bFG->net_diff,
			]);
		} else {
			table.add_row(row![
				bFD->id,
				bFb->entry_type,
				bFD->slate_id,
				bFB->creation_ts,
				bFB->ttl_cutoff_height,
				bFR->confirmed,
				bFB->confirmation_ts,
				bFD->num_inputs,
				bFD->num_outputs,
				bFG->amount_credited,
				bFD->amount_debited,
				bFD->fee,
				bFG->net_diff,
			]);
		}
	}

	table.set_format(*prettytable::format::consts::FORMAT_NO_COLSEP);
	table.printstd();
	println!();

	if !validated {
		println!(
			"\n{}",
			"WARNING: Wallet failed to verify data. \
			 The above is from local cache and possibly invalid! \
			 (is your `mwc server` offline or broken?)"
				.red()
		);
	}
}
