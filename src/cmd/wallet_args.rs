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

use crate::config::{self, ChainTypes, GlobalPayConfig, SendConfig, WalletConfig};
use clap::ArgMatches;
use log::{debug, info};
use mwc_pay_controller::command::{self, FinalizeArgs, SendArgs, TxsArgs};
use mwc_pay_controller::{controller, Error};
use mwc_pay_libwallet::{self as libwallet, SendParams, SlateId, Slatepack, SlatepackAddress};
use mwc_pay_util::{amount_from_hr_string, ZeroingString};
use std::convert::TryFrom;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::time::Duration;

/// Footer line closing an armored slatepack
const SLATEPACK_FOOTER: &str = "ENDSLATEPACK.";

// define what to do on argument error
macro_rules! arg_parse {
	( $r:expr ) => {
		match $r {
			Ok(res) => res,
			Err(e) => {
				return Err(Error::from(e));
			}
		}
	};
}

/// Argument parsing errors
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
	#[error("Invalid Arguments: {0}")]
	ArgumentError(String),
	#[error("{0}")]
	InvalidAmount(String),
	#[error("Parsing IO error: {0}")]
	IOError(String),
	#[error("Wallet configuration error: {0}")]
	Config(String),
}

impl From<ParseError> for Error {
	fn from(e: ParseError) -> Error {
		match e {
			ParseError::InvalidAmount(msg) => libwallet::Error::InvalidAmount(msg).into(),
			e => Error::ArgumentError(format!("{}", e)),
		}
	}
}

impl From<config::ConfigError> for ParseError {
	fn from(e: config::ConfigError) -> ParseError {
		ParseError::Config(format!("{}", e))
	}
}

fn prompt_password_stdout(prompt: &str) -> Result<ZeroingString, ParseError> {
	rpassword::prompt_password_stdout(prompt)
		.map(ZeroingString::from)
		.map_err(|e| ParseError::IOError(format!("Unable to read password, {}", e)))
}

// instantiate wallet (needed by most functions)
fn prompt_password(password: &Option<ZeroingString>) -> Result<ZeroingString, ParseError> {
	match password {
		None => prompt_password_stdout("Password: "),
		Some(p) => Ok(p.clone()),
	}
}

// parses a required value, or throws error with message otherwise
fn parse_required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str, ParseError> {
	let arg = args.value_of(name);
	match arg {
		Some(ar) => Ok(ar),
		None => {
			let msg = format!("Value for argument '{}' is required in this context", name,);
			Err(ParseError::ArgumentError(msg))
		}
	}
}

// parses a number, or throws error with message otherwise
fn parse_u64(arg: &str, name: &str) -> Result<u64, ParseError> {
	let val = arg.parse::<u64>();
	match val {
		Ok(v) => Ok(v),
		Err(e) => {
			let msg = format!("Could not parse {} as a whole number. e={}", name, e);
			Err(ParseError::ArgumentError(msg))
		}
	}
}

fn parse_u64_or_none(args: &ArgMatches, name: &str) -> Result<Option<u64>, ParseError> {
	args.value_of(name).map(|v| parse_u64(v, name)).transpose()
}

fn parse_u32_or_none(args: &ArgMatches, name: &str) -> Result<Option<u32>, ParseError> {
	parse_u64_or_none(args, name)?
		.map(|v| {
			u32::try_from(v).map_err(|_| {
				let msg = format!("{} can't be larger than {}, got {}", name, u32::MAX, v);
				ParseError::ArgumentError(msg)
			})
		})
		.transpose()
}

/// Arguments every command needs
#[derive(Clone)]
pub struct GlobalArgs {
	/// Chain the wallet runs on
	pub chain_type: ChainTypes,
	/// Owner API settings with the command line overrides applied
	pub wallet_config: WalletConfig,
	/// Password given on the command line
	pub password: Option<ZeroingString>,
}

impl GlobalArgs {
	/// Request timeout, none when not configured
	pub fn timeout(&self) -> Option<Duration> {
		self.wallet_config
			.http_timeout_secs
			.map(Duration::from_secs)
	}
}

pub fn parse_global_args(
	config: &WalletConfig,
	args: &ArgMatches,
) -> Result<GlobalArgs, ParseError> {
	let mut wallet_config = config.clone();
	if let Some(url) = args.value_of("owner_api_url") {
		wallet_config.owner_api_url = Some(url.to_owned());
	}
	if let Some(path) = args.value_of("api_secret_path") {
		wallet_config.api_secret_path = Some(path.to_owned());
	}
	if let Some(name) = args.value_of("wallet_name") {
		wallet_config.wallet_name = Some(name.to_owned());
	}
	let password = args
		.value_of("pass")
		.map(|p| ZeroingString::from(p.to_owned()));

	Ok(GlobalArgs {
		chain_type: wallet_config.chain_type(),
		wallet_config,
		password,
	})
}

/// Send parameters from the config file
pub fn send_params(config: &SendConfig) -> SendParams {
	SendParams {
		src_acct_name: None,
		minimum_confirmations: config.minimum_confirmations,
		max_outputs: config.max_outputs,
		num_change_outputs: config.num_change_outputs,
		selection_strategy_is_use_all: config.selection_strategy_is_use_all,
		ttl_blocks: config.ttl_blocks,
		late_lock: config.late_lock,
		target_slate_version: config.target_slate_version,
		message: None,
	}
}

pub fn parse_send_args(args: &ArgMatches, config: &SendConfig) -> Result<SendArgs, ParseError> {
	// amount
	let amount = parse_required(args, "amount")?;
	let amount =
		amount_from_hr_string(amount).map_err(|e| ParseError::InvalidAmount(format!("{}", e)))?;

	let mut params = send_params(config);

	if let Some(min_c) = parse_u64_or_none(args, "minimum_confirmations")? {
		params.minimum_confirmations = min_c;
	}
	if let Some(change_outputs) = parse_u32_or_none(args, "change_outputs")? {
		params.num_change_outputs = change_outputs;
	}
	if let Some(strategy) = args.value_of("selection_strategy") {
		params.selection_strategy_is_use_all = strategy == "all";
	}
	// zero disables the ttl
	if let Some(ttl) = parse_u64_or_none(args, "ttl_blocks")? {
		params.ttl_blocks = match ttl {
			0 => None,
			t => Some(t),
		};
	}
	if args.is_present("lock_now") {
		params.late_lock = false;
	}
	params.message = args.value_of("message").map(|m| m.to_owned());

	let dest = match args.value_of("dest") {
		Some(d) if !d.starts_with("http://") && !d.starts_with("https://") => {
			return Err(ParseError::ArgumentError(format!(
				"Recipient url must start with http:// or https://, got {}",
				d
			)))
		}
		d => d.map(|d| d.to_owned()),
	};

	let recipient = args.value_of("slatepack_address").map(SlatepackAddress::new);

	Ok(SendArgs {
		amount,
		dest,
		recipient,
		params,
		fluff: config.fluff || args.is_present("fluff"),
		post: !args.is_present("nopost"),
	})
}

pub fn parse_finalize_args(
	args: &ArgMatches,
	config: &SendConfig,
) -> Result<FinalizeArgs, ParseError> {
	let response = match args.value_of("input") {
		Some(input) => read_slatepack_input(input)?,
		None => {
			println!("Paste the response slatepack:");
			read_slatepack(&mut io::stdin().lock())?
		}
	};
	Ok(FinalizeArgs {
		response,
		params: send_params(config),
		fluff: config.fluff || args.is_present("fluff"),
		post: !args.is_present("nopost"),
	})
}

pub fn parse_txs_args(args: &ArgMatches) -> Result<TxsArgs, ParseError> {
	Ok(TxsArgs {
		tx_slate_id: args.value_of("tx_slate_id").map(SlateId::new),
		refresh: !args.is_present("no_refresh"),
	})
}

pub fn parse_cancel_args(args: &ArgMatches) -> Result<SlateId, ParseError> {
	let slate_id = parse_required(args, "tx_slate_id")?.trim();
	if slate_id.is_empty() {
		return Err(ParseError::ArgumentError(
			"Slate id can't be empty".to_owned(),
		));
	}
	Ok(SlateId::new(slate_id))
}

/// Slatepack given on the command line, either the text or a file holding it
pub fn read_slatepack_input(input: &str) -> Result<Slatepack, ParseError> {
	let path = Path::new(input);
	if path.is_file() {
		let content = fs::read_to_string(path).map_err(|e| {
			ParseError::IOError(format!("Unable to read slatepack from {}, {}", input, e))
		})?;
		return read_slatepack(&mut content.as_bytes());
	}
	read_slatepack(&mut input.as_bytes())
}

/// Read an armored slatepack, up to the footer or the end of input. Lines
/// are joined with a single space.
pub fn read_slatepack<R: BufRead>(reader: &mut R) -> Result<Slatepack, ParseError> {
	let mut parts: Vec<String> = vec![];
	let mut line = String::new();
	loop {
		line.clear();
		let read = reader
			.read_line(&mut line)
			.map_err(|e| ParseError::IOError(format!("Unable to read slatepack, {}", e)))?;
		if read == 0 {
			break;
		}
		let trimmed = line.trim();
		if !trimmed.is_empty() {
			parts.push(trimmed.to_owned());
		}
		if trimmed.ends_with(SLATEPACK_FOOTER) {
			break;
		}
	}
	let slatepack = Slatepack::new(parts.join(" "));
	if slatepack.is_empty() {
		return Err(ParseError::ArgumentError(
			"No slatepack was provided".to_owned(),
		));
	}
	Ok(slatepack)
}

pub fn wallet_command(args: &ArgMatches, config: &GlobalPayConfig) -> Result<(), Error> {
	let global_args = arg_parse!(parse_global_args(&config.members.wallet, args));
	let send_config = &config.members.send;

	// parse everything before the wallet is opened
	let (name, sub_args) = match args.subcommand() {
		(name, Some(sub_args)) => (name, sub_args),
		_ => {
			return Err(Error::ArgumentError(
				"Unknown wallet command, use 'help' for details".to_owned(),
			))
		}
	};
	let wallet_cmd = match name {
		"send" => WalletCommand::Send(arg_parse!(parse_send_args(sub_args, send_config))),
		"finalize" => {
			WalletCommand::Finalize(arg_parse!(parse_finalize_args(sub_args, send_config)))
		}
		"txs" => WalletCommand::Txs(arg_parse!(parse_txs_args(sub_args))),
		"cancel" => WalletCommand::Cancel(arg_parse!(parse_cancel_args(sub_args))),
		_ => {
			return Err(Error::ArgumentError(format!(
				"Unknown wallet command '{}', use 'help' for details",
				name
			)))
		}
	};

	let credentials =
		config::load_owner_credentials(&global_args.wallet_config, &global_args.chain_type)?;
	let password = arg_parse!(prompt_password(&global_args.password));
	let timeout = global_args.timeout();
	let dark_scheme = global_args
		.wallet_config
		.dark_background_color_scheme
		.unwrap_or(true);
	info!(
		"Running '{}' against {} on {}",
		name,
		credentials.url,
		global_args.chain_type.shortname()
	);

	controller::owner_single_use(
		credentials,
		timeout,
		global_args.wallet_config.wallet_name.as_deref(),
		&password,
		|owner| match &wallet_cmd {
			WalletCommand::Send(a) => {
				debug!("Sending {} nano MWC, recipient url: {:?}", a.amount, a.dest);
				command::send(owner, a, timeout, |_| {
					Ok(read_slatepack(&mut io::stdin().lock())?)
				})
				.map(|_| ())
			}
			WalletCommand::Finalize(a) => command::finalize(owner, a).map(|_| ()),
			WalletCommand::Txs(a) => command::txs(owner, a, dark_scheme).map(|_| ()),
			WalletCommand::Cancel(slate_id) => command::cancel(owner, slate_id),
		},
	)
}

enum WalletCommand {
	Send(SendArgs),
	Finalize(FinalizeArgs),
	Txs(TxsArgs),
	Cancel(SlateId),
}
