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

//! Logging wrapper to be used throughout all crates in the workspace

use log::{info, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use std::cmp;

const STDOUT_PATTERN: &str = "{d(%Y%m%d %H:%M:%S%.3f)} {h({l})} {M} - {m}{n}";
const FILE_PATTERN: &str = "{d(%Y%m%d %H:%M:%S%.3f)} {l} {M} - {m}{n}";

/// Log level types
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
	/// Error
	Error,
	/// Warning
	Warning,
	/// Info
	Info,
	/// Debug
	Debug,
	/// Trace
	Trace,
}

impl LogLevel {
	fn filter(&self) -> LevelFilter {
		match self {
			LogLevel::Error => LevelFilter::Error,
			LogLevel::Warning => LevelFilter::Warn,
			LogLevel::Info => LevelFilter::Info,
			LogLevel::Debug => LevelFilter::Debug,
			LogLevel::Trace => LevelFilter::Trace,
		}
	}
}

/// Logging config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
	/// whether to log to stdout. Console output goes to stderr so it never
	/// mixes with the slatepacks printed on stdout.
	pub log_to_stdout: bool,
	/// logging level for stdout
	pub stdout_log_level: LogLevel,
	/// whether to log to file
	pub log_to_file: bool,
	/// log file level
	pub file_log_level: LogLevel,
	/// Log file path
	pub log_file_path: String,
	/// Whether to append to log or replace
	pub log_file_append: bool,
}

impl Default for LoggingConfig {
	fn default() -> LoggingConfig {
		LoggingConfig {
			log_to_stdout: true,
			stdout_log_level: LogLevel::Warning,
			log_to_file: false,
			file_log_level: LogLevel::Info,
			log_file_path: String::from("mwc-pay.log"),
			log_file_append: true,
		}
	}
}

/// Logger setup failures
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
	/// (path, reason)
	#[error("Unable to open log file {0}, {1}")]
	LogFile(String, String),
	/// Rejected log4rs configuration
	#[error("Invalid logging configuration, {0}")]
	Config(String),
	/// A logger is already installed for this process
	#[error("Logger is already initialized, {0}")]
	AlreadyInitialized(String),
}

/// Install the process logger
pub fn init_logger(config: &LoggingConfig) -> Result<(), LoggerError> {
	let mut appenders = Vec::new();
	let mut root = Root::builder();
	let mut max_level = LevelFilter::Off;

	if config.log_to_stdout {
		let level = config.stdout_log_level.filter();
		let console = ConsoleAppender::builder()
			.target(Target::Stderr)
			.encoder(Box::new(PatternEncoder::new(STDOUT_PATTERN)))
			.build();
		appenders.push(
			Appender::builder()
				.filter(Box::new(ThresholdFilter::new(level)))
				.build("stdout", Box::new(console)),
		);
		root = root.appender("stdout");
		max_level = cmp::max(max_level, level);
	}

	if config.log_to_file {
		let level = config.file_log_level.filter();
		let file = FileAppender::builder()
			.append(config.log_file_append)
			.encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
			.build(&config.log_file_path)
			.map_err(|e| LoggerError::LogFile(config.log_file_path.clone(), format!("{}", e)))?;
		appenders.push(
			Appender::builder()
				.filter(Box::new(ThresholdFilter::new(level)))
				.build("file", Box::new(file)),
		);
		root = root.appender("file");
		max_level = cmp::max(max_level, level);
	}

	let log_config = Config::builder()
		.appenders(appenders)
		.build(root.build(max_level))
		.map_err(|e| LoggerError::Config(format!("{}", e)))?;

	log4rs::init_config(log_config)
		.map_err(|e| LoggerError::AlreadyInitialized(format!("{}", e)))?;

	info!(
		"Logger started. stdout: {:?}, file: {:?}",
		config.log_to_stdout.then(|| config.stdout_log_level),
		config.log_to_file.then(|| &config.log_file_path)
	);
	Ok(())
}

/// Console logger for tests. Safe to call from every test, only the first
/// call installs the logger.
pub fn init_test_logger() {
	let config = LoggingConfig {
		stdout_log_level: LogLevel::Debug,
		..LoggingConfig::default()
	};
	let _ = init_logger(&config);
}
