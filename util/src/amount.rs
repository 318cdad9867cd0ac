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

//! Conversion between human readable MWC amounts and nano-MWC

use bigdecimal::{BigDecimal, ToPrimitive};
use std::str::FromStr;

/// A MWC is divisible to 10^9
pub const MWC_BASE: u64 = 1_000_000_000;

/// Amount parsing error
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AmountError {
	/// (input, reason)
	#[error("Invalid amount '{0}', {1}")]
	InvalidAmount(String, String),
}

/// Parse a decimal MWC amount, e.g. "1.23", into nano-MWC.
/// Only plain digits with an optional decimal point are accepted, so
/// negative, signed, exponent and sub nano-MWC precision input is rejected.
pub fn amount_from_hr_string(amount: &str) -> Result<u64, AmountError> {
	let invalid =
		|reason: String| AmountError::InvalidAmount(amount.to_string(), reason);

	let trimmed = amount.trim();
	if trimmed.is_empty() {
		return Err(invalid("amount is empty".to_string()));
	}

	if trimmed.starts_with('-') {
		return Err(invalid("amount can't be negative".to_string()));
	}
	// digits with at most one decimal point, no sign or exponent
	let plain = trimmed.chars().all(|c| c.is_ascii_digit() || c == '.')
		&& trimmed.matches('.').count() <= 1
		&& trimmed.chars().any(|c| c.is_ascii_digit());
	if !plain {
		return Err(invalid("not a decimal number".to_string()));
	}

	let value = BigDecimal::from_str(trimmed)
		.map_err(|e| invalid(format!("not a decimal number, {}", e)))?;

	let nano = value * BigDecimal::from(MWC_BASE);
	if !nano.is_integer() {
		return Err(invalid(
			"MWC has only 9 decimal places, the amount is too precise".to_string(),
		));
	}
	nano.to_u64()
		.ok_or_else(|| invalid("amount is too large".to_string()))
}

/// Format nano-MWC as MWC. With `truncate` the trailing zeros are dropped.
pub fn amount_to_hr_string(amount: u64, truncate: bool) -> String {
	let whole = amount / MWC_BASE;
	let fraction = format!("{:09}", amount % MWC_BASE);
	if !truncate {
		return format!("{}.{}", whole, fraction);
	}
	let fraction = fraction.trim_end_matches('0');
	if fraction.is_empty() {
		whole.to_string()
	} else {
		format!("{}.{}", whole, fraction)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn parse_decimal_amounts() {
		assert_eq!(amount_from_hr_string("1.23").unwrap(), 1_230_000_000);
		assert_eq!(amount_from_hr_string("0.000000001").unwrap(), 1);
		assert_eq!(amount_from_hr_string(" 42 ").unwrap(), 42 * MWC_BASE);
		assert_eq!(amount_from_hr_string("0").unwrap(), 0);
		assert_eq!(amount_from_hr_string(".5").unwrap(), 500_000_000);
		assert_eq!(
			amount_from_hr_string("18446744073.709551615").unwrap(),
			std::u64::MAX
		);
	}

	#[test]
	fn reject_bad_amounts() {
		for bad in &["", "abc", "-1", "-0.5", "1.0000000001", "1,5", "18446744073.709551616",
			"1e3", "1E-2", "+1", "1.2.3", ".", "0x10"] {
			match amount_from_hr_string(bad) {
				Err(AmountError::InvalidAmount(input, _)) => assert_eq!(&input, bad),
				Ok(v) => panic!("'{}' parsed into {}", bad, v),
			}
		}
	}

	#[test]
	fn format_amounts() {
		assert_eq!(amount_to_hr_string(1_230_000_000, false), "1.230000000");
		assert_eq!(amount_to_hr_string(1_230_000_000, true), "1.23");
		assert_eq!(amount_to_hr_string(5 * MWC_BASE, true), "5");
		assert_eq!(amount_to_hr_string(1, true), "0.000000001");
	}
}
