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

//! Serde helpers for the wallet JSON format. The wallet writes u64 values as
//! strings and accepts both forms on input.

/// Serializes a u64 as a string, reads a string or a number
pub mod string_or_u64 {
	use serde::{de, Deserializer, Serializer};
	use std::fmt;

	/// Serialize as string
	pub fn serialize<S>(num: &u64, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&num.to_string())
	}

	/// Accept a string of digits or an integer
	pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct U64Visitor;
		impl<'de> de::Visitor<'de> for U64Visitor {
			type Value = u64;
			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("a string containing digits or an int fitting into u64")
			}
			fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
				Ok(v)
			}
			fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
			where
				E: de::Error,
			{
				if v < 0 {
					Err(E::invalid_value(de::Unexpected::Signed(v), &self))
				} else {
					Ok(v as u64)
				}
			}
			fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
			where
				E: de::Error,
			{
				s.parse()
					.map_err(|_| E::invalid_value(de::Unexpected::Str(s), &self))
			}
		}
		deserializer.deserialize_any(U64Visitor)
	}
}

/// Same as `string_or_u64` for optional values
pub mod opt_string_or_u64 {
	use serde::{Deserialize, Deserializer, Serializer};

	#[derive(Deserialize)]
	struct Wrapper(#[serde(with = "super::string_or_u64")] u64);

	/// Serialize as string or null
	pub fn serialize<S>(num: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match num {
			Some(n) => serializer.serialize_str(&n.to_string()),
			None => serializer.serialize_none(),
		}
	}

	/// Accept null, a string of digits or an integer
	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Option::<Wrapper>::deserialize(deserializer).map(|w| w.map(|Wrapper(n)| n))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[derive(Serialize, Deserialize, Debug, PartialEq)]
	struct Amounts {
		#[serde(with = "string_or_u64")]
		amount: u64,
		#[serde(with = "opt_string_or_u64", default)]
		fee: Option<u64>,
	}

	#[test]
	fn reads_both_forms() {
		let a: Amounts = serde_json::from_value(json!({"amount": "1230000000", "fee": 8000000})).unwrap();
		assert_eq!(
			a,
			Amounts {
				amount: 1_230_000_000,
				fee: Some(8_000_000)
			}
		);
		let a: Amounts = serde_json::from_value(json!({"amount": 5})).unwrap();
		assert_eq!(a.fee, None);
		assert!(serde_json::from_value::<Amounts>(json!({"amount": "-5"})).is_err());
	}

	#[test]
	fn writes_strings() {
		let a = Amounts {
			amount: 42,
			fee: None,
		};
		assert_eq!(
			serde_json::to_value(&a).unwrap(),
			json!({"amount": "42", "fee": null})
		);
	}
}
