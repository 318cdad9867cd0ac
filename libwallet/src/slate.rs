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

//! Slates and slatepacks as seen from outside the wallet. Both are opaque:
//! only the slate id and the finalized transaction are ever read.

use crate::error::Error;
use serde_json::Value;
use std::fmt;

const SLATEPACK_HEADER: &str = "BEGINSLATEPACK";
const SLATEPACK_FOOTER: &str = "ENDSLATEPACK.";

/// Slate identifier, the same for every stage of one transaction
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SlateId(String);

impl SlateId {
	/// Wrap an identifier string
	pub fn new<S: Into<String>>(id: S) -> SlateId {
		SlateId(id.into())
	}

	/// Identifier text
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SlateId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Transaction slate in any supported version, kept as the JSON the wallet
/// produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Slate(Value);

impl Slate {
	/// Wrap wallet JSON
	pub fn from_value(value: Value) -> Slate {
		Slate(value)
	}

	/// Slate id. Every slate version stores it as `id`.
	pub fn id(&self) -> Result<SlateId, Error> {
		match self.0.get("id") {
			Some(Value::String(id)) if !id.is_empty() => Ok(SlateId::new(id.as_str())),
			Some(other) => Err(Error::Format(format!("Unexpected slate id {}", other))),
			None => Err(Error::Format("Slate doesn't have an id".to_string())),
		}
	}

	/// Finalized transaction, None until the slate is finalized
	pub fn tx(&self) -> Option<&Value> {
		match self.0.get("tx") {
			None | Some(Value::Null) => None,
			Some(tx) => Some(tx),
		}
	}
}

/// Armored slatepack text
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Slatepack(String);

impl Slatepack {
	/// Wrap slatepack text
	pub fn new<S: Into<String>>(message: S) -> Slatepack {
		Slatepack(message.into())
	}

	/// Slatepack text
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// True for blank text
	pub fn is_empty(&self) -> bool {
		self.0.trim().is_empty()
	}

	/// Has the `BEGINSLATEPACK. ... ENDSLATEPACK.` armor
	pub fn is_armored(&self) -> bool {
		let text = self.0.trim();
		text.starts_with(SLATEPACK_HEADER) && text.ends_with(SLATEPACK_FOOTER)
	}
}

impl fmt::Display for Slatepack {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// What a slatepack carries, named as the wallet names it
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlatePurpose {
	/// Initial send slate
	SendInitial,
	/// Recipient answer to a send slate
	SendResponse,
	/// Invoice
	InvoiceInitial,
	/// Payer answer to an invoice
	InvoiceResponse,
	/// Complete slate
	FullSlate,
}

impl fmt::Display for SlatePurpose {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			SlatePurpose::SendInitial => "SendInitial",
			SlatePurpose::SendResponse => "SendResponse",
			SlatePurpose::InvoiceInitial => "InvoiceInitial",
			SlatePurpose::InvoiceResponse => "InvoiceResponse",
			SlatePurpose::FullSlate => "FullSlate",
		};
		f.write_str(name)
	}
}

/// Provable address a slatepack can be encrypted for
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SlatepackAddress {
	/// Recipient public key
	pub public_key: String,
	/// Domain, empty for a bare key
	#[serde(default)]
	pub domain: String,
	/// Port
	#[serde(default)]
	pub port: Option<u16>,
}

impl SlatepackAddress {
	/// Address for a bare public key
	pub fn new(public_key: &str) -> SlatepackAddress {
		SlatepackAddress {
			public_key: public_key.to_string(),
			domain: String::new(),
			port: None,
		}
	}
}

impl fmt::Display for SlatepackAddress {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match (self.domain.is_empty(), self.port) {
			(true, _) => write!(f, "{}", self.public_key),
			(false, None) => write!(f, "{}@{}", self.public_key, self.domain),
			(false, Some(port)) => write!(f, "{}@{}:{}", self.public_key, self.domain, port),
		}
	}
}

/// Decoded slatepack
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SlatepackInfo {
	/// Slatepack purpose
	pub content: SlatePurpose,
	/// Sender address if the slatepack was encrypted
	#[serde(default)]
	pub sender: Option<SlatepackAddress>,
	/// Recipient address if the slatepack was encrypted
	#[serde(default)]
	pub recipient: Option<SlatepackAddress>,
	/// Slate
	pub slate: Slate,
}

/// `finalize_tx` answers with a slatepack for slatepack input and with a
/// plain slate otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SlateOrSlatepack {
	/// Armored slatepack
	Slatepack(Slatepack),
	/// JSON slate
	Slate(Slate),
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn slate_fields() {
		let slate = Slate::from_value(json!({"version_info": {"version": 3}, "id": "abc-123", "tx": null}));
		assert_eq!(slate.id().unwrap(), SlateId::new("abc-123"));
		assert!(slate.tx().is_none());

		let slate = Slate::from_value(json!({"id": "abc-123", "tx": {"body": {}}}));
		assert_eq!(slate.tx(), Some(&json!({"body": {}})));

		assert!(Slate::from_value(json!({"amount": "1"})).id().is_err());
		assert!(Slate::from_value(json!({"id": 7})).id().is_err());
	}

	#[test]
	fn finalize_answer_forms() {
		let r: SlateOrSlatepack =
			serde_json::from_value(json!("BEGINSLATEPACK. xyz. ENDSLATEPACK.")).unwrap();
		match r {
			SlateOrSlatepack::Slatepack(p) => assert!(p.is_armored()),
			other => panic!("unexpected {:?}", other),
		}
		let r: SlateOrSlatepack = serde_json::from_value(json!({"id": "abc-123"})).unwrap();
		assert!(matches!(r, SlateOrSlatepack::Slate(_)));
	}

	#[test]
	fn slatepack_info_from_wallet() {
		let info: SlatepackInfo = serde_json::from_value(json!({
			"content": "SendResponse",
			"sender": null,
			"recipient": {"public_key": "xmgwbyjMEMBojnVadEkwVi1GyL1WPiVE5dziQf3TLedHdrVBPGw5", "domain": "", "port": null},
			"slate": {"id": "abc-123"}
		}))
		.unwrap();
		assert_eq!(info.content, SlatePurpose::SendResponse);
		assert_eq!(info.slate.id().unwrap().as_str(), "abc-123");
		assert_eq!(
			info.recipient.unwrap().to_string(),
			"xmgwbyjMEMBojnVadEkwVi1GyL1WPiVE5dziQf3TLedHdrVBPGw5"
		);
	}

	#[test]
	fn armor_check() {
		assert!(Slatepack::new("BEGINSLATEPACK. 4H1qx. ENDSLATEPACK.\n").is_armored());
		assert!(!Slatepack::new("<Response...>").is_armored());
		assert!(Slatepack::new("  \n").is_empty());
	}
}
