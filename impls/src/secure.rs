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

//! Owner API v3 encryption. The shared key is the x coordinate of the ECDH
//! point on secp256k1. Requests and responses are AES-256-GCM with a 12 byte
//! nonce, empty additional data and the 16 byte tag appended, then base64.

use crate::error::Error;
use ring::aead;
use ring::rand::{SecureRandom, SystemRandom};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use serde_json::Value;
use zeroize::Zeroize;

const NONCE_LEN: usize = 12;

/// Our side of the key exchange
pub struct EcdhKeypair {
	secret: SecretKey,
	public: PublicKey,
}

impl EcdhKeypair {
	/// Fresh random keypair
	pub fn generate() -> Result<EcdhKeypair, Error> {
		let rng = SystemRandom::new();
		let mut bytes = [0u8; 32];
		// out of range values are astronomically rare, retry anyway
		for _ in 0..8 {
			rng.fill(&mut bytes)
				.map_err(|_| Error::Secp("Unable to get random bytes".to_string()))?;
			let res = EcdhKeypair::from_secret_bytes(&bytes);
			bytes.zeroize();
			if res.is_ok() {
				return res;
			}
		}
		Err(Error::Secp("Unable to generate a secret key".to_string()))
	}

	/// Keypair for a known secret
	pub fn from_secret_bytes(bytes: &[u8]) -> Result<EcdhKeypair, Error> {
		let secp = Secp256k1::new();
		let secret = SecretKey::from_slice(bytes).map_err(|e| Error::Secp(format!("{}", e)))?;
		let public = PublicKey::from_secret_key(&secp, &secret);
		Ok(EcdhKeypair { secret, public })
	}

	/// Compressed public key, hex encoded as `init_secure_api` expects it
	pub fn public_key_hex(&self) -> String {
		hex::encode(&self.public.serialize()[..])
	}

	/// Shared key with the other side's hex encoded public key
	pub fn shared_key(&self, other_public_hex: &str) -> Result<SharedKey, Error> {
		let secp = Secp256k1::new();
		let bytes = hex::decode(other_public_hex)
			.map_err(|e| Error::Secp(format!("Invalid public key hex {}, {}", other_public_hex, e)))?;
		let mut point = PublicKey::from_slice(&bytes)
			.map_err(|e| Error::Secp(format!("Invalid public key {}, {}", other_public_hex, e)))?;
		point
			.mul_assign(&secp, &self.secret[..])
			.map_err(|e| Error::Secp(format!("{}", e)))?;

		let serialized = point.serialize();
		let mut key = [0u8; 32];
		key.copy_from_slice(&serialized[1..33]);
		Ok(SharedKey(key))
	}
}

/// AES-256 key shared with the wallet. Wiped on drop.
pub struct SharedKey([u8; 32]);

impl Drop for SharedKey {
	fn drop(&mut self) {
		self.0.zeroize();
	}
}

/// Encrypted JSON body, `params` of `encrypted_request_v3` and `result.Ok`
/// of its response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EncryptedBody {
	/// Hex encoded nonce
	pub nonce: String,
	/// Base64 encoded ciphertext with tag
	pub body_enc: String,
}

impl EncryptedBody {
	/// Encrypts and encodes json as base 64
	pub fn from_json(json_in: &Value, enc_key: &SharedKey) -> Result<Self, Error> {
		let mut nonce = [0u8; NONCE_LEN];
		SystemRandom::new()
			.fill(&mut nonce)
			.map_err(|_| Error::Encryption("Unable to get random nonce".to_string()))?;
		EncryptedBody::from_json_with_nonce(json_in, enc_key, nonce)
	}

	fn from_json_with_nonce(
		json_in: &Value,
		enc_key: &SharedKey,
		nonce: [u8; NONCE_LEN],
	) -> Result<Self, Error> {
		let mut to_encrypt = serde_json::to_vec(json_in)?;

		let unbound_key = aead::UnboundKey::new(&aead::AES_256_GCM, &enc_key.0)
			.map_err(|e| Error::Encryption(format!("Unable to build a key, {}", e)))?;
		let sealing_key: aead::LessSafeKey = aead::LessSafeKey::new(unbound_key);
		let aad = aead::Aad::from(&[]);
		sealing_key
			.seal_in_place_append_tag(
				aead::Nonce::assume_unique_for_key(nonce),
				aad,
				&mut to_encrypt,
			)
			.map_err(|e| Error::Encryption(format!("Encryption failed, {}", e)))?;

		Ok(EncryptedBody {
			nonce: hex::encode(&nonce),
			body_enc: base64::encode(&to_encrypt),
		})
	}

	/// Decrypts and parses the JSON body
	pub fn decrypt(&self, dec_key: &SharedKey) -> Result<Value, Error> {
		let mut to_decrypt = base64::decode(&self.body_enc).map_err(|e| {
			Error::Encryption(format!("Encrypted body contains invalid Base64, {}", e))
		})?;

		let nonce = hex::decode(&self.nonce).map_err(|e| {
			Error::Encryption(format!("Encrypted body contains invalid nonce, {}", e))
		})?;
		if nonce.len() < NONCE_LEN {
			return Err(Error::Encryption("Invalid Nonce length".to_string()));
		}

		let mut n = [0u8; NONCE_LEN];
		n.copy_from_slice(&nonce[0..NONCE_LEN]);
		let unbound_key = aead::UnboundKey::new(&aead::AES_256_GCM, &dec_key.0)
			.map_err(|e| Error::Encryption(format!("Unable to build a key, {}", e)))?;
		let opening_key: aead::LessSafeKey = aead::LessSafeKey::new(unbound_key);
		let aad = aead::Aad::from(&[]);

		let decrypted = opening_key
			.open_in_place(aead::Nonce::assume_unique_for_key(n), aad, &mut to_decrypt)
			.map_err(|e| Error::Encryption(format!("Decryption failed, {}", e)))?;

		Ok(serde_json::from_slice(decrypted)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn pair() -> (SharedKey, SharedKey) {
		let ours = EcdhKeypair::generate().unwrap();
		let theirs = EcdhKeypair::generate().unwrap();
		let a = ours.shared_key(&theirs.public_key_hex()).unwrap();
		let b = theirs.shared_key(&ours.public_key_hex()).unwrap();
		(a, b)
	}

	#[test]
	fn both_sides_derive_same_key() {
		let (a, b) = pair();
		assert_eq!(a.0, b.0);
		assert_eq!(EcdhKeypair::generate().unwrap().public_key_hex().len(), 66);
	}

	#[test]
	fn encrypted_request_decrypts() {
		let (a, b) = pair();
		let req = json!({
			"jsonrpc": "2.0",
			"method": "retrieve_txs",
			"id": 2,
			"params": {"token": "d202964900000000d302964900000000d402964900000000d502964900000000", "refresh_from_node": true, "tx_id": null, "tx_slate_id": null}
		});
		let enc = EncryptedBody::from_json(&req, &a).unwrap();
		assert_eq!(enc.nonce.len(), 24);
		assert_eq!(enc.decrypt(&b).unwrap(), req);
	}

	#[test]
	fn tampered_body_fails() {
		let (a, b) = pair();
		let enc = EncryptedBody::from_json_with_nonce(&json!({"id": 1}), &a, [7u8; 12]).unwrap();
		let mut raw = base64::decode(&enc.body_enc).unwrap();
		raw[0] ^= 0x01;
		let tampered = EncryptedBody {
			nonce: enc.nonce.clone(),
			body_enc: base64::encode(&raw),
		};
		assert!(matches!(tampered.decrypt(&b), Err(Error::Encryption(_))));

		let wrong_nonce = EncryptedBody {
			nonce: hex::encode(&[8u8; 12]),
			body_enc: enc.body_enc.clone(),
		};
		assert!(wrong_nonce.decrypt(&b).is_err());
		assert!(enc.decrypt(&b).is_ok());
	}
}
