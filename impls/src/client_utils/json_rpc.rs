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

//! JSON-RPC 2.0 envelopes as the wallet APIs use them. Results come wrapped
//! as `{"result": {"Ok": value}}` or `{"result": {"Err": error}}`.

use serde_json::{json, Value};

/// Request envelope
pub fn request(id: u32, method: &str, params: Value) -> Value {
	json!({
		"jsonrpc": "2.0",
		"method": method,
		"id": id,
		"params": params,
	})
}

/// Value of `result.Ok`. The error text covers JSON-RPC errors, wallet
/// errors and responses without a result.
pub fn result_ok(response: &Value) -> Result<Value, String> {
	if !response["error"].is_null() {
		return Err(format!(
			"Error: {}, Message: {}",
			response["error"]["code"], response["error"]["message"]
		));
	}
	let result = &response["result"];
	if !result["Err"].is_null() {
		return Err(format!("Error: {}", result["Err"]));
	}
	match result.get("Ok") {
		Some(ok) => Ok(ok.clone()),
		None => Err(format!("Response has no result, {}", response)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn envelopes() {
		let req = request(3, "check_version", json!([]));
		assert_eq!(req["jsonrpc"], json!("2.0"));
		assert_eq!(req["id"], json!(3));

		assert_eq!(
			result_ok(&json!({"id": 1, "result": {"Ok": null}})),
			Ok(Value::Null)
		);
		assert_eq!(
			result_ok(&json!({"result": {"Ok": "BEGINSLATEPACK. x. ENDSLATEPACK."}})),
			Ok(json!("BEGINSLATEPACK. x. ENDSLATEPACK."))
		);
		assert!(result_ok(&json!({"result": {"Err": {"NotEnoughFunds": {}}}}))
			.unwrap_err()
			.contains("NotEnoughFunds"));
		assert!(
			result_ok(&json!({"error": {"code": -32601, "message": "Method not found"}}))
				.unwrap_err()
				.contains("Method not found")
		);
		assert!(result_ok(&json!({"id": 1})).is_err());
	}
}
