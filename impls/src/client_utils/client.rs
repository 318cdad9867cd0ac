// Copyright 2018 The Grin Developers
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

//! High level JSON/HTTP client API

use mwc_pay_util::RUNTIME;
use reqwest::header::{
	HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONNECTION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{ClientBuilder, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Handle;

const CONNECT_TIMEOUT_SECS: u64 = 15;

/// HTTP client errors
#[derive(Clone, Eq, thiserror::Error, PartialEq, Debug)]
pub enum Error {
	/// Client can't be built or used
	#[error("Internal error: {0}")]
	Internal(String),
	/// Request didn't get a response
	#[error("Request error: {0}")]
	RequestError(String),
	/// Response status is not a success
	#[error("HTTP error code: {0}, {1}")]
	HttpStatus(u16, String),
	/// Response can't be read or parsed
	#[error("ResponseError error: {0}")]
	ResponseError(String),
}

/// Basic auth user and secret
pub type BasicAuth<'a> = Option<(&'a str, &'a str)>;

/// JSON over HTTP client, blocking on the shared runtime
#[derive(Clone)]
pub struct Client {
	client: reqwest::Client,
}

impl Client {
	/// New client. `timeout` bounds the whole request, None means no limit.
	pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
		let mut headers = HeaderMap::new();
		headers.insert(USER_AGENT, HeaderValue::from_static("mwc-pay"));
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

		let mut builder = ClientBuilder::new()
			.connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
			.use_rustls_tls()
			.default_headers(headers);

		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		let client = builder
			.build()
			.map_err(|e| Error::Internal(format!("Unable to build client: {}", e)))?;

		Ok(Client { client })
	}

	/// Helper function to easily issue a HTTP POST request with the provided JSON
	/// object as body on a given URL that returns a JSON object. Handles request
	/// building, JSON serialization and deserialization, and response code
	/// checking.
	pub fn post<IN, OUT>(&self, url: &str, auth: BasicAuth, input: &IN) -> Result<OUT, Error>
	where
		IN: Serialize,
		for<'de> OUT: Deserialize<'de>,
	{
		let req = self.create_post_request(url, auth, input)?;
		self.handle_request(req)
	}

	/// POST request with a JSON body and optional basic auth
	pub fn create_post_request<IN>(
		&self,
		url: &str,
		auth: BasicAuth,
		input: &IN,
	) -> Result<RequestBuilder, Error>
	where
		IN: Serialize,
	{
		let json = serde_json::to_string(input)
			.map_err(|e| Error::Internal(format!("Could not serialize data to JSON, {}", e)))?;
		let mut builder = self.client.request(Method::POST, url);

		if let Some((user, secret)) = auth {
			let auth_key = format!("{}:{}", user, secret);
			let basic_auth = format!("Basic {}", base64::encode(&auth_key));
			builder = builder.header(AUTHORIZATION, basic_auth);
		}

		Ok(builder.body(json))
	}

	fn handle_request<T>(&self, req: RequestBuilder) -> Result<T, Error>
	where
		for<'de> T: Deserialize<'de>,
	{
		let data = self.send_request(req)?;
		if data.is_empty() {
			return Err(Error::ResponseError("Empty response body".to_string()));
		}
		serde_json::from_str(&data)
			.map_err(|e| Error::ResponseError(format!("Cannot parse response {}, {}", data, e)))
	}

	async fn send_request_async(&self, req: RequestBuilder) -> Result<String, Error> {
		let resp = req
			.send()
			.await
			.map_err(|e| Error::RequestError(format!("Cannot make request: {}", e)))?;
		let status = resp.status();
		if !status.is_success() {
			let body = resp.text().await.unwrap_or_default();
			return Err(Error::HttpStatus(status.as_u16(), body));
		}
		let text = resp
			.text()
			.await
			.map_err(|e| Error::ResponseError(format!("Cannot get response: {}", e)))?;
		Ok(text)
	}

	/// Send and return the body of a 2xx response
	pub fn send_request(&self, req: RequestBuilder) -> Result<String, Error> {
		// This client is currently used both outside and inside of a tokio runtime
		// context. In the latter case we are not allowed to do a blocking call to
		// our global runtime, which unfortunately means we have to spawn a new thread
		if Handle::try_current().is_ok() {
			let rt = RUNTIME.clone();
			let client = self.clone();
			std::thread::spawn(move || {
				let rt = rt
					.lock()
					.map_err(|_| Error::Internal("Runtime lock is poisoned".to_string()))?;
				rt.block_on(client.send_request_async(req))
			})
			.join()
			.map_err(|_| Error::Internal("Request thread panicked".to_string()))?
		} else {
			let rt = RUNTIME
				.lock()
				.map_err(|_| Error::Internal("Runtime lock is poisoned".to_string()))?;
			rt.block_on(self.send_request_async(req))
		}
	}
}
