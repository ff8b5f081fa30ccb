use reqwest::Client;
use serde_json::Value;

use steward_domain::{ApiCall, Method, Outcome};

use crate::{ApiClient, Result};

impl ApiClient {
	/// Runs one call and folds every path into an `Outcome`. Transport errors
	/// stay client-side; upstream failures carry the status and body verbatim.
	pub async fn execute(&self, call: &ApiCall) -> Outcome {
		match self.send(call).await {
			Ok(outcome) => outcome,
			Err(err) =>
				Outcome::failed(format!("Request failed before reaching the API: {err}")),
		}
	}

	async fn send(&self, call: &ApiCall) -> Result<Outcome> {
		let client = Client::builder().timeout(self.request_timeout).build()?;
		let url = format!("{}{}", self.base_url, call.endpoint);
		let mut request = client.request(wire_method(call.method), &url);

		if let Some(payload) = &call.json_payload {
			request = request.json(payload);
		}
		if let Some(params) = &call.params {
			request = request.query(params);
		}

		tracing::info!(method = %call.method, %url, "Executing API call.");

		let res = request.send().await?;
		let status = res.status();

		if !(status.is_success() || status.is_redirection()) {
			let body = res.text().await.unwrap_or_default();

			return Ok(Outcome::failed(format!("API error ({}): {body}", status.as_u16())));
		}

		let bytes = res.bytes().await?;

		if bytes.is_empty() {
			return Ok(Outcome::success(format!(
				"Request succeeded with status {}.",
				status.as_u16()
			)));
		}

		match serde_json::from_slice::<Value>(&bytes) {
			Ok(json) => Ok(Outcome::success_with("Request succeeded.", json)),
			Err(_) => Ok(Outcome::success_with(
				"Request succeeded.",
				Value::String(String::from_utf8_lossy(&bytes).into_owned()),
			)),
		}
	}
}

fn wire_method(method: Method) -> reqwest::Method {
	match method {
		Method::Get => reqwest::Method::GET,
		Method::Post => reqwest::Method::POST,
		Method::Put => reqwest::Method::PUT,
		Method::Delete => reqwest::Method::DELETE,
	}
}
