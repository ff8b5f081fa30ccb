use reqwest::Client;
use serde_json::Value;

use crate::{ApiClient, Result};

/// Well-known paths probed in order; the first 200 JSON body wins.
pub const SPEC_PATHS: [&str; 3] = ["/v3/api-docs", "/openapi.json", "/swagger.json"];

impl ApiClient {
	/// Probes independently per path; every failure is logged and swallowed so
	/// a missing specification degrades the session instead of breaking it.
	pub async fn fetch_spec(&self) -> Option<Value> {
		for path in SPEC_PATHS {
			let url = format!("{}{}", self.base_url, path);

			match self.probe(&url).await {
				Ok(spec) => {
					tracing::info!(%url, "Fetched the API specification.");

					return Some(spec);
				},
				Err(err) => tracing::warn!(%url, %err, "Spec probe failed."),
			}
		}

		tracing::warn!(base_url = %self.base_url, "No API specification found.");

		None
	}

	async fn probe(&self, url: &str) -> Result<Value> {
		let client = Client::builder().timeout(self.probe_timeout).build()?;
		let res = client.get(url).send().await?;

		Ok(res.error_for_status()?.json().await?)
	}
}
