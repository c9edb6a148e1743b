//! Thin request shaper over the host's localhost HTTP control plane.
//!
//! Every request carries a `token` query parameter. The token comes from an
//! explicit value, a provider callback, or a process-wide cache filled by
//! asking the host's application-info endpoint; concurrent resolvers share
//! a single in-flight fetch. Responses arrive wrapped in a `{data: T}`
//! envelope and are unwrapped before return.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:41595";

const APPLICATION_INFO_PATH: &str = "/api/application/info";
const TOKEN_POINTER: &str = "/preferences/developer/apiToken";

// Process-wide token cache. Holding the lock across the fetch is what makes
// concurrent resolvers share one in-flight request.
static TOKEN_CACHE: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

#[derive(Debug, Error)]
pub enum HttpError {
	#[error(transparent)]
	Request(#[from] reqwest::Error),
	#[error("request failed: {status}: {body}")]
	Status {
		status: reqwest::StatusCode,
		body: String,
	},
	#[error("no API token found")]
	NoToken,
	#[error(transparent)]
	Decode(#[from] serde_json::Error),
}

/// Where the `token` query parameter comes from.
#[derive(Clone, Default)]
pub enum TokenSource {
	/// A token handed in by the caller.
	Explicit(String),
	/// A callback consulted per request; `None` means resolution failed.
	Provider(Arc<dyn Fn() -> Option<String> + Send + Sync>),
	/// Resolve once via the application-info endpoint, then cache
	/// process-wide until [`clear_token_cache`].
	#[default]
	Auto,
}

impl std::fmt::Debug for TokenSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Explicit(_) => f.write_str("TokenSource::Explicit"),
			Self::Provider(_) => f.write_str("TokenSource::Provider"),
			Self::Auto => f.write_str("TokenSource::Auto"),
		}
	}
}

/// A query value; `Many` repeats the key once per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
	One(String),
	Many(Vec<String>),
}

impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::One(value.to_owned())
	}
}

impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::One(value)
	}
}

impl From<Vec<String>> for QueryValue {
	fn from(values: Vec<String>) -> Self {
		Self::Many(values)
	}
}

#[derive(Debug, Clone)]
pub struct HttpClient {
	base_url: String,
	http: reqwest::Client,
	token: TokenSource,
}

impl Default for HttpClient {
	fn default() -> Self {
		Self::new()
	}
}

impl HttpClient {
	pub fn new() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_owned(),
			http: reqwest::Client::new(),
			token: TokenSource::Auto,
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = TokenSource::Explicit(token.into());
		self
	}

	pub fn with_token_provider(
		mut self,
		provider: impl Fn() -> Option<String> + Send + Sync + 'static,
	) -> Self {
		self.token = TokenSource::Provider(Arc::new(provider));
		self
	}

	pub async fn get<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&str, QueryValue)],
	) -> Result<T, HttpError> {
		let token = self.resolve_token().await?;
		let mut pairs = expand_query(query);
		pairs.push(("token".to_owned(), token));

		let response = self
			.http
			.get(format!("{}{path}", self.base_url))
			.query(&pairs)
			.send()
			.await?;

		unwrap_envelope(response).await
	}

	pub async fn post<T: DeserializeOwned>(
		&self,
		path: &str,
		mut body: Value,
	) -> Result<T, HttpError> {
		let token = self.resolve_token().await?;
		strip_nulls(&mut body);

		let response = self
			.http
			.post(format!("{}{path}", self.base_url))
			.query(&[("token", token.as_str())])
			.json(&body)
			.send()
			.await?;

		unwrap_envelope(response).await
	}

	/// The application-info document. Served without a token, which is what
	/// makes automatic token resolution possible in the first place.
	pub async fn application_info(&self) -> Result<Value, HttpError> {
		let response = self
			.http
			.get(format!("{}{APPLICATION_INFO_PATH}", self.base_url))
			.send()
			.await?;

		unwrap_envelope(response).await
	}

	async fn resolve_token(&self) -> Result<String, HttpError> {
		match &self.token {
			TokenSource::Explicit(token) => Ok(token.clone()),
			TokenSource::Provider(provider) => provider().ok_or(HttpError::NoToken),
			TokenSource::Auto => self.cached_token().await,
		}
	}

	async fn cached_token(&self) -> Result<String, HttpError> {
		let mut cache = TOKEN_CACHE.lock().await;

		if let Some(token) = cache.as_ref() {
			return Ok(token.clone());
		}

		debug!("resolving API token via application info");

		// Any failure on this path collapses into the same verdict: no
		// token could be found for the originating request.
		let info = self.application_info().await.map_err(|_| HttpError::NoToken)?;
		let token = info
			.pointer(TOKEN_POINTER)
			.and_then(Value::as_str)
			.filter(|token| !token.is_empty())
			.ok_or(HttpError::NoToken)?
			.to_owned();

		*cache = Some(token.clone());
		Ok(token)
	}
}

/// Drop the cached token; the next auto-resolved request refetches.
pub async fn clear_token_cache() {
	TOKEN_CACHE.lock().await.take();
}

fn expand_query(query: &[(&str, QueryValue)]) -> Vec<(String, String)> {
	let mut pairs = Vec::new();

	for (key, value) in query {
		match value {
			QueryValue::One(value) => pairs.push(((*key).to_owned(), value.clone())),
			QueryValue::Many(values) => {
				for value in values {
					pairs.push(((*key).to_owned(), value.clone()));
				}
			}
		}
	}

	pairs
}

/// Remove null fields from objects, recursively; the host treats explicit
/// nulls and absent fields differently.
fn strip_nulls(value: &mut Value) {
	match value {
		Value::Object(map) => {
			map.retain(|_, field| !field.is_null());
			for field in map.values_mut() {
				strip_nulls(field);
			}
		}
		Value::Array(items) => {
			for item in items {
				strip_nulls(item);
			}
		}
		_ => {}
	}
}

async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, HttpError> {
	let status = response.status();

	if !status.is_success() {
		let body = response.text().await.unwrap_or_default();
		return Err(HttpError::Status { status, body });
	}

	let envelope: Value = response.json().await?;
	let data = envelope
		.get("data")
		.cloned()
		.unwrap_or(Value::Null);

	Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn query_arrays_repeat_the_key() {
		let pairs = expand_query(&[
			("id", QueryValue::Many(vec!["a".into(), "b".into()])),
			("orderBy", QueryValue::One("name".into())),
		]);

		assert_eq!(
			pairs,
			vec![
				("id".to_string(), "a".to_string()),
				("id".to_string(), "b".to_string()),
				("orderBy".to_string(), "name".to_string()),
			]
		);
	}

	#[test]
	fn null_fields_are_stripped_recursively() {
		let mut body = json!({
			"name": "x",
			"annotation": null,
			"nested": {"keep": 1, "drop": null},
			"list": [{"drop": null, "keep": true}]
		});

		strip_nulls(&mut body);

		assert_eq!(
			body,
			json!({
				"name": "x",
				"nested": {"keep": 1},
				"list": [{"keep": true}]
			})
		);
	}

	#[tokio::test]
	async fn explicit_and_provider_tokens_bypass_the_cache() {
		let explicit = HttpClient::new().with_token("t0k3n");
		assert_eq!(explicit.resolve_token().await.unwrap(), "t0k3n");

		let provided = HttpClient::new().with_token_provider(|| Some("fresh".to_owned()));
		assert_eq!(provided.resolve_token().await.unwrap(), "fresh");

		let failing = HttpClient::new().with_token_provider(|| None);
		assert!(matches!(
			failing.resolve_token().await,
			Err(HttpError::NoToken)
		));
	}
}
