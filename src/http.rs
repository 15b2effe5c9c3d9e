//! Transport primitives for planner API calls.
//!
//! The module exposes [`ApiHttpClient`] alongside [`RequestDescriptor`] and
//! [`RawResponse`] so downstream crates can integrate custom HTTP clients. The trait is
//! the crate's only dependency on an HTTP stack: implementations execute one descriptor
//! at a time and report every non-transport outcome, including error statuses, as a
//! [`RawResponse`] so the client layer can classify it.

// std
use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	session::AccessToken,
};

/// Boxed future resolved by [`ApiHttpClient`] implementations.
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// HTTP verbs used by the planner API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `DELETE`.
	Delete,
}
impl HttpMethod {
	/// Returns the canonical wire representation of the verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A single pending API call: method, target URL, optional JSON body, optional bearer.
///
/// Descriptors are constructed fresh for every call and never reused across calls; the
/// retry path rebuilds the wire request from a clone of the same descriptor with a new
/// credential attached.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
	/// HTTP method to execute.
	pub method: HttpMethod,
	/// Fully resolved target URL.
	pub url: Url,
	/// JSON body bytes, when the operation carries a payload.
	pub body: Option<Vec<u8>>,
	/// Bearer credential attached as the `Authorization` header.
	pub bearer: Option<AccessToken>,
}
impl RequestDescriptor {
	/// Creates a descriptor without body or credential.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self { method, url, body: None, bearer: None }
	}

	/// Encodes `body` as the JSON payload of the request.
	pub fn with_json<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body =
			Some(serde_json::to_vec(body).map_err(|source| ConfigError::BodyEncode { source })?);

		Ok(self)
	}

	/// Attaches the bearer credential for the `Authorization` header.
	pub fn with_bearer(mut self, token: AccessToken) -> Self {
		self.bearer = Some(token);

		self
	}
}

/// Raw response surfaced by a transport: status code plus body bytes.
#[derive(Clone, Debug, Default)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// True for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports capable of executing planner API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by
/// every clone of a client, and the returned futures must be `Send` so callers can box
/// them across executors. Only network/IO failures map to [`TransportError`]; responses
/// with error statuses still resolve as [`RawResponse`] values.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes the descriptor and resolves with the raw response.
	fn execute(&self, request: RequestDescriptor) -> HttpFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The default construction enables the cookie store: the API issues its refresh
/// credential as an HTTP-only cookie at signin, and the store replays it to the refresh
/// endpoint without the crate ever touching the cookie value.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds the default cookie-aware transport.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().cookie_store(true).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing [`ReqwestClient`].
	///
	/// Custom clients should keep a cookie store enabled, otherwise the refresh
	/// endpoint never sees the cookie issued at signin and every refresh fails.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: RequestDescriptor) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url.clone());

			if let Some(bearer) = &request.bearer {
				builder = builder.header(
					reqwest::header::AUTHORIZATION,
					format!("Bearer {}", bearer.expose()),
				);
			}
			if let Some(body) = request.body {
				builder = builder
					.header(reqwest::header::CONTENT_TYPE, "application/json")
					.body(body);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn descriptor_builds_body_and_bearer() {
		let url = Url::parse("https://example.com/api/v1/events")
			.expect("Fixture URL should parse successfully.");
		let descriptor = RequestDescriptor::new(HttpMethod::Post, url)
			.with_json(&serde_json::json!({ "name": "standup" }))
			.expect("JSON body should encode successfully.")
			.with_bearer(AccessToken::new("abc"));

		assert_eq!(descriptor.method.as_str(), "POST");
		assert_eq!(descriptor.body.as_deref(), Some(br#"{"name":"standup"}"#.as_slice()));
		assert_eq!(descriptor.bearer.as_ref().map(AccessToken::expose), Some("abc"));
	}

	#[test]
	fn raw_response_success_covers_2xx_only() {
		assert!(RawResponse { status: 204, body: Vec::new() }.is_success());
		assert!(!RawResponse { status: 301, body: Vec::new() }.is_success());
		assert!(!RawResponse { status: 401, body: Vec::new() }.is_success());
	}
}
