//! Planner API client and the authorized-request wrapper.
//!
//! [`ApiClient`] owns the base URL, the HTTP transport, and the [`Session`] credential so
//! operation modules can focus on endpoint-specific payloads. The one piece of
//! conditional logic in the crate lives here: [`ApiClient::authorized_request`] attaches
//! the session credential, and on the stale-token sentinel performs exactly one silent
//! refresh followed by exactly one retry of the original request.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError, Rejection},
	http::{ApiHttpClient, HttpMethod, RawResponse, RequestDescriptor},
	session::{AccessToken, Session},
	users::TokenGrant,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Planner API client: base URL, transport, and the session credential.
///
/// Cloning is cheap and every clone shares one [`Session`], so a credential installed
/// through one handle is visible to all of them.
#[derive(Clone)]
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	base_url: Url,
	session: Session,
	refresh_metrics: Arc<RefreshMetrics>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client around a caller-provided transport.
	///
	/// `base_url` should point at the API root, e.g. `https://127.0.0.1:8000/api/v1`.
	pub fn with_http_client(
		base_url: Url,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		if base_url.cannot_be_a_base() {
			return Err(ConfigError::UnusableBaseUrl { base: base_url });
		}

		Ok(Self {
			http_client: http_client.into(),
			base_url,
			session: Session::new(),
			refresh_metrics: Default::default(),
		})
	}

	/// Returns the session holding the current access credential.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Returns the refresh counters shared by every clone of this client.
	pub fn refresh_metrics(&self) -> &RefreshMetrics {
		&self.refresh_metrics
	}

	/// Base URL the client was constructed with.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Executes an authorized API call with single-refresh retry semantics.
	///
	/// The current credential is attached as `Authorization: Bearer <token>`. When the
	/// response is a 401 whose `detail` equals the stale-token sentinel, the client
	/// performs one silent refresh, installs the new credential, and retries the
	/// original request once, returning the retry's outcome (success or failure) as-is.
	/// Every other failure, including a refresh failure or a 401 with any other detail,
	/// propagates to the caller unchanged. The retried call's own failure never triggers
	/// a second refresh.
	pub async fn authorized_request(&self, descriptor: RequestDescriptor) -> Result<RawResponse> {
		let token = self.session.bearer();

		match self.dispatch(descriptor.clone().with_bearer(token.clone())).await {
			Err(err) if err.is_stale_credential() => {
				let fresh = self.refresh_credential(Some(&token)).await?;

				self.dispatch(descriptor.with_bearer(fresh)).await
			},
			outcome => outcome,
		}
	}

	/// Rotates the session credential through the refresh endpoint.
	///
	/// Callers racing on the same stale credential serialize on the session's refresh
	/// guard: a caller that acquires the guard after another one already rotated the
	/// credential reuses the fresh token instead of issuing a second refresh call. The
	/// refresh request itself carries no bearer; the transport's cookie store supplies
	/// the refresh cookie issued at signin.
	pub(crate) async fn refresh_credential(
		&self,
		observed: Option<&AccessToken>,
	) -> Result<AccessToken> {
		let _permit = self.session.refresh_permit().await;

		if let Some(observed) = observed {
			let current = self.session.bearer();

			if current != *observed {
				return Ok(current);
			}
		}

		self.refresh_metrics.record_attempt();

		let descriptor =
			RequestDescriptor::new(HttpMethod::Post, self.endpoint(["users", "refresh"])?);
		let grant: TokenGrant = match self
			.dispatch(descriptor)
			.await
			.and_then(|response| self.decode(response))
		{
			Ok(grant) => grant,
			Err(err) => {
				self.refresh_metrics.record_failure();

				return Err(err);
			},
		};

		self.session.install(grant.access_token.clone());
		self.refresh_metrics.record_success();

		Ok(grant.access_token)
	}

	/// Executes a descriptor and maps non-success statuses into the error taxonomy.
	pub(crate) async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<RawResponse> {
		let response = self.http_client.execute(descriptor).await?;

		if response.is_success() {
			Ok(response)
		} else {
			Err(Error::from_rejection(Rejection::from_response(response.status, &response.body)))
		}
	}

	/// Decodes a success payload, reporting the offending JSON path on failure.
	pub(crate) fn decode<T>(&self, response: RawResponse) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| DecodeError { source, status: response.status }.into())
	}

	/// Resolves an endpoint URL by extending the base path with `segments`.
	pub(crate) fn endpoint<'a>(
		&self,
		segments: impl IntoIterator<Item = &'a str>,
	) -> Result<Url, ConfigError> {
		let mut url = self.base_url.clone();

		{
			let mut path = url
				.path_segments_mut()
				.map_err(|()| ConfigError::UnusableBaseUrl { base: self.base_url.clone() })?;

			path.pop_if_empty();
			path.extend(segments);
		}

		Ok(url)
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client with the crate's default cookie-aware reqwest transport.
	pub fn new(base_url: Url) -> Result<Self, ConfigError> {
		Self::with_http_client(base_url, ReqwestHttpClient::new()?)
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.base_url.as_str())
			.field("authenticated", &self.session.is_authenticated())
			.finish()
	}
}

/// Thread-safe counters for credential refresh attempts.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
}
impl RefreshMetrics {
	/// Returns the total number of refresh attempts (reused rotations excluded).
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of successful refresh calls.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of failed refresh calls.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}
