//! Async client for the planner REST API—session-scoped bearer auth, reactive token
//! refresh, and typed event CRUD in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod client;
pub mod error;
pub mod events;
pub mod http;
pub mod obs;
pub mod session;
pub mod users;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{client::ApiClient, error::ConfigError, http::ReqwestHttpClient};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = ApiClient<ReqwestHttpClient>;

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock` during HTTPS tests, with the cookie store enabled so refresh cookies
	/// survive between calls.
	pub fn test_reqwest_http_client() -> Result<ReqwestHttpClient, ConfigError> {
		let client = ReqwestClient::builder()
			.cookie_store(true)
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?;

		Ok(ReqwestHttpClient::with_client(client))
	}

	/// Constructs an [`ApiClient`] against `base_url` using the insecure test transport.
	pub fn build_test_client(base_url: Url) -> Result<ReqwestTestClient, ConfigError> {
		ApiClient::with_http_client(base_url, test_reqwest_http_client()?)
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
