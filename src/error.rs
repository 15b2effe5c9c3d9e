//! Client-level error types shared across sessions, transports, and API operations.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Success payload could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Authentication failure (HTTP 401).
	#[error("API rejected the request as unauthorized: {0}")]
	Unauthorized(Rejection),
	/// Generic application failure (any other error status).
	#[error("API request failed: {0}")]
	Api(Rejection),
}
impl Error {
	/// Classifies a parsed rejection into the 401/non-401 branches of the taxonomy.
	pub(crate) fn from_rejection(rejection: Rejection) -> Self {
		if rejection.status == 401 {
			Self::Unauthorized(rejection)
		} else {
			Self::Api(rejection)
		}
	}

	/// Returns the server-supplied rejection when the API answered with an error status.
	pub fn rejection(&self) -> Option<&Rejection> {
		match self {
			Self::Unauthorized(rejection) | Self::Api(rejection) => Some(rejection),
			_ => None,
		}
	}

	pub(crate) fn is_stale_credential(&self) -> bool {
		matches!(self, Self::Unauthorized(rejection) if rejection.is_stale_credential())
	}
}

/// Error payload parsed from a non-success API response.
///
/// The API reports failures as JSON objects carrying a `message` field for display and,
/// for token problems, a `detail` field. Non-JSON bodies degrade to a best-effort
/// message so callers always have something to surface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
	/// HTTP status code of the failed response.
	pub status: u16,
	/// Human-readable message intended for end-user display.
	pub message: Option<String>,
	/// Machine-facing detail string; carries the stale-token sentinel.
	pub detail: Option<String>,
}
impl Rejection {
	/// Sentinel detail distinguishing a stale access token from every other 401 reason.
	pub const STALE_TOKEN_DETAIL: &'static str = "Invalid Token.";

	pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
		if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
			let message =
				value.get("message").and_then(serde_json::Value::as_str).map(str::to_owned);
			let detail = value.get("detail").and_then(serde_json::Value::as_str).map(str::to_owned);

			return Self { status, message, detail };
		}

		let text = String::from_utf8_lossy(body).trim().to_owned();
		let message = if text.is_empty() { None } else { Some(text) };

		Self { status, message, detail: None }
	}

	/// True only for a 401 whose detail equals [`Self::STALE_TOKEN_DETAIL`].
	///
	/// Any other 401 body is terminal and must never trigger a credential refresh.
	pub fn is_stale_credential(&self) -> bool {
		self.status == 401 && self.detail.as_deref() == Some(Self::STALE_TOKEN_DETAIL)
	}

	/// Returns the text an end-user surface should display for this rejection.
	pub fn display_message(&self) -> &str {
		self.message.as_deref().or(self.detail.as_deref()).unwrap_or("Unknown API error.")
	}
}
impl Display for Rejection {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "HTTP {}: {}", self.status, self.display_message())
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot serve as a prefix for endpoint paths.
	#[error("Base URL `{base}` cannot be extended with endpoint paths.")]
	UnusableBaseUrl {
		/// The offending base URL.
		base: Url,
	},
	/// Request body could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	BodyEncode {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Malformed JSON surfaced while decoding a success payload.
#[derive(Debug, ThisError)]
#[error("API returned malformed JSON.")]
pub struct DecodeError {
	/// Structured parsing failure including the offending JSON path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status of the response being decoded.
	pub status: u16,
}
