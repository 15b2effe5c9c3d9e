//! Session-scoped access credential with a synchronized lifecycle.

// self
use crate::_prelude::*;

/// Redacted bearer secret wrapper keeping token material out of logs.
///
/// The cleared state is the empty token; the client has no expiry tracking and keeps a
/// stale value until the server rejects it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// True for the cleared (empty) credential.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Shared holder of the current access credential.
///
/// A session is installed on signin and on every refresh, cleared (to the empty token)
/// on signout, and otherwise left stale until the server rejects it. All reads and
/// writes go through one synchronized accessor; clones share the same state, so a
/// credential installed through one handle is visible to all of them. The refresh guard
/// serializes concurrent credential rotations.
#[derive(Clone, Debug, Default)]
pub struct Session(Arc<SessionShared>);
impl Session {
	/// Creates an unauthenticated session.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the stored credential after a successful signin or refresh.
	pub fn install(&self, token: AccessToken) {
		*self.0.token.lock() = token;
	}

	/// Clears the credential back to the empty state.
	pub fn clear(&self) {
		*self.0.token.lock() = AccessToken::default();
	}

	/// Returns a clone of the current credential (possibly empty).
	pub fn bearer(&self) -> AccessToken {
		self.0.token.lock().clone()
	}

	/// True when a non-empty credential is installed.
	pub fn is_authenticated(&self) -> bool {
		!self.0.token.lock().is_empty()
	}

	/// Acquires the guard serializing credential rotations for this session.
	pub(crate) async fn refresh_permit(&self) -> async_lock::MutexGuard<'_, ()> {
		self.0.refresh_guard.lock().await
	}
}

#[derive(Debug, Default)]
struct SessionShared {
	token: Mutex<AccessToken>,
	refresh_guard: AsyncMutex<()>,
}
