//! Account operations and schemas for the `/users` endpoints.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiHttpClient, HttpMethod, RequestDescriptor},
	obs::{self, CallKind},
	session::AccessToken,
};

/// Credentials payload shared by signup and signin.
#[derive(Clone, Serialize)]
pub struct Credentials {
	/// Account email address.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl Credentials {
	/// Creates a credentials payload.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Newly created account returned by signup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
	/// Server-assigned user identifier.
	pub id: String,
	/// Registered email address.
	pub email: String,
	/// Creation timestamp.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

/// Access token grant returned by signin and refresh.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Bearer credential for subsequent authorized calls.
	pub access_token: AccessToken,
	/// Token scheme label; the API issues `Bearer` tokens.
	#[serde(default = "default_token_type")]
	pub token_type: String,
}

fn default_token_type() -> String {
	"Bearer".into()
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Registers a new account and returns the created profile.
	pub async fn sign_up(
		&self,
		email: impl Into<String>,
		password: impl Into<String>,
	) -> Result<UserProfile> {
		let credentials = Credentials::new(email, password);

		obs::observe(CallKind::SignUp, "sign_up", async move {
			let descriptor =
				RequestDescriptor::new(HttpMethod::Post, self.endpoint(["users", "signup"])?)
					.with_json(&credentials)?;
			let response = self.dispatch(descriptor).await?;

			self.decode(response)
		})
		.await
	}

	/// Exchanges credentials for an access token and installs it into the session.
	///
	/// The response also sets the HTTP-only refresh cookie consumed later by
	/// [`ApiClient::refresh`]; the transport's cookie store keeps it.
	pub async fn sign_in(
		&self,
		email: impl Into<String>,
		password: impl Into<String>,
	) -> Result<()> {
		let credentials = Credentials::new(email, password);

		obs::observe(CallKind::SignIn, "sign_in", async move {
			let descriptor =
				RequestDescriptor::new(HttpMethod::Post, self.endpoint(["users", "signin"])?)
					.with_json(&credentials)?;
			let response = self.dispatch(descriptor).await?;
			let grant: TokenGrant = self.decode(response)?;

			self.session().install(grant.access_token);

			Ok(())
		})
		.await
	}

	/// Revokes the current token server-side, then clears the session credential.
	///
	/// The call is authorized, so a stale credential goes through the single
	/// refresh-and-retry path before the signout lands.
	pub async fn sign_out(&self) -> Result<()> {
		obs::observe(CallKind::SignOut, "sign_out", async move {
			let descriptor =
				RequestDescriptor::new(HttpMethod::Post, self.endpoint(["users", "signout"])?);

			self.authorized_request(descriptor).await?;
			self.session().clear();

			Ok(())
		})
		.await
	}

	/// Requests a fresh access token from the refresh endpoint and installs it.
	///
	/// The call is unauthenticated; the transport's cookie store supplies the refresh
	/// cookie issued at signin. This is the same rotation the authorized-request
	/// wrapper performs silently on the stale-token sentinel.
	pub async fn refresh(&self) -> Result<AccessToken> {
		obs::observe(CallKind::Refresh, "refresh", self.refresh_credential(None)).await
	}
}
