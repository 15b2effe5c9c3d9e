//! Demonstrates the authorized-request wrapper recovering from a stale access token:
//! one silent refresh, one retry, and the caller only ever sees the final outcome.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use planner_client::{client::ApiClient, events::EventQuery, session::AccessToken, url::Url};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	// The stale credential is rejected with the refresh-triggering sentinel.
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events").header("authorization", "Bearer stale");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"detail":"Invalid Token."}"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/users/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"rotated"}"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events").header("authorization", "Bearer rotated");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"[{"id":1,"name":"standup","is_checked":false}]"#);
		})
		.await;

	let client = ApiClient::new(Url::parse(&server.url("/api/v1"))?)?;

	client.session().install(AccessToken::new("stale"));

	let events = client.list_events(EventQuery::default()).await?;

	println!("Listed {} event(s) after a silent refresh.", events.len());
	println!(
		"Refresh attempts: {}, successes: {}.",
		client.refresh_metrics().attempts(),
		client.refresh_metrics().successes(),
	);

	Ok(())
}
