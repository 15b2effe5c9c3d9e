//! Demonstrates the full event CRUD surface against a mock planner API, driven by one
//! session-scoped client.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use planner_client::{
	client::ApiClient,
	events::{EventDraft, EventQuery, EventUpdate},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/users/signin");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"demo-access"}"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/events");
			then.status(201)
				.header("content-type", "application/json")
				.body(r#"{"id":1,"name":"standup","description":"daily sync","is_checked":false}"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"[{"id":1,"name":"standup","description":"daily sync","is_checked":false}]"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/v1/events/1");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":1,"name":"standup","description":"daily sync","is_checked":true}"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/v1/events/1");
			then.status(204);
		})
		.await;

	let client = ApiClient::new(Url::parse(&server.url("/api/v1"))?)?;

	client.sign_in("user@example.com", "password-123").await?;

	let created = client
		.create_event(&EventDraft::new("standup").with_description("daily sync"))
		.await?;

	println!("Created event #{}: {}.", created.id, created.name);

	let events = client.list_events(EventQuery::default()).await?;

	println!("Listed {} event(s).", events.len());

	let updated = client.update_event(created.id, &EventUpdate::new().with_checked(true)).await?;

	println!("Checked off event #{}: is_checked = {}.", updated.id, updated.is_checked);

	client.delete_event(created.id).await?;

	println!("Deleted event #{}.", created.id);

	Ok(())
}
