#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use planner_client::{
	_preludet::{ReqwestTestClient, build_test_client},
	error::Error,
	events::EventQuery,
	session::AccessToken,
	url::Url,
};

const STALE_BODY: &str = r#"{"detail":"Invalid Token."}"#;

fn build_client(server: &MockServer) -> ReqwestTestClient {
	let base_url = Url::parse(&server.url("/api/v1"))
		.expect("Mock server base URL should parse successfully.");

	build_test_client(base_url).expect("Client should build successfully.")
}

#[tokio::test]
async fn stale_sentinel_triggers_single_refresh_and_retry() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	client.session().install(AccessToken::new("stale"));

	let stale_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events").header("authorization", "Bearer stale");
			then.status(401).header("content-type", "application/json").body(STALE_BODY);
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/users/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"xyz"}"#);
		})
		.await;
	let fresh_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events").header("authorization", "Bearer xyz");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"[{"id":1,"name":"standup","is_checked":false}]"#);
		})
		.await;
	let events = client
		.list_events(EventQuery::default())
		.await
		.expect("Retry with the refreshed credential should succeed.");

	assert_eq!(events.len(), 1);
	assert_eq!(events[0].name, "standup");
	assert_eq!(client.session().bearer().expose(), "xyz");
	assert_eq!(client.refresh_metrics().successes(), 1);

	stale_mock.assert_async().await;
	refresh_mock.assert_async().await;
	fresh_mock.assert_async().await;
}

#[tokio::test]
async fn non_401_error_propagates_without_refresh() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	client.session().install(AccessToken::new("abc"));

	let events_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events");
			then.status(500)
				.header("content-type", "application/json")
				.body(r#"{"message":"There was a problem processing your request, please try again later."}"#);
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/users/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"never"}"#);
		})
		.await;
	let err = client
		.list_events(EventQuery::default())
		.await
		.expect_err("Server errors should surface to the caller.");

	match err {
		Error::Api(rejection) => assert_eq!(rejection.status, 500),
		other => panic!("Expected a generic API error, got: {other}."),
	}

	events_mock.assert_async().await;
	refresh_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn non_sentinel_401_is_terminal() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	client.session().install(AccessToken::new("abc"));

	let events_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"detail":"UnAuthorized Request."}"#);
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/users/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"never"}"#);
		})
		.await;
	let err = client
		.list_events(EventQuery::default())
		.await
		.expect_err("Non-sentinel 401 responses should surface to the caller.");

	assert!(matches!(&err, Error::Unauthorized(rejection) if !rejection.is_stale_credential()));

	events_mock.assert_async().await;
	refresh_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn refresh_failure_propagates_without_retry() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	client.session().install(AccessToken::new("stale"));

	let events_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events");
			then.status(401).header("content-type", "application/json").body(STALE_BODY);
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/users/refresh");
			then.status(401).header("content-type", "application/json").body(STALE_BODY);
		})
		.await;
	let err = client
		.list_events(EventQuery::default())
		.await
		.expect_err("Refresh failures should surface to the caller.");

	assert!(matches!(err, Error::Unauthorized(_)));
	assert_eq!(client.refresh_metrics().failures(), 1);
	// The stale credential stays installed; no retry ran after the failed refresh.
	assert_eq!(client.session().bearer().expose(), "stale");

	events_mock.assert_calls_async(1).await;
	refresh_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn retried_call_failure_returns_as_is() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	client.session().install(AccessToken::new("stale"));

	let stale_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events/9").header("authorization", "Bearer stale");
			then.status(401).header("content-type", "application/json").body(STALE_BODY);
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/users/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"xyz"}"#);
		})
		.await;
	let retry_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events/9").header("authorization", "Bearer xyz");
			then.status(404)
				.header("content-type", "application/json")
				.body(r#"{"message":"Resource Not Found."}"#);
		})
		.await;
	let err = client.event(9).await.expect_err("The retry's failure should return unchanged.");

	match err {
		Error::Api(rejection) => {
			assert_eq!(rejection.status, 404);
			assert_eq!(rejection.display_message(), "Resource Not Found.");
		},
		other => panic!("Expected the retry's API error, got: {other}."),
	}

	stale_mock.assert_async().await;
	refresh_mock.assert_async().await;
	retry_mock.assert_async().await;
}

#[tokio::test]
async fn retry_never_triggers_a_second_refresh() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);

	client.session().install(AccessToken::new("stale"));

	// Answers every bearer with the sentinel, including the refreshed one.
	let events_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/events");
			then.status(401).header("content-type", "application/json").body(STALE_BODY);
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/users/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"xyz"}"#);
		})
		.await;
	let err = client
		.list_events(EventQuery::default())
		.await
		.expect_err("A sentinel on the retried call should be terminal.");

	assert!(err.rejection().is_some_and(|rejection| rejection.is_stale_credential()));

	events_mock.assert_calls_async(2).await;
	refresh_mock.assert_calls_async(1).await;
}
