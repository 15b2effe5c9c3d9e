//! Event CRUD operations and schemas for the `/events` endpoints.
//!
//! Every operation here is authorized, so each one inherits the single
//! refresh-and-retry semantics of [`ApiClient::authorized_request`].

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiHttpClient, HttpMethod, RequestDescriptor},
	obs::{self, CallKind},
};

/// Write payload for creating an event.
///
/// Only `name` is required; the optional fields are omitted from the JSON body when
/// unset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventDraft {
	/// Event name.
	pub name: String,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Tag labels.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	/// Thumbnail image reference.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// Venue or location label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
}
impl EventDraft {
	/// Creates a draft with the given name.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), ..Default::default() }
	}

	/// Sets the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the tag labels.
	pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.tags = Some(tags.into_iter().map(Into::into).collect());

		self
	}

	/// Sets the thumbnail image reference.
	pub fn with_image(mut self, image: impl Into<String>) -> Self {
		self.image = Some(image.into());

		self
	}

	/// Sets the location label.
	pub fn with_location(mut self, location: impl Into<String>) -> Self {
		self.location = Some(location.into());

		self
	}
}

/// Event returned by the API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
	/// Server-assigned event identifier (starts at 1).
	pub id: u64,
	/// Event name.
	pub name: String,
	/// Free-form description.
	#[serde(default)]
	pub description: Option<String>,
	/// Tag labels.
	#[serde(default)]
	pub tags: Option<Vec<String>>,
	/// Thumbnail image reference.
	#[serde(default)]
	pub image: Option<String>,
	/// Venue or location label.
	#[serde(default)]
	pub location: Option<String>,
	/// Completion flag.
	#[serde(default)]
	pub is_checked: bool,
}

/// Partial update payload; unset fields are omitted from the body and left untouched
/// server-side.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EventUpdate {
	/// Replacement name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Replacement description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Replacement tag labels.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	/// Replacement thumbnail image reference.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// Replacement location label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	/// Replacement completion flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_checked: Option<bool>,
}
impl EventUpdate {
	/// Creates an empty update.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the replacement name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the replacement description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the replacement tag labels.
	pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.tags = Some(tags.into_iter().map(Into::into).collect());

		self
	}

	/// Sets the replacement thumbnail image reference.
	pub fn with_image(mut self, image: impl Into<String>) -> Self {
		self.image = Some(image.into());

		self
	}

	/// Sets the replacement location label.
	pub fn with_location(mut self, location: impl Into<String>) -> Self {
		self.location = Some(location.into());

		self
	}

	/// Sets the replacement completion flag.
	pub fn with_checked(mut self, is_checked: bool) -> Self {
		self.is_checked = Some(is_checked);

		self
	}
}

/// Pagination window for event listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventQuery {
	/// Number of records to skip.
	pub offset: u64,
	/// Maximum number of records to return.
	pub limit: u64,
}
impl EventQuery {
	/// Creates a query with the API's default window (offset 0, limit 20).
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the offset.
	pub fn with_offset(mut self, offset: u64) -> Self {
		self.offset = offset;

		self
	}

	/// Overrides the limit.
	pub fn with_limit(mut self, limit: u64) -> Self {
		self.limit = limit;

		self
	}
}
impl Default for EventQuery {
	fn default() -> Self {
		Self { offset: 0, limit: 20 }
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates an event owned by the signed-in user.
	pub async fn create_event(&self, draft: &EventDraft) -> Result<EventRecord> {
		obs::observe(CallKind::EventCreate, "create_event", async move {
			let descriptor = RequestDescriptor::new(HttpMethod::Post, self.endpoint(["events"])?)
				.with_json(draft)?;
			let response = self.authorized_request(descriptor).await?;

			self.decode(response)
		})
		.await
	}

	/// Lists the signed-in user's events inside the pagination window.
	pub async fn list_events(&self, query: EventQuery) -> Result<Vec<EventRecord>> {
		obs::observe(CallKind::EventList, "list_events", async move {
			let mut url = self.endpoint(["events"])?;

			url.query_pairs_mut()
				.append_pair("offset", &query.offset.to_string())
				.append_pair("limit", &query.limit.to_string());

			let response =
				self.authorized_request(RequestDescriptor::new(HttpMethod::Get, url)).await?;

			self.decode(response)
		})
		.await
	}

	/// Fetches a single event by identifier.
	pub async fn event(&self, id: u64) -> Result<EventRecord> {
		obs::observe(CallKind::EventDetail, "event", async move {
			let descriptor = RequestDescriptor::new(
				HttpMethod::Get,
				self.endpoint(["events", &id.to_string()])?,
			);
			let response = self.authorized_request(descriptor).await?;

			self.decode(response)
		})
		.await
	}

	/// Applies a partial update to an event and returns the updated record.
	pub async fn update_event(&self, id: u64, update: &EventUpdate) -> Result<EventRecord> {
		obs::observe(CallKind::EventUpdate, "update_event", async move {
			let descriptor = RequestDescriptor::new(
				HttpMethod::Put,
				self.endpoint(["events", &id.to_string()])?,
			)
			.with_json(update)?;
			let response = self.authorized_request(descriptor).await?;

			self.decode(response)
		})
		.await
	}

	/// Deletes an event. The API answers 204 with an empty body.
	pub async fn delete_event(&self, id: u64) -> Result<()> {
		obs::observe(CallKind::EventDelete, "delete_event", async move {
			let descriptor = RequestDescriptor::new(
				HttpMethod::Delete,
				self.endpoint(["events", &id.to_string()])?,
			);

			self.authorized_request(descriptor).await?;

			Ok(())
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn draft_omits_unset_fields() {
		let body = serde_json::to_string(&EventDraft::new("standup"))
			.expect("Draft should serialize successfully.");

		assert_eq!(body, r#"{"name":"standup"}"#);

		let body = serde_json::to_string(
			&EventDraft::new("standup").with_description("daily sync").with_tags(["work"]),
		)
		.expect("Draft should serialize successfully.");

		assert_eq!(body, r#"{"name":"standup","description":"daily sync","tags":["work"]}"#);
	}

	#[test]
	fn update_serializes_only_set_fields() {
		let body = serde_json::to_string(&EventUpdate::new().with_checked(true))
			.expect("Update should serialize successfully.");

		assert_eq!(body, r#"{"is_checked":true}"#);

		let body = serde_json::to_string(&EventUpdate::new())
			.expect("Empty update should serialize successfully.");

		assert_eq!(body, "{}");
	}

	#[test]
	fn record_defaults_optional_fields() {
		let record: EventRecord = serde_json::from_str(r#"{"id":1,"name":"standup"}"#)
			.expect("Minimal record should deserialize.");

		assert_eq!(record.id, 1);
		assert_eq!(record.description, None);
		assert!(!record.is_checked);
	}

	#[test]
	fn query_defaults_match_the_api() {
		assert_eq!(EventQuery::default(), EventQuery { offset: 0, limit: 20 });
		assert_eq!(
			EventQuery::new().with_offset(5).with_limit(10),
			EventQuery { offset: 5, limit: 10 },
		);
	}
}
