//! Notion API client.
//!
//! The [`NotionClient`] trait is the seam between upload logic and the
//! network, so tests run against an in-memory mock instead of the real API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

pub const NOTION_API_BASE: &str = "https://api.notion.com";
/// Protocol version header Notion requires on every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Failure of one append-children request. Both variants abort the current
/// mapping's remaining batches; the orchestrator decides nothing is ever
/// run-fatal.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
	#[error("notion api returned {status}: {body}")]
	Api { status: StatusCode, body: String },
	#[error("transport failure talking to notion: {0}")]
	Transport(#[from] reqwest::Error),
}

/// Notion API operations needed by the uploader.
#[async_trait]
pub trait NotionClient: Send + Sync {
	/// Append `children` to the page's block list, in order. The caller is
	/// responsible for staying under Notion's 100-children-per-request limit.
	async fn append_children(&self, page_id: &str, children: Vec<Value>) -> Result<(), NotionError>;
}

/// Real client speaking HTTPS to api.notion.com.
pub struct HttpNotionClient {
	http_client: Client,
	api_key: String,
}

impl HttpNotionClient {
	pub fn new(api_key: String) -> Self {
		Self { http_client: Client::new(), api_key }
	}
}

#[async_trait]
impl NotionClient for HttpNotionClient {
	async fn append_children(&self, page_id: &str, children: Vec<Value>) -> Result<(), NotionError> {
		let api_url = format!("{NOTION_API_BASE}/v1/blocks/{page_id}/children");

		let res = self
			.http_client
			.patch(&api_url)
			.header("Authorization", format!("Bearer {}", self.api_key))
			.header("Notion-Version", NOTION_VERSION)
			.header("Content-Type", "application/json")
			.json(&json!({ "children": children }))
			.send()
			.await?;

		if !res.status().is_success() {
			let status = res.status();
			let body = res.text().await.unwrap_or_default();
			return Err(NotionError::Api { status, body });
		}

		Ok(())
	}
}

pub type BoxedNotionClient = Arc<dyn NotionClient>;

/// Create a real client from an API key.
pub fn create_client(api_key: String) -> BoxedNotionClient {
	Arc::new(HttpNotionClient::new(api_key))
}
