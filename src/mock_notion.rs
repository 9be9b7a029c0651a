//! Mock Notion client for testing purposes.
//!
//! Implements [`NotionClient`] over in-memory state so uploader and
//! orchestrator behavior can be tested without hitting the real API.
//! Can be scripted to fail the Nth request, for abort-path tests.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::notion::{NotionClient, NotionError};

#[derive(Default)]
struct MockState {
	/// Every successfully accepted batch, as (page_id, children).
	batches: Vec<(String, Vec<Value>)>,
	/// Total append_children calls, including failed ones.
	calls: usize,
	/// 1-indexed call number to fail with a canned 429.
	fail_on_call: Option<usize>,
}

/// In-memory Notion client. Thread-safe for use in async contexts.
#[derive(Default)]
pub struct MockNotionClient {
	state: Mutex<MockState>,
}

impl MockNotionClient {
	pub fn new() -> Self {
		Self::default()
	}

	/// A client whose `n`th append_children call (1-indexed) fails.
	pub fn failing_on_call(n: usize) -> Self {
		Self {
			state: Mutex::new(MockState {
				fail_on_call: Some(n),
				..MockState::default()
			}),
		}
	}

	/// Batches accepted so far, in submission order.
	pub fn batches(&self) -> Vec<(String, Vec<Value>)> {
		self.state.lock().unwrap().batches.clone()
	}

	/// Total calls made, including the failed one.
	pub fn call_count(&self) -> usize {
		self.state.lock().unwrap().calls
	}
}

#[async_trait]
impl NotionClient for MockNotionClient {
	async fn append_children(&self, page_id: &str, children: Vec<Value>) -> Result<(), NotionError> {
		let mut state = self.state.lock().unwrap();
		state.calls += 1;
		if state.fail_on_call == Some(state.calls) {
			return Err(NotionError::Api {
				status: StatusCode::TOO_MANY_REQUESTS,
				body: "mock: throttled".to_string(),
			});
		}
		state.batches.push((page_id.to_string(), children));
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn records_batches_in_order() {
		let mock = MockNotionClient::new();
		mock.append_children("page", vec![json!({"n": 1})]).await.unwrap();
		mock.append_children("page", vec![json!({"n": 2})]).await.unwrap();

		let batches = mock.batches();
		assert_eq!(batches.len(), 2);
		assert_eq!(batches[0].1[0]["n"], 1);
		assert_eq!(batches[1].1[0]["n"], 2);
	}

	#[tokio::test]
	async fn scripted_failure_hits_exact_call() {
		let mock = MockNotionClient::failing_on_call(2);
		assert!(mock.append_children("page", vec![]).await.is_ok());
		assert!(mock.append_children("page", vec![]).await.is_err());
		assert!(mock.append_children("page", vec![]).await.is_ok());
		assert_eq!(mock.call_count(), 3);
	}
}
