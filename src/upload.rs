//! Batched block upload.
//!
//! Blocks go out in source order, at most [`BATCH_SIZE`] per request, one
//! request in flight at a time, pausing [`BATCH_PACING`] after each success
//! to stay under Notion's rate limit. No retries: the first failed batch
//! aborts the rest for this page, and prior batches stay applied.

use std::time::Duration;

use serde_json::Value;
use tracing::info;

use crate::{
	block::Block,
	notion::{NotionClient, NotionError},
};

/// Hard Notion-side limit on children per append request.
pub const BATCH_SIZE: usize = 100;
/// Pause after each successful batch.
pub const BATCH_PACING: Duration = Duration::from_millis(500);

/// Upload `blocks` to `page_id`. Returns the cumulative count of uploaded
/// blocks. On failure the error carries the response status and body (or
/// transport detail); batches already applied are not rolled back.
pub async fn upload_blocks(client: &dyn NotionClient, page_id: &str, blocks: &[Block]) -> Result<usize, NotionError> {
	let mut uploaded = 0;

	for batch in blocks.chunks(BATCH_SIZE) {
		let children: Vec<Value> = batch.iter().map(Block::to_json).collect();
		client.append_children(page_id, children).await?;
		uploaded += batch.len();
		info!("uploaded {uploaded}/{} blocks", blocks.len());

		tokio::time::sleep(BATCH_PACING).await;
	}

	Ok(uploaded)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mock_notion::MockNotionClient;

	fn paragraphs(n: usize) -> Vec<Block> {
		(0..n).map(|i| Block::Paragraph { text: format!("p{i}") }).collect()
	}

	#[tokio::test]
	async fn exactly_one_batch_at_the_boundary() {
		let mock = MockNotionClient::new();
		let uploaded = upload_blocks(&mock, "page", &paragraphs(100)).await.unwrap();
		assert_eq!(uploaded, 100);
		let batches = mock.batches();
		assert_eq!(batches.len(), 1);
		assert_eq!(batches[0].1.len(), 100);
	}

	#[tokio::test]
	async fn one_past_the_boundary_spills_into_a_second_batch() {
		let mock = MockNotionClient::new();
		let uploaded = upload_blocks(&mock, "page", &paragraphs(101)).await.unwrap();
		assert_eq!(uploaded, 101);
		let batches = mock.batches();
		assert_eq!(batches.len(), 2);
		assert_eq!(batches[0].1.len(), 100);
		assert_eq!(batches[1].1.len(), 1);
	}

	#[tokio::test]
	async fn empty_sequence_sends_nothing() {
		let mock = MockNotionClient::new();
		let uploaded = upload_blocks(&mock, "page", &[]).await.unwrap();
		assert_eq!(uploaded, 0);
		assert_eq!(mock.call_count(), 0);
	}

	#[tokio::test]
	async fn source_order_preserved_across_batches() {
		let mock = MockNotionClient::new();
		upload_blocks(&mock, "page", &paragraphs(150)).await.unwrap();
		let batches = mock.batches();
		assert_eq!(batches[0].1[0]["paragraph"]["rich_text"][0]["text"]["content"], "p0");
		assert_eq!(batches[1].1[0]["paragraph"]["rich_text"][0]["text"]["content"], "p100");
	}

	#[tokio::test]
	async fn failed_second_batch_aborts_the_third() {
		let mock = MockNotionClient::failing_on_call(2);
		let err = upload_blocks(&mock, "page", &paragraphs(250)).await.unwrap_err();
		assert!(err.to_string().contains("429"));
		// first batch applied, second failed, third never sent
		assert_eq!(mock.batches().len(), 1);
		assert_eq!(mock.call_count(), 2);
	}
}
