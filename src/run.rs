//! Run orchestrator: converts and uploads every configured mapping.
//!
//! Mappings are processed strictly one at a time. A mapping failing (file
//! unreadable, batch rejected) is recorded and logged; the run always
//! continues to the next mapping and always reaches the completion line.

use color_eyre::eyre::{Result, WrapErr};
use tracing::{error, info};

use crate::{config::Mapping, convert::markdown_to_blocks, notion::NotionClient, upload::upload_blocks};

/// Outcome of one mapping attempt.
#[derive(Clone, Debug)]
pub enum MappingOutcome {
	Uploaded { page_id: String, file: String, blocks: usize },
	Failed { page_id: String, file: String, error: String },
}

impl MappingOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, MappingOutcome::Uploaded { .. })
	}
}

/// Process every mapping, isolating failures per mapping.
pub async fn run(client: &dyn NotionClient, mappings: &[Mapping]) -> Vec<MappingOutcome> {
	let mut outcomes = Vec::with_capacity(mappings.len());

	for mapping in mappings {
		let file = mapping.file.display().to_string();
		info!("processing {file}");

		match process_mapping(client, mapping).await {
			Ok(blocks) => {
				info!("uploaded {blocks} blocks to page {}", mapping.page_id);
				outcomes.push(MappingOutcome::Uploaded {
					page_id: mapping.page_id.clone(),
					file,
					blocks,
				});
			}
			Err(e) => {
				error!("failed to process {file}: {e:#}");
				outcomes.push(MappingOutcome::Failed {
					page_id: mapping.page_id.clone(),
					file,
					error: format!("{e:#}"),
				});
			}
		}
	}

	info!("upload run completed");
	outcomes
}

async fn process_mapping(client: &dyn NotionClient, mapping: &Mapping) -> Result<usize> {
	let markdown = std::fs::read_to_string(&mapping.file).wrap_err_with(|| format!("failed to read {}", mapping.file.display()))?;

	let blocks = markdown_to_blocks(&markdown);
	info!("converted {} into {} blocks", mapping.file.display(), blocks.len());

	let uploaded = upload_blocks(client, &mapping.page_id, &blocks).await?;
	Ok(uploaded)
}
