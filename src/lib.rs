pub mod block;
pub mod config;
pub mod convert;
pub mod mock_notion;
pub mod notion;
pub mod run;
pub mod upload;

pub use block::{Block, HeadingLevel};
pub use config::{Mapping, Settings};
pub use convert::markdown_to_blocks;
pub use notion::{BoxedNotionClient, NotionClient, NotionError};
pub use run::{MappingOutcome, run};
pub use upload::{BATCH_PACING, BATCH_SIZE, upload_blocks};
