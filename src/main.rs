use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notion_push::{
	config::{self, Settings},
	convert::markdown_to_blocks,
	notion, run, upload,
};

#[derive(Parser)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " ", env!("GIT_HASH")), about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
	/// Path to the config file (defaults to $XDG_CONFIG_HOME/notion-push/config.toml)
	#[arg(long, global = true)]
	config: Option<PathBuf>,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Convert and upload every configured mapping
	Run,
	/// Convert one markdown file and print the block JSON (no network, no API key)
	Convert(ConvertArgs),
	/// Upload one markdown file to one page, bypassing the config file
	Upload(UploadArgs),
}

#[derive(Args)]
struct ConvertArgs {
	file: PathBuf,
}

#[derive(Args)]
struct UploadArgs {
	/// Destination Notion page id
	page_id: String,
	file: PathBuf,
}

fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let cli = Cli::parse();

	match cli.command {
		Commands::Run => {
			let config_path = match cli.config {
				Some(path) => path,
				None => config::default_config_path()?,
			};
			let settings = Settings::load(&config_path)?;
			let client = notion::create_client(config::api_key_from_env()?);

			tokio::runtime::Runtime::new()?.block_on(async {
				let outcomes = run::run(client.as_ref(), &settings.mappings).await;
				let failed = outcomes.iter().filter(|o| !o.is_success()).count();
				if failed > 0 {
					info!("{failed}/{} mappings failed, see above", outcomes.len());
				}
			});
			Ok(())
		}
		Commands::Convert(args) => {
			let markdown = std::fs::read_to_string(&args.file)?;
			let children: Vec<_> = markdown_to_blocks(&markdown).iter().map(|b| b.to_json()).collect();
			println!("{}", serde_json::to_string_pretty(&children)?);
			Ok(())
		}
		Commands::Upload(args) => {
			let client = notion::create_client(config::api_key_from_env()?);

			tokio::runtime::Runtime::new()?.block_on(async {
				let markdown = std::fs::read_to_string(&args.file)?;
				let blocks = markdown_to_blocks(&markdown);
				let uploaded = upload::upload_blocks(client.as_ref(), &args.page_id, &blocks).await?;
				info!("uploaded {uploaded} blocks to page {}", args.page_id);
				Ok(())
			})
		}
	}
}
