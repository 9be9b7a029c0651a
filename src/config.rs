//! Settings: page mappings from a TOML file, API key from the environment.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::Deserialize;

/// Environment variable holding the Notion integration secret.
pub const API_KEY_VAR: &str = "NOTION_API_KEY";

/// One (destination page, source file) unit of work. Read-only input.
#[derive(Clone, Debug, Deserialize)]
pub struct Mapping {
	pub page_id: String,
	pub file: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
	#[serde(default)]
	pub mappings: Vec<Mapping>,
}

impl Settings {
	pub fn load(path: &Path) -> Result<Self> {
		let raw = config::Config::builder()
			.add_source(config::File::from(path))
			.build()
			.wrap_err_with(|| format!("failed to read config file at {}", path.display()))?;

		raw.try_deserialize().wrap_err("config file is malformed (expected [[mappings]] entries with page_id and file)")
	}
}

/// `$XDG_CONFIG_HOME/notion-push/config.toml`, used when `--config` is not given.
pub fn default_config_path() -> Result<PathBuf> {
	let dirs = xdg::BaseDirectories::with_prefix("notion-push");
	let config_home = dirs.get_config_home().ok_or_else(|| eyre!("could not determine XDG config home"))?;
	Ok(config_home.join("config.toml"))
}

/// Read the API key. Absence is a fatal startup condition.
pub fn api_key_from_env() -> Result<String> {
	std::env::var(API_KEY_VAR).map_err(|_| eyre!("{API_KEY_VAR} environment variable is not set"))
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn load_mappings_from_toml() {
		let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
		write!(
			file,
			r#"
[[mappings]]
page_id = "2c7ff8dad4c9816a9962c28f1b8ed5cf"
file = "./knowledge/01_requirements.md"

[[mappings]]
page_id = "2c7ff8dad4c98112bf02f9a77fab98e5"
file = "./knowledge/02_design.md"
"#
		)
		.unwrap();

		let settings = Settings::load(file.path()).unwrap();
		assert_eq!(settings.mappings.len(), 2);
		assert_eq!(settings.mappings[0].page_id, "2c7ff8dad4c9816a9962c28f1b8ed5cf");
		assert_eq!(settings.mappings[1].file, PathBuf::from("./knowledge/02_design.md"));
	}

	#[test]
	fn empty_config_means_no_mappings() {
		let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
		writeln!(file, "# nothing configured yet").unwrap();

		let settings = Settings::load(file.path()).unwrap();
		assert!(settings.mappings.is_empty());
	}

	#[test]
	fn missing_config_file_is_an_error() {
		assert!(Settings::load(Path::new("/nonexistent/notion-push.toml")).is_err());
	}
}
