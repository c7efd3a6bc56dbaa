use log::*;
use anyhow::*;
use serde::{Serialize, Deserialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000/api";
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 3000;
pub const SERVER_ENV: &str = "QUILL_SERVER";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
	#[serde(default)]
	pub base_url: Option<String>,

	/// Delay before the redirects that follow logout and create.
	#[serde(default)]
	pub redirect_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	pub base_url: String,
	pub redirect_delay: Duration,
}

impl Default for Config {
	fn default() -> Self {
		Self::resolve(ConfigFile::default(), None)
	}
}

impl Config {
	fn user_path() -> PathBuf {
		PathBuf::from(shellexpand::tilde("~/.config/quill/client.json").into_owned())
	}

	pub fn load_user() -> Result<Config> {
		let file = Self::load_file(&Self::user_path())?;
		Ok(Self::resolve(file, std::env::var(SERVER_ENV).ok()))
	}

	pub fn load_file(path: &Path) -> Result<ConfigFile> {
		if path.exists() {
			let contents = fs::read_to_string(path)?;
			serde_json::from_str::<ConfigFile>(&contents)
				.with_context(|| anyhow!("Processing {:?}", path))
		} else {
			debug!("No config at {:?}, using defaults", path);
			Ok(ConfigFile::default())
		}
	}

	/// The environment's server beats the file's, which beats the default.
	pub fn resolve(file: ConfigFile, env_server: Option<String>) -> Config {
		let base_url = env_server
			.filter(|s| !s.is_empty())
			.or(file.base_url)
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
		let delay = file.redirect_delay_ms.unwrap_or(DEFAULT_REDIRECT_DELAY_MS);
		Config {
			base_url,
			redirect_delay: Duration::from_millis(delay),
		}
	}

	pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
		Self { base_url: base_url.into(), ..self }
	}
}
