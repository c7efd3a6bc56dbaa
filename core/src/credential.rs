use std::{fs, path::PathBuf, collections::BTreeMap};
use std::cell::RefCell;

use log::*;
use anyhow::*;

use crate::auth::Token;

/// Name the token is persisted under, in every store.
pub const TOKEN_KEY: &str = "token";

/// Durable home of the session credential. Holds at most one token.
pub trait CredentialStore: std::fmt::Debug {
	fn load(&self) -> Result<Option<Token>>;

	fn save(&self, token: &Token) -> Result<()>;

	fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore(RefCell<Option<Token>>);

impl MemoryCredentialStore {
	pub fn with_token(token: Token) -> Self {
		Self(RefCell::new(Some(token)))
	}
}

impl CredentialStore for MemoryCredentialStore {
	fn load(&self) -> Result<Option<Token>> {
		Ok(self.0.borrow().clone())
	}

	fn save(&self, token: &Token) -> Result<()> {
		*self.0.borrow_mut() = Some(token.clone());
		Ok(())
	}

	fn clear(&self) -> Result<()> {
		*self.0.borrow_mut() = None;
		Ok(())
	}
}

/// Key-value JSON file, of which only [`TOKEN_KEY`] is used.
#[derive(Debug, Clone)]
pub struct FsCredentialStore {
	path: PathBuf,
}

impl FsCredentialStore {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	pub fn user_default() -> Self {
		Self::new(PathBuf::from(shellexpand::tilde("~/.config/quill/session.json").into_owned()))
	}

	fn read(&self) -> Result<BTreeMap<String, String>> {
		if self.path.exists() {
			let contents = fs::read_to_string(&self.path)?;
			serde_json::from_str(&contents)
				.with_context(|| anyhow!("Processing {:?}", &self.path))
		} else {
			Ok(Default::default())
		}
	}

	fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		info!("Storing {}", &self.path.to_string_lossy());
		fs::write(&self.path, serde_json::to_string_pretty(entries)?)
			.with_context(|| anyhow!("Writing {:?}", &self.path))
	}
}

impl CredentialStore for FsCredentialStore {
	fn load(&self) -> Result<Option<Token>> {
		Ok(self.read()?.remove(TOKEN_KEY).map(Token))
	}

	fn save(&self, token: &Token) -> Result<()> {
		let mut entries = self.read()?;
		entries.insert(TOKEN_KEY.to_owned(), token.0.clone());
		self.write(&entries)
	}

	fn clear(&self) -> Result<()> {
		let mut entries = self.read()?;
		if entries.remove(TOKEN_KEY).is_some() {
			self.write(&entries)?;
		}
		Ok(())
	}
}
