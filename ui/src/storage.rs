use anyhow::*;

use quill::auth::Token;
use quill::credential::{CredentialStore, TOKEN_KEY};

/// The browser's `localStorage`, holding the raw token under [`TOKEN_KEY`].
#[derive(Debug, Default)]
pub struct LocalCredentialStore;

impl LocalCredentialStore {
	fn storage() -> Result<web_sys::Storage> {
		seed::window()
			.local_storage()
			.map_err(|e| anyhow!("localStorage unavailable: {:?}", e))?
			.ok_or_else(|| anyhow!("localStorage unavailable"))
	}
}

impl CredentialStore for LocalCredentialStore {
	fn load(&self) -> Result<Option<Token>> {
		let item = Self::storage()?
			.get_item(TOKEN_KEY)
			.map_err(|e| anyhow!("Reading {}: {:?}", TOKEN_KEY, e))?;
		Ok(item.map(Token))
	}

	fn save(&self, token: &Token) -> Result<()> {
		Self::storage()?
			.set_item(TOKEN_KEY, token.as_str())
			.map_err(|e| anyhow!("Writing {}: {:?}", TOKEN_KEY, e))
	}

	fn clear(&self) -> Result<()> {
		Self::storage()?
			.remove_item(TOKEN_KEY)
			.map_err(|e| anyhow!("Removing {}: {:?}", TOKEN_KEY, e))
	}
}
