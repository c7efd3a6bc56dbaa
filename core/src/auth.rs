use serde::{Serialize, Deserialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}

impl LoginRequest {
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self { username: username.into(), password: password.into() }
	}

	pub fn is_complete(&self) -> bool {
		!self.username.trim().is_empty() && !self.password.is_empty()
	}
}

/// Opaque bearer token issued by the server on login.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Token(pub String);

impl Token {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Debug for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("Token(..)")
	}
}
