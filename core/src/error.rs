use serde::Deserialize;

/// Why an API call did not produce a usable payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
	/// No response at all (connection refused, DNS, aborted fetch, ...).
	#[error("transport failure: {0}")]
	Transport(String),

	#[error("server responded with status {status}")]
	Status {
		status: u16,
		message: Option<String>,
	},

	/// A 2xx response whose body did not match the expected payload.
	#[error("unexpected response body: {0}")]
	Decode(String),
}

pub const UNAUTHORIZED: u16 = 401;

#[derive(Deserialize)]
struct ErrorBody {
	#[serde(default)]
	message: Option<String>,
}

impl ApiError {
	/// Builds a status error, picking up `message` from a JSON body when there is one.
	pub fn from_status(status: u16, body: &str) -> Self {
		let message = serde_json::from_str::<ErrorBody>(body)
			.ok()
			.and_then(|b| b.message)
			.filter(|m| !m.is_empty());
		ApiError::Status { status, message }
	}

	pub fn is_unauthorized(&self) -> bool {
		matches!(self, ApiError::Status { status: UNAUTHORIZED, .. })
	}

	/// The server-supplied message, if the server sent one.
	pub fn server_message(&self) -> Option<&str> {
		match self {
			ApiError::Status { message, .. } => message.as_deref(),
			_ => None,
		}
	}

	/// Message to show the user: the server's own message, else `fallback`.
	pub fn user_message(&self, fallback: &str) -> String {
		self.server_message().unwrap_or(fallback).to_owned()
	}
}
