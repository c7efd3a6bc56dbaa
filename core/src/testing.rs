//! Fixtures shared by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::api::RawResponse;
use crate::article::{Article, Topic};
use crate::client::{HttpRequest, Transport};
use crate::error::ApiError;

pub fn respond(status: u16, body: &str) -> Result<RawResponse, ApiError> {
	Ok(RawResponse::new(status, body))
}

pub fn article(id: u64, title: &str) -> Article {
	Article {
		article_id: id,
		title: title.to_owned(),
		text: format!("text of {}", title),
		topic: Topic::JavaScript,
	}
}

pub fn articles_body(articles: &[Article], message: Option<&str>) -> String {
	serde_json::json!({
		"message": message,
		"articles": articles,
	}).to_string()
}

/// Answers requests from a queue and remembers what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
	responses: RefCell<VecDeque<Result<RawResponse, ApiError>>>,
	pub sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
	pub fn push(&self, response: Result<RawResponse, ApiError>) -> &Self {
		self.responses.borrow_mut().push_back(response);
		self
	}
}

impl Transport for &ScriptedTransport {
	fn send(&self, request: HttpRequest) -> Result<RawResponse, ApiError> {
		self.sent.borrow_mut().push(request.clone());
		self.responses.borrow_mut()
			.pop_front()
			.unwrap_or_else(|| panic!("unexpected request {:?}", request))
	}
}
