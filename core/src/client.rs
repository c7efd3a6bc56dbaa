use crate::api::{ApiRequest, Method, RawResponse};
use crate::auth::Token;
use crate::error::ApiError;

/// A request ready to hand to an HTTP library.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
	pub method: Method,
	pub url: String,
	pub headers: Vec<(&'static str, String)>,
	pub body: Option<String>,
}

impl HttpRequest {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}

/// Builds requests against one base address, attaching the current token.
#[derive(Clone, Debug)]
pub struct ClientFactory {
	base_url: String,
}

impl ClientFactory {
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_owned();
		Self { base_url }
	}

	pub fn build(&self, request: &ApiRequest, token: Option<&Token>) -> Result<HttpRequest, ApiError> {
		let body = request.body().map_err(|e| ApiError::Transport(e.to_string()))?;
		let mut headers = Vec::new();
		if body.is_some() {
			headers.push(("Content-Type", "application/json".to_owned()));
		}
		if request.requires_auth() {
			if let Some(token) = token {
				headers.push(("Authorization", token.as_str().to_owned()));
			}
		}
		Ok(HttpRequest {
			method: request.method(),
			url: format!("{}{}", self.base_url, request.path()),
			headers,
			body,
		})
	}
}

/// Synchronous HTTP execution, for drivers that can block.
pub trait Transport {
	/// Any response with a status, including 4xx/5xx, is `Ok`.
	fn send(&self, request: HttpRequest) -> Result<RawResponse, ApiError>;
}

#[cfg(test)]
pub mod test {
	use super::*;
	use crate::auth::LoginRequest;

	#[test]
	pub fn test_authorization_header() {
		let factory = ClientFactory::new("http://localhost:9000/api/");
		let token = Token("secret".to_owned());

		let list = factory.build(&ApiRequest::ListArticles, Some(&token)).unwrap();
		assert_eq!(list.url, "http://localhost:9000/api/articles");
		assert_eq!(list.header("authorization"), Some("secret"));
		assert_eq!(list.body, None);
		assert_eq!(list.header("content-type"), None);

		let login = factory.build(&ApiRequest::Login(LoginRequest::new("foo", "bar")), Some(&token)).unwrap();
		assert_eq!(login.header("authorization"), None);
		assert_eq!(login.header("content-type"), Some("application/json"));
	}

	#[test]
	pub fn test_no_token_no_header() {
		let factory = ClientFactory::new("http://x");
		let request = factory.build(&ApiRequest::DeleteArticle(2), None).unwrap();
		assert_eq!(request.url, "http://x/articles/2");
		assert_eq!(request.method, Method::Delete);
		assert!(request.headers.is_empty());
	}
}
