use serde::{Serialize, Deserialize, de::DeserializeOwned};

use crate::article::{Article, ArticleFields, ArticleId};
use crate::auth::{LoginRequest, Token};
use crate::error::ApiError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}

impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}

/// One call against the articles API.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiRequest {
	Login(LoginRequest),
	ListArticles,
	CreateArticle(ArticleFields),
	UpdateArticle(ArticleId, ArticleFields),
	DeleteArticle(ArticleId),
}

impl ApiRequest {
	pub fn method(&self) -> Method {
		match self {
			ApiRequest::Login(_) => Method::Post,
			ApiRequest::ListArticles => Method::Get,
			ApiRequest::CreateArticle(_) => Method::Post,
			ApiRequest::UpdateArticle(..) => Method::Put,
			ApiRequest::DeleteArticle(_) => Method::Delete,
		}
	}

	pub fn path(&self) -> String {
		match self {
			ApiRequest::Login(_) => "/login".to_owned(),
			ApiRequest::ListArticles | ApiRequest::CreateArticle(_) => "/articles".to_owned(),
			ApiRequest::UpdateArticle(id, _) | ApiRequest::DeleteArticle(id) => format!("/articles/{}", id),
		}
	}

	pub fn body(&self) -> Result<Option<String>, serde_json::Error> {
		Ok(match self {
			ApiRequest::Login(credentials) => Some(serde_json::to_string(credentials)?),
			ApiRequest::CreateArticle(fields) | ApiRequest::UpdateArticle(_, fields) => Some(serde_json::to_string(fields)?),
			ApiRequest::ListArticles | ApiRequest::DeleteArticle(_) => None,
		})
	}

	/// Login is the only call made without a credential.
	pub fn requires_auth(&self) -> bool {
		!matches!(self, ApiRequest::Login(_))
	}
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
	#[serde(default)]
	pub message: Option<String>,
	pub token: Token,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArticlesResponse {
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub articles: Vec<Article>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArticleResponse {
	#[serde(default)]
	pub message: Option<String>,
	pub article: Article,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateResponse {
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub articles: Option<Vec<Article>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
	#[serde(default)]
	pub message: Option<String>,
}

/// Status and body of an HTTP response, before interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
	pub status: u16,
	pub body: String,
}

impl RawResponse {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Decode a success payload, or turn an error status into an [`ApiError`].
	pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
		if !self.is_success() {
			return Err(ApiError::from_status(self.status, &self.body));
		}
		serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
	}
}

#[cfg(test)]
pub mod test {
	use super::*;
	use crate::article::Topic;

	#[test]
	pub fn test_routes() {
		let fields = ArticleFields::new("Hi", "World", Topic::React);
		let cases = vec![
			(ApiRequest::Login(LoginRequest::new("foo", "12345678")), Method::Post, "/login"),
			(ApiRequest::ListArticles, Method::Get, "/articles"),
			(ApiRequest::CreateArticle(fields.clone()), Method::Post, "/articles"),
			(ApiRequest::UpdateArticle(7, fields), Method::Put, "/articles/7"),
			(ApiRequest::DeleteArticle(7), Method::Delete, "/articles/7"),
		];
		for (request, method, path) in cases {
			assert_eq!(request.method(), method);
			assert_eq!(request.path(), path);
		}
	}

	#[test]
	pub fn test_bodies() {
		let login = ApiRequest::Login(LoginRequest::new("foo", "12345678"));
		assert_eq!(login.body().unwrap().unwrap(), r#"{"username":"foo","password":"12345678"}"#);
		assert!(!login.requires_auth());

		let create = ApiRequest::CreateArticle(ArticleFields::new("Hi", "World", Topic::React));
		assert_eq!(create.body().unwrap().unwrap(), r#"{"title":"Hi","text":"World","topic":"React"}"#);
		assert!(create.requires_auth());

		assert_eq!(ApiRequest::DeleteArticle(1).body().unwrap(), None);
	}

	#[test]
	pub fn test_decode_update_without_articles() {
		let response = RawResponse::new(200, r#"{"message": "updated"}"#);
		let decoded: UpdateResponse = response.decode().unwrap();
		assert_eq!(decoded.articles, None);
		assert_eq!(decoded.message.as_deref(), Some("updated"));
	}

	#[test]
	pub fn test_decode_error_status() {
		let response = RawResponse::new(401, r#"{"message": "Ouch: jwt expired"}"#);
		let err = response.decode::<ArticlesResponse>().unwrap_err();
		assert!(err.is_unauthorized());
		assert_eq!(err.server_message(), Some("Ouch: jwt expired"));
	}

	#[test]
	pub fn test_decode_garbage_success() {
		let err = RawResponse::new(200, "not json").decode::<LoginResponse>().unwrap_err();
		assert!(matches!(err, ApiError::Decode(_)));
	}
}
