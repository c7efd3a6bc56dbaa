use seed::browser::fetch;

use quill::api::{Method, RawResponse};
use quill::client::HttpRequest;
use quill::error::ApiError;

fn method(method: Method) -> fetch::Method {
	match method {
		Method::Get => fetch::Method::Get,
		Method::Post => fetch::Method::Post,
		Method::Put => fetch::Method::Put,
		Method::Delete => fetch::Method::Delete,
	}
}

/// Browser counterpart of the blocking transport: any status is a response,
/// only a failed fetch is an error.
pub async fn send(request: HttpRequest) -> Result<RawResponse, ApiError> {
	let mut req = fetch::Request::new(request.url).method(method(request.method));
	if let Some(body) = request.body {
		req = req.text(body);
	}
	for (name, value) in request.headers {
		req = req.header(fetch::Header::custom(name, value));
	}
	let response = req.fetch().await
		.map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
	let status = response.status().code;
	let body = response.text().await
		.map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
	Ok(RawResponse::new(status, body))
}
