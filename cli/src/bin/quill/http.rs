use std::time::Duration;

use log::*;
use quill::api::RawResponse;
use quill::client::{HttpRequest, Transport};
use quill::error::ApiError;

pub struct UreqTransport {
	agent: ureq::Agent,
}

impl UreqTransport {
	pub fn new(timeout: Duration) -> Self {
		Self { agent: ureq::AgentBuilder::new().timeout(timeout).build() }
	}
}

impl Transport for UreqTransport {
	fn send(&self, request: HttpRequest) -> Result<RawResponse, ApiError> {
		let mut req = self.agent.request(request.method.as_str(), &request.url);
		for (name, value) in request.headers.iter() {
			req = req.set(name, value);
		}
		let response = match &request.body {
			None => req.call(),
			Some(body) => req.send_string(body),
		};
		match response {
			Result::Ok(response) => {
				let status = response.status();
				let body = response.into_string().map_err(|e| ApiError::Transport(e.to_string()))?;
				Ok(RawResponse::new(status, body))
			},
			Result::Err(ureq::Error::Status(status, response)) => {
				debug!("{} {} -> {}", request.method.as_str(), &request.url, status);
				Ok(RawResponse::new(status, response.into_string().unwrap_or_default()))
			},
			Result::Err(ureq::Error::Transport(e)) => Err(ApiError::Transport(e.to_string())),
		}
	}
}
