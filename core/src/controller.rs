use std::time::Duration;

use log::*;

use crate::api::{ApiRequest, ArticleResponse, ArticlesResponse, LoginResponse, MessageResponse, RawResponse, UpdateResponse};
use crate::article::{Article, ArticleFields, ArticleId};
use crate::auth::{LoginRequest, Token};
use crate::client::{ClientFactory, HttpRequest};
use crate::config::Config;
use crate::credential::CredentialStore;
use crate::error::ApiError;
use crate::schedule::{Deferred, ScheduledTask, TaskId, Tasks};

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const GOODBYE: &str = "Goodbye!";
pub const LIST_OK: &str = "Articles fetched successfully.";
pub const LIST_FAILED: &str = "Error occurred";
pub const CREATE_OK: &str = "Article posted successfully.";
pub const CREATE_FAILED: &str = "Failed to post article. Please try again.";
pub const UPDATE_OK: &str = "Article updated successfully.";
pub const UPDATE_FAILED: &str = "Failed to update article. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete article. Please try again.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
	Login,
	Articles,
}

impl View {
	pub fn path(&self) -> &'static str {
		match self {
			View::Login => "/",
			View::Articles => "/articles",
		}
	}

	pub fn from_path(path: &str) -> View {
		match path.trim_end_matches('/') {
			"/articles" | "articles" => View::Articles,
			_ => View::Login,
		}
	}
}

/// Everything the front ends render from.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
	pub message: String,
	pub articles: Vec<Article>,
	pub current_article_id: Option<ArticleId>,
	pub busy: bool,
	pub view: View,
}

impl Default for AppState {
	fn default() -> Self {
		Self {
			message: String::new(),
			articles: Vec::new(),
			current_article_id: None,
			busy: false,
			view: View::Login,
		}
	}
}

/// An in-flight API call, carrying what is needed to apply its response.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
	Login,
	ListArticles,
	CreateArticle,
	UpdateArticle(ArticleId, ArticleFields),
	DeleteArticle(ArticleId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
	Login(LoginRequest),
	Logout,
	ListArticles,
	CreateArticle(ArticleFields),
	UpdateArticle(ArticleId, ArticleFields),
	DeleteArticle(ArticleId),
	SelectArticle(Option<ArticleId>),
	Navigate(View),
	/// A driver reporting the outcome of an [`Effect::Http`].
	Completed(Operation, Result<RawResponse, ApiError>),
	/// A driver reporting that a scheduled task's delay elapsed.
	Fire(TaskId),
}

/// Work the controller needs a driver to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
	Http(Operation, HttpRequest),
	Schedule(ScheduledTask),
}

/// Sole owner and mutator of the application state.
#[derive(Debug)]
pub struct Controller {
	state: AppState,
	client: ClientFactory,
	credentials: Box<dyn CredentialStore>,
	tasks: Tasks,
	redirect_delay: Duration,
}

impl Controller {
	pub fn new(config: &Config, credentials: Box<dyn CredentialStore>) -> Self {
		Self {
			state: AppState::default(),
			client: ClientFactory::new(config.base_url.clone()),
			credentials,
			tasks: Tasks::default(),
			redirect_delay: config.redirect_delay,
		}
	}

	pub fn state(&self) -> &AppState {
		&self.state
	}

	/// The article being edited. `None` also when the selected id is unknown.
	pub fn current_article(&self) -> Option<&Article> {
		let id = self.state.current_article_id?;
		self.state.articles.iter().find(|a| a.article_id == id)
	}

	pub fn has_credential(&self) -> bool {
		self.token().is_some()
	}

	pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
		debug!("dispatch: {:?}", &command);
		match command {
			Command::Login(credentials) => self.begin(Operation::Login, ApiRequest::Login(credentials)),
			Command::Logout => self.logout(),
			Command::ListArticles => self.begin(Operation::ListArticles, ApiRequest::ListArticles),
			Command::CreateArticle(fields) => self.begin(Operation::CreateArticle, ApiRequest::CreateArticle(fields)),
			Command::UpdateArticle(id, fields) => {
				let fields = fields.trimmed();
				self.begin(Operation::UpdateArticle(id, fields.clone()), ApiRequest::UpdateArticle(id, fields))
			},
			Command::DeleteArticle(id) => self.begin(Operation::DeleteArticle(id), ApiRequest::DeleteArticle(id)),
			Command::SelectArticle(id) => {
				self.state.current_article_id = id;
				Vec::new()
			},
			Command::Navigate(view) => {
				self.state.view = view;
				Vec::new()
			},
			Command::Completed(operation, result) => self.complete(operation, result),
			Command::Fire(id) => {
				match self.tasks.take(id) {
					Some(action) => self.run_deferred(action),
					None => debug!("Ignoring stale task {:?}", id),
				}
				Vec::new()
			},
		}
	}

	/// Cancels every pending task. Tasks firing afterwards do nothing.
	pub fn shutdown(&mut self) -> Vec<TaskId> {
		self.tasks.cancel_all()
	}

	fn set_message(&mut self, message: impl Into<String>) {
		self.state.message = message.into();
		debug!("Message updated to: {:?}", &self.state.message);
	}

	fn token(&self) -> Option<Token> {
		match self.credentials.load() {
			Result::Ok(token) => token,
			Result::Err(e) => {
				warn!("Unable to read credential: {:?}", e);
				None
			},
		}
	}

	fn begin(&mut self, operation: Operation, request: ApiRequest) -> Vec<Effect> {
		self.set_message("");
		self.state.busy = true;
		let token = self.token();
		match self.client.build(&request, token.as_ref()) {
			Result::Ok(http) => vec![Effect::Http(operation, http)],
			Result::Err(e) => self.complete(operation, Err(e)),
		}
	}

	fn complete(&mut self, operation: Operation, result: Result<RawResponse, ApiError>) -> Vec<Effect> {
		let effects = match operation {
			Operation::Login => {
				self.finish_login(result.and_then(|r| r.decode::<LoginResponse>()));
				Vec::new()
			},
			Operation::ListArticles => {
				self.finish_list(result.and_then(|r| r.decode::<ArticlesResponse>()));
				Vec::new()
			},
			Operation::CreateArticle => self.finish_create(result.and_then(|r| r.decode::<ArticleResponse>())),
			Operation::UpdateArticle(id, fields) => {
				self.finish_update(id, &fields, result.and_then(|r| r.decode::<UpdateResponse>()));
				Vec::new()
			},
			Operation::DeleteArticle(id) => {
				self.finish_delete(id, result.and_then(|r| r.decode::<MessageResponse>()));
				Vec::new()
			},
		};
		self.state.busy = false;
		effects
	}

	fn finish_login(&mut self, result: Result<LoginResponse, ApiError>) {
		match result {
			Result::Ok(response) => {
				if let Err(e) = self.credentials.save(&response.token) {
					error!("Unable to store credential: {:?}", e);
				}
				info!("Logged in");
				self.state.view = View::Articles;
			},
			Result::Err(e) => {
				error!("Login failed: {}", e);
				self.set_message(LOGIN_FAILED);
			},
		}
	}

	fn finish_list(&mut self, result: Result<ArticlesResponse, ApiError>) {
		match result {
			Result::Ok(response) => {
				self.state.articles = response.articles;
				self.set_message(message_or(response.message, LIST_OK));
			},
			Result::Err(e) => {
				error!("Error fetching articles: {}", e);
				self.set_message(e.user_message(LIST_FAILED));
				if e.is_unauthorized() {
					self.forget_credential();
					self.state.view = View::Login;
				}
			},
		}
	}

	fn finish_create(&mut self, result: Result<ArticleResponse, ApiError>) -> Vec<Effect> {
		match result {
			Result::Ok(response) => {
				self.state.articles.push(response.article);
				self.set_message(message_or(response.message, CREATE_OK));
				vec![Effect::Schedule(self.tasks.schedule(self.redirect_delay, Deferred::RedirectToArticles))]
			},
			Result::Err(e) => {
				error!("Error posting article: {}", e);
				self.set_message(e.user_message(CREATE_FAILED));
				Vec::new()
			},
		}
	}

	fn finish_update(&mut self, id: ArticleId, fields: &ArticleFields, result: Result<UpdateResponse, ApiError>) {
		match result {
			Result::Ok(response) => {
				match response.articles {
					Some(articles) => self.state.articles = articles,
					None => {
						// keep what was sent: the trimmed values, not the raw input
						for article in self.state.articles.iter_mut().filter(|a| a.article_id == id) {
							*article = article.with_fields(fields);
						}
					},
				}
				self.set_message(message_or(response.message, UPDATE_OK));
				self.state.current_article_id = None;
			},
			Result::Err(e) => {
				error!("Error updating article {}: {}", id, e);
				self.set_message(e.user_message(UPDATE_FAILED));
			},
		}
	}

	fn finish_delete(&mut self, id: ArticleId, result: Result<MessageResponse, ApiError>) {
		match result {
			Result::Ok(response) => {
				self.state.articles.retain(|a| a.article_id != id);
				self.set_message(response.message.unwrap_or_default());
			},
			Result::Err(e) => {
				error!("Error deleting article {}: {}", id, e);
				self.set_message(e.user_message(DELETE_FAILED));
			},
		}
	}

	fn logout(&mut self) -> Vec<Effect> {
		self.forget_credential();
		self.state.articles.clear();
		self.set_message(GOODBYE);
		vec![Effect::Schedule(self.tasks.schedule(self.redirect_delay, Deferred::RedirectToLogin))]
	}

	fn forget_credential(&mut self) {
		if let Err(e) = self.credentials.clear() {
			error!("Unable to clear credential: {:?}", e);
		}
	}

	fn run_deferred(&mut self, action: Deferred) {
		match action {
			Deferred::RedirectToLogin => {
				self.set_message("");
				self.state.view = View::Login;
			},
			Deferred::RedirectToArticles => {
				self.state.view = View::Articles;
			},
		}
	}
}

fn message_or(message: Option<String>, fallback: &str) -> String {
	message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.to_owned())
}
