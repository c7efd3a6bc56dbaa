use std::time::Instant;

use log::*;

use crate::client::Transport;
use crate::controller::{AppState, Command, Controller, Effect};
use crate::schedule::TaskId;

/// Runs a [`Controller`] on a blocking [`Transport`]. Requests complete
/// before `dispatch` returns; delayed tasks wait for [`Session::run_due`].
/// Dropping the session cancels whatever is still scheduled.
pub struct Session<T> {
	controller: Controller,
	transport: T,
	timers: Vec<(Instant, TaskId)>,
	observer: Option<Box<dyn FnMut(&AppState)>>,
}

impl<T: Transport> Session<T> {
	pub fn new(controller: Controller, transport: T) -> Self {
		Self { controller, transport, timers: Vec::new(), observer: None }
	}

	/// Called with the state just before each request goes out, while `busy` is set.
	pub fn on_request(mut self, observer: impl FnMut(&AppState) + 'static) -> Self {
		self.observer = Some(Box::new(observer));
		self
	}

	pub fn controller(&self) -> &Controller {
		&self.controller
	}

	pub fn state(&self) -> &AppState {
		self.controller.state()
	}

	pub fn dispatch(&mut self, command: Command) {
		self.dispatch_at(command, Instant::now())
	}

	/// Like [`Session::dispatch`], with delays measured from `now`.
	pub fn dispatch_at(&mut self, command: Command, now: Instant) {
		let mut queue = self.controller.dispatch(command);
		while !queue.is_empty() {
			match queue.remove(0) {
				Effect::Http(operation, request) => {
					debug!("{} {}", request.method.as_str(), &request.url);
					if let Some(observer) = self.observer.as_mut() {
						observer(self.controller.state());
					}
					let result = self.transport.send(request);
					queue.extend(self.controller.dispatch(Command::Completed(operation, result)));
				},
				Effect::Schedule(task) => {
					self.timers.push((now + task.delay, task.id));
				},
			}
		}
	}

	pub fn next_deadline(&self) -> Option<Instant> {
		self.timers.iter().map(|(at, _)| *at).min()
	}

	/// Fires every task due at `now`, earliest first. Returns how many fired.
	pub fn run_due(&mut self, now: Instant) -> usize {
		let (mut due, pending): (Vec<_>, Vec<_>) = self.timers.drain(..).partition(|(at, _)| *at <= now);
		self.timers = pending;
		due.sort();
		for (_, id) in due.iter() {
			self.dispatch_at(Command::Fire(*id), now);
		}
		due.len()
	}
}

impl<T> Drop for Session<T> {
	fn drop(&mut self) {
		let cancelled = self.controller.shutdown();
		if !cancelled.is_empty() {
			debug!("Cancelled {} scheduled task(s)", cancelled.len());
		}
	}
}

#[cfg(test)]
pub mod test {
	use std::time::Duration;

	use super::*;
	use crate::article::{ArticleFields, Topic};
	use crate::auth::LoginRequest;
	use crate::config::Config;
	use crate::controller::{View, GOODBYE};
	use crate::credential::MemoryCredentialStore;
	use crate::testing::*;

	fn session(transport: &ScriptedTransport) -> Session<&ScriptedTransport> {
		Session::new(Controller::new(&Config::default(), Box::new(MemoryCredentialStore::default())), transport)
	}

	#[test]
	pub fn test_login_then_list() {
		let transport = ScriptedTransport::default();
		transport
			.push(respond(200, r#"{"message": "Welcome back", "token": "abc"}"#))
			.push(respond(200, &articles_body(&[article(1, "a")], None)));

		let mut s = session(&transport);
		s.dispatch(Command::Login(LoginRequest::new("foo", "12345678")));
		assert_eq!(s.state().view, View::Articles);
		s.dispatch(Command::ListArticles);
		assert_eq!(s.state().articles, vec![article(1, "a")]);
		assert!(!s.state().busy);

		let sent = transport.sent.borrow();
		assert_eq!(sent.len(), 2);
		assert_eq!(sent[0].header("Authorization"), None);
		assert_eq!(sent[1].header("Authorization"), Some("abc"));
	}

	#[test]
	pub fn test_create_redirects_after_delay() {
		let transport = ScriptedTransport::default();
		transport.push(respond(201, r#"{"article": {"article_id": 1, "title": "Hi", "text": "World", "topic": "React"}}"#));

		let mut s = session(&transport);
		let start = Instant::now();
		s.dispatch_at(Command::CreateArticle(ArticleFields::new("Hi", "World", Topic::React)), start);
		assert_eq!(s.state().view, View::Login);
		assert_eq!(s.next_deadline(), Some(start + Duration::from_secs(3)));

		assert_eq!(s.run_due(start + Duration::from_secs(2)), 0);
		assert_eq!(s.state().view, View::Login);
		assert_eq!(s.run_due(start + Duration::from_secs(3)), 1);
		assert_eq!(s.state().view, View::Articles);
		assert_eq!(s.next_deadline(), None);
	}

	#[test]
	pub fn test_later_navigation_wins() {
		let transport = ScriptedTransport::default();
		let mut s = session(&transport);
		let start = Instant::now();
		s.dispatch_at(Command::Navigate(View::Articles), start);
		s.dispatch_at(Command::Logout, start);
		assert_eq!(s.state().message, GOODBYE);

		// navigating by hand does not cancel the pending redirect
		s.dispatch_at(Command::Navigate(View::Articles), start + Duration::from_secs(1));
		s.run_due(start + Duration::from_secs(3));
		assert_eq!(s.state().view, View::Login);
		assert_eq!(s.state().message, "");
		assert!(transport.sent.borrow().is_empty());
	}

	#[test]
	pub fn test_observer_sees_busy() {
		use std::{cell::RefCell, rc::Rc};

		let transport = ScriptedTransport::default();
		transport.push(respond(200, &articles_body(&[], None)));
		let seen = Rc::new(RefCell::new(Vec::new()));
		let recorded = seen.clone();
		let mut s = session(&transport).on_request(move |state| recorded.borrow_mut().push(state.busy));
		s.dispatch(Command::ListArticles);
		assert_eq!(*seen.borrow(), vec![true]);
		assert!(!s.state().busy);
	}

	#[test]
	pub fn test_transport_failure_clears_busy() {
		let transport = ScriptedTransport::default();
		transport.push(Err(crate::error::ApiError::Transport("connection refused".to_owned())));
		let mut s = session(&transport);
		s.dispatch(Command::Login(LoginRequest::new("foo", "bar")));
		assert!(!s.state().busy);
		assert_eq!(s.state().message, crate::controller::LOGIN_FAILED);
	}
}
