mod fetch;
mod storage;
mod views;

use seed::{prelude::*, *};

use quill::auth::LoginRequest;
use quill::config::Config;
use quill::controller::{Command, Controller, Effect, View};
use quill::form::{ArticleForm, Field};
use quill::list::ArticleList;

fn init(url: Url, orders: &mut impl Orders<Msg>) -> Model {
	orders.subscribe(Msg::UrlChanged);
	let controller = Controller::new(&Config::default(), Box::new(storage::LocalCredentialStore));
	let mut model = Model {
		controller,
		form: ArticleForm::new(),
		login: LoginRequest::default(),
		list: ArticleList::default(),
		shown_view: View::Login,
	};
	model.run(Command::Navigate(view_for(&url)), orders);
	model.after_update(orders);
	model
}

struct Model {
	controller: Controller,
	form: ArticleForm,
	login: LoginRequest,
	list: ArticleList,
	shown_view: View,
}

#[derive(Copy, Clone, Debug)]
pub enum LoginField {
	Username,
	Password,
}

pub enum Msg {
	UrlChanged(subs::UrlChanged),
	Dispatch(Command),
	LoginInput(LoginField, String),
	LoginSubmit,
	FormInput(Field, String),
	FormSubmit,
	FormCancel,
}

fn view_for(url: &Url) -> View {
	View::from_path(&format!("/{}", url.path().join("/")))
}

impl Model {
	/// Hand a command to the controller and schedule whatever it asks for.
	fn run(&mut self, command: Command, orders: &mut impl Orders<Msg>) {
		for effect in self.controller.dispatch(command) {
			match effect {
				Effect::Http(operation, request) => {
					orders.perform_cmd(async move {
						let result = fetch::send(request).await;
						Msg::Dispatch(Command::Completed(operation, result))
					});
				},
				Effect::Schedule(task) => {
					let id = task.id;
					orders.perform_cmd(cmds::timeout(task.delay_ms(), move || Msg::Dispatch(Command::Fire(id))));
				},
			}
		}
	}

	fn after_update(&mut self, orders: &mut impl Orders<Msg>) {
		let view = self.controller.state().view;
		if view != self.shown_view {
			log::debug!("Navigating to {}", view.path());
			Url::new()
				.set_path(view.path().split('/').filter(|part| !part.is_empty()))
				.go_and_push();
			self.shown_view = view;
		}

		if let Some(command) = self.list.enter(view) {
			self.run(command, orders);
		}

		self.form.sync(self.controller.current_article());
	}
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
	match msg {
		Msg::UrlChanged(subs::UrlChanged(url)) => {
			let view = view_for(&url);
			model.shown_view = view;
			model.run(Command::Navigate(view), orders);
		},
		Msg::Dispatch(command) => model.run(command, orders),
		Msg::LoginInput(LoginField::Username, value) => model.login.username = value,
		Msg::LoginInput(LoginField::Password, value) => model.login.password = value,
		Msg::LoginSubmit => {
			if model.login.is_complete() {
				let request = LoginRequest::new(model.login.username.trim(), model.login.password.clone());
				model.run(Command::Login(request), orders);
			}
		},
		Msg::FormInput(field, value) => model.form.set(field, &value),
		Msg::FormSubmit => {
			for command in model.form.submit().unwrap_or_default() {
				model.run(command, orders);
			}
		},
		Msg::FormCancel => {
			let command = model.form.cancel();
			model.run(command, orders);
		},
	}
	model.after_update(orders);
}

fn view(model: &Model) -> Node<Msg> {
	let state = model.controller.state();
	div![
		views::loading_indicator(state.busy),
		views::message_panel(&state.message),
		button![
			attrs!{ At::Id => "logout" },
			"Logout from app",
			ev(Ev::Click, |_| Msg::Dispatch(Command::Logout)),
		],
		div![
			attrs!{ At::Id => "wrapper" },
			style!{ St::Opacity => if state.busy { "0.25" } else { "1" } },
			h1!["Quill"],
			nav![
				a![attrs!{ At::Id => "loginScreen", At::Href => View::Login.path() }, "Login"],
				a![attrs!{ At::Id => "articlesScreen", At::Href => View::Articles.path() }, "Articles"],
			],
			match state.view {
				View::Login => views::login_form(&model.login),
				View::Articles => div![
					views::article_form(&model.form),
					views::article_list(&state.articles),
				],
			},
		],
	]
}

// (This function is invoked by `init` function in `index.html`.)
#[wasm_bindgen(start)]
pub fn start() {
	// Mount the `app` to the element with the `id` "app".
	App::start("app", init, update, view);
}
