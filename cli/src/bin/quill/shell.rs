use std::time::Instant;

use anyhow::*;

use quill::article::{Article, ArticleId, Topic};
use quill::auth::LoginRequest;
use quill::client::Transport;
use quill::controller::{AppState, Command, View};
use quill::form::{ArticleForm, Field, FormMode};
use quill::list::ArticleList;
use quill::session::Session;

const HELP: &str = "\
Commands:
  login            log in
  logout           log out
  list             fetch your articles
  new              write a new article
  edit <id>        edit an article
  delete <id>      delete an article
  goto <view>      switch to `login` or `articles`
  help             show this message
  quit             leave";

#[derive(Debug, PartialEq)]
pub enum Input {
	Empty,
	Login,
	Logout,
	List,
	New,
	Edit(ArticleId),
	Delete(ArticleId),
	Goto(View),
	Help,
	Quit,
}

pub fn parse_input(line: &str) -> Result<Input> {
	let mut words = line.split_whitespace();
	let cmd = match words.next() {
		None => return Ok(Input::Empty),
		Some(cmd) => cmd,
	};
	let arg = words.next();
	let id = || -> Result<ArticleId> {
		let arg = arg.ok_or_else(|| anyhow!("`{}` needs an article id", cmd))?;
		arg.parse().with_context(|| anyhow!("Not an article id: {:?}", arg))
	};
	Ok(match cmd {
		"login" => Input::Login,
		"logout" => Input::Logout,
		"list" | "ls" => Input::List,
		"new" => Input::New,
		"edit" => Input::Edit(id()?),
		"delete" | "rm" => Input::Delete(id()?),
		"goto" => match arg {
			Some("login") | Some("/") => Input::Goto(View::Login),
			Some("articles") | Some("/articles") => Input::Goto(View::Articles),
			other => bail!("Unknown view: {:?}", other.unwrap_or("")),
		},
		"help" | "?" => Input::Help,
		"quit" | "exit" => Input::Quit,
		other => bail!("Unknown command: {:?} (try `help`)", other),
	})
}

pub fn loading_indicator(busy: bool) {
	if busy {
		eprintln!("Loading ...");
	}
}

pub fn format_article(article: &Article) -> String {
	format!("#{} {} [{}]\n    {}", article.article_id, article.title, article.topic, article.text)
}

pub fn format_articles(articles: &[Article]) -> String {
	if articles.is_empty() {
		return "No articles yet".to_owned();
	}
	articles.iter().map(format_article).collect::<Vec<_>>().join("\n")
}

pub struct Shell<T> {
	session: Session<T>,
	form: ArticleForm,
	list: ArticleList,
	shown_message: String,
	shown_articles: Option<Vec<Article>>,
}

impl<T: Transport> Shell<T> {
	pub fn new(session: Session<T>) -> Self {
		Self {
			session,
			form: ArticleForm::new(),
			list: ArticleList::default(),
			shown_message: String::new(),
			shown_articles: None,
		}
	}

	pub fn run(mut self) -> Result<()> {
		if self.session.controller().has_credential() {
			self.session.dispatch(Command::Navigate(View::Articles));
		}
		println!("{}", HELP);
		loop {
			self.session.run_due(Instant::now());
			self.mount();
			self.render();
			let prompt = format!("quill:{}> ", self.state().view.path());
			let line = rprompt::prompt_reply_stderr(&prompt)?;
			let input = match parse_input(&line) {
				Result::Ok(input) => input,
				Result::Err(e) => {
					println!("{}", e);
					continue;
				},
			};
			match input {
				Input::Empty => (),
				Input::Login => self.login()?,
				Input::Logout => self.session.dispatch(Command::Logout),
				Input::List => self.session.dispatch(Command::ListArticles),
				Input::New => {
					self.select(None);
					self.fill_form()?;
				},
				Input::Edit(id) => {
					self.select(Some(id));
					if self.form.mode() == FormMode::Create {
						println!("No article #{} in the list", id);
						self.select(None);
					} else {
						self.fill_form()?;
					}
				},
				Input::Delete(id) => self.session.dispatch(Command::DeleteArticle(id)),
				Input::Goto(view) => self.session.dispatch(Command::Navigate(view)),
				Input::Help => println!("{}", HELP),
				Input::Quit => break,
			}
		}
		Ok(())
	}

	fn state(&self) -> &AppState {
		self.session.state()
	}

	fn mount(&mut self) {
		let view = self.state().view;
		if let Some(command) = self.list.enter(view) {
			self.session.dispatch(command);
		}
		if !self.list.is_mounted() {
			self.shown_articles = None;
		}
	}

	fn render(&mut self) {
		let state = self.session.state();
		if state.message != self.shown_message {
			if !state.message.is_empty() {
				println!("> {}", &state.message);
			}
			self.shown_message = state.message.clone();
		}
		if state.view == View::Articles && self.shown_articles.as_ref() != Some(&state.articles) {
			println!("{}", format_articles(&state.articles));
			self.shown_articles = Some(state.articles.clone());
		}
	}

	fn login(&mut self) -> Result<()> {
		let username = rprompt::prompt_reply_stderr("Username: ")?;
		let password = rpassword::prompt_password("Password: ")?;
		let request = LoginRequest::new(username.trim(), password);
		if request.is_complete() {
			self.session.dispatch(Command::Login(request));
		} else {
			println!("Username and password are required");
		}
		Ok(())
	}

	fn select(&mut self, id: Option<ArticleId>) {
		self.session.dispatch(Command::SelectArticle(id));
		self.form.sync(self.session.controller().current_article());
	}

	fn fill_form(&mut self) -> Result<()> {
		println!("{}", self.form.heading());
		let values = self.form.values().clone();
		edit_field(&mut self.form, "Title", Field::Title, &values.title)?;
		edit_field(&mut self.form, "Text", Field::Text, &values.text)?;
		let topics = Topic::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join("/");
		let topic = values.topic.map(|t| t.as_str()).unwrap_or("");
		edit_field(&mut self.form, &format!("Topic ({})", topics), Field::Topic, topic)?;

		if !self.form.can_submit() {
			println!("Title, text and topic are all required");
			let cancel = self.form.cancel();
			self.session.dispatch(cancel);
			return Ok(());
		}
		let confirm = rprompt::prompt_reply_stderr("Submit? [Y/n] ")?;
		let commands = if confirm.trim().eq_ignore_ascii_case("n") {
			vec![self.form.cancel()]
		} else {
			self.form.submit().unwrap_or_default()
		};
		for command in commands {
			self.session.dispatch(command);
		}
		Ok(())
	}
}

fn edit_field(form: &mut ArticleForm, desc: &str, field: Field, current: &str) -> Result<()> {
	let prompt = if current.is_empty() {
		format!("{}: ", desc)
	} else {
		format!("{}: [{}] ", desc, current)
	};
	let response = rprompt::prompt_reply_stderr(&prompt)?;
	let value = if response.is_empty() { current } else { response.as_str() };
	form.set(field, value);
	Ok(())
}
