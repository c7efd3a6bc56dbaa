use crate::article::{clamp_chars, Article, ArticleFields, ArticleId, Topic, TEXT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::controller::Command;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
	Title,
	Text,
	Topic,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues {
	pub title: String,
	pub text: String,
	pub topic: Option<Topic>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
	Create,
	Edit(ArticleId),
}

/// Create/edit form for one article. The mode follows the controller's
/// selection via [`ArticleForm::sync`]; values are local until submitted.
#[derive(Clone, Debug, Default)]
pub struct ArticleForm {
	editing: Option<Article>,
	values: FormValues,
}

impl ArticleForm {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn mode(&self) -> FormMode {
		match &self.editing {
			Some(article) => FormMode::Edit(article.article_id),
			None => FormMode::Create,
		}
	}

	pub fn values(&self) -> &FormValues {
		&self.values
	}

	pub fn heading(&self) -> &'static str {
		match self.mode() {
			FormMode::Create => "Create Article",
			FormMode::Edit(_) => "Edit Article",
		}
	}

	/// Follow the selected article. Values are reseeded whenever the selected
	/// record changes, and cleared when the selection goes away.
	pub fn sync(&mut self, selected: Option<&Article>) {
		if self.editing.as_ref() == selected {
			return;
		}
		self.values = match selected {
			Some(article) => FormValues {
				title: article.title.clone(),
				text: article.text.clone(),
				topic: Some(article.topic),
			},
			None => FormValues::default(),
		};
		self.editing = selected.cloned();
	}

	pub fn set(&mut self, field: Field, value: &str) {
		match field {
			Field::Title => self.values.title = clamp_chars(value, TITLE_MAX_CHARS),
			Field::Text => self.values.text = clamp_chars(value, TEXT_MAX_CHARS),
			Field::Topic => self.values.topic = value.parse().ok(),
		}
	}

	pub fn can_submit(&self) -> bool {
		!self.values.title.is_empty() && !self.values.text.is_empty() && self.values.topic.is_some()
	}

	/// Commands for the controller, or `None` while the form is incomplete.
	/// The form is blank again afterwards, whatever the request's outcome.
	pub fn submit(&mut self) -> Option<Vec<Command>> {
		let topic = self.values.topic.filter(|_| self.can_submit())?;
		let fields = ArticleFields::new(self.values.title.clone(), self.values.text.clone(), topic);
		let command = match self.mode() {
			FormMode::Edit(id) => Command::UpdateArticle(id, fields),
			FormMode::Create => Command::CreateArticle(fields),
		};
		self.reset();
		Some(vec![command, Command::SelectArticle(None)])
	}

	pub fn cancel(&mut self) -> Command {
		self.reset();
		Command::SelectArticle(None)
	}

	fn reset(&mut self) {
		self.editing = None;
		self.values = FormValues::default();
	}
}

#[cfg(test)]
pub mod test {
	use super::*;
	use crate::config::Config;
	use crate::controller::Controller;
	use crate::credential::MemoryCredentialStore;
	use crate::testing::article;

	fn filled() -> ArticleForm {
		let mut form = ArticleForm::new();
		form.set(Field::Title, "Hi");
		form.set(Field::Text, "World");
		form.set(Field::Topic, "React");
		form
	}

	#[test]
	pub fn test_submit_disabled_until_complete() {
		let mut form = ArticleForm::new();
		assert!(!form.can_submit());
		assert_eq!(form.submit(), None);

		for missing in [Field::Title, Field::Text, Field::Topic] {
			let mut form = filled();
			form.set(missing, "");
			assert!(!form.can_submit(), "{:?} empty", missing);
			assert_eq!(form.submit(), None);
		}

		assert!(filled().can_submit());
	}

	#[test]
	pub fn test_create_submit() {
		let mut form = filled();
		assert_eq!(form.heading(), "Create Article");
		assert_eq!(form.submit(), Some(vec![
			Command::CreateArticle(ArticleFields::new("Hi", "World", Topic::React)),
			Command::SelectArticle(None),
		]));
		assert_eq!(form.values(), &FormValues::default());
	}

	#[test]
	pub fn test_edit_then_submit() {
		let mut form = ArticleForm::new();
		let selected = article(4, "old");
		form.sync(Some(&selected));
		assert_eq!(form.mode(), FormMode::Edit(4));
		assert_eq!(form.heading(), "Edit Article");
		assert_eq!(form.values().title, "old");
		assert_eq!(form.values().topic, Some(Topic::JavaScript));

		form.set(Field::Title, "new");
		// the same selection arriving again must not clobber local edits
		form.sync(Some(&selected));
		assert_eq!(form.values().title, "new");

		let commands = form.submit().unwrap();
		assert_eq!(commands[0], Command::UpdateArticle(4, ArticleFields::new("new", "text of old", Topic::JavaScript)));
		assert_eq!(commands[1], Command::SelectArticle(None));
		assert_eq!(form.mode(), FormMode::Create);
	}

	#[test]
	pub fn test_cancel_edit() {
		let mut form = ArticleForm::new();
		form.sync(Some(&article(4, "old")));
		form.set(Field::Text, "changed");
		assert_eq!(form.cancel(), Command::SelectArticle(None));
		assert_eq!(form.mode(), FormMode::Create);
		assert_eq!(form.values(), &FormValues::default());
	}

	#[test]
	pub fn test_cancel_edit_makes_no_request() {
		let mut controller = Controller::new(&Config::default(), Box::new(MemoryCredentialStore::default()));
		let mut form = ArticleForm::new();
		controller.dispatch(Command::SelectArticle(Some(4)));
		form.sync(Some(&article(4, "old")));

		let effects = controller.dispatch(form.cancel());
		assert!(effects.is_empty(), "effects: {:?}", &effects);
		assert_eq!(controller.state().current_article_id, None);
		assert!(!controller.state().busy);
		assert_eq!(form.mode(), FormMode::Create);
	}

	#[test]
	pub fn test_selection_cleared_externally() {
		let mut form = ArticleForm::new();
		form.sync(Some(&article(4, "old")));
		form.sync(None);
		assert_eq!(form.mode(), FormMode::Create);
		assert_eq!(form.values(), &FormValues::default());
	}

	#[test]
	pub fn test_reseeds_when_record_changes() {
		let mut form = ArticleForm::new();
		form.sync(Some(&article(4, "old")));
		form.sync(Some(&article(5, "other")));
		assert_eq!(form.mode(), FormMode::Edit(5));
		assert_eq!(form.values().title, "other");
	}

	#[test]
	pub fn test_input_limits() {
		let mut form = ArticleForm::new();
		form.set(Field::Title, &"x".repeat(80));
		form.set(Field::Text, &"y".repeat(250));
		form.set(Field::Topic, "Rust");
		assert_eq!(form.values().title.chars().count(), TITLE_MAX_CHARS);
		assert_eq!(form.values().text.chars().count(), TEXT_MAX_CHARS);
		assert_eq!(form.values().topic, None);
	}
}
