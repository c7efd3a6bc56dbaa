use seed::{prelude::*, *};

use quill::article::{Article, Topic, TEXT_MAX_CHARS, TITLE_MAX_CHARS};
use quill::auth::LoginRequest;
use quill::controller::Command;
use quill::form::{ArticleForm, Field, FormMode};

use crate::{LoginField, Msg};

pub fn loading_indicator(busy: bool) -> Node<Msg> {
	div![
		C!["spinner"],
		attrs!{ At::Id => "spinner" },
		IF!(busy => "Please wait..."),
	]
}

pub fn message_panel(message: &str) -> Node<Msg> {
	div![attrs!{ At::Id => "message" }, message]
}

pub fn login_form(login: &LoginRequest) -> Node<Msg> {
	form![
		attrs!{ At::Id => "loginForm" },
		ev(Ev::Submit, |event| {
			event.prevent_default();
			Msg::LoginSubmit
		}),
		h2!["Login"],
		input![
			attrs!{
				At::Id => "username",
				At::Placeholder => "Enter username",
				At::Value => &login.username,
			},
			input_ev(Ev::Input, |v| Msg::LoginInput(LoginField::Username, v)),
		],
		input![
			attrs!{
				At::Id => "password",
				At::Type => "password",
				At::Placeholder => "Enter password",
				At::Value => &login.password,
			},
			input_ev(Ev::Input, |v| Msg::LoginInput(LoginField::Password, v)),
		],
		button![
			attrs!{
				At::Id => "submitCredentials",
				At::Disabled => (!login.is_complete()).as_at_value(),
			},
			"Submit credentials",
		],
	]
}

pub fn article_form(form: &ArticleForm) -> Node<Msg> {
	let values = form.values();
	let editing = matches!(form.mode(), FormMode::Edit(_));
	form![
		attrs!{ At::Id => "form" },
		ev(Ev::Submit, |event| {
			event.prevent_default();
			Msg::FormSubmit
		}),
		h2![form.heading()],
		input![
			attrs!{
				At::Id => "title",
				At::Type => "text",
				At::MaxLength => TITLE_MAX_CHARS,
				At::Placeholder => "Enter title",
				At::Value => &values.title,
			},
			input_ev(Ev::Input, |v| Msg::FormInput(Field::Title, v)),
		],
		textarea![
			attrs!{
				At::Id => "text",
				At::MaxLength => TEXT_MAX_CHARS,
				At::Placeholder => "Enter text",
				At::Value => &values.text,
			},
			input_ev(Ev::Input, |v| Msg::FormInput(Field::Text, v)),
		],
		select![
			attrs!{
				At::Id => "topic",
				At::Value => values.topic.map(|t| t.as_str()).unwrap_or(""),
			},
			option![attrs!{ At::Value => "" }, "-- Select topic --"],
			Topic::ALL.iter().map(|topic| option![
				attrs!{
					At::Value => topic.as_str(),
					At::Selected => (values.topic == Some(*topic)).as_at_value(),
				},
				topic.as_str(),
			]),
			input_ev(Ev::Change, |v| Msg::FormInput(Field::Topic, v)),
		],
		div![
			C!["button-group"],
			button![
				attrs!{
					At::Id => "submitArticle",
					At::Disabled => (!form.can_submit()).as_at_value(),
				},
				"Submit",
			],
			IF!(editing => button![
				attrs!{ At::Type => "button" },
				"Cancel edit",
				ev(Ev::Click, |_| Msg::FormCancel),
			]),
		],
	]
}

pub fn article_list(articles: &[Article]) -> Node<Msg> {
	div![
		C!["articles"],
		h2!["Articles"],
		if articles.is_empty() {
			div!["No articles yet"]
		} else {
			div![articles.iter().map(article_view)]
		},
	]
}

fn article_view(article: &Article) -> Node<Msg> {
	let id = article.article_id;
	div![
		C!["article"],
		div![
			h3![article.title.as_str()],
			p![article.text.as_str()],
			p![format!("Topic: {}", article.topic)],
		],
		div![
			button!["Edit", ev(Ev::Click, move |_| Msg::Dispatch(Command::SelectArticle(Some(id))))],
			button!["Delete", ev(Ev::Click, move |_| Msg::Dispatch(Command::DeleteArticle(id)))],
		],
	]
}
