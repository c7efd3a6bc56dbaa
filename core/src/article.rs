use std::fmt;
use std::str::FromStr;

use anyhow::*;
use serde::{Serialize, Deserialize};

pub const TITLE_MAX_CHARS: usize = 50;
pub const TEXT_MAX_CHARS: usize = 200;

pub type ArticleId = u64;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Topic {
	JavaScript,
	React,
	Node,
}

impl Topic {
	pub const ALL: [Topic; 3] = [Topic::JavaScript, Topic::React, Topic::Node];

	pub fn as_str(&self) -> &'static str {
		match self {
			Topic::JavaScript => "JavaScript",
			Topic::React => "React",
			Topic::Node => "Node",
		}
	}
}

impl fmt::Display for Topic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Topic {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		Topic::ALL.iter()
			.find(|t| t.as_str() == s)
			.copied()
			.ok_or_else(|| anyhow!("Unknown topic: {:?}", s))
	}
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Article {
	pub article_id: ArticleId,
	pub title: String,
	pub text: String,
	pub topic: Topic,
}

/// The user-editable part of an article, as sent on create and update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArticleFields {
	pub title: String,
	pub text: String,
	pub topic: Topic,
}

impl ArticleFields {
	pub fn new(title: impl Into<String>, text: impl Into<String>, topic: Topic) -> Self {
		Self { title: title.into(), text: text.into(), topic }
	}

	pub fn trimmed(&self) -> Self {
		Self {
			title: self.title.trim().to_owned(),
			text: self.text.trim().to_owned(),
			topic: self.topic,
		}
	}
}

impl Article {
	pub fn with_fields(&self, fields: &ArticleFields) -> Article {
		Article {
			article_id: self.article_id,
			title: fields.title.clone(),
			text: fields.text.clone(),
			topic: fields.topic,
		}
	}
}

/// Truncate to at most `max` characters, like a `maxlength` input would.
pub fn clamp_chars(value: &str, max: usize) -> String {
	value.chars().take(max).collect()
}
