use crate::controller::{Command, View};

/// Whether the article list is on screen. It fetches once each time the
/// articles view is entered, and forgets that once the view is left.
#[derive(Debug, Default)]
pub struct ArticleList {
	mounted: bool,
}

impl ArticleList {
	/// Call after every update with the current view. Returns the fetch to
	/// run when the list has just been shown.
	pub fn enter(&mut self, view: View) -> Option<Command> {
		match view {
			View::Articles if !self.mounted => {
				self.mounted = true;
				Some(Command::ListArticles)
			},
			View::Articles => None,
			View::Login => {
				self.mounted = false;
				None
			},
		}
	}

	pub fn is_mounted(&self) -> bool {
		self.mounted
	}
}
