use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// What a delayed task does when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Deferred {
	/// Navigate to the login view and clear the message.
	RedirectToLogin,
	RedirectToArticles,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
	pub id: TaskId,
	pub delay: Duration,
	pub action: Deferred,
}

impl ScheduledTask {
	/// The delay for millisecond timer APIs, saturating at `u32::MAX`.
	pub fn delay_ms(&self) -> u32 {
		u32::try_from(self.delay.as_millis()).unwrap_or(u32::MAX)
	}
}

/// Bookkeeping for delayed tasks. A task only runs if it is still pending
/// when it fires, so cancelling is just forgetting it.
#[derive(Debug, Default)]
pub struct Tasks {
	next_id: u64,
	pending: BTreeMap<TaskId, Deferred>,
}

impl Tasks {
	pub fn schedule(&mut self, delay: Duration, action: Deferred) -> ScheduledTask {
		self.next_id += 1;
		let id = TaskId(self.next_id);
		self.pending.insert(id, action);
		ScheduledTask { id, delay, action }
	}

	/// Claims a fired task; `None` if it was cancelled or already ran.
	pub fn take(&mut self, id: TaskId) -> Option<Deferred> {
		self.pending.remove(&id)
	}

	pub fn cancel_all(&mut self) -> Vec<TaskId> {
		let ids = self.pending.keys().copied().collect();
		self.pending.clear();
		ids
	}

}
