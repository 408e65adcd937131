use crate::domain::model::{Choice, NewChoice, NewPoll, Poll};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Persistence for polls and their choices.
///
/// Reads return rows ordered by id, which is insertion order.
#[async_trait]
pub trait PollStore: Send + Sync {
    async fn create_poll(&self, poll: NewPoll) -> Result<Poll>;

    /// Fails with `NotFound` when `choice.poll_id` names no poll.
    async fn create_choice(&self, choice: NewChoice) -> Result<Choice>;

    /// Creates a poll and its choices as one unit: either all rows exist afterwards or none do.
    async fn create_poll_with_choices(
        &self,
        poll: NewPoll,
        choices: Vec<String>,
    ) -> Result<(Poll, Vec<Choice>)>;

    async fn list_polls(&self) -> Result<Vec<Poll>>;

    async fn get_poll(&self, id: i64) -> Result<Option<Poll>>;

    async fn choices_for(&self, poll_id: i64) -> Result<Vec<Choice>>;

    async fn get_choice(&self, id: i64) -> Result<Option<Choice>>;

    /// Writes the label and vote count of an existing choice.
    async fn save_choice(&self, choice: &Choice) -> Result<()>;

    /// Adds one vote in a single storage operation and returns the updated row.
    /// Fails with `NotFound` unless the choice belongs to `poll_id`.
    async fn increment_votes(&self, poll_id: i64, choice_id: i64) -> Result<Choice>;

    /// Deletes the poll and all of its choices. Returns false if it did not exist.
    async fn delete_poll(&self, id: i64) -> Result<bool>;
}

pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> Result<String>;
}
