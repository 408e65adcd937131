use crate::domain::model::{Choice, ChoiceRef, Poll};
use crate::domain::ports::PollStore;
use crate::domain::tally;
use crate::utils::error::{PollError, Result};

/// Poll arithmetic against the store. Every call re-reads persisted state.
pub struct PollService<'a> {
    store: &'a dyn PollStore,
}

impl<'a> PollService<'a> {
    pub fn new(store: &'a dyn PollStore) -> Self {
        Self { store }
    }

    pub async fn poll(&self, poll_id: i64) -> Result<Poll> {
        self.store
            .get_poll(poll_id)
            .await?
            .ok_or_else(|| PollError::not_found("Poll", poll_id))
    }

    pub async fn total_votes(&self, poll_id: i64) -> Result<u64> {
        let choices = self.store.choices_for(poll_id).await?;
        Ok(tally::total_votes(&choices))
    }

    pub async fn percentage(&self, choice_id: i64) -> Result<f64> {
        let choice = self
            .store
            .get_choice(choice_id)
            .await?
            .ok_or_else(|| PollError::not_found("Choice", choice_id))?;
        let poll = self.poll(choice.poll_id).await?;

        let total = self.total_votes(poll.id).await?;
        Ok(tally::percentage(choice.votes, total))
    }

    /// Records one vote for a choice that already passed form validation.
    pub async fn vote(&self, choice: ChoiceRef) -> Result<Choice> {
        let updated = self
            .store
            .increment_votes(choice.poll_id, choice.choice_id)
            .await?;
        tracing::info!(
            poll_id = choice.poll_id,
            choice_id = choice.choice_id,
            votes = updated.votes,
            "Vote recorded"
        );
        Ok(updated)
    }
}
