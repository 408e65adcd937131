use crate::domain::model::{Choice, NewPoll, Poll, CHOICE_MAX_LENGTH, QUESTION_MAX_LENGTH};
use crate::domain::ports::PollStore;
use crate::domain::tally;
use crate::utils::error::{PollError, Result};
use crate::utils::validation::{validate_max_length, validate_non_empty_string};

/// A poll together with its choices, as shown by `list-polls`.
#[derive(Debug, Clone)]
pub struct PollOverview {
    pub poll: Poll,
    pub choices: Vec<Choice>,
}

impl PollOverview {
    pub fn total_votes(&self) -> u64 {
        tally::total_votes(&self.choices)
    }
}

/// Poll management for administrators. Stands in for an admin site.
pub struct PollAdmin<'a> {
    store: &'a dyn PollStore,
}

impl<'a> PollAdmin<'a> {
    pub fn new(store: &'a dyn PollStore) -> Self {
        Self { store }
    }

    pub async fn create_poll(&self, question: &str, choices: &[String]) -> Result<PollOverview> {
        let question = question.trim();
        validate_non_empty_string("question", question)?;
        validate_max_length("question", question, QUESTION_MAX_LENGTH)?;

        if choices.is_empty() {
            return Err(PollError::validation("choice", "A poll needs at least one choice."));
        }
        let labels = choices
            .iter()
            .map(|c| -> Result<String> {
                let label = c.trim();
                validate_non_empty_string("choice", label)?;
                validate_max_length("choice", label, CHOICE_MAX_LENGTH)?;
                Ok(label.to_string())
            })
            .collect::<Result<Vec<_>>>()?;

        let (poll, created) = self
            .store
            .create_poll_with_choices(NewPoll::new(question), labels)
            .await?;

        tracing::info!(
            poll_id = poll.id,
            choices = created.len(),
            "Created poll '{}'",
            poll
        );
        Ok(PollOverview {
            poll,
            choices: created,
        })
    }

    pub async fn list_polls(&self) -> Result<Vec<PollOverview>> {
        let polls = self.store.list_polls().await?;
        let mut overviews = Vec::with_capacity(polls.len());
        for poll in polls {
            let choices = self.store.choices_for(poll.id).await?;
            overviews.push(PollOverview { poll, choices });
        }
        Ok(overviews)
    }

    pub async fn delete_poll(&self, poll_id: i64) -> Result<()> {
        if !self.store.delete_poll(poll_id).await? {
            return Err(PollError::not_found("Poll", poll_id));
        }
        tracing::info!(poll_id, "Deleted poll");
        Ok(())
    }
}
