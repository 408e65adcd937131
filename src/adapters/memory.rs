use crate::adapters::vote_limit_reached;
use crate::domain::model::{Choice, NewChoice, NewPoll, Poll};
use crate::domain::ports::PollStore;
use crate::utils::error::{PollError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Tables {
    polls: BTreeMap<i64, Poll>,
    choices: BTreeMap<i64, Choice>,
    next_poll_id: i64,
    next_choice_id: i64,
}

/// In-process store. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn create_poll(&self, poll: NewPoll) -> Result<Poll> {
        let mut tables = self.tables.lock().await;
        tables.next_poll_id += 1;
        let poll = Poll {
            id: tables.next_poll_id,
            question: poll.question,
            pub_date: poll.pub_date,
        };
        tables.polls.insert(poll.id, poll.clone());
        Ok(poll)
    }

    async fn create_choice(&self, choice: NewChoice) -> Result<Choice> {
        let mut tables = self.tables.lock().await;
        if !tables.polls.contains_key(&choice.poll_id) {
            return Err(PollError::not_found("Poll", choice.poll_id));
        }
        tables.next_choice_id += 1;
        let choice = Choice {
            id: tables.next_choice_id,
            poll_id: choice.poll_id,
            choice: choice.choice,
            votes: choice.votes,
        };
        tables.choices.insert(choice.id, choice.clone());
        Ok(choice)
    }

    async fn create_poll_with_choices(
        &self,
        poll: NewPoll,
        choices: Vec<String>,
    ) -> Result<(Poll, Vec<Choice>)> {
        let mut tables = self.tables.lock().await;
        tables.next_poll_id += 1;
        let poll = Poll {
            id: tables.next_poll_id,
            question: poll.question,
            pub_date: poll.pub_date,
        };
        tables.polls.insert(poll.id, poll.clone());

        let mut created = Vec::with_capacity(choices.len());
        for label in choices {
            tables.next_choice_id += 1;
            let choice = Choice {
                id: tables.next_choice_id,
                poll_id: poll.id,
                choice: label,
                votes: 0,
            };
            tables.choices.insert(choice.id, choice.clone());
            created.push(choice);
        }
        Ok((poll, created))
    }

    async fn list_polls(&self) -> Result<Vec<Poll>> {
        let tables = self.tables.lock().await;
        Ok(tables.polls.values().cloned().collect())
    }

    async fn get_poll(&self, id: i64) -> Result<Option<Poll>> {
        let tables = self.tables.lock().await;
        Ok(tables.polls.get(&id).cloned())
    }

    async fn choices_for(&self, poll_id: i64) -> Result<Vec<Choice>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .choices
            .values()
            .filter(|c| c.poll_id == poll_id)
            .cloned()
            .collect())
    }

    async fn get_choice(&self, id: i64) -> Result<Option<Choice>> {
        let tables = self.tables.lock().await;
        Ok(tables.choices.get(&id).cloned())
    }

    async fn save_choice(&self, choice: &Choice) -> Result<()> {
        let mut tables = self.tables.lock().await;
        match tables.choices.get_mut(&choice.id) {
            Some(stored) => {
                stored.choice = choice.choice.clone();
                stored.votes = choice.votes;
                Ok(())
            }
            None => Err(PollError::not_found("Choice", choice.id)),
        }
    }

    async fn increment_votes(&self, poll_id: i64, choice_id: i64) -> Result<Choice> {
        let mut tables = self.tables.lock().await;
        match tables.choices.get_mut(&choice_id) {
            Some(stored) if stored.poll_id == poll_id => {
                stored.votes = stored
                    .votes
                    .checked_add(1)
                    .ok_or_else(|| vote_limit_reached(choice_id))?;
                Ok(stored.clone())
            }
            _ => Err(PollError::not_found("Choice", choice_id)),
        }
    }

    async fn delete_poll(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        if tables.polls.remove(&id).is_none() {
            return Ok(false);
        }
        tables.choices.retain(|_, c| c.poll_id != id);
        Ok(true)
    }
}
