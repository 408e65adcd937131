use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const QUESTION_MAX_LENGTH: usize = 200;
pub const CHOICE_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: i64,
    pub question: String,
    pub pub_date: DateTime<Utc>,
}

impl Poll {
    pub const PUB_DATE_LABEL: &'static str = "Date published";

    pub fn url(&self) -> String {
        poll_url(self.id)
    }
}

impl fmt::Display for Poll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: i64,
    pub poll_id: i64,
    pub choice: String,
    pub votes: u32,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice)
    }
}

/// A poll that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPoll {
    pub question: String,
    pub pub_date: DateTime<Utc>,
}

impl NewPoll {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            pub_date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChoice {
    pub poll_id: i64,
    pub choice: String,
    pub votes: u32,
}

impl NewChoice {
    pub fn new(poll_id: i64, choice: impl Into<String>) -> Self {
        Self {
            poll_id,
            choice: choice.into(),
            votes: 0,
        }
    }

    pub fn with_votes(mut self, votes: u32) -> Self {
        self.votes = votes;
        self
    }
}

/// Identifier of a choice that passed vote validation for a specific poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceRef {
    pub poll_id: i64,
    pub choice_id: i64,
}

pub fn poll_url(poll_id: i64) -> String {
    format!("/poll/{}/", poll_id)
}
