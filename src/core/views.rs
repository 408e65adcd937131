//! Request handlers, free of any HTTP framework.
//!
//! Each handler takes the store and an immutable description of the request
//! and returns either a template to render with its context or a redirect.
//! The `web` module turns a [`ViewResponse`] into an HTTP response.

use crate::core::form::VoteForm;
use crate::core::service::PollService;
use crate::domain::model::{poll_url, Choice, Poll};
use crate::domain::ports::PollStore;
use crate::domain::tally;
use crate::utils::error::{PollError, Result};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

pub const HOME_TEMPLATE: &str = "home.html";
pub const POLL_TEMPLATE: &str = "poll.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    Get,
    Post { vote: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewResponse {
    Render {
        status: StatusCode,
        template: &'static str,
        context: Value,
    },
    Redirect {
        location: String,
    },
}

#[derive(Debug, Serialize)]
struct PollLink {
    id: i64,
    question: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct HomeContext {
    polls: Vec<PollLink>,
}

#[derive(Debug, Serialize)]
struct PollSummary {
    id: i64,
    question: String,
    pub_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ChoiceResult {
    id: i64,
    choice: String,
    votes: u32,
    votes_label: String,
    percentage: u32,
}

#[derive(Debug, Serialize)]
struct PollContext {
    poll: PollSummary,
    choices: Vec<ChoiceResult>,
    total_votes: u64,
    votes_label: String,
    has_votes: bool,
    form: String,
    poll_url: String,
}

/// `GET /`: every poll, oldest first, linked to its detail page.
pub async fn home(store: &dyn PollStore) -> Result<ViewResponse> {
    let polls = store.list_polls().await?;
    tracing::debug!("Listing {} polls", polls.len());

    let context = HomeContext {
        polls: polls
            .into_iter()
            .map(|p| PollLink {
                url: p.url(),
                id: p.id,
                question: p.question,
            })
            .collect(),
    };

    Ok(ViewResponse::Render {
        status: StatusCode::OK,
        template: HOME_TEMPLATE,
        context: serde_json::to_value(context)?,
    })
}

/// `GET|POST /poll/{id}/`: results and vote form, or record a vote.
pub async fn poll(
    store: &dyn PollStore,
    poll_id: i64,
    request: &ViewRequest,
) -> Result<ViewResponse> {
    let service = PollService::new(store);
    let poll = service.poll(poll_id).await?;
    let choices = store.choices_for(poll.id).await?;
    let mut form = VoteForm::bind(&poll, &choices);

    match request {
        ViewRequest::Get => poll_page(&poll, &choices, &form, StatusCode::OK),
        ViewRequest::Post { vote } => match form.submit(vote.as_deref()) {
            Ok(choice) => {
                service.vote(choice).await?;
                Ok(ViewResponse::Redirect {
                    location: poll_url(poll.id),
                })
            }
            Err(PollError::ValidationError { message, .. }) => {
                tracing::info!(poll_id = poll.id, "Rejected vote: {}", message);
                poll_page(&poll, &choices, &form, StatusCode::BAD_REQUEST)
            }
            Err(e) => Err(e),
        },
    }
}

fn poll_page(
    poll: &Poll,
    choices: &[Choice],
    form: &VoteForm,
    status: StatusCode,
) -> Result<ViewResponse> {
    let total = tally::total_votes(choices);

    let context = PollContext {
        poll: PollSummary {
            id: poll.id,
            question: poll.question.clone(),
            pub_date: poll.pub_date,
        },
        choices: choices
            .iter()
            .map(|c| ChoiceResult {
                id: c.id,
                choice: c.choice.clone(),
                votes: c.votes,
                votes_label: tally::votes_label(u64::from(c.votes)),
                percentage: tally::display_percentage(tally::percentage(c.votes, total)),
            })
            .collect(),
        total_votes: total,
        votes_label: tally::votes_label(total),
        has_votes: total > 0,
        form: form.as_p(),
        poll_url: poll.url(),
    };

    Ok(ViewResponse::Render {
        status,
        template: POLL_TEMPLATE,
        context: serde_json::to_value(context)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::model::{NewChoice, NewPoll};

    fn render_parts(response: ViewResponse) -> (StatusCode, &'static str, Value) {
        match response {
            ViewResponse::Render {
                status,
                template,
                context,
            } => (status, template, context),
            other => panic!("expected a rendered page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_home_lists_polls_in_insertion_order() {
        let store = MemoryStore::new();
        let poll1 = store.create_poll(NewPoll::new("6 times 7")).await.unwrap();
        let poll2 = store
            .create_poll(NewPoll::new("life, the universe and everything"))
            .await
            .unwrap();

        let (status, template, context) = render_parts(home(&store).await.unwrap());

        assert_eq!(status, StatusCode::OK);
        assert_eq!(template, "home.html");
        let polls = context["polls"].as_array().unwrap();
        assert_eq!(polls.len(), 2);
        assert_eq!(polls[0]["question"], poll1.question);
        assert_eq!(polls[1]["url"], format!("/poll/{}/", poll2.id));
    }

    #[tokio::test]
    async fn test_poll_context_carries_rounded_percentages() {
        let store = MemoryStore::new();
        let poll = store.create_poll(NewPoll::new("6 times 7")).await.unwrap();
        store
            .create_choice(NewChoice::new(poll.id, "42").with_votes(1))
            .await
            .unwrap();
        store
            .create_choice(NewChoice::new(poll.id, "The ultimate answer").with_votes(2))
            .await
            .unwrap();

        let (_, template, context) =
            render_parts(self::poll(&store, poll.id, &ViewRequest::Get).await.unwrap());

        assert_eq!(template, "poll.html");
        assert_eq!(context["poll"]["question"], "6 times 7");
        assert_eq!(context["choices"][0]["percentage"], 33);
        assert_eq!(context["choices"][1]["percentage"], 67);
        assert_eq!(context["votes_label"], "3 votes");
        assert_eq!(context["has_votes"], true);
    }

    #[tokio::test]
    async fn test_unknown_poll_is_not_found() {
        let store = MemoryStore::new();
        let result = self::poll(&store, 99, &ViewRequest::Get).await;
        assert!(matches!(result, Err(PollError::NotFound { entity: "Poll", id: 99 })));
    }

    #[tokio::test]
    async fn test_post_redirects_back_to_the_poll() {
        let store = MemoryStore::new();
        let poll = store.create_poll(NewPoll::new("6 times 7")).await.unwrap();
        store
            .create_choice(NewChoice::new(poll.id, "42").with_votes(1))
            .await
            .unwrap();
        let choice2 = store
            .create_choice(NewChoice::new(poll.id, "The ultimate answer").with_votes(3))
            .await
            .unwrap();

        let request = ViewRequest::Post {
            vote: Some(choice2.id.to_string()),
        };
        let response = self::poll(&store, poll.id, &request).await.unwrap();

        assert_eq!(
            response,
            ViewResponse::Redirect {
                location: format!("/poll/{}/", poll.id)
            }
        );
        let stored = store.get_choice(choice2.id).await.unwrap().unwrap();
        assert_eq!(stored.votes, 4);
    }

    #[tokio::test]
    async fn test_post_with_foreign_choice_rerenders_without_voting() {
        let store = MemoryStore::new();
        let poll1 = store.create_poll(NewPoll::new("6 times 7")).await.unwrap();
        let own = store
            .create_choice(NewChoice::new(poll1.id, "42"))
            .await
            .unwrap();
        let poll2 = store.create_poll(NewPoll::new("time")).await.unwrap();
        let foreign = store
            .create_choice(NewChoice::new(poll2.id, "PM"))
            .await
            .unwrap();

        let request = ViewRequest::Post {
            vote: Some(foreign.id.to_string()),
        };
        let (status, template, context) =
            render_parts(self::poll(&store, poll1.id, &request).await.unwrap());

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(template, "poll.html");
        assert!(context["form"].as_str().unwrap().contains("errorlist"));
        assert_eq!(store.get_choice(own.id).await.unwrap().unwrap().votes, 0);
        assert_eq!(store.get_choice(foreign.id).await.unwrap().unwrap().votes, 0);
    }
}
