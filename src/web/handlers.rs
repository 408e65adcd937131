use crate::core::views::{self, ViewRequest, ViewResponse};
use crate::utils::error::{PollError, Result};
use crate::web::AppState;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VoteSubmission {
    vote: Option<String>,
}

pub async fn home_handler(State(state): State<AppState>) -> Result<Response> {
    let response = views::home(state.store.as_ref()).await?;
    respond(&state, response)
}

pub async fn poll_handler(
    State(state): State<AppState>,
    Path(poll_id): Path<String>,
) -> Result<Response> {
    let poll_id = parse_poll_id(&poll_id)?;
    let response = views::poll(state.store.as_ref(), poll_id, &ViewRequest::Get).await?;
    respond(&state, response)
}

pub async fn vote_handler(
    State(state): State<AppState>,
    Path(poll_id): Path<String>,
    Form(submission): Form<VoteSubmission>,
) -> Result<Response> {
    let poll_id = parse_poll_id(&poll_id)?;
    let request = ViewRequest::Post {
        vote: submission.vote,
    };
    let response = views::poll(state.store.as_ref(), poll_id, &request).await?;
    respond(&state, response)
}

/// Anything that is not an integer id cannot name a poll, so it is a 404 like any missing poll.
fn parse_poll_id(raw: &str) -> Result<i64> {
    raw.parse().map_err(|_| PollError::malformed_id("Poll", raw))
}

fn respond(state: &AppState, response: ViewResponse) -> Result<Response> {
    match response {
        ViewResponse::Render {
            status,
            template,
            context,
        } => {
            let body = state.renderer.render(template, &context)?;
            Ok((status, Html(body)).into_response())
        }
        // 303 so the browser follows up with a GET and a refresh cannot re-vote
        ViewResponse::Redirect { location } => Ok(Redirect::to(&location).into_response()),
    }
}
