pub mod admin;
pub mod form;
pub mod service;
pub mod views;

pub use crate::domain::model::{Choice, ChoiceRef, NewChoice, NewPoll, Poll};
pub use crate::domain::ports::{PollStore, Renderer};
pub use crate::utils::error::Result;
