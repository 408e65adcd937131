pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use adapters::{open_store, MemoryStore, SqliteStore};
pub use config::{AppConfig, Cli, Command};
pub use domain::model::{Choice, ChoiceRef, NewChoice, NewPoll, Poll};
pub use domain::ports::{PollStore, Renderer};
pub use utils::error::{PollError, Result};
pub use web::{router, AppState};
