//! Vote arithmetic shared by the views, the CLI and the service layer.

use crate::domain::model::Choice;

pub fn total_votes(choices: &[Choice]) -> u64 {
    choices.iter().map(|c| u64::from(c.votes)).sum()
}

/// Share of `votes` in `total`, scaled to 100. Zero when nobody has voted.
pub fn percentage(votes: u32, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(votes) * 100.0 / total as f64
}

/// Whole-number percentage for display, rounded half up.
pub fn display_percentage(percentage: f64) -> u32 {
    (percentage + 0.5).floor() as u32
}

pub fn votes_label(total: u64) -> String {
    if total == 1 {
        "1 vote".to_string()
    } else {
        format!("{} votes", total)
    }
}
