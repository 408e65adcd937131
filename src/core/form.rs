use crate::domain::model::{Choice, ChoiceRef, Poll};
use crate::utils::error::{PollError, Result};
use tera::escape_html;

pub const VOTE_FIELD: &str = "vote";

/// Single-select vote form bound to one poll.
///
/// The options are the poll's choices in stored order; the submitted value
/// must be the id of one of them.
#[derive(Debug, Clone)]
pub struct VoteForm {
    poll_id: i64,
    options: Vec<(i64, String)>,
    submitted: Option<String>,
    errors: Vec<String>,
}

impl VoteForm {
    pub fn bind(poll: &Poll, choices: &[Choice]) -> Self {
        let options = choices
            .iter()
            .filter(|c| c.poll_id == poll.id)
            .map(|c| (c.id, c.choice.clone()))
            .collect();

        Self {
            poll_id: poll.id,
            options,
            submitted: None,
            errors: Vec::new(),
        }
    }

    pub fn fields(&self) -> [&'static str; 1] {
        [VOTE_FIELD]
    }

    pub fn options(&self) -> &[(i64, String)] {
        &self.options
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Checks `value` and remembers it, so a failed submission re-renders with its errors.
    pub fn submit(&mut self, value: Option<&str>) -> Result<ChoiceRef> {
        self.submitted = value.map(str::to_string);
        self.errors.clear();

        let result = self.validate(value);
        if let Err(PollError::ValidationError { message, .. }) = &result {
            self.errors.push(message.clone());
        }
        result
    }

    pub fn validate(&self, value: Option<&str>) -> Result<ChoiceRef> {
        let value = value.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(PollError::validation(VOTE_FIELD, "This field is required."));
        }

        let choice_id = value
            .parse::<i64>()
            .ok()
            .filter(|id| self.options.iter().any(|(option, _)| option == id))
            .ok_or_else(|| {
                PollError::validation(
                    VOTE_FIELD,
                    format!(
                        "Select a valid choice. {} is not one of the available choices.",
                        value
                    ),
                )
            })?;

        Ok(ChoiceRef {
            poll_id: self.poll_id,
            choice_id,
        })
    }

    /// Renders the field as a paragraph of radio inputs.
    pub fn as_p(&self) -> String {
        let mut html = String::new();

        if !self.errors.is_empty() {
            html.push_str("<ul class=\"errorlist\">");
            for error in &self.errors {
                html.push_str(&format!("<li>{}</li>", escape_html(error)));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("<p><label for=\"id_vote_0\">Vote:</label> <ul id=\"id_vote\">\n");
        for (index, (id, label)) in self.options.iter().enumerate() {
            let checked = match &self.submitted {
                Some(value) if value.trim() == id.to_string() => " checked",
                _ => "",
            };
            html.push_str(&format!(
                "<li><label for=\"id_vote_{index}\"><input type=\"radio\" id=\"id_vote_{index}\" \
                 value=\"{id}\" name=\"{VOTE_FIELD}\" required{checked}> {}</label></li>\n",
                escape_html(label)
            ));
        }
        html.push_str("</ul></p>");
        html
    }
}
