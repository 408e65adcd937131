use crate::domain::ports::Renderer;
use crate::utils::error::Result;
use serde_json::Value;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("poll.html", include_str!("../../templates/poll.html")),
];

/// Renders the embedded page templates. `.html` names are autoescaped.
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        let context = Context::from_value(context.clone())?;
        Ok(self.tera.render(template, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PollError;
    use serde_json::json;

    #[test]
    fn test_home_links_every_poll() {
        let renderer = TeraRenderer::new().unwrap();
        let html = renderer
            .render(
                "home.html",
                &json!({ "polls": [
                    { "id": 1, "question": "6 times 7", "url": "/poll/1/" },
                    { "id": 2, "question": "Fish & chips?", "url": "/poll/2/" },
                ]}),
            )
            .unwrap();

        assert!(html.contains("<h1>Polls</h1>"));
        assert!(html.contains("<a href=\"/poll/1/\">6 times 7</a>"));
        assert!(html.contains("Fish &amp; chips?"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let renderer = TeraRenderer::new().unwrap();
        let result = renderer.render("missing.html", &json!({}));
        assert!(matches!(result, Err(PollError::TemplateError(_))));
    }

    #[test]
    fn test_missing_context_key_is_an_error() {
        let renderer = TeraRenderer::new().unwrap();
        assert!(renderer.render("home.html", &json!({})).is_err());
    }
}
