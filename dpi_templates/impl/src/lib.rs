use std::{collections::HashMap, sync::Arc};

use dpi_di::Build;
use dpi_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use dpi_utils::trace_instrument;
use tera::{Tera, Value};

pub use escape::escape_html;

mod escape;

#[derive(Debug, Clone, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();
        tera.set_escape_fn(escape_html);
        tera.register_filter("escape_multiline", escape_multiline);

        tera.add_raw_templates(std::iter::once(BASE_TEMPLATE).chain(TEMPLATES.iter().copied()))
            .unwrap();

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    #[trace_instrument(skip(self, template), fields(name = T::NAME))]
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

/// Escapes a multi line string and converts its line breaks into `<br>` tags.
///
/// The output must be marked as `safe` in the template.
fn escape_multiline(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = tera::try_get_value!("escape_multiline", "value", String, value);
    let html = escape_html(&text.replace("\r\n", "\n")).replace('\n', "<br>");
    Ok(Value::String(html))
}

#[cfg(test)]
mod tests {
    use dpi_templates_contracts::{
        ContactNotification, ContactNotificationHtmlTemplate, ContactNotificationTextTemplate,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn html_contains_all_fields() {
        // Arrange
        let sut = make_sut();

        // Act
        let result = sut
            .render(&ContactNotificationHtmlTemplate(notification()))
            .unwrap();

        // Assert
        for expected in [
            "Jo Smith",
            r#"<a href="mailto:jo@example.com">jo@example.com</a>"#,
            "+61 400 123 456",
            "Acme Realty",
            "Pricing",
            "How much?<br>Thanks!",
            "2026-10-16 09:30:00 UTC",
        ] {
            assert!(result.contains(expected), "missing {expected:?} in {result}");
        }
    }

    #[test]
    fn html_omits_missing_optional_fields() {
        // Arrange
        let sut = make_sut();
        let notification = ContactNotification {
            phone: None,
            company: None,
            ..notification()
        };

        // Act
        let result = sut
            .render(&ContactNotificationHtmlTemplate(notification))
            .unwrap();

        // Assert
        assert!(!result.contains("Phone:"));
        assert!(!result.contains("Company:"));
        assert!(result.contains("Subject:"));
    }

    #[test]
    fn html_escapes_user_input() {
        // Arrange
        let sut = make_sut();
        let notification = ContactNotification {
            name: r#"<script>alert("x")</script>"#.into(),
            company: Some("O'Brien & Sons".into()),
            subject: "<b>bold</b>".into(),
            message: "<img src=x onerror='boom'>\nTom &amp; Jerry".into(),
            ..notification()
        };

        // Act
        let result = sut
            .render(&ContactNotificationHtmlTemplate(notification))
            .unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(!result.contains("<b>bold"));
        assert!(!result.contains("<img"));
        assert!(result.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
        assert!(result.contains("O&#039;Brien &amp; Sons"));
        assert!(result.contains("&lt;img src=x onerror=&#039;boom&#039;&gt;<br>Tom &amp;amp; Jerry"));
    }

    #[test]
    fn text() {
        // Arrange
        let sut = make_sut();
        let notification = ContactNotification {
            company: None,
            message: "Is <this> & that\nstill raw?".into(),
            ..notification()
        };

        // Act
        let result = sut
            .render(&ContactNotificationTextTemplate(notification))
            .unwrap();

        // Assert
        assert_eq!(
            result.trim_end(),
            "New Contact Form Submission\n\
             \n\
             Name: Jo Smith\n\
             Email: jo@example.com\n\
             Phone: +61 400 123 456\n\
             Subject: Pricing\n\
             \n\
             Message:\n\
             Is <this> & that\n\
             still raw?\n\
             \n\
             Sent at: 2026-10-16 09:30:00 UTC"
        );
    }

    fn make_sut() -> TemplateServiceImpl {
        TemplateServiceImpl {
            state: Default::default(),
        }
    }

    fn notification() -> ContactNotification {
        ContactNotification {
            name: "Jo Smith".into(),
            email: "jo@example.com".into(),
            phone: Some("+61 400 123 456".into()),
            company: Some("Acme Realty".into()),
            subject: "Pricing".into(),
            message: "How much?\nThanks!".into(),
            sent_at: "2026-10-16 09:30:00 UTC".into(),
        }
    }
}
