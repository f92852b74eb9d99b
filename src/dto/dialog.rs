//! Dialog presented to the user after an operation succeeds or fails.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DialogBody {
    Empty,
    Text(String),
    /// Rendered as a bulleted list, one entry per message.
    Items(Vec<String>),
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub body: DialogBody,
}

impl Dialog {
    pub fn new(kind: DialogKind, title: impl Into<String>, body: DialogBody) -> Self {
        Self {
            kind,
            title: title.into(),
            body,
        }
    }

    pub fn text(kind: DialogKind, title: impl Into<String>, text: Option<String>) -> Self {
        let body = match text {
            Some(text) if !text.trim().is_empty() => DialogBody::Text(text),
            _ => DialogBody::Empty,
        };
        Self::new(kind, title, body)
    }

    /// List entries of an [`DialogBody::Items`] body, empty otherwise.
    pub fn items(&self) -> &[String] {
        match &self.body {
            DialogBody::Items(items) => items,
            _ => &[],
        }
    }

    /// HTML body with server-supplied text sanitized.
    pub fn to_html(&self) -> String {
        match &self.body {
            DialogBody::Empty => String::new(),
            DialogBody::Text(text) => ammonia::clean(text),
            DialogBody::Items(items) => {
                let items: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", ammonia::clean(item)))
                    .collect();
                format!("<ul>{items}</ul>")
            }
        }
    }

    /// Plain-text rendering used by terminal front ends.
    pub fn to_plain_text(&self) -> String {
        let mut out = self.title.clone();
        match &self.body {
            DialogBody::Empty => {}
            DialogBody::Text(text) => {
                out.push('\n');
                out.push_str(text);
            }
            DialogBody::Items(items) => {
                for item in items {
                    out.push_str("\n  - ");
                    out.push_str(item);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_list_has_one_item_per_entry_and_is_sanitized() {
        let dialog = Dialog::new(
            DialogKind::Error,
            "Invalid data",
            DialogBody::Items(vec![
                "Name is required.".to_string(),
                "<script>alert(1)</script>Email is invalid.".to_string(),
            ]),
        );

        let html = dialog.to_html();

        assert_eq!(html.matches("<li>").count(), 2);
        assert!(!html.contains("<script>"));
        assert!(html.contains("Email is invalid."));
    }

    #[test]
    fn blank_text_becomes_empty_body() {
        let dialog = Dialog::text(DialogKind::Info, "Saved", Some("  ".to_string()));
        assert_eq!(dialog.body, DialogBody::Empty);
        assert_eq!(dialog.to_plain_text(), "Saved");
    }

    #[test]
    fn plain_text_lists_items() {
        let dialog = Dialog::new(
            DialogKind::Warning,
            "Check",
            DialogBody::Items(vec!["a.".to_string(), "b.".to_string()]),
        );
        assert_eq!(dialog.to_plain_text(), "Check\n  - a.\n  - b.");
    }
}
