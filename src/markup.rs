//! Markup conversion and HTML composition.
//!
//! Question text is written in CommonMark and converted to HTML when a
//! question is built. Which fields go through the converter is decided by
//! [`MarkupPolicy`], so the asymmetry between fields is visible in one place.

use pulldown_cmark::{Options, Parser, html};

/// Converts CommonMark text to an HTML fragment.
pub fn to_html(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// A question field subject to markup conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prompt,
    Option,
    AdditionalResource,
    Answer,
}

/// Per-field conversion table.
///
/// | field                 | converted |
/// |-----------------------|-----------|
/// | `prompt`              | yes       |
/// | `options`             | yes       |
/// | `additional_resource` | no        |
/// | `answer`              | yes       |
///
/// The additional resource is passed through as raw HTML so authors can
/// embed images, code listings or tables without CommonMark getting in the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupPolicy {
    pub prompt: bool,
    pub options: bool,
    pub additional_resource: bool,
    pub answer: bool,
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        Self {
            prompt: true,
            options: true,
            additional_resource: false,
            answer: true,
        }
    }
}

impl MarkupPolicy {
    /// Policy that leaves every field untouched.
    pub fn raw() -> Self {
        Self {
            prompt: false,
            options: false,
            additional_resource: false,
            answer: false,
        }
    }

    pub fn converts(&self, field: Field) -> bool {
        match field {
            Field::Prompt => self.prompt,
            Field::Option => self.options,
            Field::AdditionalResource => self.additional_resource,
            Field::Answer => self.answer,
        }
    }

    /// Runs `text` through the converter if the policy says so for `field`.
    pub fn apply(&self, field: Field, text: &str) -> String {
        if self.converts(field) {
            to_html(text)
        } else {
            text.to_string()
        }
    }
}

/// Label style of an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// 1, 2, 3... used for top-level questions.
    Numeric,
    /// a, b, c... used for options.
    Alphabetic,
}

impl ListStyle {
    fn marker(self) -> &'static str {
        match self {
            ListStyle::Numeric => "1",
            ListStyle::Alphabetic => "a",
        }
    }
}

/// Wraps each fragment in a list item and joins them into one ordered list,
/// keeping the order of `fragments`.
pub fn ordered_list<I, S>(fragments: I, style: ListStyle) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = format!("<ol type=\"{}\">\n", style.marker());
    for fragment in fragments {
        out.push_str("<li>");
        out.push_str(fragment.as_ref());
        out.push_str("</li>\n");
    }
    out.push_str("</ol>\n");
    out
}

/// Builds a minimal document: an embedded stylesheet, a heading, one
/// descriptive line and the body.
pub fn document(css: &str, title: &str, description: &str, body: &str) -> String {
    format!(
        "<head>\n<style>\n{css}\n</style>\n</head>\n<body>\n<h1>{title}</h1>\n<p>{description}</p>\n{body}</body>\n"
    )
}
