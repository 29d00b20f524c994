//! Defines the [`Article`] type, the unit of content parsed out of a notes
//! file, and its conversions into template values.

use crate::tag::tag_link;
use crate::util::{href, html_text};
use chrono::NaiveDate;
use gtmpl::Value;
use std::collections::HashMap;

/// The format for dates displayed on article pages, e.g. `2 Mar 2015`.
pub const DISPLAY_DATE_FORMAT: &str = "%-d %b %Y";

/// Represents a single article from the notes file.
#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    /// The heading text with the leading `# ` removed.
    pub header: String,

    /// The article body rendered to HTML. This includes the heading itself.
    pub content: String,

    /// The tags in the order they were listed. Duplicates are kept as-is.
    pub tags: Vec<String>,

    /// The article's date.
    pub date: NaiveDate,

    /// The 1-based position of the article in the notes file. This names the
    /// article's output file, so it doesn't change when the display order
    /// does.
    pub index: usize,
}

impl Article {
    /// The name of the article's output file relative to the output directory
    /// (e.g., `3.html`).
    pub fn file_name(&self) -> String {
        format!("{}.html", self.index)
    }

    /// The date formatted for display (see [`DISPLAY_DATE_FORMAT`]).
    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    /// Converts the article into a [`Value::Object`] for the article page
    /// template. The result has fields `content` (raw HTML), `date`, and
    /// `tags`, where each tag is an object with fields `tag` and `url`.
    pub fn to_value(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("content".to_owned(), Value::String(self.content.clone()));
        m.insert("date".to_owned(), Value::String(html_text(&self.display_date())));
        m.insert(
            "tags".to_owned(),
            Value::Array(
                self.tags
                    .iter()
                    .map(|tag| {
                        let mut t: HashMap<String, Value> = HashMap::new();
                        t.insert("tag".to_owned(), Value::String(html_text(tag)));
                        t.insert("url".to_owned(), Value::String(href(&tag_link(tag))));
                        Value::Object(t)
                    })
                    .collect(),
            ),
        );
        Value::Object(m)
    }

    /// Converts the article into the [`Value::Object`] used in listings. The
    /// result has fields `header` and `link`, where `link` is the article's
    /// file name with `link_prefix` prepended.
    pub fn summarize(&self, link_prefix: &str) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("header".to_owned(), Value::String(html_text(&self.header)));
        m.insert(
            "link".to_owned(),
            Value::String(href(&format!("{}{}", link_prefix, self.file_name()))),
        );
        Value::Object(m)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fixture() -> Article {
        Article {
            header: String::from("Fish & Chips"),
            content: String::from("<h1>Fish &amp; Chips</h1>"),
            tags: vec![String::from("food"), String::from("uk")],
            date: NaiveDate::from_ymd_opt(2015, 3, 2).unwrap(),
            index: 7,
        }
    }

    fn field<'a>(value: &'a Value, name: &str) -> &'a Value {
        match value {
            Value::Object(m) => &m[name],
            _ => panic!("wanted an object for `{}`", name),
        }
    }

    fn string(value: &Value) -> &str {
        match value {
            Value::String(s) => s,
            _ => panic!("wanted a string"),
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!("7.html", fixture().file_name());
    }

    #[test]
    fn test_display_date_has_no_leading_zero() {
        assert_eq!("2 Mar 2015", fixture().display_date());
    }

    #[test]
    fn test_to_value_keeps_content_raw() {
        let value = fixture().to_value();
        assert_eq!("<h1>Fish &amp; Chips</h1>", string(field(&value, "content")));
        assert_eq!("2 Mar 2015", string(field(&value, "date")));
        match field(&value, "tags") {
            Value::Array(tags) => {
                assert_eq!(2, tags.len());
                assert_eq!("uk", string(field(&tags[1], "tag")));
                assert_eq!("tag/uk.html", string(field(&tags[1], "url")));
            }
            _ => panic!("wanted an array"),
        }
    }

    #[test]
    fn test_summarize_escapes_header() {
        let value = fixture().summarize("/");
        assert_eq!("Fish &amp; Chips", string(field(&value, "header")));
        assert_eq!("/7.html", string(field(&value, "link")));
    }
}
