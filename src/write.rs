//! Templates [`Article`]s into HTML pages and writes them to disk. There are
//! three fixed templates: the home index ([`INDEX_TEMPLATE`]), the article
//! page ([`ARTICLE_TEMPLATE`]), and the tag listing ([`TAG_TEMPLATE`]).

use crate::article::Article;
use crate::config::Site;
use crate::tag::{index_tags, TagIndex, TAG_DIRECTORY};
use crate::util::html_text;
use gtmpl::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The template for `index.html`. `.item` is a list of article summaries
/// (see [`Article::summarize`]).
pub const INDEX_TEMPLATE: &str = r#"
<html>
<head>
  <title>{{.title}}</title>
</head>
<body>
  <h1>{{.heading}}</h1>
  {{range .item}}
    <p>
      <a href="{{.link}}">{{.header}}</a>
    </p>
  {{end}}
</body>
</html>
"#;

/// The template for `{index}.html`. `.item` is an article (see
/// [`Article::to_value`]).
pub const ARTICLE_TEMPLATE: &str = r#"
<html>
<head>
  <title>{{.title}}</title>
</head>
<body>
  <p>
    {{.item.content}}
  </p>
  <p>Date: {{.item.date}}</p>
  <p>
  {{range .item.tags}}
    <a href="{{.url}}">{{.tag}}</a>
  {{end}}
  </p>
</body>
</html>
"#;

/// The template for `tag/{tag}.html`. `.item` has fields `tag` and
/// `articles`, the latter being a list of article summaries.
pub const TAG_TEMPLATE: &str = r#"
<html>
<head>
  <title>{{.title}}</title>
</head>
<body>
  <h1>Tag: {{.item.tag}}</h1>
  {{range .item.articles}}
    <p>
      <a href="{{.link}}">{{.header}}</a>
    </p>
  {{end}}
</body>
</html>
"#;

/// Responsible for templating and writing HTML pages to disk from
/// [`Article`]s.
pub struct Writer<'a> {
    /// The directory in which the pages are written. The home index is
    /// `{output_directory}/index.html`, article pages are
    /// `{output_directory}/{index}.html`, and tag pages are
    /// `{output_directory}/tag/{tag}.html`. Only the `tag` directory is
    /// created if missing.
    pub output_directory: &'a Path,

    /// The text shared by every page.
    pub site: &'a Site,
}

impl Writer<'_> {
    /// Takes a single [`Page`], templates it, and writes it to disk.
    ///
    /// Existing files are overwritten in place but never truncated, so a
    /// previous page longer than the new one leaves its tail behind.
    fn write_page(&self, page: &Page) -> Result<()> {
        let html = gtmpl::template(page.template, page.to_value(self.site))
            .map_err(|e| Error::Template(e.to_string()))?;

        let annotate = |err: io::Error| Error::Io {
            path: page.file_path.clone(),
            err,
        };
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&page.file_path)
            .map_err(annotate)?
            .write_all(html.as_bytes())
            .map_err(annotate)?;
        debug!(path = %page.file_path.display(), "wrote page");
        Ok(())
    }

    /// Writes the home index listing every article in the given order.
    pub fn write_index(&self, articles: &[Article]) -> Result<()> {
        self.write_page(&Page {
            item: Value::Array(articles.iter().map(|a| a.summarize("")).collect()),
            file_path: self.output_directory.join("index.html"),
            template: INDEX_TEMPLATE,
        })
    }

    /// Writes one page per article, named after the article's index.
    pub fn write_articles(&self, articles: &[Article]) -> Result<()> {
        for article in articles {
            self.write_page(&Page {
                item: article.to_value(),
                file_path: self.output_directory.join(article.file_name()),
                template: ARTICLE_TEMPLATE,
            })?;
        }
        Ok(())
    }

    /// Indexes the articles by tag and writes one listing page per tag,
    /// creating the tag directory first if needed. Returns the number of tag
    /// pages written.
    pub fn write_tags(&self, articles: &[Article]) -> Result<usize> {
        let directory = self.output_directory.join(TAG_DIRECTORY);
        if !directory.exists() {
            std::fs::create_dir(&directory).map_err(|err| Error::CreateDirectory {
                path: directory.clone(),
                err,
            })?;
            debug!(path = %directory.display(), "created tag directory");
        }

        let indices = index_tags(articles);
        for index in indices.iter() {
            self.write_page(&Page {
                item: index.to_value(),
                file_path: directory.join(format!("{}.html", index.name)),
                template: TAG_TEMPLATE,
            })?;
        }
        Ok(indices.len())
    }

    /// Writes the home index, then every article page, then every tag page,
    /// stopping at the first error.
    pub fn write_site(&self, articles: &[Article]) -> Result<usize> {
        self.write_index(articles)?;
        self.write_articles(articles)?;
        self.write_tags(articles)
    }
}

impl TagIndex<'_> {
    /// Converts the index into a [`Value::Object`] with fields `tag` and
    /// `articles`. Article links are absolute from the site root since the
    /// tag pages live one directory down.
    fn to_value(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("tag".to_owned(), Value::String(html_text(self.name)));
        m.insert(
            "articles".to_owned(),
            Value::Array(self.articles.iter().map(|a| a.summarize("/")).collect()),
        );
        Value::Object(m)
    }
}

/// An object representing an output HTML file.
struct Page {
    /// The main item for the page.
    item: Value,

    /// The target location on disk for the output file.
    file_path: PathBuf,

    /// The template with which the page will be rendered.
    template: &'static str,
}

impl Page {
    /// Converts a [`Page`] into a [`Value`]. The result is a
    /// [`Value::Object`] with fields `item`, `title`, and `heading`.
    fn to_value(&self, site: &Site) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("item".to_owned(), self.item.clone());
        m.insert("title".to_owned(), Value::String(html_text(&site.title)));
        m.insert("heading".to_owned(), Value::String(html_text(&site.heading)));
        Value::Object(m)
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error creating the tag directory.
    CreateDirectory { path: PathBuf, err: io::Error },

    /// An error writing an output file.
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => write!(f, "Rendering template: {}", err),
            Error::CreateDirectory { path, err } => {
                write!(f, "Creating directory `{}`: {}", path.display(), err)
            }
            Error::Io { path, err } => write!(f, "Writing `{}`: {}", path.display(), err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::CreateDirectory { path: _, err } => Some(err),
            Error::Io { path: _, err } => Some(err),
        }
    }
}
