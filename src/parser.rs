//! Defines the logic for parsing [`Article`]s out of a notes file, along with
//! the parser's [`Error`] type.
//!
//! A notes file is a flat sequence of articles. Each article starts with a
//! level-1 markdown heading and runs until the next one or the end of the
//! file. Inside an article, a line starting with `Date:` gives the date and a
//! line starting with `Tags:` gives a comma-separated tag list. Everything
//! else, heading included, is the article's markdown:
//!
//! ```md
//! # Hello World
//! Date: 2015/03/02
//! Tags: greeting, test
//! Hello **world**.
//! ```

use crate::article::Article;
use crate::markdown;
use chrono::NaiveDate;
use std::fmt;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// The prefix which starts a new article.
pub const HEADING_PREFIX: &str = "# ";

/// The prefix of the line holding an article's date.
pub const DATE_PREFIX: &str = "Date:";

/// The prefix of the line holding an article's tags.
pub const TAGS_PREFIX: &str = "Tags:";

/// The format of an article's date, e.g. `2015/03/02`.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Parses the notes file at `path`. See [`parse_notes`].
pub fn parse_file(path: &Path) -> Result<Vec<Article>> {
    parse_notes(BufReader::new(crate::util::open(path, "notes")?))
}

/// Splits the notes in `reader` into articles and parses each one. Articles
/// are numbered from 1 in the order they appear, but the returned list is
/// reversed so that the last article in the notes comes first. Input without
/// any heading lines yields no articles.
///
/// Lines before the first heading belong to the first article.
pub fn parse_notes<R: BufRead>(reader: R) -> Result<Vec<Article>> {
    let mut articles = Vec::new();
    let mut heading: Option<String> = None;
    let mut lines: Vec<String> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.starts_with(HEADING_PREFIX) {
            if let Some(previous) = heading.replace(line) {
                articles.push(parse_article(&previous, &lines, articles.len() + 1)?);
                lines.clear();
            }
            continue;
        }
        lines.push(line);
    }

    if let Some(last) = heading {
        articles.push(parse_article(&last, &lines, articles.len() + 1)?);
    }

    articles.reverse();
    Ok(articles)
}

/// Parses a single [`Article`] from its `heading` line and the `lines` that
/// follow it. The `index` is the article's 1-based position in the notes.
/// Errors are annotated with the index and heading so the operator can find
/// the offending article.
pub fn parse_article(heading: &str, lines: &[String], index: usize) -> Result<Article> {
    match _parse_article(heading, lines, index) {
        Ok(article) => Ok(article),
        Err(e) => Err(Error::Annotated(
            format!("parsing article {} `{}`", index, heading),
            Box::new(e),
        )),
    }
}

fn _parse_article(heading: &str, lines: &[String], index: usize) -> Result<Article> {
    let mut markdown: Vec<&str> = vec![heading];
    let mut date_line: Option<&str> = None;
    let mut tags_line: Option<&str> = None;

    // later `Date:` and `Tags:` lines win
    for line in lines {
        if let Some(date) = line.strip_prefix(DATE_PREFIX) {
            date_line = Some(date);
        } else if let Some(tags) = line.strip_prefix(TAGS_PREFIX) {
            tags_line = Some(tags);
        } else {
            markdown.push(line);
        }
    }

    let date = match date_line {
        None => return Err(Error::MissingDate),
        Some(date) => parse_date(date.trim())?,
    };

    // Without a `Tags:` line this yields a single empty tag, which files the
    // article under `tag/.html`.
    let tags = tags_line
        .unwrap_or_default()
        .split(',')
        .map(|tag| tag.trim().to_owned())
        .collect();

    let mut content = String::new();
    markdown::to_html(&mut content, &markdown.join("\n"))?;

    Ok(Article {
        header: heading
            .strip_prefix(HEADING_PREFIX)
            .unwrap_or(heading)
            .trim()
            .to_owned(),
        content,
        tags,
        date,
        index,
    })
}

/// Parses a date in the fixed `YYYY/MM/DD` shape. chrono alone would also
/// take short years and single-digit months and days, so the shape is
/// checked first.
fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = |err| Error::InvalidDate {
        input: input.to_owned(),
        err,
    };
    let well_formed = input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'/',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid(None));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|err| invalid(Some(err)))
}

/// Represents the result of an [`Article`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing the notes file.
#[derive(Debug)]
pub enum Error {
    /// Returned when an article has no `Date:` line.
    MissingDate,

    /// Returned when an article's `Date:` line isn't a `YYYY/MM/DD` date.
    /// `err` is set when the shape was right but chrono rejected the date
    /// (e.g. `2015/02/30`).
    InvalidDate {
        input: String,
        err: Option<chrono::ParseError>,
    },

    /// Returned for I/O errors opening or reading the notes file.
    Io(io::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl Error {
    /// Returns true if the error (or the error it annotates) is a problem
    /// with an article's date.
    pub fn is_date_error(&self) -> bool {
        match self {
            Error::MissingDate | Error::InvalidDate { .. } => true,
            Error::Annotated(_, err) => err.is_date_error(),
            Error::Io(_) => false,
        }
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingDate => write!(f, "missing `{}` line", DATE_PREFIX),
            Error::InvalidDate { input, err } => {
                write!(f, "invalid date `{}` (wanted the format YYYY/MM/DD)", input)?;
                match err {
                    Some(err) => write!(f, ": {}", err),
                    None => Ok(()),
                }
            }
            Error::Io(err) => err.fmt(f),
            Error::Annotated(annotation, err) => write!(f, "{}: {}", &annotation, err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingDate => None,
            Error::InvalidDate { input: _, err } => match err {
                Some(err) => Some(err),
                None => None,
            },
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts a [`io::Error`] into an [`Error`]. It allows us to use the
    /// `?` operator for fallible I/O functions.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn parse(notes: &str) -> Result<Vec<Article>> {
        parse_notes(notes.as_bytes())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_single_article() -> Result<()> {
        let articles = parse(
            "# Hello World\n\
             Date: 2015/03/02\n\
             Tags: greeting, test\n\
             Hello **world**.\n",
        )?;

        assert_eq!(1, articles.len());
        let article = &articles[0];
        assert_eq!("Hello World", article.header);
        assert_eq!(vec!["greeting", "test"], article.tags);
        assert_eq!(date(2015, 3, 2), article.date);
        assert_eq!(1, article.index);
        assert_eq!(
            "<h1>Hello World</h1>\n<p>Hello <strong>world</strong>.</p>\n",
            article.content
        );
        Ok(())
    }

    #[test]
    fn test_parse_reverses_but_keeps_file_order_indices() -> Result<()> {
        let articles = parse(
            "# First\nDate: 2015/01/01\n\
             # Second\nDate: 2015/01/02\n\
             # Third\nDate: 2015/01/03\n",
        )?;

        let headers: Vec<&str> = articles.iter().map(|a| a.header.as_str()).collect();
        let indices: Vec<usize> = articles.iter().map(|a| a.index).collect();
        assert_eq!(vec!["Third", "Second", "First"], headers);
        assert_eq!(vec![3, 2, 1], indices);
        Ok(())
    }

    #[test]
    fn test_parse_without_headings() -> Result<()> {
        assert!(parse("")?.is_empty());
        assert!(parse("just some text\n## not a level-1 heading\n#nospace\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_tags_yield_empty_tag() -> Result<()> {
        let articles = parse("# Untagged\nDate: 2020/12/31\nbody\n")?;
        assert_eq!(vec![String::new()], articles[0].tags);
        Ok(())
    }

    #[test]
    fn test_tags_are_trimmed_and_duplicates_kept() -> Result<()> {
        let articles = parse("# T\nDate: 2020/01/01\nTags:  a ,b,, a\n")?;
        assert_eq!(vec!["a", "b", "", "a"], articles[0].tags);
        Ok(())
    }

    #[test]
    fn test_last_date_and_tags_lines_win() -> Result<()> {
        let articles = parse(
            "# T\nDate: 2020/01/01\nTags: old\nDate:2021/06/15\nTags: new\n",
        )?;
        assert_eq!(date(2021, 6, 15), articles[0].date);
        assert_eq!(vec!["new"], articles[0].tags);
        Ok(())
    }

    #[test]
    fn test_metadata_lines_are_not_rendered() -> Result<()> {
        let articles = parse("# T\nbefore\nDate: 2020/01/01\nTags: x\nafter\n")?;
        assert_eq!("<h1>T</h1>\n<p>before\nafter</p>\n", articles[0].content);
        Ok(())
    }

    #[test]
    fn test_header_is_trimmed() -> Result<()> {
        let articles = parse("#   Spaced out   \nDate: 2020/01/01\n")?;
        assert_eq!("Spaced out", articles[0].header);
        Ok(())
    }

    #[test]
    fn test_lines_before_first_heading_belong_to_first_article() -> Result<()> {
        let articles = parse("Date: 2019/05/04\n# First\nbody\n")?;
        assert_eq!(date(2019, 5, 4), articles[0].date);
        Ok(())
    }

    #[test]
    fn test_missing_date_aborts() {
        let err = parse("# Good\nDate: 2020/01/01\n# Bad\nno date here\n").unwrap_err();
        assert!(err.is_date_error());
        assert_eq!(
            "parsing article 2 `# Bad`: missing `Date:` line",
            err.to_string()
        );
    }

    #[test]
    fn test_invalid_date_aborts() {
        let err = parse("# Bad\nDate: 2015-03-02\n").unwrap_err();
        assert!(err.is_date_error());
        match err {
            Error::Annotated(_, inner) => match *inner {
                Error::InvalidDate { input, .. } => assert_eq!("2015-03-02", input),
                other => panic!("wanted an invalid date error, got {:?}", other),
            },
            other => panic!("wanted an annotated error, got {:?}", other),
        }
    }

    fn invalid_date_input(notes: &str) -> String {
        match parse(notes) {
            Err(Error::Annotated(_, inner)) => match *inner {
                Error::InvalidDate { input, .. } => input,
                other => panic!("wanted an invalid date error, got {:?}", other),
            },
            other => panic!("wanted an annotated error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_dates_abort() {
        let malformed = [
            "15/03/02",
            "2015/3/2",
            "2015/03/2",
            "02015/03/02",
            "2015/03/02x",
            "2015/03/o2",
        ];
        for input in &malformed {
            assert_eq!(*input, invalid_date_input(&format!("# A\nDate: {}\n", input)));
        }
    }

    #[test]
    fn test_impossible_date_aborts() {
        let err = parse("# A\nDate: 2015/02/30\n").unwrap_err();
        assert_eq!(
            "parsing article 1 `# A`: invalid date `2015/02/30` (wanted the format YYYY/MM/DD): \
             input is out of range",
            err.to_string()
        );
    }

    #[test]
    fn test_parse_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "# One\r\nDate: 2015/03/02\r\n\r\nbody\r\n")?;
        let articles = parse_file(file.path())?;
        assert_eq!(1, articles.len());
        assert_eq!("One", articles[0].header);
        assert_eq!(date(2015, 3, 2), articles[0].date);
        Ok(())
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file(Path::new("/does/not/exist/notes.txt")).unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(io::ErrorKind::NotFound, e.kind()),
            other => panic!("wanted an I/O error, got {:?}", other),
        }
    }
}
