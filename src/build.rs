//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: parsing the articles
//! ([`crate::parser`]) and rendering the index, article, and tag pages
//! ([`crate::write`]).

use crate::config::{Config, Error as ConfigError};
use crate::parser::{parse_file, Error as ParseError};
use crate::write::{Error as WriteError, Writer};
use std::fmt;
use tracing::info;

/// Builds the site from a [`Config`] object. This calls into
/// [`parse_file`] and [`Writer::write_site`] which do the heavy-lifting.
///
/// The notes are parsed in full before anything is written, so a bad article
/// leaves the output directory untouched. Once writing starts, the first
/// failure stops the build and whatever was already written stays behind.
pub fn build_site(config: &Config) -> Result<()> {
    let articles = parse_file(&config.notes_path)?;
    info!(
        notes = %config.notes_path.display(),
        articles = articles.len(),
        "parsed notes"
    );

    let writer = Writer {
        output_directory: &config.output_directory,
        site: &config.site,
    };
    let tags = writer.write_site(&articles)?;

    info!(
        output = %config.output_directory.display(),
        articles = articles.len(),
        tags,
        "built site"
    );
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during configuration,
/// parsing, or writing.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading configuration.
    Config(ConfigError),

    /// Returned for errors reading or parsing the notes file.
    Parse(ParseError),

    /// Returned for errors writing pages to disk.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => err.fmt(f),
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    /// Converts [`ConfigError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: ConfigError) -> Error {
        Error::Config(err)
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
