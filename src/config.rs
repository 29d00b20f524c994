//! Defines the [`Config`] for a site build and the optional [`Site`] settings
//! file.

use crate::util::open;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// The default notes file, relative to the working directory.
pub const DEFAULT_NOTES_PATH: &str = "notes.txt";

/// The default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "docs";

const DEFAULT_TITLE: &str = "Articles of interest";

/// Settings for the text shared by every page. These can be loaded from a
/// YAML file, e.g.:
///
/// ```yaml
/// title: My reading list
/// heading: Articles of interest
/// ```
///
/// Missing fields take their default values.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Site {
    /// The `<title>` of every page.
    #[serde(default = "default_title")]
    pub title: String,

    /// The heading of the home index page.
    #[serde(default = "default_title")]
    pub heading: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

impl Default for Site {
    fn default() -> Self {
        Site {
            title: default_title(),
            heading: default_title(),
        }
    }
}

impl Site {
    /// Loads the [`Site`] settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Site> {
        let file = open(path, "site").map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        serde_yaml::from_reader(file).map_err(|err| Error::DeserializeYaml {
            path: path.to_owned(),
            err,
        })
    }
}

/// Everything needed to build a site.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The notes file to read articles from.
    pub notes_path: PathBuf,

    /// The directory the pages are written into. It must already exist.
    pub output_directory: PathBuf,

    /// The text shared by every page.
    pub site: Site,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            notes_path: PathBuf::from(DEFAULT_NOTES_PATH),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            site: Site::default(),
        }
    }
}

/// Represents the result of loading configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the [`Site`] settings file.
#[derive(Debug)]
pub enum Error {
    /// Returned when the settings file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the settings file isn't valid YAML for [`Site`].
    DeserializeYaml {
        path: PathBuf,
        err: serde_yaml::Error,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path: _, err } => err.fmt(f),
            Error::DeserializeYaml { path, err } => {
                write!(f, "Loading site file `{}`: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml { path: _, err } => Some(err),
        }
    }
}
