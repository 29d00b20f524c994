//! The command line interface. Flags are Go-style single-dash long flags
//! (`-notes notes.txt -baseDir docs`); the double-dash forms work too.

use crate::config::{Config, Site, DEFAULT_NOTES_PATH, DEFAULT_OUTPUT_DIRECTORY};
use clap::{crate_version, App, Arg, ArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

/// The flags, which are all long flags.
const FLAGS: &[&str] = &["notes", "baseDir", "config", "verbose", "help", "version"];

/// Builds the [`App`] describing the command line.
pub fn app() -> App<'static, 'static> {
    App::new("articles")
        .version(crate_version!())
        .about("Builds a static site from a single notes file")
        .arg(
            Arg::with_name("notes")
                .long("notes")
                .value_name("PATH")
                .takes_value(true)
                .default_value(DEFAULT_NOTES_PATH)
                .help("The file with all notes"),
        )
        .arg(
            Arg::with_name("baseDir")
                .long("baseDir")
                .value_name("PATH")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT_DIRECTORY)
                .help("The base directory to create the site in"),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("PATH")
                .takes_value(true)
                .help("A YAML file with the site's `title` and `heading`"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .help("Logs every file written"),
        )
}

/// Rewrites Go-style `-flag` and `-flag=value` arguments as `--flag` and
/// `--flag=value` so [`clap`] recognizes them. The first argument is the
/// program name and is left alone, as is anything that isn't a known flag.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            let arg: OsString = arg.into();
            if i == 0 {
                return arg;
            }
            let is_flag = |rest: &str| {
                !rest.starts_with('-') && FLAGS.iter().any(|f| *f == flag_name(rest))
            };
            let rewritten = match arg.to_str().and_then(|s| s.strip_prefix('-')) {
                Some(rest) if is_flag(rest) => Some(OsString::from(format!("--{}", rest))),
                _ => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}

fn flag_name(arg: &str) -> &str {
    arg.split('=').next().unwrap_or(arg)
}

/// Resolves parsed arguments into a [`Config`], loading the site settings
/// file if one was given.
pub fn config_from_matches(matches: &ArgMatches) -> crate::config::Result<Config> {
    let site = match matches.value_of("config") {
        Some(path) => Site::from_file(&PathBuf::from(path))?,
        None => Site::default(),
    };
    Ok(Config {
        notes_path: PathBuf::from(matches.value_of("notes").unwrap_or(DEFAULT_NOTES_PATH)),
        output_directory: PathBuf::from(
            matches
                .value_of("baseDir")
                .unwrap_or(DEFAULT_OUTPUT_DIRECTORY),
        ),
        site,
    })
}
