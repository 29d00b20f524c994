use articles::build::{build_site, Error};
use articles::cli::{app, config_from_matches, normalize_args};
use tracing::{error, Level};

fn main() {
    let matches = app().get_matches_from(normalize_args(std::env::args_os()));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(match matches.is_present("verbose") {
            true => Level::DEBUG,
            false => Level::INFO,
        })
        .init();

    let result = config_from_matches(&matches)
        .map_err(Error::from)
        .and_then(|config| build_site(&config));

    if let Err(e) = result {
        error!("{}", e);
        if let Error::Parse(err) = &e {
            if err.is_date_error() {
                error!("every article needs a `Date:` line in the format YYYY/MM/DD");
            }
        }
        std::process::exit(1);
    }
}
