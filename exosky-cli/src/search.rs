use std::path::PathBuf;

use color_eyre::eyre::Error;
use exosky_protocol::model::body::BodyKind;
use exosky_ui::app::search::filter_names;

use crate::catalog::read_cartesian_catalog;

/// Search the exoplanet names of a cartesian planet catalog.
///
/// Matching is case-insensitive on substrings, like the search box of the
/// explorer.
#[derive(Debug, clap::Args)]
pub struct Args {
    path: PathBuf,

    query: String,

    /// Stop after this many results.
    #[arg(long, short = 'n')]
    limit: Option<usize>,
}

impl Args {
    pub fn run(self) -> Result<(), Error> {
        let names = read_cartesian_catalog(&self.path)?.names(BodyKind::Exoplanet);
        let results = filter_names(&names, &self.query);
        tracing::debug!(query = %self.query, num_results = results.len(), "searched");

        for name in results.iter().take(self.limit.unwrap_or(usize::MAX)) {
            println!("{name}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::Args as Cli;

    #[test]
    fn it_parses_the_query() {
        let Ok(Cli::Search(args)) =
            Cli::try_parse_from(["exosky-cli", "search", "planets.json", "kepler", "-n", "5"])
        else {
            panic!("expected search args");
        };
        assert_eq!(args.path, PathBuf::from("planets.json"));
        assert_eq!(args.query, "kepler");
        assert_eq!(args.limit, Some(5));
    }
}
