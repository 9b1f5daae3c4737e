mod catalog;
mod convert;
mod grid;
mod remote;
mod search;
mod summary;

use clap::{
    builder::styling,
    Parser,
};
use color_eyre::eyre::Error;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Blue.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Exosky command line interface
///
/// `exosky-cli` converts sky coordinates, inspects star catalogs and talks to
/// the exoplanet sky API.
#[derive(Debug, Parser)]
#[command(version = clap::crate_version!(), styles = STYLES)]
pub enum Args {
    Convert(crate::convert::Args),
    Grid(crate::grid::Args),
    Catalog(crate::catalog::Args),
    Search(crate::search::Args),
    Stars(crate::remote::StarsArgs),
    Print(crate::remote::PrintArgs),
}

impl Args {
    pub async fn run(self) -> Result<(), Error> {
        match self {
            Self::Convert(args) => args.run()?,
            Self::Grid(args) => args.run()?,
            Self::Catalog(args) => args.run()?,
            Self::Search(args) => args.run()?,
            Self::Stars(args) => args.run().await?,
            Self::Print(args) => args.run().await?,
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_subcommands() {
        let args = Args::try_parse_from(["exosky-cli", "convert", "eq-to-gal", "266.4", "-28.9"]);
        assert!(matches!(args, Ok(Args::Convert(_))));

        let args = Args::try_parse_from(["exosky-cli", "grid", "galactic"]);
        assert!(matches!(args, Ok(Args::Grid(_))));

        let args = Args::try_parse_from(["exosky-cli", "search", "planets.json", "kepler"]);
        assert!(matches!(args, Ok(Args::Search(_))));

        assert!(Args::try_parse_from(["exosky-cli", "launch"]).is_err());
    }
}
