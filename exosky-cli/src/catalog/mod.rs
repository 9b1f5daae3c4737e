pub mod hyg;

use std::{
    fs::File,
    io::BufWriter,
    path::{
        Path,
        PathBuf,
    },
};

use color_eyre::eyre::Error;
use exosky_protocol::{
    catalog::{
        CartesianCatalog,
        StarCatalog,
    },
    model::body::BodyKind,
};
use exosky_ui::sky::point_cloud::StarStyle;

use crate::summary::Summary;

/// Inspect and convert columnar catalog files.
#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Summarize a sky catalog (`RA`, `DEC`, `Vmag`).
    Stars { path: PathBuf },

    /// Summarize a cartesian catalog (`x`, `y`, `z`).
    Bodies {
        path: PathBuf,

        /// What the rows describe. Only affects placeholder names.
        #[arg(long, default_value = "star")]
        kind: Kind,
    },

    /// Convert a HYG CSV file into a sky catalog.
    FromHyg {
        input: PathBuf,
        output: PathBuf,

        /// Drop stars fainter than this.
        #[arg(long, allow_negative_numbers = true)]
        max_magnitude: Option<f64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Kind {
    Star,
    Exoplanet,
}

impl From<Kind> for BodyKind {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Star => Self::Star,
            Kind::Exoplanet => Self::Exoplanet,
        }
    }
}

pub fn read_star_catalog(path: impl AsRef<Path>) -> Result<StarCatalog, Error> {
    let json = std::fs::read_to_string(path)?;
    Ok(StarCatalog::from_json_str(&json)?)
}

pub fn read_cartesian_catalog(path: impl AsRef<Path>) -> Result<CartesianCatalog, Error> {
    let json = std::fs::read_to_string(path)?;
    Ok(CartesianCatalog::from_json_str(&json)?)
}

impl Args {
    pub fn run(self) -> Result<(), Error> {
        match self.command {
            Command::Stars { path } => {
                let stars = read_star_catalog(&path)?.stars();
                println!("{}", Summary::from_stars(&stars, &StarStyle::default()).table());
            }
            Command::Bodies { path, kind } => {
                let bodies = read_cartesian_catalog(&path)?.bodies(kind.into());
                println!("{}", Summary::from_bodies(&bodies).table());
            }
            Command::FromHyg {
                input,
                output,
                max_magnitude,
            } => {
                let reader = hyg::Reader::open(&input)?;
                let catalog = hyg::to_star_catalog(reader, max_magnitude)?;
                let writer = BufWriter::new(File::create(&output)?);
                serde_json::to_writer(writer, &catalog)?;
                println!("wrote {} stars to {}", catalog.len(), output.display());
            }
        }

        Ok(())
    }
}
