use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::PathBuf,
};

use color_eyre::eyre::Error;
use exosky_ui::sky::grid::{
    build_grid,
    GridKind,
};

/// Dump the line loops of a reference grid as JSON.
#[derive(Debug, clap::Args)]
pub struct Args {
    frame: Frame,

    /// Output file. Writes to stdout if omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Frame {
    Equatorial,
    Galactic,
}

impl From<Frame> for GridKind {
    fn from(value: Frame) -> Self {
        match value {
            Frame::Equatorial => Self::Equatorial,
            Frame::Galactic => Self::Galactic,
        }
    }
}

impl Args {
    pub fn run(self) -> Result<(), Error> {
        let grid = build_grid(self.frame.into());

        let mut writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(std::io::stdout().lock()),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &grid)?;
        }
        else {
            serde_json::to_writer(&mut writer, &grid)?;
        }
        writeln!(writer)?;
        writer.flush()?;

        if let Some(path) = &self.output {
            tracing::info!(
                path = %path.display(),
                rings = grid.rings().count(),
                arcs = grid.arcs().count(),
                "wrote grid"
            );
        }

        Ok(())
    }
}
