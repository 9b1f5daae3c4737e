use color_eyre::eyre::Error;
use exosky_ui::sky::coords::{
    equatorial_to_galactic_with,
    galactic_to_equatorial_with,
    Equatorial,
    Galactic,
    PoleConstants,
};

/// Convert between equatorial, galactic and cartesian coordinates.
///
/// All angles are in degrees.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Use the rounded pole constants the galactic conversion was first
    /// written with instead of J2000.
    #[arg(long, global = true)]
    legacy_poles: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Equatorial (RA/DEC) to galactic (l/b).
    EqToGal {
        #[arg(allow_negative_numbers = true)]
        ra: f64,
        #[arg(allow_negative_numbers = true)]
        dec: f64,
    },

    /// Galactic (l/b) to equatorial (RA/DEC).
    GalToEq {
        #[arg(allow_negative_numbers = true)]
        l: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Equatorial (RA/DEC) to a point on a sphere.
    Cartesian {
        #[arg(allow_negative_numbers = true)]
        ra: f64,
        #[arg(allow_negative_numbers = true)]
        dec: f64,

        #[arg(long, default_value = "1.0")]
        radius: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Converted {
    Galactic(Galactic),
    Equatorial(Equatorial),
    Cartesian([f64; 3]),
}

impl Command {
    pub fn convert(&self, poles: &PoleConstants) -> Converted {
        match *self {
            Self::EqToGal { ra, dec } => {
                Converted::Galactic(equatorial_to_galactic_with(Equatorial::new(ra, dec), poles))
            }
            Self::GalToEq { l, b } => {
                Converted::Equatorial(galactic_to_equatorial_with(Galactic::new(l, b), poles))
            }
            Self::Cartesian { ra, dec, radius } => {
                Converted::Cartesian(Equatorial::new(ra, dec).to_cartesian(radius).coords.into())
            }
        }
    }
}

impl Args {
    pub fn poles(&self) -> PoleConstants {
        if self.legacy_poles {
            PoleConstants::LEGACY
        }
        else {
            PoleConstants::J2000
        }
    }

    pub fn run(self) -> Result<(), Error> {
        let poles = self.poles();
        tracing::debug!(?poles, command = ?self.command, "converting");

        match self.command.convert(&poles) {
            Converted::Galactic(Galactic { l, b }) => println!("l = {l:.6}, b = {b:.6}"),
            Converted::Equatorial(Equatorial { ra, dec }) => {
                println!("ra = {ra:.6}, dec = {dec:.6}")
            }
            Converted::Cartesian([x, y, z]) => println!("x = {x:.6}, y = {y:.6}, z = {z:.6}"),
        }

        Ok(())
    }
}
