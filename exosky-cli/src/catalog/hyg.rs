use std::{
    fs::File,
    io::{
        BufReader,
        Read,
    },
    path::Path,
};

use color_eyre::eyre::Error;
use exosky_protocol::{
    catalog::{
        Column,
        StarCatalog,
    },
    model::star::StarRecord,
};
use serde::Deserialize;

// see: https://github.com/astronexus/HYG-Database/tree/main/hyg

/// The columns of a HYG row that make it onto the sky. Other columns are
/// ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Record {
    pub id: u32,
    pub proper: Option<String>,
    /// Right ascension in hours.
    pub ra: f64,
    pub dec: f64,
    /// Distance in parsecs. 0 for the sun.
    pub dist: f64,
    pub mag: Option<f64>,
}

pub struct Reader<R: Read> {
    reader: csv::DeserializeRecordsIntoIter<R, Record>,
}

impl Reader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> Reader<R> {
    pub fn from_reader(reader: R) -> Self {
        let reader = csv::Reader::from_reader(reader).into_deserialize();
        Self { reader }
    }

    pub fn read_record(&mut self) -> Result<Option<Record>, Error> {
        self.reader.next().transpose().map_err(Into::into)
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Builds a sky catalog from HYG rows, keyed by HYG id.
///
/// The sun is skipped, and so are stars fainter than `max_magnitude` or
/// without a magnitude.
pub fn to_star_catalog(
    records: impl IntoIterator<Item = Result<Record, Error>>,
    max_magnitude: Option<f64>,
) -> Result<StarCatalog, Error> {
    let mut stars = vec![];
    let mut names = Column::default();
    let mut num_skipped = 0;

    for record in records {
        let record = record?;

        let Some(vmag) = record.mag
        else {
            num_skipped += 1;
            continue;
        };
        if record.dist <= 0.0 || max_magnitude.is_some_and(|max| vmag > max) {
            num_skipped += 1;
            continue;
        }

        names.insert(record.id, record.proper.filter(|name| !name.is_empty()));
        stars.push(StarRecord {
            index: record.id,
            ra: record.ra * 15.0,
            dec: record.dec,
            vmag,
            name: String::new(),
        });
    }

    tracing::info!(num_stars = stars.len(), num_skipped, "converted HYG catalog");

    let mut catalog = StarCatalog::from_records(&stars);
    catalog.name = Some(names);
    Ok(catalog)
}
