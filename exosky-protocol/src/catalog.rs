//! Columnar catalog files.
//!
//! The catalogs are column-oriented JSON tables: every column is an object
//! mapping the stringified row index to the cell value, e.g.
//!
//! ```json
//! { "RA": { "0": 101.28, "1": 95.98 }, "DEC": { "0": -16.71, "1": -52.69 }, "Vmag": { "0": -1.46, "1": -0.74 } }
//! ```
//!
//! Rows are enumerated in numeric key order of the leading column (`RA` or
//! `x`). A row missing from another coordinate column is skipped; missing
//! names and magnitudes fall back to placeholders.

use std::collections::BTreeMap;

use nalgebra::Point3;
use serde::{
    Deserialize,
    Serialize,
};

use crate::model::{
    body::{
        BodyKind,
        BodyRecord,
    },
    star::StarRecord,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not decode catalog")]
    Json(#[from] serde_json::Error),
}

/// One column of a catalog, keyed by row index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column<T>(pub BTreeMap<u32, T>);

impl<T> Default for Column<T> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<T> Column<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&T> {
        self.0.get(&index)
    }

    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    pub fn insert(&mut self, index: u32, value: T) {
        self.0.insert(index, value);
    }
}

/// Cell of an optional column. Per-row gaps are written as `null`.
fn optional_cell<T: Clone>(column: Option<&Column<Option<T>>>, index: u32) -> Option<T> {
    column?.get(index)?.clone()
}

/// Sky catalog in equatorial coordinates: `{ RA, DEC, Vmag }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StarCatalog {
    #[serde(rename = "RA")]
    pub ra: Column<f64>,

    #[serde(rename = "DEC")]
    pub dec: Column<f64>,

    #[serde(rename = "Vmag", default, skip_serializing_if = "Option::is_none")]
    pub vmag: Option<Column<Option<f64>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Column<Option<String>>>,
}

impl StarCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a StarRecord>) -> Self {
        let mut catalog = Self {
            vmag: Some(Column::default()),
            ..Default::default()
        };

        for record in records {
            catalog.ra.insert(record.index, record.ra);
            catalog.dec.insert(record.index, record.dec);
            if let Some(vmag) = &mut catalog.vmag {
                vmag.insert(record.index, Some(record.vmag));
            }
        }

        catalog
    }

    pub fn len(&self) -> usize {
        self.ra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra.is_empty()
    }

    pub fn stars(&self) -> Vec<StarRecord> {
        let mut stars = Vec::with_capacity(self.len());

        for (&index, &ra) in &self.ra.0 {
            let Some(dec) = self.dec.get(index)
            else {
                tracing::warn!(index, "star without declination. skipping");
                continue;
            };

            stars.push(StarRecord {
                index,
                ra,
                dec: *dec,
                vmag: optional_cell(self.vmag.as_ref(), index).unwrap_or(0.0),
                name: optional_cell(self.name.as_ref(), index)
                    .unwrap_or_else(|| StarRecord::placeholder_name(index)),
            });
        }

        stars
    }
}

/// Catalog with precomputed positions: `{ x, y, z, name? }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianCatalog {
    pub x: Column<f32>,
    pub y: Column<f32>,
    pub z: Column<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Column<Option<String>>>,
}

impl CartesianCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn bodies(&self, kind: BodyKind) -> Vec<BodyRecord> {
        let mut bodies = Vec::with_capacity(self.len());

        for index in self.x.keys() {
            let (Some(x), Some(y), Some(z)) =
                (self.x.get(index), self.y.get(index), self.z.get(index))
            else {
                tracing::warn!(index, ?kind, "body with incomplete position. skipping");
                continue;
            };

            bodies.push(BodyRecord {
                index,
                kind,
                position: Point3::new(*x, *y, *z),
                name: optional_cell(self.name.as_ref(), index)
                    .unwrap_or_else(|| kind.placeholder_name(index)),
            });
        }

        bodies
    }

    pub fn names(&self, kind: BodyKind) -> Vec<String> {
        self.bodies(kind).into_iter().map(|body| body.name).collect()
    }
}
