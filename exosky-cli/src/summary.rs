use exosky_protocol::model::{
    body::BodyRecord,
    star::StarRecord,
};
use exosky_ui::sky::point_cloud::{
    magnitude_to_size,
    StarStyle,
};
use itertools::Itertools;
use tabled::{
    settings::Style,
    Table,
    Tabled,
};

#[derive(Clone, Debug, PartialEq, Tabled)]
pub struct Row {
    #[tabled(rename = "Property")]
    pub property: &'static str,

    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    rows: Vec<Row>,
}

impl Summary {
    pub fn push(&mut self, property: &'static str, value: impl ToString) {
        self.rows.push(Row {
            property,
            value: value.to_string(),
        });
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.property == property)
            .map(|row| row.value.as_str())
    }

    pub fn table(&self) -> String {
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }

    pub fn from_stars(stars: &[StarRecord], style: &StarStyle) -> Self {
        let mut summary = Self::default();
        summary.push("Stars", stars.len());
        summary.push(
            "Named",
            stars
                .iter()
                .filter(|star| star.name != StarRecord::placeholder_name(star.index))
                .count(),
        );
        summary.push("RA", format_range(stars.iter().map(|star| star.ra)));
        summary.push("DEC", format_range(stars.iter().map(|star| star.dec)));
        summary.push("Vmag", format_range(stars.iter().map(|star| star.vmag)));
        summary.push(
            "Point size",
            format_range(
                stars
                    .iter()
                    .map(|star| magnitude_to_size(star.vmag as f32, style) as f64),
            ),
        );
        summary
    }

    pub fn from_bodies(bodies: &[BodyRecord]) -> Self {
        let mut summary = Self::default();
        summary.push("Bodies", bodies.len());
        summary.push(
            "x",
            format_range(bodies.iter().map(|body| body.position.x as f64)),
        );
        summary.push(
            "y",
            format_range(bodies.iter().map(|body| body.position.y as f64)),
        );
        summary.push(
            "z",
            format_range(bodies.iter().map(|body| body.position.z as f64)),
        );
        summary.push(
            "Max distance",
            bodies
                .iter()
                .map(|body| body.position.coords.norm() as f64)
                .max_by(f64::total_cmp)
                .map(|distance| format!("{distance:.3}"))
                .unwrap_or_else(|| "-".to_owned()),
        );
        summary
    }
}

fn format_range(values: impl Iterator<Item = f64>) -> String {
    match values.minmax().into_option() {
        Some((min, max)) => format!("{min:.3} .. {max:.3}"),
        None => "-".to_owned(),
    }
}
