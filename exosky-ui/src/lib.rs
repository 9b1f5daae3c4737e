pub mod app;
pub mod error;
pub mod graphics;
pub mod input;
pub mod sky;

pub use crate::{
    app::App,
    error::Error,
};
