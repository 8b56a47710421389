pub mod error;
pub mod logging;
pub mod normalization;

pub use error::*;
pub use normalization::{extract_collection, extract_first_array, extract_keyed};
