//! Material identifiers and the TOML-backed material catalog.
#![forbid(unsafe_code)]

mod material;
mod types;

pub use material::{CatalogError, Material, MaterialCatalog};
pub use types::{Block, MaterialId};
