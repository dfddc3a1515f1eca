//! Parcel grid layout, coordinate mapping, and surface classification.
#![forbid(unsafe_code)]

mod grid;
mod layout;
pub mod options;
mod surface;

/// Side length of one generation batch of columns.
pub const CHUNK_SIZE: usize = 16;

pub use grid::{HomeLocation, ParcelGrid, ParcelId, WorldId};
pub use layout::{GridLayout, LayoutError};
pub use options::GeneratorOptions;
pub use surface::{ColumnProfile, Palette, classify_column};
