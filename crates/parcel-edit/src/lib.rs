//! Parcel block operations and the in-memory edit map.
#![forbid(unsafe_code)]

mod ops;
mod store;

pub use ops::{OwnerMarker, ParcelOps};
pub use store::{BlockSink, EditMap};
