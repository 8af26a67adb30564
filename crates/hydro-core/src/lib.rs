#![deny(missing_docs)]
#![doc = "Shared error taxonomy, seeding policy and canonical serde helpers for the catchment simulation crates."]

pub mod errors;
pub mod rng;
pub mod serde;

pub use errors::{ErrorInfo, HydroError};
pub use rng::{derive_substream_seed, RngHandle};
pub use crate::serde::{from_json_slice, to_canonical_json_bytes};
