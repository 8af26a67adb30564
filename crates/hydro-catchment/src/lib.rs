#![deny(missing_docs)]
#![doc = "Catchment container that advances every zone by one timestep using the zone's manager."]

mod catchment;
mod zone;

pub use catchment::Catchment;
pub use zone::Zone;
