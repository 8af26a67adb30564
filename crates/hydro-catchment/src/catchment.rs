use std::collections::BTreeMap;

use hydro_core::errors::{ErrorInfo, HydroError};
use tracing::debug;

use crate::zone::Zone;

/// Ordered collection of zones plus the manager assigned to each zone name.
///
/// Construction performs no validation. Each call to
/// [`Catchment::run_timestep`] resolves managers lazily and stops at the
/// first zone that has none.
#[derive(Debug, Clone)]
pub struct Catchment<Z: Zone> {
    zones: Vec<Z>,
    managers: BTreeMap<String, Z::Manager>,
}

impl<Z: Zone> Catchment<Z> {
    /// Creates a catchment from zones in iteration order and a name to manager mapping.
    pub fn new(zones: Vec<Z>, managers: BTreeMap<String, Z::Manager>) -> Self {
        Self { zones, managers }
    }

    /// Zones in construction order.
    pub fn zones(&self) -> &[Z] {
        &self.zones
    }

    /// Mutable access to the zones, preserving their order.
    pub fn zones_mut(&mut self) -> &mut [Z] {
        &mut self.zones
    }

    /// All registered managers keyed by zone name.
    pub fn managers(&self) -> &BTreeMap<String, Z::Manager> {
        &self.managers
    }

    /// Manager registered for `name`, if any.
    pub fn manager(&self, name: &str) -> Option<&Z::Manager> {
        self.managers.get(name)
    }

    /// Names of zones without a manager, in zone order.
    pub fn missing_managers(&self) -> Vec<&str> {
        self.zones
            .iter()
            .map(|zone| zone.name())
            .filter(|name| !self.managers.contains_key(*name))
            .collect()
    }

    /// Runs one step across all zones in construction order.
    ///
    /// Returns [`HydroError::Lookup`] as soon as a zone has no manager; the
    /// zones after it are not stepped. Zones stepped before the failure keep
    /// whatever state their update produced.
    pub fn run_timestep(&mut self, dt: Z::TimeDelta) -> Result<(), HydroError> {
        for (position, zone) in self.zones.iter_mut().enumerate() {
            let manager = self.managers.get_mut(zone.name()).ok_or_else(|| {
                HydroError::Lookup(
                    ErrorInfo::new(
                        "catchment.missing_manager",
                        format!("no manager registered for zone '{}'", zone.name()),
                    )
                    .with_context("zone", zone.name())
                    .with_context("position", position.to_string()),
                )
            })?;
            debug!(zone = zone.name(), position, "stepping zone");
            zone.run_timestep(manager, dt)?;
        }
        Ok(())
    }
}
