use hydro_core::HydroError;

/// Capability contract for a spatial sub-unit of a catchment.
///
/// The hydrology a zone performs is its own business: the catchment only
/// needs a stable name to find the zone's manager and a per-step update.
pub trait Zone {
    /// The decision/policy entity ("farmer") associated with this zone.
    type Manager;
    /// Caller-defined simulation increment, forwarded unchanged.
    type TimeDelta: Copy;

    /// Name used to look up this zone's manager.
    fn name(&self) -> &str;

    /// Advances the zone by `dt` under the supplied manager.
    fn run_timestep(
        &mut self,
        manager: &mut Self::Manager,
        dt: Self::TimeDelta,
    ) -> Result<(), HydroError>;
}
