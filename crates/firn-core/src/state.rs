//! Physical condition of a glacier at a single point in simulated time.

/// Snapshot of the measurable quantities the tick physics evolve.
///
/// Values are stored already clamped: thickness and area never go below
/// zero, stability stays in 0–100. Construct via [`GlacierState::clamped`]
/// so the clamps are applied in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlacierState {
    /// Ice thickness in metres.
    pub thickness: f64,
    /// Surface area in km².
    pub area: f64,
    /// Structural stability, percent.
    pub stability: f64,
}

impl GlacierState {
    /// Build a state from raw values, clamping each into its valid range.
    pub fn clamped(thickness: f64, area: f64, stability: f64) -> Self {
        Self {
            thickness: thickness.max(0.0),
            area: area.max(0.0),
            stability: stability.clamp(0.0, 100.0),
        }
    }

    /// Ice volume in m·km² (divide by 1000 for km³). Always derived from
    /// thickness and area, never stored, so the two can't drift apart.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.thickness * self.area
    }

    /// The glacier has lost all its ice.
    #[inline]
    pub fn melted(&self) -> bool {
        self.thickness <= 0.0 || self.area <= 0.0
    }

    /// The glacier's structure has failed even if ice remains.
    #[inline]
    pub fn collapsed(&self) -> bool {
        self.stability <= 0.0
    }
}
