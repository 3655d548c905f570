//! Central-body gravity for the numeric fallback integrator.

use nalgebra::{Point2, Vector2};

use crate::config::ScaleConfig;

/// Point-mass gravity of a single fixed primary.
///
/// `gm` is a pre-scaled gravitational parameter in simulation units
/// (sim³/s²); it is not derived from the bodies' masses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub gm: f64,
}

impl GravityField {
    pub fn new(gm: f64) -> Self {
        Self { gm }
    }

    /// Solar gravity expressed in the simulation units of `scale`.
    pub fn from_scale(scale: &ScaleConfig) -> Self {
        Self::new(scale.scaled_gm())
    }

    /// Acceleration of a body at `body` due to a primary at `primary`.
    ///
    /// The result has magnitude `GM/r²` and points from the body to the
    /// primary. Coincident positions give a zero vector.
    pub fn acceleration_toward(&self, primary: &Point2<f64>, body: &Point2<f64>) -> Vector2<f64> {
        let separation = primary - body;
        let r2 = separation.norm_squared();
        if r2 == 0.0 {
            return Vector2::zeros();
        }
        let r = r2.sqrt();
        separation * (self.gm / (r2 * r))
    }
}
