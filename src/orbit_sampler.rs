//! # Orbit path sampling
//!
//! [`OrbitSampler`] turns an element set into the polyline a renderer draws
//! for a body's orbit. The path is the **shape** of the conic, sampled at the
//! element epoch, not a time series:
//!
//! * **Elliptic** orbits are sampled uniformly in mean anomaly over a full
//!   revolution, both ends included, so the first and last points coincide
//!   and the loop is closed.
//! * **Hyperbolic** orbits are sampled uniformly in true anomaly between the
//!   asymptotes `±(acos(−1/e) − ε)`, giving an open arc.
//!
//! Sample density adapts to the size and eccentricity of the orbit and is
//! capped (see [`OrbitSampler::sample_count`]).

use nalgebra::Point2;

use crate::{
    config::ScaleConfig,
    constants::RADEG,
    kepler,
    orbital_elements::{Conic, OrbitalElements},
    orrery_errors::OrreryError,
};

/// Base number of samples of a small, near-circular orbit (one per degree).
const BASE_SAMPLES: f64 = 360.0;

/// Hard cap on the adaptive sample count.
const MAX_SAMPLES: usize = 5000;

/// Bounds on the number of samples of a hyperbolic arc.
const HYPERBOLIC_MIN_SAMPLES: usize = 200;
const HYPERBOLIC_MAX_SAMPLES: usize = 2000;

/// Margin kept between the sampled true anomalies and the asymptotes (radians).
const ASYMPTOTE_MARGIN: f64 = 1e-4;

/// Keeps `tanh(H/2)` strictly inside (−1, 1).
const TANH_LIMIT: f64 = 1.0 - 1e-12;

/// Largest true anomaly sampled on a hyperbolic orbit, `acos(−1/e) − ε`.
pub fn hyperbolic_true_anomaly_limit(e: f64) -> f64 {
    (-1.0 / e).acos() - ASYMPTOTE_MARGIN
}

/// Hyperbolic mean anomaly `M = e·sinh(H) − H` of the true anomaly `nu`.
///
/// `H` is obtained from `tanh(H/2) = sqrt((e−1)/(e+1))·tan(ν/2)`; the right
/// hand side is clamped inside (−1, 1) so that `atanh` stays finite.
pub fn hyperbolic_mean_anomaly(e: f64, nu: f64) -> f64 {
    let k = ((e - 1.0) / (e + 1.0)).sqrt();
    let tanh_half_h = (k * (nu / 2.0).tan()).clamp(-TANH_LIMIT, TANH_LIMIT);
    let h = 2.0 * tanh_half_h.atanh();
    e * h.sinh() - h
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSampler {
    scale: ScaleConfig,
}

impl OrbitSampler {
    pub fn new(scale: ScaleConfig) -> Self {
        Self { scale }
    }

    /// Adaptive number of samples:
    /// `min(360 · max(1, a/5) · max(1, 10e), 5000)`.
    pub fn sample_count(elements: &OrbitalElements) -> usize {
        let size_factor = f64::max(1.0, elements.semi_major_axis / 5.0);
        let shape_factor = f64::max(1.0, elements.eccentricity * 10.0);
        let count = (BASE_SAMPLES * size_factor * shape_factor).round() as usize;
        count.min(MAX_SAMPLES)
    }

    /// Compute the orbit path of `elements` in simulation units.
    ///
    /// Return
    /// ----------
    /// * The ordered sequence of planar points; closed for ellipses, open for hyperbolas.
    ///
    /// Errors
    /// ----------
    /// * Any error of [`kepler::solve`] (parabolic or degenerate elements).
    pub fn compute_orbit_points(
        &self,
        elements: &OrbitalElements,
    ) -> Result<Vec<Point2<f64>>, OrreryError> {
        let count = Self::sample_count(elements);
        match elements.conic() {
            Conic::Elliptic => self.elliptic_points(elements, count),
            Conic::Hyperbolic => self.hyperbolic_points(
                elements,
                count.clamp(HYPERBOLIC_MIN_SAMPLES, HYPERBOLIC_MAX_SAMPLES),
            ),
        }
    }

    fn elliptic_points(
        &self,
        elements: &OrbitalElements,
        count: usize,
    ) -> Result<Vec<Point2<f64>>, OrreryError> {
        let last = (count - 1) as f64;
        (0..count)
            .map(|i| self.point_at(elements, 360.0 * i as f64 / last))
            .collect()
    }

    fn hyperbolic_points(
        &self,
        elements: &OrbitalElements,
        count: usize,
    ) -> Result<Vec<Point2<f64>>, OrreryError> {
        let e = elements.eccentricity;
        let nu_max = hyperbolic_true_anomaly_limit(e);
        let last = (count - 1) as f64;
        (0..count)
            .map(|i| {
                let nu = -nu_max + 2.0 * nu_max * i as f64 / last;
                self.point_at(elements, hyperbolic_mean_anomaly(e, nu) / RADEG)
            })
            .collect()
    }

    /// Position at the epoch of `elements` with the mean anomaly replaced by `mean_anomaly_deg`.
    fn point_at(
        &self,
        elements: &OrbitalElements,
        mean_anomaly_deg: f64,
    ) -> Result<Point2<f64>, OrreryError> {
        let sample = OrbitalElements {
            mean_anomaly: mean_anomaly_deg,
            ..*elements
        };
        let state = kepler::solve(&sample, sample.epoch_ms())?;
        Ok(Point2::from(
            state.planar_position().map(|c| self.scale.to_sim_length(c)),
        ))
    }
}
