//! # Keplerian orbital elements
//!
//! This module defines [`OrbitalElements`], the classical element set
//! `(a, e, i, Ω, ω, M)` at an epoch, and [`ElementRecord`], the flat record
//! handed over by element-table loaders.
//!
//! ## Units
//!
//! - Lengths: **AU** (`a > 0` for ellipses, `a < 0` for hyperbolas)
//! - Angles: **degrees**
//! - Epoch: **Unix milliseconds** or **Julian Date**, auto-detected by
//!   [`normalize_epoch`](crate::time::normalize_epoch)
//!
//! ## Domain
//!
//! Both closed (`e < 1`) and open (`e > 1`) conics are supported. Parabolic
//! orbits (`|e − 1| < 1e-12`) have no finite semi-major axis and are rejected
//! by [`OrbitalElements::validate`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    constants::{
        Degree, Kilogram, Kilometer, UnixMillis, DPI, GAUSS_GRAV_SQUARED, PARABOLIC_TOLERANCE,
    },
    orrery_errors::OrreryError,
    time::normalize_epoch,
};

/// Branch of the conic described by an element set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conic {
    Elliptic,
    Hyperbolic,
}

/// Keplerian orbital elements (osculating, two-body, heliocentric).
///
/// Units
/// -----
/// * `reference_epoch`: Unix ms or Julian Date (see [`normalize_epoch`]).
/// * `semi_major_axis`: AU, negative for hyperbolic orbits.
/// * `eccentricity`: unitless.
/// * `inclination`, `ascending_node_longitude`, `periapsis_argument`,
///   `mean_anomaly`: degrees.
///
/// For hyperbolic orbits `mean_anomaly` is the hyperbolic mean anomaly
/// `M = e·sinh(H) − H` at the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub reference_epoch: f64,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node_longitude: Degree,
    pub periapsis_argument: Degree,
    pub mean_anomaly: Degree,
}

impl OrbitalElements {
    /// Epoch on the propagator's absolute time axis (Unix ms).
    pub fn epoch_ms(&self) -> UnixMillis {
        normalize_epoch(self.reference_epoch)
    }

    pub fn conic(&self) -> Conic {
        if self.eccentricity < 1.0 {
            Conic::Elliptic
        } else {
            Conic::Hyperbolic
        }
    }

    pub fn is_parabolic(&self) -> bool {
        (self.eccentricity - 1.0).abs() < PARABOLIC_TOLERANCE
    }

    /// Mean motion `n = sqrt(μ / |a|³)` in rad/day.
    pub fn mean_motion(&self) -> f64 {
        (GAUSS_GRAV_SQUARED / self.semi_major_axis.abs().powi(3)).sqrt()
    }

    /// Orbital period in days, `None` for open orbits.
    pub fn period_days(&self) -> Option<f64> {
        match self.conic() {
            Conic::Elliptic => Some(DPI / self.mean_motion()),
            Conic::Hyperbolic => None,
        }
    }

    /// Semi-latus rectum `p` (AU): `a(1−e²)` for ellipses, `|a|(e²−1)` for hyperbolas.
    pub fn semi_latus_rectum(&self) -> f64 {
        let e = self.eccentricity;
        match self.conic() {
            Conic::Elliptic => self.semi_major_axis * (1.0 - e * e),
            Conic::Hyperbolic => self.semi_major_axis.abs() * (e * e - 1.0),
        }
    }

    /// Check the element set before it reaches the solver.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::InvalidElements`] – non-finite field or negative eccentricity.
    /// * [`OrreryError::ParabolicUnsupported`] – `|e − 1| < 1e-12`.
    /// * [`OrreryError::InvalidGeometry`] – `p ≤ 0` (e.g. an ellipse with `a ≤ 0`).
    pub fn validate(&self) -> Result<(), OrreryError> {
        let fields = [
            ("reference_epoch", self.reference_epoch),
            ("semi_major_axis", self.semi_major_axis),
            ("eccentricity", self.eccentricity),
            ("inclination", self.inclination),
            ("ascending_node_longitude", self.ascending_node_longitude),
            ("periapsis_argument", self.periapsis_argument),
            ("mean_anomaly", self.mean_anomaly),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrreryError::InvalidElements(format!(
                "{name} is not finite ({value})"
            )));
        }
        if self.eccentricity < 0.0 {
            return Err(OrreryError::InvalidElements(format!(
                "negative eccentricity ({})",
                self.eccentricity
            )));
        }
        if self.is_parabolic() {
            return Err(OrreryError::ParabolicUnsupported {
                eccentricity: self.eccentricity,
            });
        }
        let p = self.semi_latus_rectum();
        if p <= 0.0 {
            return Err(OrreryError::InvalidGeometry {
                semi_latus_rectum: p,
            });
        }
        Ok(())
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Keplerian Elements @ epoch (Unix ms): {:.0}",
            self.epoch_ms()
        )?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(f, "  i   (inclination)           = {:.6}°", self.inclination)?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}°",
            self.ascending_node_longitude
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}°",
            self.periapsis_argument
        )?;
        writeln!(f, "  M   (mean anomaly)          = {:.6}°", self.mean_anomaly)
    }
}

/// One row of an element table, as produced by an external loader.
///
/// Column names follow the usual short forms; the Greek spellings are
/// accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub name: String,
    pub a: f64,
    pub e: f64,
    pub i: Degree,
    #[serde(alias = "Ω", alias = "om")]
    pub node: Degree,
    #[serde(alias = "ω", alias = "w")]
    pub peri: Degree,
    #[serde(alias = "M", alias = "ma")]
    pub mean_anomaly: Degree,
    pub epoch: f64,
    /// Physical radius (km)
    pub radius: Kilometer,
    /// Mass (kg)
    pub mass: Kilogram,
}

impl ElementRecord {
    pub fn elements(&self) -> OrbitalElements {
        OrbitalElements {
            reference_epoch: self.epoch,
            semi_major_axis: self.a,
            eccentricity: self.e,
            inclination: self.i,
            ascending_node_longitude: self.node,
            periapsis_argument: self.peri,
            mean_anomaly: self.mean_anomaly,
        }
    }
}
