//! # Simulation configuration
//!
//! Plain, `serde`-deserializable configuration values shared by every
//! component of the propagation engine:
//!
//! - [`ScaleConfig`]       – versioned unit scale (AU to simulation units, km, day length)
//! - [`IntegrationConfig`] – substep size and per-frame substep cap of numeric bodies
//! - [`TrailConfig`]       – bounded trail length and rounding precision
//! - [`SimulationConfig`]  – top-level wrapper handed to
//!   [`Propagator`](crate::propagator::Propagator)
//!
//! Every field has a default taken from [`crate::constants`], so a partial
//! document only needs to override what differs:
//!
//! ```yaml
//! scale:
//!   version: 1
//!   au_to_sim: 215.0
//! integration:
//!   max_substep: 0.01
//!   max_substeps: 100
//! trail:
//!   max_length: 1000
//! ```
//!
//! Loading the document from disk is left to the caller; this module only
//! defines the types and their validation.

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        AU, AU_TO_SIM, GAUSS_GRAV_SQUARED, MAX_SUBSTEP, MAX_SUBSTEPS, SCALE_VERSION,
        SECONDS_PER_DAY, TRAIL_MAX_LENGTH, TRAIL_PRECISION,
    },
    orrery_errors::OrreryError,
};

/// Unit scale between the astronomical frame (AU, AU/day, km) and the
/// simulation frame (simulation units, simulation units per second).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Revision of this scale; only [`SCALE_VERSION`] validates.
    pub version: u32,
    /// Simulation length units per AU.
    pub au_to_sim: f64,
    /// Kilometers per AU.
    pub km_per_au: f64,
    /// Seconds per day.
    pub seconds_per_day: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            version: SCALE_VERSION,
            au_to_sim: AU_TO_SIM,
            km_per_au: AU,
            seconds_per_day: SECONDS_PER_DAY,
        }
    }
}

impl ScaleConfig {
    pub fn validate(&self) -> Result<(), OrreryError> {
        if self.version != SCALE_VERSION {
            return Err(OrreryError::InvalidConfig(format!(
                "unsupported scale.version {}, expected {SCALE_VERSION}",
                self.version
            )));
        }
        for (name, value) in [
            ("au_to_sim", self.au_to_sim),
            ("km_per_au", self.km_per_au),
            ("seconds_per_day", self.seconds_per_day),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OrreryError::InvalidConfig(format!(
                    "scale.{name} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// AU → simulation length units.
    pub fn to_sim_length(&self, au: f64) -> f64 {
        au * self.au_to_sim
    }

    /// AU/day → simulation units per second.
    pub fn to_sim_velocity(&self, au_per_day: f64) -> f64 {
        au_per_day / self.seconds_per_day * self.au_to_sim
    }

    /// Kilometers → simulation length units.
    pub fn km_to_sim(&self, km: f64) -> f64 {
        km / self.km_per_au * self.au_to_sim
    }

    /// Heliocentric gravitational parameter expressed in simulation units
    /// (sim³/s²), i.e. `k² · au_to_sim³ / seconds_per_day²`.
    ///
    /// With the default scale this is ≈ 3.94e-7.
    pub fn scaled_gm(&self) -> f64 {
        GAUSS_GRAV_SQUARED * self.au_to_sim.powi(3) / self.seconds_per_day.powi(2)
    }
}

/// Fixed sub-stepping of the numeric fallback integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Largest allowed substep (simulation seconds).
    pub max_substep: f64,
    /// Upper bound on substeps per frame; large frames get coarser substeps.
    pub max_substeps: usize,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            max_substep: MAX_SUBSTEP,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl IntegrationConfig {
    pub fn validate(&self) -> Result<(), OrreryError> {
        if !self.max_substep.is_finite() || self.max_substep <= 0.0 {
            return Err(OrreryError::InvalidConfig(format!(
                "integration.max_substep must be a positive finite number, got {}",
                self.max_substep
            )));
        }
        if self.max_substeps == 0 {
            return Err(OrreryError::InvalidConfig(
                "integration.max_substeps must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Number of substeps used for a frame of length `dt`.
    ///
    /// Returns `0` for an empty or non-finite frame.
    pub fn substeps_for(&self, dt: f64) -> usize {
        if !dt.is_finite() || dt == 0.0 {
            return 0;
        }
        let wanted = (dt.abs() / self.max_substep).ceil() as usize;
        wanted.clamp(1, self.max_substeps)
    }
}

/// Bounded trail recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub max_length: usize,
    pub precision: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_length: TRAIL_MAX_LENGTH,
            precision: TRAIL_PRECISION,
        }
    }
}

impl TrailConfig {
    pub fn validate(&self) -> Result<(), OrreryError> {
        if self.max_length == 0 {
            return Err(OrreryError::InvalidConfig(
                "trail.max_length must be at least 1".into(),
            ));
        }
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(OrreryError::InvalidConfig(format!(
                "trail.precision must be a positive finite number, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}

/// Top-level configuration of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub scale: ScaleConfig,
    pub integration: IntegrationConfig,
    pub trail: TrailConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), OrreryError> {
        self.scale.validate()?;
        self.integration.validate()?;
        self.trail.validate()
    }
}
