//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **conversion factors**,
//! **numerical tolerances** and **common type aliases** used throughout the
//! crate.
//!
//! ## Overview
//!
//! - Gaussian gravitational constant and its square (heliocentric `μ` in AU³/day²)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds ↔ milliseconds, AU ↔ km)
//! - Default scale and integration parameters used by [`crate::config`]
//! - Tolerances and iteration caps of the Kepler root finders
//!
//! The defaults defined here are the single source for the values injected by
//! [`SimulationConfig::default`](crate::config::SimulationConfig); components
//! never read them directly once a configuration has been built.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gaussian gravitational constant k (AU^(3/2) / day)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// k², heliocentric gravitational parameter in AU³/day²
pub const GAUSS_GRAV_SQUARED: f64 = GAUSS_GRAV * GAUSS_GRAV;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of milliseconds in a day
pub const MS_PER_DAY: f64 = SECONDS_PER_DAY * 1000.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00 UTC)
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// Epochs with a magnitude below this value are read as Julian Dates,
/// anything larger as Unix milliseconds.
pub const JD_EPOCH_THRESHOLD: f64 = 1e11;

// -------------------------------------------------------------------------------------------------
// Default simulation scale and integration parameters
// -------------------------------------------------------------------------------------------------

/// Revision of the scale constants below; bump when any of them changes.
pub const SCALE_VERSION: u32 = 1;

/// Simulation length units per AU
pub const AU_TO_SIM: f64 = 215.0;

/// Largest numeric substep, in simulation seconds
pub const MAX_SUBSTEP: f64 = 0.01;

/// Cap on numeric substeps per frame
pub const MAX_SUBSTEPS: usize = 100;

/// Default number of points kept in a trail
pub const TRAIL_MAX_LENGTH: usize = 1000;

/// Trail points are rounded to this precision (simulation units)
pub const TRAIL_PRECISION: f64 = 1e-6;

// -------------------------------------------------------------------------------------------------
// Root finding
// -------------------------------------------------------------------------------------------------

/// Eccentricities closer than this to 1 are treated as parabolic.
pub const PARABOLIC_TOLERANCE: f64 = 1e-12;

/// Convergence threshold on the Newton correction for both conic branches
pub const KEPLER_TOLERANCE: f64 = 1e-14;

/// Iteration cap of the elliptic Newton–Raphson solver
pub const ELLIPTIC_MAX_ITER: usize = 200;

/// Iteration cap of the hyperbolic Newton–Raphson solver
pub const HYPERBOLIC_MAX_ITER: usize = 300;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Absolute instant as milliseconds since the Unix epoch
pub type UnixMillis = f64;
/// Julian Date (days)
pub type JulianDate = f64;
