pub mod body;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod gravity;
pub mod kepler;
pub mod orbit_sampler;
pub mod orbital_elements;
pub mod orrery_errors;
pub mod propagator;
pub mod time;
pub mod trail;
