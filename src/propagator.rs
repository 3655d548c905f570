//! # Per-frame propagation
//!
//! [`Propagator::update`] advances every body of a simulation by one frame.
//! Each body is advanced according to the mode it was built with:
//!
//! * **Analytic** bodies are placed exactly with [`kepler::solve`] at the
//!   absolute frame time, so no error accumulates across frames.
//! * **Numeric** bodies are integrated with symplectic Euler substeps under
//!   the gravity of the primary (the first body of the slice, which itself is
//!   never integrated).
//!
//! Analytic bodies are updated first, so numeric bodies always feel the
//! primary at its position for the current frame.

use nalgebra::Point2;

use crate::{
    body::{Body, Propagation},
    config::{IntegrationConfig, ScaleConfig, SimulationConfig},
    constants::UnixMillis,
    gravity::GravityField,
    kepler,
    orrery_errors::OrreryError,
    trail::TrailRecorder,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagator {
    scale: ScaleConfig,
    integration: IntegrationConfig,
    gravity: GravityField,
    trail: TrailRecorder,
}

impl Propagator {
    /// Build a propagator from `config`, validating it first.
    ///
    /// The gravitational parameter of the primary is derived once from the
    /// scale, see [`ScaleConfig::scaled_gm`].
    ///
    /// Errors
    /// ----------
    /// * [`OrreryError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: &SimulationConfig) -> Result<Self, OrreryError> {
        config.validate()?;
        Ok(Self {
            scale: config.scale,
            integration: config.integration,
            gravity: GravityField::from_scale(&config.scale),
            trail: TrailRecorder::new(&config.trail),
        })
    }

    /// Replace the gravity of the primary.
    pub fn with_gravity(mut self, gravity: GravityField) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn scale(&self) -> &ScaleConfig {
        &self.scale
    }

    pub fn gravity(&self) -> &GravityField {
        &self.gravity
    }

    /// Advance all bodies to `simulated_time`.
    ///
    /// Arguments
    /// -----------------
    /// * `bodies`: the whole simulation; the first entry is the primary.
    /// * `simulated_time`: absolute time of the frame (Unix ms), used by analytic bodies.
    /// * `dt`: elapsed time since the previous frame (seconds), used by numeric bodies.
    ///   May be negative; zero leaves numeric bodies and all trails untouched.
    ///
    /// Errors
    /// ----------
    /// * Any error of [`kepler::solve`]. Bodies built through
    ///   [`Body::from_elements`] have already been solved once and do not fail here.
    pub fn update(
        &self,
        bodies: &mut [Body],
        simulated_time: UnixMillis,
        dt: f64,
    ) -> Result<(), OrreryError> {
        for body in bodies.iter_mut() {
            if let Propagation::Analytic(elements) = *body.propagation() {
                let state = kepler::solve(&elements, simulated_time)?;
                body.set_state_from_au(&state, &self.scale);
                if dt > 0.0 {
                    self.trail.append(body);
                }
            }
        }

        let substeps = self.integration.substeps_for(dt);

        match bodies.split_first_mut() {
            Some((primary, others)) if substeps > 0 => {
                let primary = primary.position();
                let h = dt / substeps as f64;
                for body in others.iter_mut().filter(|b| !b.is_analytic()) {
                    if body.position() == primary {
                        tracing::warn!(
                            body = body.name(),
                            "numeric body sits on the primary, no gravity applied"
                        );
                    }
                    self.integrate(body, &primary, h, substeps);
                }
            }
            _ => {}
        }

        tracing::trace!(
            simulated_time,
            dt,
            substeps,
            bodies = bodies.len(),
            "frame propagated"
        );
        Ok(())
    }

    /// Symplectic Euler: velocity first, then position with the new velocity.
    fn integrate(&self, body: &mut Body, primary: &Point2<f64>, h: f64, substeps: usize) {
        for _ in 0..substeps {
            let mut position = body.position();
            let mut velocity = body.velocity();

            velocity += self.gravity.acceleration_toward(primary, &position) * h;
            position += velocity * h;

            body.set_kinematics(position, velocity);
            self.trail.append(body);
        }
    }
}
