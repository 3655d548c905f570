//! # Simulated bodies
//!
//! A [`Body`] couples identity and physical attributes with a kinematic state
//! in simulation units and two properties fixed at construction:
//!
//! * its [`Propagation`] mode — **analytic** (Keplerian elements, solved each
//!   frame) or **numeric** (integrated under the primary's gravity),
//! * its [`Track`] — nothing, a write-once static [`Track::Orbit`] path, or a
//!   bounded live [`Track::Trail`]. A body never carries both.
//!
//! The kinematic state can be read by anyone but is written only by the
//! [`Propagator`](crate::propagator::Propagator) inside this crate.
//!
//! Units
//! -----
//! * position: simulation length units (AU × `au_to_sim`)
//! * velocity: simulation units per second
//! * mass: kg, radius: km

use nalgebra::{Point2, Vector2};

use crate::{
    config::ScaleConfig,
    constants::{Kilogram, Kilometer, UnixMillis},
    kepler,
    orbit_sampler::OrbitSampler,
    orbital_elements::{ElementRecord, OrbitalElements},
    orrery_errors::OrreryError,
    trail::Trail,
};

/// How the propagator advances a body. Decided once, at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Propagation {
    /// Exact two-body solution from orbital elements.
    Analytic(OrbitalElements),
    /// Symplectic-Euler integration around the primary.
    Numeric,
}

/// What a renderer draws behind a body.
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    None,
    /// Full orbit path (closed for ellipses, open arc for hyperbolas).
    Orbit(Vec<Point2<f64>>),
    /// Bounded history of past positions.
    Trail(Trail),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    mass: Kilogram,
    radius: Kilometer,
    position: Point2<f64>,
    velocity: Vector2<f64>,
    propagation: Propagation,
    track: Track,
}

impl Body {
    /// Build a numerically integrated body from a simulation-unit state.
    pub fn new(
        name: impl Into<String>,
        mass: Kilogram,
        radius: Kilometer,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            position,
            velocity,
            propagation: Propagation::Numeric,
            track: Track::None,
        }
    }

    /// Build a numerically integrated body from a heliocentric state in AU and AU/day.
    pub fn from_heliocentric(
        name: impl Into<String>,
        mass: Kilogram,
        radius: Kilometer,
        position_au: Vector2<f64>,
        velocity_au_per_day: Vector2<f64>,
        scale: &ScaleConfig,
    ) -> Self {
        Self::new(
            name,
            mass,
            radius,
            Point2::from(position_au.map(|c| scale.to_sim_length(c))),
            velocity_au_per_day.map(|c| scale.to_sim_velocity(c)),
        )
    }

    /// Build an analytically propagated body.
    ///
    /// The elements are validated and solved once at `at_time`, which both
    /// initializes the kinematic state and guarantees that later per-frame
    /// solves cannot fail. The static orbit path is sampled here and never
    /// recomputed.
    ///
    /// Arguments
    /// -----------------
    /// * `elements`: Keplerian elements (AU, degrees, epoch in Unix ms or JD).
    /// * `at_time`: instant of the initial state (Unix ms).
    /// * `scale`: unit scale used for the state and the orbit path.
    ///
    /// Errors
    /// ----------
    /// * Any error of [`OrbitalElements::validate`].
    pub fn from_elements(
        name: impl Into<String>,
        mass: Kilogram,
        radius: Kilometer,
        elements: OrbitalElements,
        at_time: UnixMillis,
        scale: &ScaleConfig,
    ) -> Result<Self, OrreryError> {
        let name = name.into();
        elements.validate()?;

        let state = kepler::solve(&elements, at_time)?;
        let orbit = OrbitSampler::new(*scale).compute_orbit_points(&elements)?;

        tracing::debug!(
            body = %name,
            e = elements.eccentricity,
            orbit_points = orbit.len(),
            "analytic body built"
        );

        let mut body = Self {
            name,
            mass,
            radius,
            position: Point2::origin(),
            velocity: Vector2::zeros(),
            propagation: Propagation::Analytic(elements),
            track: Track::Orbit(orbit),
        };
        body.set_state_from_au(&state, scale);
        Ok(body)
    }

    /// Build an analytic body from an element-table row.
    pub fn from_record(
        record: &ElementRecord,
        at_time: UnixMillis,
        scale: &ScaleConfig,
    ) -> Result<Self, OrreryError> {
        Self::from_elements(
            record.name.as_str(),
            record.mass,
            record.radius,
            record.elements(),
            at_time,
            scale,
        )
    }

    /// Replace the body's track with an empty live trail.
    ///
    /// A static orbit, if any, is dropped.
    pub fn with_trail(mut self) -> Self {
        self.track = Track::Trail(Trail::new());
        self
    }

    /// Drop any orbit or trail.
    pub fn without_track(mut self) -> Self {
        self.track = Track::None;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> Kilogram {
        self.mass
    }

    pub fn radius(&self) -> Kilometer {
        self.radius
    }

    /// Radius in simulation length units.
    pub fn radius_sim(&self, scale: &ScaleConfig) -> f64 {
        scale.km_to_sim(self.radius)
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn vx(&self) -> f64 {
        self.velocity.x
    }

    pub fn vy(&self) -> f64 {
        self.velocity.y
    }

    pub fn propagation(&self) -> &Propagation {
        &self.propagation
    }

    pub fn elements(&self) -> Option<&OrbitalElements> {
        match &self.propagation {
            Propagation::Analytic(elements) => Some(elements),
            Propagation::Numeric => None,
        }
    }

    pub fn is_analytic(&self) -> bool {
        matches!(self.propagation, Propagation::Analytic(_))
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn orbit(&self) -> Option<&[Point2<f64>]> {
        match &self.track {
            Track::Orbit(points) => Some(points),
            _ => None,
        }
    }

    pub fn trail(&self) -> Option<&Trail> {
        match &self.track {
            Track::Trail(trail) => Some(trail),
            _ => None,
        }
    }

    pub(crate) fn trail_mut(&mut self) -> Option<&mut Trail> {
        match &mut self.track {
            Track::Trail(trail) => Some(trail),
            _ => None,
        }
    }

    pub(crate) fn set_kinematics(&mut self, position: Point2<f64>, velocity: Vector2<f64>) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Overwrite the kinematic state from a heliocentric solution in AU and AU/day.
    pub(crate) fn set_state_from_au(
        &mut self,
        state: &kepler::CartesianState,
        scale: &ScaleConfig,
    ) {
        let position = state.planar_position().map(|c| scale.to_sim_length(c));
        let velocity = state.planar_velocity().map(|c| scale.to_sim_velocity(c));
        self.set_kinematics(Point2::from(position), velocity);
    }
}

impl ElementRecord {
    /// Consume the row into an analytic [`Body`], see [`Body::from_elements`].
    pub fn into_body(
        self,
        at_time: UnixMillis,
        scale: &ScaleConfig,
    ) -> Result<Body, OrreryError> {
        let elements = self.elements();
        Body::from_elements(self.name, self.mass, self.radius, elements, at_time, scale)
    }
}
