#![allow(dead_code)]

use approx::assert_relative_eq;
use nalgebra::Vector2;
use orrery::body::Body;
use orrery::config::ScaleConfig;
use orrery::kepler::CartesianState;
use orrery::orbital_elements::OrbitalElements;

/// Assert that a body sits on the scaled heliocentric `expected` state.
pub fn assert_body_on_state(
    body: &Body,
    expected: &CartesianState,
    scale: &ScaleConfig,
    max_relative: f64,
) {
    assert_relative_eq!(
        body.x(),
        scale.to_sim_length(expected.position.x),
        max_relative = max_relative
    );
    assert_relative_eq!(
        body.y(),
        scale.to_sim_length(expected.position.y),
        max_relative = max_relative
    );
    assert_relative_eq!(
        body.vx(),
        scale.to_sim_velocity(expected.velocity.x),
        max_relative = max_relative
    );
    assert_relative_eq!(
        body.vy(),
        scale.to_sim_velocity(expected.velocity.y),
        max_relative = max_relative
    );
}

pub fn assert_elements_close(actual: &OrbitalElements, expected: &OrbitalElements, epsilon: f64) {
    assert_relative_eq!(
        actual.reference_epoch,
        expected.reference_epoch,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.eccentricity,
        expected.eccentricity,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.inclination, expected.inclination, epsilon = epsilon);
    assert_relative_eq!(
        actual.ascending_node_longitude,
        expected.ascending_node_longitude,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.periapsis_argument,
        expected.periapsis_argument,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.mean_anomaly,
        expected.mean_anomaly,
        epsilon = epsilon
    );
}

/// Specific orbital energy `v²/2 − GM/r` of a body around a primary at the origin.
pub fn specific_energy(body: &Body, gm: f64) -> f64 {
    0.5 * body.velocity().norm_squared() - gm / body.position().coords.norm()
}

/// Specific angular momentum `x·vy − y·vx` around the origin.
pub fn angular_momentum(body: &Body) -> f64 {
    let r: Vector2<f64> = body.position().coords;
    r.perp(&body.velocity())
}
