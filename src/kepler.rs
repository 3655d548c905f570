//! # Two-body propagation of Keplerian elements
//!
//! [`solve`] turns an [`OrbitalElements`] set and an absolute instant into a
//! heliocentric [`CartesianState`] (AU, AU/day). It handles both conic
//! branches:
//!
//! * **elliptic** (`e < 1`): Newton–Raphson on `E − e·sin(E) = M`,
//! * **hyperbolic** (`e > 1`): bracketed Newton–Raphson on `e·sinh(H) − H = M`.
//!
//! Both root finders are bounded ([`ELLIPTIC_MAX_ITER`], [`HYPERBOLIC_MAX_ITER`])
//! and always return their best estimate; reaching the cap is not an error.
//!
//! The perifocal → inertial rotation `Rz(Ω)·Rx(i)·Rz(ω)` is built once per call
//! and its first two columns are shared by the position and velocity
//! transforms.

use nalgebra::{Rotation3, Vector2, Vector3};
use std::f64::consts::PI;

use crate::{
    constants::{
        Radian, UnixMillis, DPI, ELLIPTIC_MAX_ITER, GAUSS_GRAV_SQUARED, HYPERBOLIC_MAX_ITER,
        KEPLER_TOLERANCE, MS_PER_DAY, RADEG,
    },
    orbital_elements::{Conic, OrbitalElements},
    orrery_errors::OrreryError,
};

/// Heliocentric state vector in the inertial frame.
///
/// * `position` in AU
/// * `velocity` in AU/day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl CartesianState {
    /// Position projected on the reference plane.
    pub fn planar_position(&self) -> Vector2<f64> {
        self.position.xy()
    }

    /// Velocity projected on the reference plane.
    pub fn planar_velocity(&self) -> Vector2<f64> {
        self.velocity.xy()
    }
}

/// Return an angle wrapped into [-π, π).
pub fn wrap_to_pi(a: f64) -> f64 {
    (a + PI).rem_euclid(DPI) - PI
}

/// Solve Kepler's equation `E − e·sin(E) = M` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: `M` in radians, expected in [-π, π]
/// * `e`: eccentricity, `0 ≤ e < 1`
///
/// Return
/// ------
/// * the eccentric anomaly `E` (radians). If the correction has not dropped
///   below [`KEPLER_TOLERANCE`] after [`ELLIPTIC_MAX_ITER`] iterations the last
///   iterate is returned.
///
/// Note
/// ----
/// For `e ≥ 0.8` the iteration starts from `±π` on the side of `M`; a
/// start at `+π` for negative `M` makes Newton cycle for some high-eccentricity
/// inputs.
pub fn solve_eccentric_anomaly(mean_anomaly: Radian, e: f64) -> Radian {
    let mut ecc_anom = if e < 0.8 {
        mean_anomaly
    } else {
        PI.copysign(mean_anomaly)
    };

    for _ in 0..ELLIPTIC_MAX_ITER {
        let f = ecc_anom - e * ecc_anom.sin() - mean_anomaly;
        let fp = 1.0 - e * ecc_anom.cos();
        let delta = f / fp;
        ecc_anom -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return ecc_anom;
        }
    }

    tracing::debug!(
        mean_anomaly,
        e,
        ecc_anom,
        "elliptic Kepler solver reached its iteration cap"
    );
    ecc_anom
}

/// Solve the hyperbolic Kepler equation `e·sinh(H) − H = M`.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: hyperbolic mean anomaly `M` (radians, unbounded)
/// * `e`: eccentricity, `e > 1`
///
/// Return
/// ------
/// * the hyperbolic anomaly `H`; best estimate after [`HYPERBOLIC_MAX_ITER`]
///   iterations if the tolerance is not reached.
///
/// Note
/// ----
/// The equation is odd in `H`, so the root is searched for `|M|` inside
/// `[0, min(asinh(|M|/(e−1)), cbrt(6|M|/e))]`. A Newton step that leaves the
/// current bracket is replaced by bisection, which keeps near-parabolic
/// inputs (`e → 1⁺`, where `f'(0) = e − 1` vanishes) finite.
pub fn solve_hyperbolic_anomaly(mean_anomaly: Radian, e: f64) -> Radian {
    if mean_anomaly == 0.0 {
        return 0.0;
    }
    let target = mean_anomaly.abs();

    let mut lo = 0.0;
    let mut hi = f64::min((target / (e - 1.0)).asinh(), (6.0 * target / e).cbrt());
    let mut hyp_anom = (target / e).asinh().max(lo).min(hi);

    for _ in 0..HYPERBOLIC_MAX_ITER {
        let f = e * hyp_anom.sinh() - hyp_anom - target;
        if f == 0.0 {
            return hyp_anom.copysign(mean_anomaly);
        }
        if f < 0.0 {
            lo = hyp_anom;
        } else {
            hi = hyp_anom;
        }

        let fp = e * hyp_anom.cosh() - 1.0;
        let mut next = hyp_anom - f / fp;
        if !(next > lo && next < hi) {
            next = 0.5 * (lo + hi);
        }

        let delta = next - hyp_anom;
        hyp_anom = next;
        if delta.abs() < KEPLER_TOLERANCE {
            return hyp_anom.copysign(mean_anomaly);
        }
    }

    tracing::debug!(
        mean_anomaly,
        e,
        hyp_anom,
        "hyperbolic Kepler solver reached its iteration cap"
    );
    hyp_anom.copysign(mean_anomaly)
}

fn true_anomaly_from_eccentric(ecc_anom: Radian, e: f64) -> Radian {
    let half = ecc_anom / 2.0;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}

fn true_anomaly_from_hyperbolic(hyp_anom: Radian, e: f64) -> Radian {
    let half = hyp_anom / 2.0;
    2.0 * ((e + 1.0).sqrt() * half.sinh()).atan2((e - 1.0).sqrt() * half.cosh())
}

/// Mean anomaly (radians) of `elements` at the absolute instant `at_time`.
///
/// Elliptic mean anomalies are wrapped into [-π, π); hyperbolic ones grow
/// monotonically and are left as is.
pub fn mean_anomaly_at(elements: &OrbitalElements, at_time: UnixMillis) -> Radian {
    let dt_days = (at_time - elements.epoch_ms()) / MS_PER_DAY;
    let mean_anomaly = elements.mean_anomaly * RADEG + elements.mean_motion() * dt_days;
    match elements.conic() {
        Conic::Elliptic => wrap_to_pi(mean_anomaly),
        Conic::Hyperbolic => mean_anomaly,
    }
}

/// Perifocal unit vectors `P` (towards periapsis) and `Q` (90° ahead in the
/// orbital plane) expressed in the inertial frame.
struct PerifocalBasis {
    p_hat: Vector3<f64>,
    q_hat: Vector3<f64>,
}

impl PerifocalBasis {
    fn new(elements: &OrbitalElements) -> Self {
        let rot = Rotation3::from_axis_angle(
            &Vector3::z_axis(),
            elements.ascending_node_longitude * RADEG,
        ) * Rotation3::from_axis_angle(&Vector3::x_axis(), elements.inclination * RADEG)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), elements.periapsis_argument * RADEG);

        let matrix = rot.matrix();
        Self {
            p_hat: matrix.column(0).into_owned(),
            q_hat: matrix.column(1).into_owned(),
        }
    }

    fn apply(&self, x: f64, y: f64) -> Vector3<f64> {
        x * self.p_hat + y * self.q_hat
    }
}

/// Convert Keplerian elements to a Cartesian state at `at_time`.
///
/// Arguments
/// ---------
/// * `elements`: element set; its epoch may be a Julian Date or Unix ms
/// * `at_time`: absolute instant in Unix milliseconds
///
/// Return
/// ------
/// * the heliocentric [`CartesianState`] (AU, AU/day)
///
/// Errors
/// ------
/// * [`OrreryError::ParabolicUnsupported`] if `|e − 1| < 1e-12`
/// * [`OrreryError::InvalidGeometry`] if the semi-latus rectum is not positive
///
/// This is a pure function of its arguments.
pub fn solve(
    elements: &OrbitalElements,
    at_time: UnixMillis,
) -> Result<CartesianState, OrreryError> {
    if elements.is_parabolic() {
        return Err(OrreryError::ParabolicUnsupported {
            eccentricity: elements.eccentricity,
        });
    }

    let e = elements.eccentricity;
    let mean_anomaly = mean_anomaly_at(elements, at_time);

    let true_anomaly = match elements.conic() {
        Conic::Elliptic => true_anomaly_from_eccentric(solve_eccentric_anomaly(mean_anomaly, e), e),
        Conic::Hyperbolic => {
            true_anomaly_from_hyperbolic(solve_hyperbolic_anomaly(mean_anomaly, e), e)
        }
    };

    let p = elements.semi_latus_rectum();
    if p.is_nan() || p <= 0.0 {
        return Err(OrreryError::InvalidGeometry {
            semi_latus_rectum: p,
        });
    }

    let (sin_nu, cos_nu) = true_anomaly.sin_cos();
    let radius = p / (1.0 + e * cos_nu);

    let x_orb = radius * cos_nu;
    let y_orb = radius * sin_nu;

    let vel_factor = (GAUSS_GRAV_SQUARED / p).sqrt();
    let v_radial = vel_factor * e * sin_nu;
    let v_transverse = vel_factor * (1.0 + e * cos_nu);
    let vx_orb = v_radial * cos_nu - v_transverse * sin_nu;
    let vy_orb = v_radial * sin_nu + v_transverse * cos_nu;

    let basis = PerifocalBasis::new(elements);

    Ok(CartesianState {
        position: basis.apply(x_orb, y_orb),
        velocity: basis.apply(vx_orb, vy_orb),
    })
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use crate::constants::GAUSS_GRAV;
    use crate::orbital_elements::orbital_elements_test::circular_unit_orbit;
    use crate::time::julian_date_to_unix_ms;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn j2000_ms() -> UnixMillis {
        julian_date_to_unix_ms(2451545.0)
    }

    fn inclined_ellipse() -> OrbitalElements {
        OrbitalElements {
            reference_epoch: 2451545.0,
            semi_major_axis: 1.8017360713,
            eccentricity: 0.2835591457,
            inclination: 11.6124,
            ascending_node_longitude: 0.4558,
            periapsis_argument: 71.3444,
            mean_anomaly: 25.2414,
        }
    }

    fn hyperbola() -> OrbitalElements {
        OrbitalElements {
            reference_epoch: 2451545.0,
            semi_major_axis: -0.264,
            eccentricity: 6.14,
            inclination: 175.1,
            ascending_node_longitude: 322.2,
            periapsis_argument: 128.0,
            mean_anomaly: -180.0,
        }
    }

    #[test]
    fn test_circular_orbit_closed_form() {
        let state = solve(&circular_unit_orbit(), j2000_ms()).unwrap();
        let n = (GAUSS_GRAV_SQUARED / 1.0_f64.powi(3)).sqrt();

        assert_abs_diff_eq!(state.position, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(state.velocity, Vector3::new(0.0, n, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(n, GAUSS_GRAV, epsilon = 1e-15);
    }

    #[test]
    fn test_circular_orbit_half_period() {
        let elements = circular_unit_orbit();
        let half_period_ms = elements.period_days().unwrap() / 2.0 * MS_PER_DAY;
        let state = solve(&elements, j2000_ms() + half_period_ms).unwrap();

        assert_abs_diff_eq!(state.position, Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_kepler_equation_residual() {
        for ie in 0..=19 {
            let e = ie as f64 * 0.05;
            for im in 0..=72 {
                let m = -PI + im as f64 * DPI / 72.0;
                let ecc_anom = solve_eccentric_anomaly(m, e);
                let residual = ecc_anom - e * ecc_anom.sin() - m;
                assert!(
                    residual.abs() < 1e-10,
                    "e = {e}, M = {m}: residual {residual}"
                );
            }
        }
    }

    #[test]
    fn test_high_eccentricity_negative_mean_anomaly() {
        // Newton started at +π cycles on this input
        let (e, m) = (0.84, (-114.0_f64).to_radians());
        let ecc_anom = solve_eccentric_anomaly(m, e);
        assert_abs_diff_eq!(ecc_anom - e * ecc_anom.sin(), m, epsilon = 1e-12);
        assert!(ecc_anom < 0.0);
    }

    #[test]
    fn test_hyperbolic_equation_residual() {
        for e in [1.01, 1.1, 1.5, 3.0, 10.0] {
            for m in [-1000.0, -50.0, -1.0, -0.01, 0.0, 0.3, 5.0, 200.0, 5000.0] {
                let h = solve_hyperbolic_anomaly(m, e);
                let residual = e * h.sinh() - h - m;
                assert!(
                    residual.abs() <= 1e-10 * f64::max(1.0, m.abs()),
                    "e = {e}, M = {m}: residual {residual}"
                );
            }
        }
    }

    #[test]
    fn test_near_parabolic_hyperbolic_equation() {
        for e in [1.0 + 1e-9, 1.0000001, 1.000001] {
            for m in [-100.0, -1e-3, 1e-4, 1e-3, 0.05 * RADEG, 1.0, 100.0] {
                let h = solve_hyperbolic_anomaly(m, e);
                assert!(h.is_finite(), "e = {e}, M = {m}: H = {h}");
                assert_eq!(h.signum(), m.signum());

                let residual = e * h.sinh() - h - m;
                assert!(
                    residual.abs() <= 1e-10 * f64::max(1.0, m.abs()),
                    "e = {e}, M = {m}: residual {residual}"
                );
            }
        }
        assert_eq!(solve_hyperbolic_anomaly(0.0, 1.0 + 1e-9), 0.0);
    }

    #[test]
    fn test_near_parabolic_solve_is_finite() {
        let elements = OrbitalElements {
            semi_major_axis: -1000.0,
            eccentricity: 1.000001,
            mean_anomaly: 0.05,
            ..circular_unit_orbit()
        };
        for days in [0.0, 30.0, -30.0] {
            let state = solve(&elements, j2000_ms() + days * MS_PER_DAY).unwrap();
            assert!(state.position.iter().all(|c| c.is_finite()));
            assert!(state.velocity.iter().all(|c| c.is_finite()));

            let r = state.position.norm();
            assert_relative_eq!(
                state.velocity.norm_squared(),
                GAUSS_GRAV_SQUARED * (2.0 / r - 1.0 / elements.semi_major_axis),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_parabolic_is_rejected() {
        let mut elements = circular_unit_orbit();
        elements.eccentricity = 1.0;
        assert_eq!(
            solve(&elements, j2000_ms()),
            Err(OrreryError::ParabolicUnsupported { eccentricity: 1.0 })
        );
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        let mut elements = circular_unit_orbit();
        elements.semi_major_axis = -1.0;
        elements.eccentricity = 0.5;
        assert_eq!(
            solve(&elements, j2000_ms()),
            Err(OrreryError::InvalidGeometry {
                semi_latus_rectum: -0.75
            })
        );
    }

    #[test]
    fn test_solve_is_deterministic() {
        let elements = inclined_ellipse();
        let t = j2000_ms() + 123.456 * MS_PER_DAY;
        assert_eq!(solve(&elements, t), solve(&elements, t));

        let hyp = hyperbola();
        assert_eq!(solve(&hyp, t), solve(&hyp, t));
    }

    #[test]
    fn test_epoch_julian_date_and_unix_ms_agree() {
        let jd = inclined_ellipse();
        let ms = OrbitalElements {
            reference_epoch: 946_728_000_000.0,
            ..jd
        };
        let t = j2000_ms() + 42.0 * MS_PER_DAY;

        let a = solve(&jd, t).unwrap();
        let b = solve(&ms, t).unwrap();
        assert_abs_diff_eq!(a.position, b.position, epsilon = 1e-14);
        assert_abs_diff_eq!(a.velocity, b.velocity, epsilon = 1e-14);
    }

    #[test]
    fn test_vis_viva_and_angular_momentum() {
        for elements in [inclined_ellipse(), hyperbola()] {
            for days in [-400.0, -3.0, 0.0, 17.5, 900.0] {
                let state = solve(&elements, j2000_ms() + days * MS_PER_DAY).unwrap();
                let r = state.position.norm();
                let v2 = state.velocity.norm_squared();

                assert_relative_eq!(
                    v2,
                    GAUSS_GRAV_SQUARED * (2.0 / r - 1.0 / elements.semi_major_axis),
                    max_relative = 1e-9
                );

                let h = state.position.cross(&state.velocity);
                assert_relative_eq!(
                    h.norm(),
                    (GAUSS_GRAV_SQUARED * elements.semi_latus_rectum()).sqrt(),
                    max_relative = 1e-9
                );
                assert_abs_diff_eq!(
                    h.z / h.norm(),
                    (elements.inclination * RADEG).cos(),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_hyperbola_at_periapsis() {
        let mut elements = hyperbola();
        elements.mean_anomaly = 0.0;
        let state = solve(&elements, j2000_ms()).unwrap();

        let q = elements.semi_major_axis.abs() * (elements.eccentricity - 1.0);
        assert_relative_eq!(state.position.norm(), q, max_relative = 1e-12);
        assert_abs_diff_eq!(state.position.dot(&state.velocity), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_hyperbolic_mean_anomaly_is_not_wrapped() {
        let elements = hyperbola();
        let later = j2000_ms() + 3650.0 * MS_PER_DAY;
        let m = mean_anomaly_at(&elements, later);
        assert!(m > PI, "hyperbolic M should keep growing, got {m}");

        let ellipse = inclined_ellipse();
        let m = mean_anomaly_at(&ellipse, later);
        assert!((-PI..PI).contains(&m));
    }

    #[test]
    fn test_angle_helpers() {
        assert_abs_diff_eq!(wrap_to_pi(1.5 * PI), -PI / 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(wrap_to_pi(-1.5 * PI), PI / 2.0, epsilon = 1e-15);
    }
}
