//! # Built-in solar system
//!
//! [`solar_system`] builds the default scene: the Sun as the fixed primary,
//! the eight planets and Ceres propagated analytically from osculating
//! heliocentric elements, and the interstellar comet 3I/ATLAS integrated
//! numerically from a heliocentric state vector.
//!
//! All element sets share the epoch 2025-10-04T00:00:00 UTC.

use nalgebra::{Point2, Vector2};

use crate::{
    body::Body,
    config::ScaleConfig,
    constants::{Kilogram, Kilometer, UnixMillis},
    orbital_elements::OrbitalElements,
    orrery_errors::OrreryError,
};

/// 2025-10-04T00:00:00 UTC, Unix milliseconds.
pub const CATALOG_EPOCH: UnixMillis = 1_759_536_000_000.0;

const SUN_MASS: Kilogram = 1.989e30;
const SUN_RADIUS: Kilometer = 695_700.0;

struct CatalogEntry {
    name: &'static str,
    mass: Kilogram,
    radius: Kilometer,
    /// a (AU), e, i, Ω, ω, M (degrees)
    elements: [f64; 6],
}

impl CatalogEntry {
    fn elements(&self) -> OrbitalElements {
        let [a, e, i, node, peri, mean_anomaly] = self.elements;
        OrbitalElements {
            reference_epoch: CATALOG_EPOCH,
            semi_major_axis: a,
            eccentricity: e,
            inclination: i,
            ascending_node_longitude: node,
            periapsis_argument: peri,
            mean_anomaly,
        }
    }
}

#[rustfmt::skip]
const ANALYTIC_BODIES: [CatalogEntry; 9] = [
    CatalogEntry { name: "Mercury", mass: 3.3014e23, radius: 2439.7,
        elements: [0.3963303568552592, 0.195146800949858, 6.998467562564008, 48.54860929512073, 29.90600153654426, 152.5050447087461] },
    CatalogEntry { name: "Venus", mass: 4.8675e24, radius: 6051.8,
        elements: [0.7193075628881022, 0.00961301922234237, 3.395190616929889, 76.61547876637461, 346.1809908562251, 70.73681720932568] },
    CatalogEntry { name: "Earth", mass: 5.9723e24, radius: 6371.0,
        elements: [0.9884778595229721, 0.0224665980676975, 0.009361834796841753, 242.5714748746163, 238.093817256785, 252.1662094875961] },
    CatalogEntry { name: "Mars", mass: 6.4171e23, radius: 3389.5,
        elements: [1.5361808446362526, 0.09327957122076079, 1.846149199958463, 49.67412197237504, 284.0761205312491, 271.5705002287118] },
    CatalogEntry { name: "Jupiter", mass: 1.8982e27, radius: 69911.0,
        elements: [5.196872446649367, 0.04902661375752699, 1.303775355536004, 100.4997221050677, 273.2754318441118, 82.23624259872942] },
    CatalogEntry { name: "Saturn", mass: 5.6834e26, radius: 58232.0,
        elements: [9.537827257799261, 0.05454059430016105, 2.488808873212828, 113.644119191983, 338.5479951631343, 272.6176161051636] },
    CatalogEntry { name: "Uranus", mass: 8.681e25, radius: 25362.0,
        elements: [19.188180030037476, 0.04726029813008705, 0.7726304037113545, 73.99333322935934, 97.11194454391001, 252.4895802486794] },
    CatalogEntry { name: "Neptune", mass: 1.0241e26, radius: 24622.0,
        elements: [30.06973093117018, 0.008593397795593868, 1.775164447238822, 131.9635756395051, 272.6698679970442, 316.5089329576374] },
    CatalogEntry { name: "Ceres", mass: 9.38e20, radius: 469.7,
        elements: [2.75335009, 8.256884979564472E-02, 1.059670287549551E+01, 8.022742118128347E+01, 7.411014758807298E+01, 2.204689200573771E+02] },
];

/// 3I/ATLAS heliocentric state at the catalog epoch (AU, AU/day).
const ATLAS_POSITION: [f64; 2] = [-1.2130232558139535, -1.9200000000000002];
const ATLAS_VELOCITY: [f64; 2] = [-0.013020279069767443, 0.03580576744186047];
const ATLAS_MASS: Kilogram = 1e13;
const ATLAS_RADIUS: Kilometer = 1.4;

/// Build the default scene at `at_time`.
///
/// The Sun comes first so that it acts as the primary of the propagator.
///
/// Arguments
/// -----------------
/// * `scale`: unit scale of the simulation.
/// * `at_time`: initial instant of the analytic bodies (Unix ms).
///
/// Return
/// ----------
/// * Sun, Mercury … Neptune, Ceres, 3I/ATLAS, in that order.
pub fn solar_system(scale: &ScaleConfig, at_time: UnixMillis) -> Result<Vec<Body>, OrreryError> {
    let mut bodies = Vec::with_capacity(ANALYTIC_BODIES.len() + 2);
    bodies.push(Body::new(
        "Sun",
        SUN_MASS,
        SUN_RADIUS,
        Point2::origin(),
        Vector2::zeros(),
    ));

    for entry in &ANALYTIC_BODIES {
        bodies.push(Body::from_elements(
            entry.name,
            entry.mass,
            entry.radius,
            entry.elements(),
            at_time,
            scale,
        )?);
    }

    bodies.push(
        Body::from_heliocentric(
            "3I/ATLAS",
            ATLAS_MASS,
            ATLAS_RADIUS,
            Vector2::from(ATLAS_POSITION),
            Vector2::from(ATLAS_VELOCITY),
            scale,
        )
        .with_trail(),
    );

    tracing::debug!(bodies = bodies.len(), at_time, "solar system catalog built");
    Ok(bodies)
}
