use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Parabolic orbit (e = {eccentricity}) is not supported")]
    ParabolicUnsupported { eccentricity: f64 },

    #[error("Invalid conic geometry: semi-latus rectum p = {semi_latus_rectum} must be positive")]
    InvalidGeometry { semi_latus_rectum: f64 },

    #[error("Invalid orbital elements: {0}")]
    InvalidElements(String),

    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to parse date: {0}")]
    InvalidDate(String),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (
                ParabolicUnsupported { eccentricity: a },
                ParabolicUnsupported { eccentricity: b },
            ) => a == b,
            (
                InvalidGeometry {
                    semi_latus_rectum: a,
                },
                InvalidGeometry {
                    semi_latus_rectum: b,
                },
            ) => a == b,
            (InvalidElements(a), InvalidElements(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            // hifitime messages are not stable across versions: same variant is enough
            (InvalidDate(_), InvalidDate(_)) => true,

            _ => false,
        }
    }
}
