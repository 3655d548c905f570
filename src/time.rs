use hifitime::Epoch;
use std::str::FromStr;

use crate::{
    constants::{JulianDate, UnixMillis, JD_EPOCH_THRESHOLD, JD_UNIX_EPOCH, MS_PER_DAY},
    orrery_errors::OrreryError,
};

/// Transformation from Julian Date to Unix milliseconds
///
/// Argument
/// --------
/// * `jd`: a Julian Date (days)
///
/// Return
/// ------
/// * the same instant as milliseconds since 1970-01-01T00:00:00 UTC
pub fn julian_date_to_unix_ms(jd: JulianDate) -> UnixMillis {
    (jd - JD_UNIX_EPOCH) * MS_PER_DAY
}

/// Transformation from Unix milliseconds to Julian Date
pub fn unix_ms_to_julian_date(ms: UnixMillis) -> JulianDate {
    ms / MS_PER_DAY + JD_UNIX_EPOCH
}

/// Bring an element epoch onto the absolute time axis used by the propagator.
///
/// Element tables mix two conventions: Julian Dates (~2.4e6) and Unix
/// milliseconds (~1.7e12). Magnitudes below [`JD_EPOCH_THRESHOLD`] are read as
/// Julian Dates and converted, anything else is returned unchanged.
///
/// Every comparison between an epoch and a propagation instant must go
/// through this function.
pub fn normalize_epoch(epoch: f64) -> UnixMillis {
    if epoch.abs() < JD_EPOCH_THRESHOLD {
        julian_date_to_unix_ms(epoch)
    } else {
        epoch
    }
}

/// Unix milliseconds of a [`hifitime::Epoch`].
pub fn unix_ms_from_epoch(epoch: &Epoch) -> UnixMillis {
    epoch.to_unix_milliseconds()
}

/// [`hifitime::Epoch`] of an instant given in Unix milliseconds.
pub fn epoch_from_unix_ms(ms: UnixMillis) -> Epoch {
    Epoch::from_unix_milliseconds(ms)
}

/// Transformation from a date string (e.g. `2025-10-04T00:00:00 UTC`) to Unix milliseconds
///
/// Argument
/// --------
/// * `date`: any date representation accepted by [`hifitime::Epoch::from_str`]
///
/// Return
/// ------
/// * the instant in Unix milliseconds, or [`OrreryError::InvalidDate`]
pub fn date_to_unix_ms(date: &str) -> Result<UnixMillis, OrreryError> {
    Epoch::from_str(date)
        .map(|epoch| unix_ms_from_epoch(&epoch))
        .map_err(|err| OrreryError::InvalidDate(format!("{date}: {err}")))
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_julian_date_to_unix_ms() {
        assert_eq!(julian_date_to_unix_ms(JD_UNIX_EPOCH), 0.0);
        assert_eq!(julian_date_to_unix_ms(2451545.0), 946_728_000_000.0);
        assert_eq!(unix_ms_to_julian_date(946_728_000_000.0), 2451545.0);
    }

    #[test]
    fn test_normalize_epoch() {
        assert_eq!(normalize_epoch(2451545.0), 946_728_000_000.0);
        assert_eq!(normalize_epoch(946_728_000_000.0), 946_728_000_000.0);
        assert_eq!(normalize_epoch(1_759_536_000_000.0), 1_759_536_000_000.0);
    }

    #[test]
    fn test_hifitime_agrees_with_jd_offset() {
        let j2000 = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
        assert_abs_diff_eq!(
            unix_ms_from_epoch(&j2000),
            julian_date_to_unix_ms(2451545.0),
            epsilon = 1.0
        );

        let back = epoch_from_unix_ms(1_759_536_000_000.0);
        assert_abs_diff_eq!(
            unix_ms_from_epoch(&back),
            1_759_536_000_000.0,
            epsilon = 1.0
        );
    }

    #[test]
    fn test_date_to_unix_ms() {
        let ms = date_to_unix_ms("2025-10-04T00:00:00 UTC").unwrap();
        assert_abs_diff_eq!(ms, 1_759_536_000_000.0, epsilon = 1.0);

        assert_eq!(
            date_to_unix_ms("not a date"),
            Err(OrreryError::InvalidDate(String::new()))
        );
    }
}
