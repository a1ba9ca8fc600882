//! Field formatters: one semantic value in, one grammar token out.

pub mod coords;
pub mod time;
pub mod tokens;

pub use coords::{degrees_to_ddm, format_fix, radians_to_ddm};
pub use time::{epoch_to_zulu, parse_timestamp, time_to_zulu, zulu, TimeLayout};
pub use tokens::{
    cep_from_confidence, cep_from_measured, format_altitude, format_decimal, format_heading,
    format_speed, image_name, sonar_confidence_level, KNOTS_PER_METRE_PER_SECOND,
};

use crate::prelude::{ReportError, ReportResult};

pub(crate) fn finite(field: &str, value: f64) -> ReportResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReportError::format(field, format!("{value} is not a finite number")))
    }
}

pub(crate) fn unit_ratio(field: &str, value: f64) -> ReportResult<f64> {
    let value = finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ReportError::domain(field, format!("{value} is outside [0, 1]")))
    }
}
