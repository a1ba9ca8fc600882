use std::path::Path;

use crate::format::{finite, unit_ratio};
use crate::prelude::{ReportError, ReportResult};

pub const KNOTS_PER_METRE_PER_SECOND: f64 = 1.94384;

const CONFIDENCE_BUCKET_WIDTH: f64 = 25.0;
const MAX_CONFIDENCE_LEVEL: u8 = 4;

/// Decimal rendering for probabilities and durations: `1.0`, `0.95`, `12.25`.
pub fn format_decimal(field: &str, value: f64) -> ReportResult<String> {
    let value = finite(field, value)?;
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Ok(format!("{value:.1}"))
    } else {
        Ok(format!("{value}"))
    }
}

/// Circular error probable taken from a measured value in metres.
pub fn cep_from_measured(metres: f64) -> ReportResult<String> {
    let metres = finite("circular error", metres)?;
    if metres < 0.0 {
        return Err(ReportError::domain(
            "circular error",
            format!("{metres} is negative"),
        ));
    }
    Ok(format!("{}", metres.trunc() as u64))
}

/// Circular error probable derived from a classifier confidence ratio.
pub fn cep_from_confidence(ratio: f64) -> ReportResult<String> {
    let ratio = unit_ratio("confidence", ratio)?;
    Ok(format!("{}", ((1.0 - ratio) * 100.0).round_ties_even() as u64))
}

/// Buckets a confidence ratio into sonar confidence levels 1 to 4.
pub fn sonar_confidence_level(ratio: f64) -> ReportResult<u8> {
    let ratio = unit_ratio("confidence", ratio)?;
    let bucket = (ratio * 100.0 / CONFIDENCE_BUCKET_WIDTH).floor() as u8 + 1;
    Ok(bucket.min(MAX_CONFIDENCE_LEVEL))
}

/// Ground speed in whole knots from horizontal velocity components in m/s.
pub fn format_speed(vx: f64, vy: f64) -> ReportResult<String> {
    let vx = finite("velocity x", vx)?;
    let vy = finite("velocity y", vy)?;
    let knots = finite("speed", vx.hypot(vy) * KNOTS_PER_METRE_PER_SECOND)?.floor();
    if knots >= u64::MAX as f64 {
        return Err(ReportError::domain("speed", format!("{knots} knots is out of range")));
    }
    Ok(format!("{}", knots as u64))
}

/// Heading in whole degrees `000`..`359` from a yaw angle in radians.
pub fn format_heading(yaw: f64) -> ReportResult<String> {
    let yaw = finite("yaw", yaw)?;
    let mut degrees = finite("heading", yaw.to_degrees())?.rem_euclid(360.0).floor();
    // rem_euclid can land exactly on the modulus for tiny negative inputs
    if degrees >= 360.0 {
        degrees = 0.0;
    }
    Ok(format!("{:03}", degrees as u16))
}

pub fn format_altitude(altitude: f64) -> ReportResult<String> {
    let altitude = finite("altitude", altitude)?;
    Ok(format!("ALT:{}", altitude.floor() as i64))
}

/// Uppercased file name of an image path.
///
/// An empty path means the record has no image and yields `None`.
pub fn image_name(path: &str) -> ReportResult<Option<String>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    Path::new(path)
        .file_name()
        .map(|name| Some(name.to_string_lossy().to_uppercase()))
        .ok_or_else(|| ReportError::format("image", format!("'{path}' has no file name")))
}
