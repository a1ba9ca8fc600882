use std::fmt;

use crate::format::{finite, format_decimal, unit_ratio};
use crate::prelude::{ReportError, ReportResult};
use crate::processing::grammar::{line, PLACEHOLDER};
use crate::records::MineCoverageSummary;

/// Side of the centre line a synthesized track lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSide {
    Plus,
    Minus,
}

/// One parallel track of a sweep, offset from the centre line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub side: TrackSide,
    /// Whole metres from the centre line.
    pub offset: u64,
}

impl fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qualifier = match self.side {
            TrackSide::Plus => "PS",
            TrackSide::Minus => "MS",
        };
        // one run per track, fully completed
        write!(f, "{}{}M/1/1", qualifier, self.offset)
    }
}

/// Lays `count` tracks `spacing` metres apart, symmetric about the centre line.
///
/// Assumes every track was run once and completed.
pub fn synthesize_tracks(count: u32, spacing: f64) -> ReportResult<Vec<TrackDescriptor>> {
    let spacing = finite("track spacing", spacing)?;
    if spacing < 0.0 {
        return Err(ReportError::domain(
            "track spacing",
            format!("{spacing} is negative"),
        ));
    }

    let centre = (f64::from(count) - 1.0) / 2.0;
    Ok((0..count)
        .map(|index| {
            let offset = (centre - f64::from(index)) * spacing;
            TrackDescriptor {
                side: if offset >= 0.0 {
                    TrackSide::Plus
                } else {
                    TrackSide::Minus
                },
                offset: offset.abs().round_ties_even() as u64,
            }
        })
        .collect())
}

/// Full `MCMPEDAT` line; `None` when the summary has no tracks.
pub fn mcmpedat(area: &str, task: &str, summary: &MineCoverageSummary) -> ReportResult<Option<String>> {
    if summary.track_count == 0 {
        return Ok(None);
    }

    let probability = |field: &str, value: f64| {
        unit_ratio(field, value).and_then(|value| format_decimal(field, value))
    };
    let tracks = synthesize_tracks(summary.track_count, summary.track_spacing)?
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/");

    Ok(Some(line(&[
        "MCMPEDAT".to_string(),
        format!("{area}-{task}"),
        "100".to_string(),
        PLACEHOLDER.to_string(),
        format!("{}M", summary.characteristic_width),
        PLACEHOLDER.to_string(),
        probability("classification probability", summary.classification_probability)?,
        PLACEHOLDER.to_string(),
        "1".to_string(),
        PLACEHOLDER.to_string(),
        PLACEHOLDER.to_string(),
        probability("burial probability", summary.undetected_burial_probability)?,
        probability("seabed probability", summary.undetected_seabed_probability)?,
        tracks,
    ])))
}
