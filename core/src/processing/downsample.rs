use crate::prelude::{ReportError, ReportResult};
use crate::records::TrackPoint;

/// Thins a time-ordered track so consecutive samples are more than
/// `interval` seconds apart.
///
/// The first sample only anchors the scan and the last sample is never
/// emitted.
#[derive(Debug, Clone, Copy)]
pub struct TrackDownsampler<'a> {
    points: &'a [TrackPoint],
    interval: f64,
}

impl<'a> TrackDownsampler<'a> {
    pub fn new(points: &'a [TrackPoint], interval: f64) -> ReportResult<Self> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ReportError::domain(
                "track interval",
                format!("{interval} must be a positive number of seconds"),
            ));
        }
        Ok(Self { points, interval })
    }

    /// Starts a fresh pass over the track.
    pub fn iter(&self) -> Downsample<'a> {
        Downsample {
            candidates: self.points[..self.points.len().saturating_sub(1)].iter(),
            anchor: self.points.first().map(|point| point.timestamp),
            interval: self.interval,
        }
    }
}

impl<'a> IntoIterator for TrackDownsampler<'a> {
    type Item = &'a TrackPoint;
    type IntoIter = Downsample<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &TrackDownsampler<'a> {
    type Item = &'a TrackPoint;
    type IntoIter = Downsample<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`TrackDownsampler::iter`].
#[derive(Debug, Clone)]
pub struct Downsample<'a> {
    candidates: std::slice::Iter<'a, TrackPoint>,
    anchor: Option<f64>,
    interval: f64,
}

impl<'a> Iterator for Downsample<'a> {
    type Item = &'a TrackPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let anchor = self.anchor.as_mut()?;
        for point in self.candidates.by_ref() {
            if point.timestamp - *anchor > self.interval {
                *anchor = point.timestamp;
                return Some(point);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.candidates.len()))
    }
}
