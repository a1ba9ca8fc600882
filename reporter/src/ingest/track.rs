use crate::ingest::{number, reader};
use anyhow::Context;
use app11core::records::TrackPoint;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const EPOCH: usize = 0;
const LATITUDE: usize = 3;
const LONGITUDE: usize = 4;
const YAW: usize = 11;
const VELOCITY_X: usize = 15;
const VELOCITY_Y: usize = 16;
const ALTITUDE: usize = 22;

pub fn read_track<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<TrackPoint>> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("opening telemetry log {}", path_ref.display()))?;
    parse_track(file).with_context(|| format!("reading telemetry log {}", path_ref.display()))
}

/// Parses estimated-state rows in file order.
pub fn parse_track<R: Read>(input: R) -> anyhow::Result<Vec<TrackPoint>> {
    reader(input)
        .records()
        .enumerate()
        .map(|(index, row)| -> anyhow::Result<TrackPoint> {
            let row = row.with_context(|| format!("decoding telemetry row {}", index + 1))?;
            Ok(TrackPoint::new(
                number(&row, EPOCH, "epoch")?,
                number(&row, LATITUDE, "latitude")?,
                number(&row, LONGITUDE, "longitude")?,
                number(&row, YAW, "yaw")?,
                number(&row, VELOCITY_X, "vx")?,
                number(&row, VELOCITY_Y, "vy")?,
                number(&row, ALTITUDE, "altitude")?,
            ))
        })
        .collect()
}
