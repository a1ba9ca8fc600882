//! CSV readers for the detection log and the vehicle telemetry log.
//!
//! Both logs carry a header row and are addressed by column position.

pub mod detections;
pub mod track;

pub use detections::{read_detections, DetectionSchema};
pub use track::read_track;

use anyhow::{anyhow, Context};
use csv::{Reader, ReaderBuilder, StringRecord};
use std::io::Read;

pub(crate) fn reader<R: Read>(input: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

pub(crate) fn text<'r>(record: &'r StringRecord, index: usize, name: &str) -> anyhow::Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| anyhow!("missing column {} ({})", index, name))
}

pub(crate) fn number(record: &StringRecord, index: usize, name: &str) -> anyhow::Result<f64> {
    let raw = text(record, index, name)?;
    raw.parse::<f64>()
        .with_context(|| format!("column {} ({}) is not a number: '{}'", index, name, raw))
}
