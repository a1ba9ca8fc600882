pub mod assembler;
pub mod coverage;
pub mod detections;
pub mod downsample;
pub mod grammar;

pub use assembler::MessageAssembler;
pub use coverage::{mcmpedat, synthesize_tracks, TrackDescriptor, TrackSide};
pub use detections::DetectionWriter;
pub use downsample::{Downsample, TrackDownsampler};
