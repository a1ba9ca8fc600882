//! Core of the APP-11 mine-countermeasure task report generator.
//!
//! Typed mission records go in, slash-delimited report messages come out.
//! Nothing here touches the filesystem or a global logger; callers supply
//! the issue time and a [`telemetry::ReportObserver`].

pub mod format;
pub mod prelude;
pub mod processing;
pub mod records;
pub mod telemetry;

pub use prelude::{AssemblyOptions, ReportError, ReportMessage, ReportResult};
pub use processing::MessageAssembler;
