use chrono::{DateTime, NaiveDateTime};

use crate::format::finite;
use crate::prelude::{ReportError, ReportResult};

const ZULU_PATTERN: &str = "%d%H%MZ%b%Y";

/// Input layouts accepted for mission and detection timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLayout {
    /// `YYYYMMDD-HHMM`, used by the parameter file and current detection logs.
    Dashed,
    /// `YYYYMMDDHHMM`, used by legacy detection logs.
    Compact,
}

impl TimeLayout {
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Dashed => "%Y%m%d-%H%M",
            Self::Compact => "%Y%m%d%H%M",
        }
    }
}

pub fn parse_timestamp(input: &str, layout: TimeLayout) -> ReportResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), layout.pattern()).map_err(|err| {
        ReportError::format(
            "timestamp",
            format!("'{}' does not match {}: {}", input, layout.pattern(), err),
        )
    })
}

/// Renders the canonical date-time group, e.g. `091430ZJUL2024`.
pub fn zulu(time: &NaiveDateTime) -> String {
    time.format(ZULU_PATTERN).to_string().to_uppercase()
}

/// Converts a `YYYYMMDD-HHMM` timestamp to its date-time group.
pub fn time_to_zulu(input: &str) -> ReportResult<String> {
    parse_timestamp(input, TimeLayout::Dashed).map(|time| zulu(&time))
}

/// Converts telemetry epoch seconds to a date-time group in UTC.
pub fn epoch_to_zulu(seconds: f64) -> ReportResult<String> {
    let seconds = finite("epoch", seconds)?;
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    let time = DateTime::from_timestamp(whole as i64, nanos).ok_or_else(|| {
        ReportError::domain("epoch", format!("{seconds} is not a representable instant"))
    })?;
    Ok(zulu(&time.naive_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashed_timestamp_renders_uppercase_month() {
        assert_eq!(time_to_zulu("20240709-1430").unwrap(), "091430ZJUL2024");
        assert_eq!(time_to_zulu(" 20231201-0005 ").unwrap(), "010005ZDEC2023");
    }

    #[test]
    fn compact_layout_parses_legacy_logs() {
        let time = parse_timestamp("202309141207", TimeLayout::Compact).unwrap();
        assert_eq!(zulu(&time), "141207ZSEP2023");
    }

    #[test]
    fn malformed_timestamp_is_format_error() {
        for input in ["2024-07-09 14:30", "", "20240709", "20241309-1430"] {
            assert!(matches!(
                time_to_zulu(input),
                Err(ReportError::Format { .. })
            ));
        }
    }

    #[test]
    fn epoch_is_rendered_in_utc() {
        assert_eq!(epoch_to_zulu(0.0).unwrap(), "010000ZJAN1970");
        assert_eq!(epoch_to_zulu(1_720_535_459.75).unwrap(), "091430ZJUL2024");
    }

    #[test]
    fn non_finite_epoch_is_rejected() {
        assert!(matches!(
            epoch_to_zulu(f64::NAN),
            Err(ReportError::Format { .. })
        ));
    }
}
