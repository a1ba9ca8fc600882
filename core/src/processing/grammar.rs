//! Line builders for the APP-11 task report grammar.
//!
//! Every grammar line is a slash-separated field list closed by `//`.
//! Builders return the line without its newline.

use crate::format::{
    epoch_to_zulu, format_altitude, format_decimal, format_fix, format_heading, format_speed,
    radians_to_ddm,
};
use crate::prelude::{GrammarVersion, ReportResult};
use crate::records::{NarrativeTimes, ReportKind, SerialNumber, TrackPoint};

pub const LINE_TERMINATOR: &str = "//";
pub const PLACEHOLDER: &str = "-";
pub const GEODETIC_DATUM: &str = "WGE";

const LEGACY_TASK_GROUP: &str = "446.02.02";

/// Joins `fields` with `/` and closes the line.
pub fn line<S: AsRef<str>>(fields: &[S]) -> String {
    let mut text = fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/");
    text.push_str(LINE_TERMINATOR);
    text
}

/// Keyword of a grammar line, i.e. its first field.
pub fn keyword(line: &str) -> &str {
    line.split('/').next().unwrap_or(line)
}

impl GrammarVersion {
    pub fn exercise(self) -> &'static str {
        match self {
            Self::Repmus2023 => "REPMUS 2023",
            Self::Repmus2024 => "REPMUS 2024",
        }
    }

    /// Originator as written inside grammar lines.
    pub fn originator(self, originator: &str) -> String {
        match self {
            Self::Repmus2023 => format!("{LEGACY_TASK_GROUP}.{originator}"),
            Self::Repmus2024 => originator.to_string(),
        }
    }

    /// Message routing block preceding the first `BT`.
    pub fn routing(self, issued: &str, originator: &str, destination: &str) -> Vec<String> {
        let (from, to) = match self {
            Self::Repmus2023 => (
                format!("TE X{LEGACY_TASK_GROUP}.{originator}"),
                format!("CTU X{LEGACY_TASK_GROUP}"),
            ),
            Self::Repmus2024 => (originator.to_string(), destination.to_string()),
        };
        vec![
            format!("R {issued}"),
            format!("FM {from}"),
            format!("TO {to}"),
            "INFO EXCON".to_string(),
            String::new(),
        ]
    }

    pub fn msgid(self, originator: &str, serial: SerialNumber, kind: ReportKind) -> String {
        let qualifier = match self {
            Self::Repmus2023 => PLACEHOLDER,
            Self::Repmus2024 => kind.message_qualifier(),
        };
        let originator = self.originator(originator);
        let serial = serial.to_string();
        line(&[
            "MSGID",
            "OPREP NWM",
            "APP-11(E)",
            "1",
            originator.as_str(),
            serial.as_str(),
            "SEP",
            qualifier,
            PLACEHOLDER,
            "NATO",
            "UNCLASSIFIED",
        ])
    }

    /// Static document references followed by the operational reference.
    pub fn references(self, originator: &str, reference_zulu: &str) -> Vec<String> {
        match self {
            Self::Repmus2023 => vec![
                line(&["REF", "A", "TYPE:MSG", "OPDIR", "CTU446.02.02", "SEP2023"]),
                line(&["REF", "B", "TYPE:MSG", "OPTASK NWM", "CTU446.02.02", reference_zulu]),
            ],
            Self::Repmus2024 => vec![
                line(&["REF", "A", "TYPE:DOC", "EXPLAN", "COMMANDO NAVAL", "09JUL2024"]),
                line(&["REF", "B", "TYPE:DOC", "SRL PLAN ANNEX E", "EXCON MCM", "09JUL2024"]),
                line(&["REF", "C", "TYPE:MSG", "OPDIR", originator, reference_zulu]),
            ],
        }
    }

    /// Task report line; always pairs the start time with this report's time.
    pub fn mtaskrep(
        self,
        area: &str,
        task: &str,
        originator: &str,
        kind: ReportKind,
        start_zulu: &str,
        second_zulu: &str,
    ) -> String {
        let area_field = match self {
            Self::Repmus2023 => format!("AREA:{area}"),
            Self::Repmus2024 => PLACEHOLDER.to_string(),
        };
        let area_task = format!("{area}-{task}");
        let originator = self.originator(originator);
        line(&[
            "MTASKREP",
            area_task.as_str(),
            originator.as_str(),
            area_field.as_str(),
            ReportKind::Start.time_qualifier(),
            start_zulu,
            kind.second_time_qualifier(),
            second_zulu,
        ])
    }

    pub fn filename(
        self,
        kind: ReportKind,
        originator: &str,
        area: &str,
        task: &str,
        serial: SerialNumber,
    ) -> String {
        let prefix = match self {
            Self::Repmus2023 => format!("TE X{LEGACY_TASK_GROUP}."),
            Self::Repmus2024 => String::new(),
        };
        format!(
            "{prefix}{originator}_{area}-{task}_{}_{serial}.txt",
            kind.time_qualifier()
        )
    }
}

/// Lines opening the message text after the routing block.
pub fn begin() -> Vec<String> {
    vec![
        "BT".to_string(),
        String::new(),
        "NATO UNCLASSIFIED".to_string(),
        String::new(),
    ]
}

pub fn end() -> String {
    "BT".to_string()
}

pub fn exer(version: GrammarVersion) -> String {
    line(&["EXER", version.exercise()])
}

pub fn geodatum() -> String {
    line(&["GEODATUM", GEODETIC_DATUM])
}

pub fn nmwrepq(kind: ReportKind) -> String {
    line(&["NMWREPQ", "TASKREP", kind.time_qualifier()])
}

pub fn heading() -> String {
    line(&["HEADING", "MCM"])
}

/// Short coverage line for reports before completion.
pub fn mcmpedat_short(area: &str, task: &str, progress: u8) -> String {
    line(&[
        "MCMPEDAT".to_string(),
        format!("{area}-{task}"),
        progress.to_string(),
    ])
}

pub fn trckhist(equipment: &str, point: &TrackPoint) -> ReportResult<String> {
    let fix = format_fix(
        radians_to_ddm(point.latitude)?,
        radians_to_ddm(point.longitude)?,
    )?;
    Ok(line(&[
        "TRCKHIST".to_string(),
        equipment.to_string(),
        epoch_to_zulu(point.timestamp)?,
        fix,
        format_altitude(point.altitude)?,
        format_speed(point.vx, point.vy)?,
        format_heading(point.yaw)?,
    ]))
}

pub fn narr(times: &NarrativeTimes) -> ReportResult<String> {
    let hours = |field: &str, value: f64| format_decimal(field, value).map(|v| format!("{v}H"));
    Ok(line(&[
        "NARR".to_string(),
        hours("time in water", times.time_in_water)?,
        hours("detection processing", times.detection_processing)?,
        hours("classification processing", times.classification_processing)?,
        hours("recovery processing", times.recovery_processing)?,
    ]))
}

/// Free-text comments, uppercased; `-` when empty.
pub fn gentext(comment: &str) -> String {
    let comment = comment.trim();
    let text = if comment.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        comment.to_uppercase()
    };
    line(&["GENTEXT", "COMMENTS", text.as_str()])
}
