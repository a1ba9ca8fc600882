use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::prelude::{ReportError, ReportResult};
use crate::records::tables::{MineCase, MineStatus};

/// Report line a detection row is written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionCode {
    /// Mine-like echo, not yet classified.
    Milecrep,
    /// Contact classified as mine-like.
    Milcorep,
    /// Contact classified as not mine-like.
    Nonmilcorep,
    /// Visual sighting.
    Mdetrep,
    /// Identified mine with status.
    Mineinfo,
    /// Identified non-mine bottom object.
    Nomboinfo,
}

impl DetectionCode {
    pub const ALL: [DetectionCode; 6] = [
        Self::Milecrep,
        Self::Milcorep,
        Self::Nonmilcorep,
        Self::Mdetrep,
        Self::Mineinfo,
        Self::Nomboinfo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Milecrep => "MILECREP",
            Self::Milcorep => "MILCOREP",
            Self::Nonmilcorep => "NONMILCOREP",
            Self::Mdetrep => "MDETREP",
            Self::Mineinfo => "MINEINFO",
            Self::Nomboinfo => "NOMBOINFO",
        }
    }

    /// Codes used by the 2023 detection log (`milec`, `milco`, `nonmilco`, `mdet`).
    pub fn from_legacy(code: &str) -> ReportResult<Self> {
        match code.trim().to_lowercase().as_str() {
            "milec" => Ok(Self::Milecrep),
            "milco" => Ok(Self::Milcorep),
            "nonmilco" => Ok(Self::Nonmilcorep),
            "mdet" => Ok(Self::Mdetrep),
            _ => Err(ReportError::lookup("legacy detection code", code)),
        }
    }
}

impl fmt::Display for DetectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionCode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == wanted)
            .ok_or_else(|| ReportError::lookup("detection code", s))
    }
}

/// Where the circular error probable of a contact comes from.
///
/// Detection logs disagree: newer ones carry a measured value, older ones
/// only a classifier confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CircularError {
    /// Metres, as logged.
    Measured(f64),
    /// Derived from the contact's confidence ratio.
    FromConfidence,
}

/// Fields every detection row carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub reference: String,
    pub observed_at: NaiveDateTime,
    /// Decimal degrees.
    pub latitude: f64,
    /// Decimal degrees.
    pub longitude: f64,
    pub circular_error: CircularError,
    /// Classifier confidence in [0, 1].
    pub confidence: f64,
    /// Sensor name, e.g. `HYDRA H5SE7`.
    pub equipment: String,
    /// Image path; empty when the contact has no image.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineDetails {
    pub reference: String,
    pub status: MineStatus,
    pub case: MineCase,
    pub identity: String,
    /// Metres.
    pub depth: f64,
}

/// One row of the detection log, shaped by its detection code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DetectionRecord {
    MineLikeEcho(Contact),
    MineLikeContact(Contact),
    NonMineLikeContact(Contact),
    VisualSighting(Contact),
    MineInfo {
        contact: Contact,
        mine: MineDetails,
    },
    NonMineBottomObject {
        contact: Contact,
        identification: String,
    },
}

impl DetectionRecord {
    /// Builds the variant selected by `code`.
    ///
    /// `mine` is required for [`DetectionCode::Mineinfo`] and `identification`
    /// for [`DetectionCode::Nomboinfo`]; both are ignored otherwise.
    pub fn from_code(
        code: DetectionCode,
        contact: Contact,
        mine: Option<MineDetails>,
        identification: Option<String>,
    ) -> ReportResult<Self> {
        let record = match code {
            DetectionCode::Milecrep => Self::MineLikeEcho(contact),
            DetectionCode::Milcorep => Self::MineLikeContact(contact),
            DetectionCode::Nonmilcorep => Self::NonMineLikeContact(contact),
            DetectionCode::Mdetrep => Self::VisualSighting(contact),
            DetectionCode::Mineinfo => Self::MineInfo {
                contact,
                mine: mine.ok_or_else(|| {
                    ReportError::domain("mine details", "required for MINEINFO")
                })?,
            },
            DetectionCode::Nomboinfo => Self::NonMineBottomObject {
                contact,
                identification: identification.ok_or_else(|| {
                    ReportError::domain("NOMBO identification", "required for NOMBOINFO")
                })?,
            },
        };
        Ok(record)
    }

    pub fn code(&self) -> DetectionCode {
        match self {
            Self::MineLikeEcho(_) => DetectionCode::Milecrep,
            Self::MineLikeContact(_) => DetectionCode::Milcorep,
            Self::NonMineLikeContact(_) => DetectionCode::Nonmilcorep,
            Self::VisualSighting(_) => DetectionCode::Mdetrep,
            Self::MineInfo { .. } => DetectionCode::Mineinfo,
            Self::NonMineBottomObject { .. } => DetectionCode::Nomboinfo,
        }
    }

    pub fn contact(&self) -> &Contact {
        match self {
            Self::MineLikeEcho(contact)
            | Self::MineLikeContact(contact)
            | Self::NonMineLikeContact(contact)
            | Self::VisualSighting(contact)
            | Self::MineInfo { contact, .. }
            | Self::NonMineBottomObject { contact, .. } => contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn contact() -> Contact {
        Contact {
            reference: "C01".into(),
            observed_at: NaiveDate::from_ymd_opt(2024, 7, 9)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            latitude: 38.5,
            longitude: -9.25,
            circular_error: CircularError::Measured(5.0),
            confidence: 0.9,
            equipment: "HYDRA H5SE7".into(),
            image: String::new(),
        }
    }

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!("milcorep".parse::<DetectionCode>().unwrap(), DetectionCode::Milcorep);
        assert_eq!(DetectionCode::from_legacy("NONMILCO").unwrap(), DetectionCode::Nonmilcorep);
    }

    #[test]
    fn unknown_code_is_lookup_error() {
        assert_eq!(
            "SONARREP".parse::<DetectionCode>(),
            Err(ReportError::lookup("detection code", "SONARREP"))
        );
        assert!(DetectionCode::from_legacy("mine").is_err());
    }

    #[test]
    fn variant_follows_code() {
        for code in [
            DetectionCode::Milecrep,
            DetectionCode::Milcorep,
            DetectionCode::Nonmilcorep,
            DetectionCode::Mdetrep,
        ] {
            let record = DetectionRecord::from_code(code, contact(), None, None).unwrap();
            assert_eq!(record.code(), code);
            assert_eq!(record.contact().reference, "C01");
        }
    }

    #[test]
    fn detail_variants_require_their_fields() {
        assert!(DetectionRecord::from_code(DetectionCode::Mineinfo, contact(), None, None).is_err());
        let nombo = DetectionRecord::from_code(
            DetectionCode::Nomboinfo,
            contact(),
            None,
            Some("ROCK".into()),
        )
        .unwrap();
        assert_eq!(nombo.code(), DetectionCode::Nomboinfo);
    }
}
