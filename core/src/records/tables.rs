//! Fixed lookup tables from exercise vocabulary to APP-11 codes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prelude::{ReportError, ReportResult};

/// Mine status identifier, table 1609/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MineStatus {
    LeftInPlace,
    Drifting,
    Floating,
    Fouled,
    NotDealtWith,
    Sunk,
    Swept,
    Disposed,
    Countermined,
    Neutralized,
    Marked,
    Removed,
    Recovered,
    RenderedSafe,
    Exploded,
    Activated,
}

const MINE_STATUSES: [(&str, MineStatus); 16] = [
    ("LEFT-IN-PLACE", MineStatus::LeftInPlace),
    ("DRIFTING", MineStatus::Drifting),
    ("FLOATING", MineStatus::Floating),
    ("FOULED", MineStatus::Fouled),
    ("NOT-DEALT-WITH", MineStatus::NotDealtWith),
    ("SUNK", MineStatus::Sunk),
    ("SWEPT", MineStatus::Swept),
    ("DISPOSED", MineStatus::Disposed),
    ("COUNTERMINED", MineStatus::Countermined),
    ("NEUTRALIZED", MineStatus::Neutralized),
    ("MARKED", MineStatus::Marked),
    ("REMOVED", MineStatus::Removed),
    ("RECOVERED", MineStatus::Recovered),
    ("RENDERED-SAFE", MineStatus::RenderedSafe),
    ("EXPLODED", MineStatus::Exploded),
    ("ACTIVATED", MineStatus::Activated),
];

impl MineStatus {
    pub fn code(self) -> &'static str {
        match self {
            Self::LeftInPlace => "LIPLA",
            Self::Drifting => "DRIFT",
            Self::Floating => "FLOAT",
            Self::Fouled => "FOULED",
            Self::NotDealtWith => "NDEALT",
            Self::Sunk => "SUNK",
            Self::Swept => "SWEPT",
            Self::Disposed => "DISP",
            Self::Countermined => "CMINED",
            Self::Neutralized => "NEUTR",
            Self::Marked => "MARK",
            Self::Removed => "RMVD",
            Self::Recovered => "RECVD",
            Self::RenderedSafe => "RSAFE",
            Self::Exploded => "EXPLD",
            Self::Activated => "ACTIV",
        }
    }
}

impl FromStr for MineStatus {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        MINE_STATUSES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, status)| *status)
            .ok_or_else(|| ReportError::lookup("mine status", s))
    }
}

/// Mine case, table 1141/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MineCase {
    NoInformation,
    Moored,
    ShallowMoored,
    DeepMoored,
    Ground,
    Stealth,
    SelfPropelled,
    Rising,
    UnexplodedOrdnance,
    Obstructor,
}

const MINE_CASES: [(&str, MineCase); 10] = [
    ("NO-INFO", MineCase::NoInformation),
    ("MOORED-MINE", MineCase::Moored),
    ("SHALLOW-MOORED-MINE", MineCase::ShallowMoored),
    ("DEEP-MOORED-MINE", MineCase::DeepMoored),
    ("GROUND-MINE", MineCase::Ground),
    ("STEALTH-MINE", MineCase::Stealth),
    ("SELF-PROPELLED-MINE", MineCase::SelfPropelled),
    ("RISING-MINE", MineCase::Rising),
    ("UNEXPLODED-EXPLOSIVE-ORDNANCE", MineCase::UnexplodedOrdnance),
    ("OBSTRUCTORS", MineCase::Obstructor),
];

impl MineCase {
    pub fn code(self) -> &'static str {
        match self {
            Self::NoInformation => "0",
            Self::Moored => "1",
            Self::ShallowMoored => "2",
            Self::DeepMoored => "3",
            Self::Ground => "4",
            Self::Stealth => "5",
            Self::SelfPropelled => "6",
            Self::Rising => "7",
            Self::UnexplodedOrdnance => "8",
            Self::Obstructor => "9",
        }
    }
}

impl FromStr for MineCase {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        MINE_CASES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, case)| *case)
            .ok_or_else(|| ReportError::lookup("mine case", s))
    }
}

/// Sensor fitted to a detecting vehicle.
pub fn detection_equipment(vehicle: &str) -> ReportResult<&'static str> {
    match vehicle.trim().to_uppercase().as_str() {
        "SONOBOT" => Ok("HYDRA H5SE7"),
        "QUADROIN" => Ok("MARINESONIC ARC SEA SCOUT MK-II"),
        "DIVER" => Ok("DIVER"),
        _ => Err(ReportError::lookup("detection equipment", vehicle)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_name_round_trips_to_its_code() {
        for (name, status) in MINE_STATUSES {
            assert_eq!(name.parse::<MineStatus>().unwrap(), status);
        }
        assert_eq!("rendered-safe".parse::<MineStatus>().unwrap().code(), "RSAFE");
    }

    #[test]
    fn case_codes_are_table_digits() {
        assert_eq!("GROUND-MINE".parse::<MineCase>().unwrap().code(), "4");
        assert_eq!("no-info".parse::<MineCase>().unwrap().code(), "0");
        assert_eq!(
            "LIMPET".parse::<MineCase>(),
            Err(ReportError::lookup("mine case", "LIMPET"))
        );
    }

    #[test]
    fn unknown_vehicle_is_lookup_error() {
        assert_eq!(detection_equipment("sonobot").unwrap(), "HYDRA H5SE7");
        assert!(matches!(
            detection_equipment("REMUS"),
            Err(ReportError::Lookup { .. })
        ));
    }
}
