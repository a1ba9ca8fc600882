use crate::ingest::{number, reader, text};
use anyhow::Context;
use app11core::format::{parse_timestamp, TimeLayout};
use app11core::prelude::ReportError;
use app11core::records::{
    detection_equipment, CircularError, Contact, DetectionCode, DetectionRecord, MineDetails,
};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column layout of the detection log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DetectionSchema {
    /// 2023 log: contact, -, time, lat, lon, type, confidence, reference.
    Legacy,
    /// 2024 log: type, contact, mine, nombo, time, lon, lat, cep, confidence,
    /// vehicle, status, case, identity, depth, image.
    #[default]
    Current,
}

pub fn read_detections<P: AsRef<Path>>(
    path: P,
    schema: DetectionSchema,
    sonar: &str,
) -> anyhow::Result<Vec<DetectionRecord>> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("opening detection log {}", path_ref.display()))?;
    parse_detections(file, schema, sonar)
        .with_context(|| format!("reading detection log {}", path_ref.display()))
}

/// Parses every row; `sonar` names the sensor for logs that do not carry one.
pub fn parse_detections<R: Read>(
    input: R,
    schema: DetectionSchema,
    sonar: &str,
) -> anyhow::Result<Vec<DetectionRecord>> {
    let mut records = Vec::new();
    for (index, row) in reader(input).records().enumerate() {
        let row = row.with_context(|| format!("decoding detection row {}", index + 1))?;
        let record = match schema {
            DetectionSchema::Current => current_row(&row),
            DetectionSchema::Legacy => legacy_row(&row, sonar),
        }
        .with_context(|| format!("detection row {}", index + 1))?;
        records.push(record);
    }
    Ok(records)
}

fn current_row(row: &StringRecord) -> anyhow::Result<DetectionRecord> {
    let code: DetectionCode = text(row, 0, "type")?.parse()?;
    let rated = matches!(code, DetectionCode::Milcorep | DetectionCode::Nonmilcorep);
    let confidence = match text(row, 8, "confidence")? {
        "" if !rated => 0.0,
        _ => number(row, 8, "confidence")?,
    };

    let contact = Contact {
        reference: text(row, 1, "contact reference")?.to_string(),
        observed_at: parse_timestamp(text(row, 4, "time")?, TimeLayout::Dashed)?,
        latitude: number(row, 6, "latitude")?,
        longitude: number(row, 5, "longitude")?,
        circular_error: CircularError::Measured(number(row, 7, "circular error")?),
        confidence,
        equipment: detection_equipment(text(row, 9, "vehicle")?)?.to_string(),
        image: row.get(14).unwrap_or_default().to_string(),
    };

    let mine = if code == DetectionCode::Mineinfo {
        Some(MineDetails {
            reference: text(row, 2, "mine reference")?.to_string(),
            status: text(row, 10, "mine status")?.parse()?,
            case: text(row, 11, "mine case")?.parse()?,
            identity: text(row, 12, "identity")?.to_string(),
            depth: number(row, 13, "depth")?,
        })
    } else {
        None
    };
    let identification = if code == DetectionCode::Nomboinfo {
        Some(text(row, 3, "nombo identification")?.to_string())
    } else {
        None
    };

    Ok(DetectionRecord::from_code(code, contact, mine, identification)?)
}

fn legacy_row(row: &StringRecord, sonar: &str) -> anyhow::Result<DetectionRecord> {
    let code = DetectionCode::from_legacy(text(row, 5, "type")?)?;
    let reference = text(row, 0, "contact reference")?;
    let equipment = sonar.trim();
    if equipment.is_empty() {
        return Err(ReportError::domain("sonar", "legacy logs need the sensor name from general.sonar").into());
    }

    let contact = Contact {
        reference: reference.to_string(),
        observed_at: parse_timestamp(text(row, 2, "time")?, TimeLayout::Compact)?,
        latitude: number(row, 3, "latitude")?,
        longitude: number(row, 4, "longitude")?,
        circular_error: CircularError::FromConfidence,
        confidence: number(row, 6, "confidence")?,
        equipment: equipment.to_uppercase(),
        image: format!("Contact_{}.png", reference),
    };

    Ok(DetectionRecord::from_code(code, contact, None, None)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use app11core::records::{MineCase, MineStatus};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CURRENT_HEADER: &str = "type,contact,mine,nombo,time,lon,lat,cep,confidence,vehicle,status,case,identity,depth,image\n";

    #[test]
    fn current_rows_map_to_variants() {
        let log = format!(
            "{CURRENT_HEADER}\
             MILCOREP,c01,,,20240709-1430,-9.25,38.5,12,0.8,SONOBOT,,,,,img/c01.png\n\
             MINEINFO,c02,m01,,20240709-1500,-9.2,38.4,3,,DIVER,NEUTRALIZED,GROUND-MINE,manta,17.8,\n\
             NOMBOINFO,c03,,tyre,20240709-1510,-9.1,38.3,4,,QUADROIN,,,,,\n"
        );
        let records = parse_detections(log.as_bytes(), DetectionSchema::Current, "unused").unwrap();
        assert_eq!(records.len(), 3);

        let contact = records[0].contact();
        assert_eq!(records[0].code(), DetectionCode::Milcorep);
        assert_eq!(contact.latitude, 38.5);
        assert_eq!(contact.longitude, -9.25);
        assert_eq!(contact.equipment, "HYDRA H5SE7");
        assert_eq!(contact.circular_error, CircularError::Measured(12.0));
        assert_eq!(contact.image, "img/c01.png");

        match &records[1] {
            DetectionRecord::MineInfo { mine, contact } => {
                assert_eq!(mine.status, MineStatus::Neutralized);
                assert_eq!(mine.case, MineCase::Ground);
                assert_eq!(mine.depth, 17.8);
                assert_eq!(contact.equipment, "DIVER");
            }
            other => panic!("unexpected record {other:?}"),
        }
        assert_eq!(records[2].code(), DetectionCode::Nomboinfo);
    }

    #[test]
    fn unknown_type_names_the_row() {
        let log = format!("{CURRENT_HEADER}SONARREP,c01,,,20240709-1430,-9.25,38.5,12,0.8,SONOBOT,,,,,\n");
        let err = parse_detections(log.as_bytes(), DetectionSchema::Current, "").unwrap_err();
        assert!(format!("{err:#}").contains("detection row 1"));
        assert!(matches!(
            err.root_cause().downcast_ref::<ReportError>(),
            Some(ReportError::Lookup { .. })
        ));
    }

    #[test]
    fn rated_contacts_need_a_confidence() {
        let log = format!("{CURRENT_HEADER}MILCOREP,c01,,,20240709-1430,-9.25,38.5,12,,SONOBOT,,,,,\n");
        assert!(parse_detections(log.as_bytes(), DetectionSchema::Current, "").is_err());
    }

    #[test]
    fn legacy_rows_derive_image_and_equipment() {
        let log = "contact,unused,time,lat,lon,type,confidence,reference\n\
                   17,x,202309141230,38.5,-9.25,milco,0.85,R17\n\
                   18,x,202309141240,38.6,-9.3,mdet,0.5,R18\n";
        let records = parse_detections(log.as_bytes(), DetectionSchema::Legacy, "klein 3900").unwrap();
        assert_eq!(records[0].code(), DetectionCode::Milcorep);
        assert_eq!(records[1].code(), DetectionCode::Mdetrep);
        let contact = records[0].contact();
        assert_eq!(contact.image, "Contact_17.png");
        assert_eq!(contact.equipment, "KLEIN 3900");
        assert_eq!(contact.circular_error, CircularError::FromConfidence);
        assert_eq!(contact.confidence, 0.85);
    }

    #[test]
    fn legacy_rows_need_a_sonar_name() {
        let log = "contact,unused,time,lat,lon,type,confidence,reference\n\
                   17,x,202309141230,38.5,-9.25,milec,0.85,R17\n";
        let err = parse_detections(log.as_bytes(), DetectionSchema::Legacy, " ").unwrap_err();
        assert!(format!("{err:#}").contains("detection row 1"));
        assert!(matches!(
            err.root_cause().downcast_ref::<ReportError>(),
            Some(ReportError::Domain { .. })
        ));
    }

    #[test]
    fn read_detections_opens_the_log() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(CURRENT_HEADER.as_bytes()).unwrap();
        let path = temp.into_temp_path();
        assert!(read_detections(&path, DetectionSchema::Current, "").unwrap().is_empty());
        assert!(read_detections(path.with_extension("missing"), DetectionSchema::Current, "").is_err());
    }
}
