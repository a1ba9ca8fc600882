//! Per-record detection lines.
//!
//! Each record of the detection log is written as exactly one line chosen by
//! its [`DetectionCode`](crate::records::DetectionCode).

use crate::format::{
    cep_from_confidence, cep_from_measured, degrees_to_ddm, finite, format_fix, image_name,
    sonar_confidence_level, zulu,
};
use crate::prelude::{ImageField, ReportError, ReportResult};
use crate::processing::grammar::{line, GEODETIC_DATUM, PLACEHOLDER};
use crate::records::{CircularError, Contact, DetectionRecord, MineDetails};

/// Tokens shared by every detection line, rendered once per record.
struct ContactTokens {
    reference: String,
    utc: String,
    fix: String,
    cep: String,
    equipment: String,
    image: Option<String>,
}

impl ContactTokens {
    fn render(contact: &Contact) -> ReportResult<Self> {
        let fix = format_fix(
            degrees_to_ddm(contact.latitude)?,
            degrees_to_ddm(contact.longitude)?,
        )?;
        let cep = match contact.circular_error {
            CircularError::Measured(metres) => cep_from_measured(metres)?,
            CircularError::FromConfidence => cep_from_confidence(contact.confidence)?,
        };
        Ok(Self {
            reference: contact.reference.trim().to_uppercase(),
            utc: zulu(&contact.observed_at),
            fix,
            cep,
            equipment: contact.equipment.trim().to_uppercase(),
            image: image_name(&contact.image)?,
        })
    }
}

/// Writes detection records using a fixed image policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionWriter {
    image_field: ImageField,
}

impl DetectionWriter {
    pub fn new(image_field: ImageField) -> Self {
        Self { image_field }
    }

    /// Renders one record; errors name the offending field.
    pub fn write(&self, record: &DetectionRecord) -> ReportResult<String> {
        let tokens = ContactTokens::render(record.contact())?;
        match record {
            DetectionRecord::MineLikeEcho(_) => Ok(self.milecrep(tokens)),
            DetectionRecord::MineLikeContact(contact) => {
                self.classified("MILCOREP", tokens, contact, "LOOKS LIKE A MINE")
            }
            DetectionRecord::NonMineLikeContact(contact) => {
                self.classified("NONMILCOREP", tokens, contact, "DOESN'T LOOK LIKE A MINE")
            }
            DetectionRecord::VisualSighting(_) => Ok(mdetrep(tokens)),
            DetectionRecord::MineInfo { mine, .. } => self.mineinfo(tokens, mine),
            DetectionRecord::NonMineBottomObject { identification, .. } => {
                Ok(self.nomboinfo(tokens, identification))
            }
        }
    }

    /// Renders records in order, prefixing any error with the record's index.
    pub fn write_all<'a, I>(&self, records: I) -> ReportResult<Vec<String>>
    where
        I: IntoIterator<Item = &'a DetectionRecord>,
    {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                self.write(record)
                    .map_err(|err| err.within(&format!("detection {}", index + 1)))
            })
            .collect()
    }

    fn finish(&self, mut fields: Vec<String>, image: Option<String>) -> String {
        match (image, self.image_field) {
            (Some(image), _) => fields.push(image),
            (None, ImageField::Placeholder) => fields.push(PLACEHOLDER.to_string()),
            (None, ImageField::Omit) => {}
        }
        line(&fields)
    }

    fn milecrep(&self, tokens: ContactTokens) -> String {
        let fields = vec![
            "MILECREP".to_string(),
            tokens.utc,
            GEODETIC_DATUM.to_string(),
            tokens.fix,
            tokens.cep,
            tokens.equipment,
            "UNCERTAIN".to_string(),
        ];
        self.finish(fields, tokens.image)
    }

    fn classified(
        &self,
        keyword: &str,
        tokens: ContactTokens,
        contact: &Contact,
        assessment: &str,
    ) -> ReportResult<String> {
        let level = sonar_confidence_level(contact.confidence)?;
        let fields = vec![
            keyword.to_string(),
            tokens.reference,
            tokens.utc,
            GEODETIC_DATUM.to_string(),
            tokens.fix,
            tokens.cep,
            tokens.equipment,
            level.to_string(),
            PLACEHOLDER.to_string(),
            assessment.to_string(),
        ];
        Ok(self.finish(fields, tokens.image))
    }

    fn mineinfo(&self, tokens: ContactTokens, mine: &MineDetails) -> ReportResult<String> {
        let depth = finite("depth", mine.depth)?;
        if depth < 0.0 {
            return Err(ReportError::domain("depth", format!("{depth} is negative")));
        }
        let mut fields = vec![
            "MINEINFO".to_string(),
            mine.reference.trim().to_uppercase(),
            tokens.utc,
            GEODETIC_DATUM.to_string(),
            tokens.fix,
            tokens.cep,
            mine.status.code().to_string(),
            mine.case.code().to_string(),
        ];
        fields.extend(std::iter::repeat(PLACEHOLDER.to_string()).take(3));
        fields.push(mine.identity.trim().to_uppercase());
        fields.push("SONAR".to_string());
        fields.push((depth.trunc() as u64).to_string());
        fields.extend(std::iter::repeat(PLACEHOLDER.to_string()).take(4));
        Ok(self.finish(fields, tokens.image))
    }

    fn nomboinfo(&self, tokens: ContactTokens, identification: &str) -> String {
        let fields = vec![
            "NOMBOINFO".to_string(),
            tokens.reference,
            tokens.utc,
            GEODETIC_DATUM.to_string(),
            tokens.fix,
            tokens.cep,
            identification.trim().to_uppercase(),
            "SONAR".to_string(),
        ];
        self.finish(fields, tokens.image)
    }
}

/// Visual sightings always carry amplifying information, so the image policy
/// does not apply.
fn mdetrep(tokens: ContactTokens) -> String {
    let amplification = tokens
        .image
        .map(|image| format!("SEE IMAGE {image}"))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    line(&[
        "MDETREP".to_string(),
        "SIGHTED".to_string(),
        "VISUAL".to_string(),
        tokens.utc,
        PLACEHOLDER.to_string(),
        "DIVER".to_string(),
        GEODETIC_DATUM.to_string(),
        tokens.fix,
        tokens.cep,
        PLACEHOLDER.to_string(),
        amplification,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DetectionCode, MineCase, MineStatus};
    use chrono::NaiveDate;

    const FIX: &str = "3830.0000N-00915.0000W";

    fn contact(image: &str) -> Contact {
        Contact {
            reference: "c07".into(),
            observed_at: NaiveDate::from_ymd_opt(2024, 7, 9)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            latitude: 38.5,
            longitude: -9.25,
            circular_error: CircularError::Measured(12.0),
            confidence: 0.8,
            equipment: "HYDRA H5SE7".into(),
            image: image.into(),
        }
    }

    fn record(code: DetectionCode, image: &str) -> DetectionRecord {
        DetectionRecord::from_code(code, contact(image), None, None).unwrap()
    }

    #[test]
    fn milcorep_with_image() {
        let text = DetectionWriter::default()
            .write(&record(DetectionCode::Milcorep, "shots/c07.png"))
            .unwrap();
        assert_eq!(
            text,
            format!("MILCOREP/C07/091430ZJUL2024/WGE/{FIX}/12/HYDRA H5SE7/4/-/LOOKS LIKE A MINE/C07.PNG//")
        );
    }

    #[test]
    fn empty_image_ends_one_field_earlier() {
        let text = DetectionWriter::default()
            .write(&record(DetectionCode::Milcorep, ""))
            .unwrap();
        assert!(text.ends_with("/LOOKS LIKE A MINE//"));

        let placeholder = DetectionWriter::new(ImageField::Placeholder)
            .write(&record(DetectionCode::Milcorep, ""))
            .unwrap();
        assert!(placeholder.ends_with("/LOOKS LIKE A MINE/-//"));
    }

    #[test]
    fn milecrep_and_nonmilcorep_layouts() {
        let writer = DetectionWriter::default();
        assert_eq!(
            writer.write(&record(DetectionCode::Milecrep, "")).unwrap(),
            format!("MILECREP/091430ZJUL2024/WGE/{FIX}/12/HYDRA H5SE7/UNCERTAIN//")
        );
        assert!(writer
            .write(&record(DetectionCode::Nonmilcorep, "a.png"))
            .unwrap()
            .ends_with("/4/-/DOESN'T LOOK LIKE A MINE/A.PNG//"));
    }

    #[test]
    fn mdetrep_amplification() {
        let writer = DetectionWriter::new(ImageField::Placeholder);
        assert_eq!(
            writer.write(&record(DetectionCode::Mdetrep, "dive.jpg")).unwrap(),
            format!("MDETREP/SIGHTED/VISUAL/091430ZJUL2024/-/DIVER/WGE/{FIX}/12/-/SEE IMAGE DIVE.JPG//")
        );
        assert!(writer
            .write(&record(DetectionCode::Mdetrep, ""))
            .unwrap()
            .ends_with("/12/-/-//"));
    }

    #[test]
    fn confidence_cep_for_legacy_contacts() {
        let mut legacy = contact("");
        legacy.circular_error = CircularError::FromConfidence;
        let text = DetectionWriter::default()
            .write(&DetectionRecord::MineLikeEcho(legacy))
            .unwrap();
        assert!(text.contains(&format!("/{FIX}/20/")));
    }

    #[test]
    fn mineinfo_layout() {
        let mine = MineDetails {
            reference: "m01".into(),
            status: MineStatus::Neutralized,
            case: MineCase::Moored,
            identity: "manta".into(),
            depth: 17.8,
        };
        let record =
            DetectionRecord::from_code(DetectionCode::Mineinfo, contact(""), Some(mine), None).unwrap();
        assert_eq!(
            DetectionWriter::default().write(&record).unwrap(),
            format!(
                "MINEINFO/M01/091430ZJUL2024/WGE/{FIX}/12/{}/{}/-/-/-/MANTA/SONAR/17/-/-/-/-//",
                MineStatus::Neutralized.code(),
                MineCase::Moored.code()
            )
        );
    }

    #[test]
    fn nomboinfo_layout() {
        let record = DetectionRecord::from_code(
            DetectionCode::Nomboinfo,
            contact("n.png"),
            None,
            Some("tyre".into()),
        )
        .unwrap();
        assert_eq!(
            DetectionWriter::default().write(&record).unwrap(),
            format!("NOMBOINFO/C07/091430ZJUL2024/WGE/{FIX}/12/TYRE/SONAR/N.PNG//")
        );
    }

    #[test]
    fn errors_name_the_record() {
        let mut bad = contact("");
        bad.confidence = 1.5;
        let records = vec![
            record(DetectionCode::Milecrep, ""),
            DetectionRecord::MineLikeContact(bad),
        ];
        let err = DetectionWriter::default().write_all(&records).unwrap_err();
        match err {
            ReportError::Domain { field, .. } => assert_eq!(field, "detection 2 confidence"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
