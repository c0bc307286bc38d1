//! CSV export of the stored assessment.

use crate::models::{RiskAssessment, FIELD_SPECS};
use crate::session_state::{SessionState, SessionStateError};

/// Suggested file name for the download.
pub const EXPORT_FILE_NAME: &str = "diabetes_risk_assessment.csv";

/// Header row: measurement fields in declaration order, then the
/// prediction code and probability.
pub fn export_header() -> Vec<&'static str> {
    FIELD_SPECS
        .iter()
        .map(|spec| spec.field.wire_key())
        .chain(["Prediction", "Probability"])
        .collect()
}

/// Serialize one assessment as CSV (header + one row).
pub fn to_table(assessment: &RiskAssessment) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(export_header())?;

    let mut row: Vec<String> = assessment.measurement.to_record().to_vec();
    row.push(assessment.prediction.label.code().to_string());
    row.push(assessment.prediction.probability.to_string());
    writer.write_record(&row)?;

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

/// Export whatever the session currently holds.
pub fn export_latest(session: &SessionState) -> Result<Vec<u8>, ExportError> {
    let assessment = session.get()?.ok_or(ExportError::NothingToExport)?;
    let bytes = to_table(&assessment)?;
    tracing::info!(assessment_id = %assessment.id, bytes = bytes.len(), "Assessment exported");
    Ok(bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No assessment to export; submit the form first")]
    NothingToExport,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session error: {0}")]
    Session(#[from] SessionStateError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeasurementInput, PredictionLabel, PredictionResult};

    fn assessment() -> RiskAssessment {
        let measurement = MeasurementInput {
            pregnancies: 6.0,
            glucose: 148.0,
            blood_pressure: 72.0,
            skin_thickness: 35.0,
            insulin: 0.0,
            bmi: 33.6,
            diabetes_pedigree: 0.627,
            age: 50.0,
        }
        .validate()
        .unwrap();
        RiskAssessment::new(
            measurement,
            PredictionResult {
                label: PredictionLabel::Diabetic,
                probability: 0.78,
            },
            Some("Glucose, BMI and age raised the score.".into()),
        )
    }

    fn lines(bytes: &[u8]) -> Vec<String> {
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn header_matches_declared_columns() {
        assert_eq!(
            export_header().join(","),
            "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Prediction,Probability"
        );
    }

    #[test]
    fn table_has_header_and_one_row() {
        let bytes = to_table(&assessment()).unwrap();
        let lines = lines(&bytes);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], export_header().join(","));
        assert_eq!(lines[1], "6,148,72,35,0,33.6,0.627,50,1,0.78");
    }

    #[test]
    fn row_column_count_equals_header_count() {
        let bytes = to_table(&assessment()).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let header_len = reader.headers().unwrap().len();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), header_len);
        assert_eq!(header_len, 10);
    }

    #[test]
    fn empty_session_has_nothing_to_export() {
        let session = SessionState::new();
        let err = export_latest(&session).unwrap_err();
        assert!(matches!(err, ExportError::NothingToExport));
    }

    #[test]
    fn export_latest_uses_stored_assessment() {
        let session = SessionState::new();
        let stored = assessment();
        session.store(stored.clone()).unwrap();

        let bytes = export_latest(&session).unwrap();
        assert_eq!(bytes, to_table(&stored).unwrap());
    }
}
