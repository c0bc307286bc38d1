use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════
// Field specifications (input form contract)
// ═══════════════════════════════════════════════════════════

/// Identifies one of the eight clinical measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigreeFunction,
    Age,
}

impl MeasurementField {
    /// Key used by the prediction service and the export header.
    pub fn wire_key(self) -> &'static str {
        match self {
            Self::Pregnancies => "Pregnancies",
            Self::Glucose => "Glucose",
            Self::BloodPressure => "BloodPressure",
            Self::SkinThickness => "SkinThickness",
            Self::Insulin => "Insulin",
            Self::Bmi => "BMI",
            Self::DiabetesPedigreeFunction => "DiabetesPedigreeFunction",
            Self::Age => "Age",
        }
    }
}

impl std::fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_key())
    }
}

/// Range, default and display label for one measurement field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub field: MeasurementField,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Whole numbers only (pregnancy count, age).
    pub integral: bool,
}

impl FieldSpec {
    pub fn allowed_range(&self) -> AllowedRange {
        AllowedRange {
            min: self.min,
            max: self.max,
        }
    }

    fn check(&self, value: f64) -> Result<(), ValidationError> {
        let issue = if !value.is_finite() {
            Some(ValidationIssue::NotFinite)
        } else if value < self.min || value > self.max {
            Some(ValidationIssue::OutOfRange)
        } else if self.integral && value.fract() != 0.0 {
            Some(ValidationIssue::NotWholeNumber)
        } else {
            None
        };

        match issue {
            Some(issue) => Err(ValidationError {
                field: self.field,
                value,
                allowed_range: self.allowed_range(),
                issue,
            }),
            None => Ok(()),
        }
    }
}

/// All measurement fields in declaration order. The order drives
/// validation, the wire body and the export columns.
pub static FIELD_SPECS: [FieldSpec; 8] = [
    FieldSpec {
        field: MeasurementField::Pregnancies,
        label: "Pregnancies",
        min: 0.0,
        max: 20.0,
        default: 1.0,
        integral: true,
    },
    FieldSpec {
        field: MeasurementField::Glucose,
        label: "Glucose Level",
        min: 0.0,
        max: 300.0,
        default: 120.0,
        integral: false,
    },
    FieldSpec {
        field: MeasurementField::BloodPressure,
        label: "Blood Pressure (mm Hg)",
        min: 0.0,
        max: 150.0,
        default: 70.0,
        integral: false,
    },
    FieldSpec {
        field: MeasurementField::SkinThickness,
        label: "Skin Thickness (mm)",
        min: 0.0,
        max: 100.0,
        default: 20.0,
        integral: false,
    },
    FieldSpec {
        field: MeasurementField::Insulin,
        label: "Insulin (mu U/ml)",
        min: 0.0,
        max: 900.0,
        default: 85.0,
        integral: false,
    },
    FieldSpec {
        field: MeasurementField::Bmi,
        label: "BMI",
        min: 0.0,
        max: 70.0,
        default: 28.0,
        integral: false,
    },
    FieldSpec {
        field: MeasurementField::DiabetesPedigreeFunction,
        label: "Diabetes Pedigree Function",
        min: 0.0,
        max: 3.0,
        default: 0.5,
        integral: false,
    },
    FieldSpec {
        field: MeasurementField::Age,
        label: "Age",
        min: 1.0,
        max: 120.0,
        default: 35.0,
        integral: true,
    },
];

/// Look up the spec for a field.
pub fn field_spec(field: MeasurementField) -> &'static FieldSpec {
    // FIELD_SPECS is indexed in enum declaration order
    &FIELD_SPECS[field as usize]
}

// ═══════════════════════════════════════════════════════════
// Raw input → validated measurement
// ═══════════════════════════════════════════════════════════

/// Unvalidated form submission, keyed like the prediction service body.
///
/// Every key is required; a partial record fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    #[serde(rename = "Pregnancies")]
    pub pregnancies: f64,
    #[serde(rename = "Glucose")]
    pub glucose: f64,
    #[serde(rename = "BloodPressure")]
    pub blood_pressure: f64,
    #[serde(rename = "SkinThickness")]
    pub skin_thickness: f64,
    #[serde(rename = "Insulin")]
    pub insulin: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree: f64,
    #[serde(rename = "Age")]
    pub age: f64,
}

impl MeasurementInput {
    /// Raw value for a field.
    pub fn value(&self, field: MeasurementField) -> f64 {
        match field {
            MeasurementField::Pregnancies => self.pregnancies,
            MeasurementField::Glucose => self.glucose,
            MeasurementField::BloodPressure => self.blood_pressure,
            MeasurementField::SkinThickness => self.skin_thickness,
            MeasurementField::Insulin => self.insulin,
            MeasurementField::Bmi => self.bmi,
            MeasurementField::DiabetesPedigreeFunction => self.diabetes_pedigree,
            MeasurementField::Age => self.age,
        }
    }

    /// Check every field against its spec, in declaration order.
    /// Returns the first violation.
    pub fn validate(&self) -> Result<PatientMeasurement, ValidationError> {
        for spec in &FIELD_SPECS {
            spec.check(self.value(spec.field))?;
        }

        Ok(PatientMeasurement {
            pregnancies: self.pregnancies as u32,
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            skin_thickness: self.skin_thickness,
            insulin: self.insulin,
            bmi: self.bmi,
            diabetes_pedigree: self.diabetes_pedigree,
            age: self.age as u32,
        })
    }
}

impl Default for MeasurementInput {
    /// Form defaults shown before the user edits anything.
    fn default() -> Self {
        let d = |field| field_spec(field).default;
        Self {
            pregnancies: d(MeasurementField::Pregnancies),
            glucose: d(MeasurementField::Glucose),
            blood_pressure: d(MeasurementField::BloodPressure),
            skin_thickness: d(MeasurementField::SkinThickness),
            insulin: d(MeasurementField::Insulin),
            bmi: d(MeasurementField::Bmi),
            diabetes_pedigree: d(MeasurementField::DiabetesPedigreeFunction),
            age: d(MeasurementField::Age),
        }
    }
}

/// Validated patient measurements. Only obtainable through
/// [`MeasurementInput::validate`], so every value is within range.
///
/// Serializes to the request body expected by `/predict` and `/explain`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientMeasurement {
    #[serde(rename = "Pregnancies")]
    pregnancies: u32,
    #[serde(rename = "Glucose")]
    glucose: f64,
    #[serde(rename = "BloodPressure")]
    blood_pressure: f64,
    #[serde(rename = "SkinThickness")]
    skin_thickness: f64,
    #[serde(rename = "Insulin")]
    insulin: f64,
    #[serde(rename = "BMI")]
    bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    diabetes_pedigree: f64,
    #[serde(rename = "Age")]
    age: u32,
}

impl PatientMeasurement {
    pub fn pregnancies(&self) -> u32 {
        self.pregnancies
    }

    pub fn glucose(&self) -> f64 {
        self.glucose
    }

    pub fn blood_pressure(&self) -> f64 {
        self.blood_pressure
    }

    pub fn skin_thickness(&self) -> f64 {
        self.skin_thickness
    }

    pub fn insulin(&self) -> f64 {
        self.insulin
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn diabetes_pedigree(&self) -> f64 {
        self.diabetes_pedigree
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Field values as text, in declaration order (export row).
    pub fn to_record(&self) -> [String; 8] {
        [
            self.pregnancies.to_string(),
            self.glucose.to_string(),
            self.blood_pressure.to_string(),
            self.skin_thickness.to_string(),
            self.insulin.to_string(),
            self.bmi.to_string(),
            self.diabetes_pedigree.to_string(),
            self.age.to_string(),
        ]
    }
}

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Inclusive numeric bounds of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllowedRange {
    pub min: f64,
    pub max: f64,
}

impl std::fmt::Display for AllowedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    OutOfRange,
    NotWholeNumber,
    NotFinite,
}

/// A field value rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("{field} value {value} is invalid ({issue:?}); allowed range {allowed_range}")]
pub struct ValidationError {
    pub field: MeasurementField,
    pub value: f64,
    pub allowed_range: AllowedRange,
    pub issue: ValidationIssue,
}
