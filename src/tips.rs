//! Rule-based health tips derived from the raw measurements.
//!
//! Rules are plain data evaluated in table order. The order is visible
//! to users (display and export), so new rules go at the end.

use crate::models::PatientMeasurement;

pub const GLUCOSE_TIP: &str =
    "Your glucose level is high. Cut back on sugary foods and drinks and monitor your blood glucose regularly.";
pub const BMI_TIP: &str =
    "Your BMI is above 30. Aim for at least 30 minutes of physical activity on most days.";
pub const INSULIN_TIP: &str =
    "Your insulin level is low, which can be a sign of insulin resistance. Consider consulting a healthcare provider.";
pub const AGE_TIP: &str =
    "You are over 45. Regular diabetes screening is recommended for your age group.";
pub const HEALTHY_TIP: &str =
    "Your measurements are within a healthy range. Keep up your healthy habits!";

/// One advisory rule: a predicate on the measurement and its message.
pub struct TipRule {
    pub name: &'static str,
    pub applies: fn(&PatientMeasurement) -> bool,
    pub message: &'static str,
}

pub const TIP_RULES: [TipRule; 4] = [
    TipRule {
        name: "glucose",
        applies: |m| m.glucose() > 150.0,
        message: GLUCOSE_TIP,
    },
    TipRule {
        name: "bmi",
        applies: |m| m.bmi() > 30.0,
        message: BMI_TIP,
    },
    TipRule {
        name: "insulin",
        applies: |m| m.insulin() < 50.0,
        message: INSULIN_TIP,
    },
    TipRule {
        name: "age",
        applies: |m| m.age() > 45,
        message: AGE_TIP,
    },
];

/// Tips for every rule that fires, in rule order. Falls back to a single
/// healthy-range tip when none fire.
pub fn derive_tips(measurement: &PatientMeasurement) -> Vec<String> {
    let tips: Vec<String> = TIP_RULES
        .iter()
        .filter(|rule| (rule.applies)(measurement))
        .map(|rule| rule.message.to_string())
        .collect();

    if tips.is_empty() {
        vec![HEALTHY_TIP.to_string()]
    } else {
        tips
    }
}
