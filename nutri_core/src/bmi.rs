//! BMI calculation and classification.
//!
//! Field-level range checks run first; the computed value then gets its own
//! plausibility check, since a height typed in centimetres can slip past the
//! weight check and still produce nonsense.

use crate::units::parse_decimal;
use crate::{BmiCategory, BmiResult, Error, Measurement, Result};

/// Exclusive lower / inclusive upper weight bound (kg)
pub const WEIGHT_RANGE_KG: (f64, f64) = (0.0, 500.0);

/// Exclusive lower / inclusive upper height bound (m)
pub const HEIGHT_RANGE_M: (f64, f64) = (0.5, 2.5);

/// Plausible BMI window, both ends inclusive
pub const PLAUSIBLE_BMI: (f64, f64) = (10.0, 100.0);

/// Validate numeric weight and height
pub fn validate(weight_kg: f64, height_m: f64) -> Result<Measurement> {
    if !weight_kg.is_finite() {
        return Err(Error::Missing { field: "weight" });
    }
    if !height_m.is_finite() {
        return Err(Error::Missing { field: "height" });
    }
    if weight_kg <= WEIGHT_RANGE_KG.0 || weight_kg > WEIGHT_RANGE_KG.1 {
        return Err(Error::OutOfRange {
            field: "weight",
            value: weight_kg,
        });
    }
    if height_m <= HEIGHT_RANGE_M.0 || height_m > HEIGHT_RANGE_M.1 {
        return Err(Error::OutOfRange {
            field: "height",
            value: height_m,
        });
    }
    Ok(Measurement {
        weight_kg,
        height_m,
    })
}

impl Measurement {
    /// Build a measurement from typed form fields ("70,5", "1.75")
    pub fn parse(weight: &str, height: &str) -> Result<Self> {
        let weight_kg = parse_decimal("weight", weight)?;
        let height_m = parse_decimal("height", height)?;
        validate(weight_kg, height_m)
    }
}

/// Compute BMI for a validated measurement
///
/// The value is rounded to one decimal before the plausibility check and the
/// classification, so the reported value and its category always agree.
pub fn compute(measurement: &Measurement) -> Result<BmiResult> {
    let raw = measurement.weight_kg / (measurement.height_m * measurement.height_m);
    let value = (raw * 10.0).round() / 10.0;

    if !(PLAUSIBLE_BMI.0..=PLAUSIBLE_BMI.1).contains(&value) {
        tracing::warn!(
            "Implausible BMI {:.2} for {:?}, discarding result",
            raw,
            measurement
        );
        return Err(Error::ImplausibleResult(value));
    }

    let result = BmiResult {
        value,
        category: classify(value),
    };
    tracing::debug!("BMI {:.1} ({:?})", result.value, result.category);
    Ok(result)
}

/// Classify a BMI value (lower bound of each band inclusive)
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::BelowWeight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::ObesityI
    } else if bmi < 40.0 {
        BmiCategory::ObesityII
    } else {
        BmiCategory::ObesityIII
    }
}
