use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::error::AnalysisError;

/// Serving size used when the label does not state one.
pub const DEFAULT_SERVING_SIZE: &str = "100g";

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

static SERVING_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+(?:\.[0-9]+)?)\s*([A-Za-z]*)").unwrap());

/// One scanned product, as printed on its label (per serving).
///
/// Field names serialize exactly as stored under the `lastScan` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRecord {
    pub product_name: String,
    pub serving_size: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub total_fat: f64,
    #[serde(default)]
    pub saturated_fat: f64,
    #[serde(default)]
    pub carbohydrates: f64,
    #[serde(default)]
    pub sugars: f64,
    #[serde(default)]
    pub added_sugars: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub protein: f64,
    /// Milligrams.
    #[serde(default)]
    pub sodium: f64,
    /// Set when `added_sugars` was estimated from total sugars rather than read.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub added_sugars_estimated: bool,
}

impl Default for NutritionRecord {
    fn default() -> Self {
        Self {
            product_name: UNKNOWN_PRODUCT.to_string(),
            serving_size: DEFAULT_SERVING_SIZE.to_string(),
            calories: 0.0,
            total_fat: 0.0,
            saturated_fat: 0.0,
            carbohydrates: 0.0,
            sugars: 0.0,
            added_sugars: 0.0,
            fiber: 0.0,
            protein: 0.0,
            sodium: 0.0,
            added_sugars_estimated: false,
        }
    }
}

impl NutritionRecord {
    /// The demo product shown when no camera frame is available.
    pub fn sample() -> Self {
        Self {
            product_name: "Chocolate Cereal".to_string(),
            serving_size: "30g".to_string(),
            calories: 120.0,
            total_fat: 2.5,
            saturated_fat: 1.2,
            carbohydrates: 22.0,
            sugars: 8.0,
            added_sugars: 7.0,
            fiber: 1.5,
            protein: 3.0,
            sodium: 180.0,
            added_sugars_estimated: false,
        }
    }

    pub fn nutrients(&self) -> [(&'static str, f64); 9] {
        [
            ("calories", self.calories),
            ("totalFat", self.total_fat),
            ("saturatedFat", self.saturated_fat),
            ("carbohydrates", self.carbohydrates),
            ("sugars", self.sugars),
            ("addedSugars", self.added_sugars),
            ("fiber", self.fiber),
            ("protein", self.protein),
            ("sodium", self.sodium),
        ]
    }

    /// Checks that every nutrient is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (field, value) in self.nutrients() {
            if !value.is_finite() {
                return Err(AnalysisError::NonFiniteNutrient { field });
            }
            if value < 0.0 {
                return Err(AnalysisError::NegativeNutrient { field, value });
            }
        }
        Ok(())
    }

    pub fn parsed_serving_size(&self) -> Result<ServingSize, AnalysisError> {
        ServingSize::parse(&self.serving_size)
    }
}

/// Numeric magnitude and unit of a label's serving size, e.g. `30g`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServingSize {
    pub amount: f64,
    pub unit: String,
}

impl ServingSize {
    /// Reads the leading magnitude; the unit is kept for display only and
    /// the amount is treated as grams.
    pub fn parse(raw: &str) -> Result<Self, AnalysisError> {
        let invalid = || AnalysisError::InvalidServingSize(raw.to_string());
        let caps = SERVING_SIZE_RE.captures(raw).ok_or_else(invalid)?;
        let amount: f64 = caps[1].parse().map_err(|_| invalid())?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(invalid());
        }
        Ok(Self {
            amount,
            unit: caps[2].to_lowercase(),
        })
    }

    pub fn grams(&self) -> f64 {
        self.amount
    }
}

impl fmt::Display for ServingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}
