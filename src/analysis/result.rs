use serde::{Deserialize, Serialize};

use super::advice::Advice;
use super::grading::Grade;
use crate::recommendations::DailyTargets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    #[serde(rename = "warningHighSugar")]
    HighAddedSugar,
    #[serde(rename = "warningHighCarbs")]
    HighCarbohydrates,
    #[serde(rename = "warningLowFiber")]
    LowFiber,
    #[serde(rename = "warningPoorRatio")]
    PoorCarbFiberRatio,
}

impl WarningKind {
    /// Key into the presentation layer's string tables.
    pub fn label_key(&self) -> &'static str {
        match self {
            WarningKind::HighAddedSugar => "warningHighSugar",
            WarningKind::HighCarbohydrates => "warningHighCarbs",
            WarningKind::LowFiber => "warningLowFiber",
            WarningKind::PoorCarbFiberRatio => "warningPoorRatio",
        }
    }
}

/// Adjustments made to the input record before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataQualityNote {
    /// Added sugars were estimated from total sugars by the extractor.
    AddedSugarsEstimated,
    /// Added sugars exceeded total sugars and were capped to it.
    AddedSugarsClamped,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Per100g {
    pub calories: f64,
    pub carbs: f64,
    pub sugars: f64,
    pub added_sugars: f64,
    pub fiber: f64,
    pub protein: f64,
    pub fat: f64,
}

impl Per100g {
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("calories", self.calories),
            ("carbs", self.carbs),
            ("sugars", self.sugars),
            ("addedSugars", self.added_sugars),
            ("fiber", self.fiber),
            ("protein", self.protein),
            ("fat", self.fat),
        ]
    }
}

/// Per-serving share of each daily target, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPercentages {
    pub calories: f64,
    pub carbs: f64,
    /// Added sugars against the daily added-sugar limit.
    pub sugars: f64,
    pub protein: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub daily_targets: DailyTargets,
    pub percent_of_daily: DailyPercentages,
    /// `None` when a serving has no carbohydrates, so no count reaches the limit.
    pub servings_to_reach_carb_limit: Option<u32>,
    pub servings_to_reach_sugar_limit: Option<u32>,
    pub advice: Advice,
}

/// Everything derived from one (record, profile) pair.
///
/// Every number in here is finite; degenerate ratios are `None` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: f64,
    pub grade: Grade,
    pub color: String,
    pub warnings: Vec<WarningKind>,
    /// `None` when the product has carbohydrates but no fiber.
    pub carb_fiber_ratio: Option<f64>,
    pub sugar_percentage: f64,
    pub added_sugar_percentage: f64,
    pub per_100g: Per100g,
    pub recommendations: Recommendations,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_quality: Vec<DataQualityNote>,
}

impl AnalysisResult {
    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.contains(&kind)
    }
}
