//! Static per-profile lookup tables: warning thresholds and daily targets.
//!
//! Both tables hold one literal entry for each of the 32 profile
//! combinations and are indexed by exhaustive `match`, so a lookup can
//! never miss.

pub mod daily_targets;
pub mod thresholds;

pub use daily_targets::{daily_targets_for, DailyTargets};
pub use thresholds::{thresholds_for, ThresholdSet};

use serde::Serialize;

use crate::profile::UserProfile;

/// One flattened row of the combined table, for export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub gender: &'static str,
    pub age_band: &'static str,
    pub activity_level: &'static str,
    pub high_sugar_threshold: f64,
    pub high_carbs_threshold: f64,
    pub low_fiber_threshold: f64,
    pub poor_carb_fiber_ratio_threshold: f64,
    pub daily_calories: f64,
    pub daily_carbs: f64,
    pub daily_sugars: f64,
    pub daily_protein: f64,
    pub daily_fat: f64,
}

impl TableRow {
    pub fn for_profile(profile: &UserProfile) -> Self {
        let limits = thresholds_for(profile);
        let targets = daily_targets_for(profile);
        Self {
            gender: profile.gender.as_str(),
            age_band: profile.age_band.as_str(),
            activity_level: profile.activity_level.as_str(),
            high_sugar_threshold: limits.high_sugar_threshold,
            high_carbs_threshold: limits.high_carbs_threshold,
            low_fiber_threshold: limits.low_fiber_threshold,
            poor_carb_fiber_ratio_threshold: limits.poor_carb_fiber_ratio_threshold,
            daily_calories: targets.calories,
            daily_carbs: targets.carbs,
            daily_sugars: targets.sugars,
            daily_protein: targets.protein,
            daily_fat: targets.fat,
        }
    }
}

pub fn table_rows() -> Vec<TableRow> {
    UserProfile::all().map(|profile| TableRow::for_profile(&profile)).collect()
}

/// Writes the full table as CSV with a header row.
pub fn write_table_csv<W: std::io::Write>(writer: W) -> Result<(), crate::error::BatchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in table_rows() {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
