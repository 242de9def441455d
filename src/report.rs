use serde::Serialize;
use std::fmt;

use crate::analysis::{AnalysisResult, DataQualityNote};
use crate::label::NutritionRecord;
use crate::profile::UserProfile;

/// JSON shape printed by `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport<'a> {
    pub profile: &'a UserProfile,
    pub record: &'a NutritionRecord,
    pub analysis: &'a AnalysisResult,
}

fn servings_text(servings: Option<u32>) -> String {
    match servings {
        Some(n) => n.to_string(),
        None => "no limit".to_string(),
    }
}

/// Plain-text report for the terminal.
pub struct TextReport<'a> {
    pub profile: &'a UserProfile,
    pub record: &'a NutritionRecord,
    pub analysis: &'a AnalysisResult,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (profile, record, result) = (self.profile, self.record, self.analysis);
        let recs = &result.recommendations;
        writeln!(f, "{} ({})", record.product_name, record.serving_size)?;
        writeln!(
            f,
            "Profile: {} / {} / {}",
            profile.gender.as_str(),
            profile.age_band.as_str(),
            profile.activity_level.as_str()
        )?;
        writeln!(f, "Grade {}  score {:.0}/100  [{}]", result.grade, result.score, result.color)?;

        if result.warnings.is_empty() {
            writeln!(f, "Warnings: none")?;
        } else {
            let keys: Vec<&str> = result.warnings.iter().map(|w| w.label_key()).collect();
            writeln!(f, "Warnings: {}", keys.join(", "))?;
        }

        match result.carb_fiber_ratio {
            Some(ratio) => writeln!(f, "Carb-to-fiber ratio: {ratio:.1}:1")?,
            None => writeln!(f, "Carb-to-fiber ratio: n/a (no fiber)")?,
        }
        writeln!(f, "Added sugar share of carbs: {:.1}%", result.added_sugar_percentage)?;

        writeln!(f, "Per 100g:")?;
        for (name, value) in result.per_100g.entries() {
            writeln!(f, "  {name:<12} {value:>8.1}")?;
        }

        let pct = &recs.percent_of_daily;
        writeln!(f, "Percent of daily intake per serving:")?;
        writeln!(f, "  calories {:.1}%  carbs {:.1}%  added sugars {:.1}%", pct.calories, pct.carbs, pct.sugars)?;
        writeln!(f, "  protein {:.1}%  fat {:.1}%", pct.protein, pct.fat)?;
        writeln!(
            f,
            "Servings to daily limit: carbs {}, added sugars {}",
            servings_text(recs.servings_to_reach_carb_limit),
            servings_text(recs.servings_to_reach_sugar_limit)
        )?;

        for note in &result.data_quality {
            let text = match note {
                DataQualityNote::AddedSugarsEstimated => "added sugars estimated from total sugars",
                DataQualityNote::AddedSugarsClamped => "added sugars capped at total sugars",
            };
            writeln!(f, "Note: {text}")?;
        }

        writeln!(f)?;
        writeln!(f, "{}", recs.advice.message)
    }
}

pub fn render_text(profile: &UserProfile, record: &NutritionRecord, result: &AnalysisResult) -> String {
    TextReport { profile, record, analysis: result }.to_string()
}
