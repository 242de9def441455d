pub mod analysis;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod label;
pub mod profile;
pub mod recommendations;
pub mod report;
pub mod scan_store;

use analysis::AnalysisResult;
use error::NutriscanError;
use label::NutritionRecord;
use profile::UserProfile;

/// Extracts a record from recognized label text and analyzes it for `profile`.
pub fn scan_text(
    raw_text: &str,
    profile: &UserProfile,
) -> Result<(NutritionRecord, AnalysisResult), NutriscanError> {
    let record = label::extract(raw_text)?;
    let result = analysis::analyze(&record, profile)?;
    Ok((record, result))
}
