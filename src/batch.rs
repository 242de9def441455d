//! Batch analysis of many labels from a CSV file.
//!
//! Rows are parsed up front, then analyzed in parallel. A bad row is
//! reported in its summary line and never stops the batch.

use csv::{ReaderBuilder, Writer};
use rayon::prelude::*;
use serde::Serialize;
use std::io::{Read, Write};
use tracing::{info, warn};

use crate::analysis::{analyze, AnalysisResult};
use crate::error::BatchError;
use crate::label::NutritionRecord;
use crate::profile::UserProfile;

#[derive(Debug)]
pub struct BatchOutcome {
    /// 1-based data row number, excluding the header.
    pub row: usize,
    pub product_name: Option<String>,
    pub result: Result<AnalysisResult, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRow<'a> {
    row: usize,
    product_name: &'a str,
    score: Option<f64>,
    grade: Option<&'static str>,
    warnings: String,
    advice: Option<&'a str>,
    error: Option<&'a str>,
}

/// Reads records (header = record field names) and analyzes each for `profile`.
pub fn analyze_csv<R: Read>(reader: R, profile: &UserProfile) -> Result<Vec<BatchOutcome>, BatchError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    // Surface a missing or unreadable header as a whole-batch failure.
    rdr.headers()?;

    let parsed: Vec<(usize, Result<NutritionRecord, String>)> = rdr
        .deserialize::<NutritionRecord>()
        .enumerate()
        .map(|(idx, row)| (idx + 1, row.map_err(|e| e.to_string())))
        .collect();

    let outcomes: Vec<BatchOutcome> = parsed
        .into_par_iter()
        .map(|(row, parsed)| match parsed {
            Ok(record) => BatchOutcome {
                row,
                result: analyze(&record, profile).map_err(|e| e.to_string()),
                product_name: Some(record.product_name),
            },
            Err(message) => BatchOutcome {
                row,
                product_name: None,
                result: Err(message),
            },
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        warn!(failed, total = outcomes.len(), "some batch rows could not be analyzed");
    }
    info!(total = outcomes.len(), "batch analysis finished");
    Ok(outcomes)
}

/// Writes one summary line per outcome.
pub fn write_summary_csv<W: Write>(outcomes: &[BatchOutcome], writer: W) -> Result<(), BatchError> {
    let mut wtr = Writer::from_writer(writer);
    for outcome in outcomes {
        let product_name = outcome.product_name.as_deref().unwrap_or("");
        let row = match &outcome.result {
            Ok(result) => SummaryRow {
                row: outcome.row,
                product_name,
                score: Some((result.score * 10.0).round() / 10.0),
                grade: Some(result.grade.as_str()),
                warnings: result
                    .warnings
                    .iter()
                    .map(|w| w.label_key())
                    .collect::<Vec<_>>()
                    .join(";"),
                advice: Some(result.recommendations.advice.message.as_str()),
                error: None,
            },
            Err(message) => SummaryRow {
                row: outcome.row,
                product_name,
                score: None,
                grade: None,
                warnings: String::new(),
                advice: None,
                error: Some(message.as_str()),
            },
        };
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
