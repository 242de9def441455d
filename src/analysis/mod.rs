//! Nutrition analysis: per-100g normalization, warnings, score, grade and
//! personalized daily-value projection for one scanned product.
//!
//! [`analyze`] is a pure function of its inputs. Calling it twice with the
//! same record and profile yields identical results.

pub mod advice;
pub mod analyzer;
pub mod grading;
pub mod result;

pub use advice::{Advice, AdviceKind};
pub use analyzer::{analyze, analyze_with_targets};
pub use grading::Grade;
pub use result::{
    AnalysisResult, DailyPercentages, DataQualityNote, Per100g, Recommendations, WarningKind,
};
