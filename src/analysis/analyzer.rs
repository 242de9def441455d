use tracing::{debug, warn};

use super::advice::{select_advice, AdviceInputs};
use super::grading::Grade;
use super::result::{
    AnalysisResult, DailyPercentages, DataQualityNote, Per100g, Recommendations, WarningKind,
};
use crate::error::AnalysisError;
use crate::label::NutritionRecord;
use crate::profile::UserProfile;
use crate::recommendations::{daily_targets_for, thresholds_for, DailyTargets, ThresholdSet};

pub const STARTING_SCORE: f64 = 100.0;
pub const ADDED_SUGAR_PENALTY_PER_PERCENT: f64 = 2.0;
pub const ADDED_SUGAR_PENALTY_CAP: f64 = 40.0;
/// Carb-to-fiber ratios up to this value cost nothing.
pub const RATIO_PENALTY_FREE_LIMIT: f64 = 5.0;
pub const RATIO_PENALTY_PER_POINT: f64 = 3.0;
pub const RATIO_PENALTY_CAP: f64 = 30.0;
pub const PROTEIN_BONUS_CAP: f64 = 10.0;

/// Intermediate per-100g quality metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QualityMetrics {
    carb_fiber_ratio: Option<f64>,
    sugar_percentage: f64,
    added_sugar_percentage: f64,
}

/// Analyzes `record` against the profile's own daily targets.
pub fn analyze(record: &NutritionRecord, profile: &UserProfile) -> Result<AnalysisResult, AnalysisError> {
    analyze_with_targets(record, profile, &daily_targets_for(profile))
}

/// Analyzes `record` for `profile`, projecting daily values against `targets`.
///
/// Warnings and score are computed per 100g; daily-value percentages and
/// servings-to-limit use the raw per-serving amounts.
pub fn analyze_with_targets(
    record: &NutritionRecord,
    profile: &UserProfile,
    targets: &DailyTargets,
) -> Result<AnalysisResult, AnalysisError> {
    record.validate()?;
    let serving = record.parsed_serving_size()?;

    let mut data_quality = Vec::new();
    if record.added_sugars_estimated {
        data_quality.push(DataQualityNote::AddedSugarsEstimated);
    }
    let added_sugars = if record.added_sugars > record.sugars {
        warn!(
            added_sugars = record.added_sugars,
            sugars = record.sugars,
            "added sugars exceed total sugars, capping"
        );
        data_quality.push(DataQualityNote::AddedSugarsClamped);
        record.sugars
    } else {
        record.added_sugars
    };

    let per_100g = normalize(record, added_sugars, serving.grams())?;
    let metrics = quality_metrics(&per_100g);
    ensure_finite(&[
        ("sugarPercentage", metrics.sugar_percentage),
        ("addedSugarPercentage", metrics.added_sugar_percentage),
    ])?;
    let limits = thresholds_for(profile);
    let warnings = collect_warnings(&per_100g, &metrics, &limits);
    let score = score(&per_100g, &metrics);
    let grade = Grade::from_score(score);

    let percent_of_daily = DailyPercentages {
        calories: percent_of(record.calories, targets.calories),
        carbs: percent_of(record.carbohydrates, targets.carbs),
        sugars: percent_of(added_sugars, targets.sugars),
        protein: percent_of(record.protein, targets.protein),
        fat: percent_of(record.total_fat, targets.fat),
    };
    ensure_finite(&[
        ("percentOfDaily.calories", percent_of_daily.calories),
        ("percentOfDaily.carbs", percent_of_daily.carbs),
        ("percentOfDaily.sugars", percent_of_daily.sugars),
        ("percentOfDaily.protein", percent_of_daily.protein),
        ("percentOfDaily.fat", percent_of_daily.fat),
    ])?;
    let servings_to_reach_carb_limit = servings_until(targets.carbs, record.carbohydrates);
    let servings_to_reach_sugar_limit = servings_until(targets.sugars, added_sugars);

    let advice = select_advice(&AdviceInputs {
        product_name: &record.product_name,
        profile,
        percent_of_daily: &percent_of_daily,
        servings_to_reach_carb_limit,
        carb_fiber_ratio: metrics.carb_fiber_ratio,
        has_carbs: per_100g.carbs > 0.0,
    });

    debug!(
        product = %record.product_name,
        score,
        grade = grade.as_str(),
        warnings = warnings.len(),
        advice = ?advice.kind,
        "analysis complete"
    );

    Ok(AnalysisResult {
        score,
        grade,
        color: grade.color().to_string(),
        warnings,
        carb_fiber_ratio: metrics.carb_fiber_ratio,
        sugar_percentage: metrics.sugar_percentage,
        added_sugar_percentage: metrics.added_sugar_percentage,
        per_100g,
        recommendations: Recommendations {
            daily_targets: *targets,
            percent_of_daily,
            servings_to_reach_carb_limit,
            servings_to_reach_sugar_limit,
            advice,
        },
        data_quality,
    })
}

fn normalize(record: &NutritionRecord, added_sugars: f64, serving_grams: f64) -> Result<Per100g, AnalysisError> {
    let factor = 100.0 / serving_grams;
    let per_100g = Per100g {
        calories: record.calories * factor,
        carbs: record.carbohydrates * factor,
        sugars: record.sugars * factor,
        added_sugars: added_sugars * factor,
        fiber: record.fiber * factor,
        protein: record.protein * factor,
        fat: record.total_fat * factor,
    };
    // A tiny serving can push a large label value past f64 range.
    ensure_finite(&per_100g.entries())?;
    Ok(per_100g)
}

/// Rejects the first derived value that left f64 range.
fn ensure_finite(values: &[(&'static str, f64)]) -> Result<(), AnalysisError> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(field, _)) => Err(AnalysisError::NonFiniteNutrient { field }),
        None => Ok(()),
    }
}

fn quality_metrics(per_100g: &Per100g) -> QualityMetrics {
    let carb_fiber_ratio = if per_100g.fiber > 0.0 {
        Some(per_100g.carbs / per_100g.fiber).filter(|ratio| ratio.is_finite())
    } else if per_100g.carbs > 0.0 {
        None
    } else {
        Some(0.0)
    };
    QualityMetrics {
        carb_fiber_ratio,
        sugar_percentage: share_of_carbs(per_100g.sugars, per_100g.carbs),
        added_sugar_percentage: share_of_carbs(per_100g.added_sugars, per_100g.carbs),
    }
}

fn share_of_carbs(part: f64, carbs: f64) -> f64 {
    if carbs > 0.0 {
        part / carbs * 100.0
    } else {
        0.0
    }
}

/// An unbounded ratio (carbs without fiber) counts as exceeding any limit.
fn ratio_exceeds(ratio: Option<f64>, limit: f64) -> bool {
    ratio.map_or(true, |ratio| ratio > limit)
}

fn collect_warnings(per_100g: &Per100g, metrics: &QualityMetrics, limits: &ThresholdSet) -> Vec<WarningKind> {
    let mut warnings = Vec::with_capacity(4);
    if per_100g.added_sugars > limits.high_sugar_threshold {
        warnings.push(WarningKind::HighAddedSugar);
    }
    if per_100g.carbs > limits.high_carbs_threshold {
        warnings.push(WarningKind::HighCarbohydrates);
    }
    if per_100g.fiber < limits.low_fiber_threshold {
        warnings.push(WarningKind::LowFiber);
    }
    if ratio_exceeds(metrics.carb_fiber_ratio, limits.poor_carb_fiber_ratio_threshold) {
        warnings.push(WarningKind::PoorCarbFiberRatio);
    }
    warnings
}

fn score(per_100g: &Per100g, metrics: &QualityMetrics) -> f64 {
    let sugar_penalty =
        (metrics.added_sugar_percentage * ADDED_SUGAR_PENALTY_PER_PERCENT).min(ADDED_SUGAR_PENALTY_CAP);
    let ratio_penalty = match metrics.carb_fiber_ratio {
        Some(ratio) => ((ratio - RATIO_PENALTY_FREE_LIMIT).max(0.0) * RATIO_PENALTY_PER_POINT).min(RATIO_PENALTY_CAP),
        None => RATIO_PENALTY_CAP,
    };
    let protein_bonus = per_100g.protein.min(PROTEIN_BONUS_CAP);
    (STARTING_SCORE - sugar_penalty - ratio_penalty + protein_bonus).clamp(0.0, 100.0)
}

/// Percent of `target` covered by `value`; zero when the target is not positive.
fn percent_of(value: f64, target: f64) -> f64 {
    if target > 0.0 {
        value / target * 100.0
    } else {
        0.0
    }
}

/// Whole servings that fit under `limit`; `None` when a serving contributes nothing.
fn servings_until(limit: f64, per_serving: f64) -> Option<u32> {
    if per_serving > 0.0 {
        // Float-to-int casts saturate, so huge counts stay representable.
        Some((limit / per_serving).floor() as u32)
    } else {
        None
    }
}
