use serde::{Deserialize, Serialize};

use crate::profile::ActivityLevel::*;
use crate::profile::AgeBand::*;
use crate::profile::Gender::*;
use crate::profile::UserProfile;

/// Per-100g warning limits for one profile combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdSet {
    /// Added sugars above this many grams per 100g trigger a warning.
    pub high_sugar_threshold: f64,
    pub high_carbs_threshold: f64,
    /// Fiber below this many grams per 100g triggers a warning.
    pub low_fiber_threshold: f64,
    pub poor_carb_fiber_ratio_threshold: f64,
}

const fn t(high_sugar: f64, high_carbs: f64, low_fiber: f64, poor_ratio: f64) -> ThresholdSet {
    ThresholdSet {
        high_sugar_threshold: high_sugar,
        high_carbs_threshold: high_carbs,
        low_fiber_threshold: low_fiber,
        poor_carb_fiber_ratio_threshold: poor_ratio,
    }
}

/// Columns: high sugar, high carbs, low fiber, poor carb/fiber ratio.
pub fn thresholds_for(profile: &UserProfile) -> ThresholdSet {
    match (profile.gender, profile.age_band, profile.activity_level) {
        (Male, Under18, Sedentary) => t(6.0, 43.0, 3.0, 10.0),
        (Male, Under18, Moderate) => t(8.0, 48.0, 3.0, 10.0),
        (Male, Under18, Active) => t(10.0, 56.0, 3.0, 10.0),
        (Male, Under18, Athletic) => t(12.0, 63.0, 3.0, 10.0),
        (Male, Young, Sedentary) => t(10.0, 45.0, 3.0, 10.0),
        (Male, Young, Moderate) => t(12.0, 50.0, 3.0, 10.0),
        (Male, Young, Active) => t(14.0, 58.0, 3.0, 10.0),
        (Male, Young, Athletic) => t(16.0, 65.0, 3.0, 10.0),
        (Male, Middle, Sedentary) => t(9.0, 43.0, 3.0, 10.0),
        (Male, Middle, Moderate) => t(11.0, 48.0, 3.0, 10.0),
        (Male, Middle, Active) => t(13.0, 56.0, 3.0, 10.0),
        (Male, Middle, Athletic) => t(15.0, 63.0, 3.0, 10.0),
        (Male, Older, Sedentary) => t(7.0, 40.0, 3.0, 8.0),
        (Male, Older, Moderate) => t(9.0, 45.0, 3.0, 8.0),
        (Male, Older, Active) => t(11.0, 53.0, 3.0, 8.0),
        (Male, Older, Athletic) => t(13.0, 60.0, 3.0, 8.0),
        (Female, Under18, Sedentary) => t(4.0, 38.0, 3.0, 10.0),
        (Female, Under18, Moderate) => t(6.0, 43.0, 3.0, 10.0),
        (Female, Under18, Active) => t(8.0, 51.0, 3.0, 10.0),
        (Female, Under18, Athletic) => t(10.0, 58.0, 3.0, 10.0),
        (Female, Young, Sedentary) => t(8.0, 40.0, 3.0, 10.0),
        (Female, Young, Moderate) => t(10.0, 45.0, 3.0, 10.0),
        (Female, Young, Active) => t(12.0, 53.0, 3.0, 10.0),
        (Female, Young, Athletic) => t(14.0, 60.0, 3.0, 10.0),
        (Female, Middle, Sedentary) => t(7.0, 38.0, 3.0, 10.0),
        (Female, Middle, Moderate) => t(9.0, 43.0, 3.0, 10.0),
        (Female, Middle, Active) => t(11.0, 51.0, 3.0, 10.0),
        (Female, Middle, Athletic) => t(13.0, 58.0, 3.0, 10.0),
        (Female, Older, Sedentary) => t(5.0, 35.0, 3.0, 8.0),
        (Female, Older, Moderate) => t(7.0, 40.0, 3.0, 8.0),
        (Female, Older, Active) => t(9.0, 48.0, 3.0, 8.0),
        (Female, Older, Athletic) => t(11.0, 55.0, 3.0, 8.0),
    }
}
