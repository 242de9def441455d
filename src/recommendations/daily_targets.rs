use serde::{Deserialize, Serialize};

use crate::profile::ActivityLevel::*;
use crate::profile::AgeBand::*;
use crate::profile::Gender::*;
use crate::profile::UserProfile;

/// Recommended daily intake for one profile combination.
///
/// `sugars` is the daily limit for added sugars, in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTargets {
    pub calories: f64,
    pub carbs: f64,
    pub sugars: f64,
    pub protein: f64,
    pub fat: f64,
}

const fn d(calories: f64, carbs: f64, sugars: f64, protein: f64, fat: f64) -> DailyTargets {
    DailyTargets { calories, carbs, sugars, protein, fat }
}

/// Columns: kcal, carbs g, added sugars g, protein g, fat g.
pub fn daily_targets_for(profile: &UserProfile) -> DailyTargets {
    match (profile.gender, profile.age_band, profile.activity_level) {
        (Male, Under18, Sedentary) => d(2000.0, 220.0, 26.0, 55.0, 75.0),
        (Male, Under18, Moderate) => d(2300.0, 270.0, 31.0, 55.0, 75.0),
        (Male, Under18, Active) => d(2600.0, 320.0, 36.0, 70.0, 75.0),
        (Male, Under18, Athletic) => d(2900.0, 370.0, 41.0, 85.0, 75.0),
        (Male, Young, Sedentary) => d(2200.0, 250.0, 31.0, 60.0, 75.0),
        (Male, Young, Moderate) => d(2500.0, 300.0, 36.0, 60.0, 75.0),
        (Male, Young, Active) => d(2800.0, 350.0, 41.0, 75.0, 75.0),
        (Male, Young, Athletic) => d(3100.0, 400.0, 46.0, 90.0, 75.0),
        (Male, Middle, Sedentary) => d(2100.0, 230.0, 28.0, 60.0, 75.0),
        (Male, Middle, Moderate) => d(2400.0, 280.0, 33.0, 60.0, 75.0),
        (Male, Middle, Active) => d(2700.0, 330.0, 38.0, 75.0, 75.0),
        (Male, Middle, Athletic) => d(3000.0, 380.0, 43.0, 90.0, 75.0),
        (Male, Older, Sedentary) => d(2000.0, 210.0, 23.0, 60.0, 75.0),
        (Male, Older, Moderate) => d(2300.0, 260.0, 28.0, 60.0, 75.0),
        (Male, Older, Active) => d(2600.0, 310.0, 33.0, 75.0, 75.0),
        (Male, Older, Athletic) => d(2900.0, 360.0, 38.0, 90.0, 75.0),
        (Female, Under18, Sedentary) => d(1500.0, 170.0, 20.0, 45.0, 65.0),
        (Female, Under18, Moderate) => d(1800.0, 220.0, 25.0, 45.0, 65.0),
        (Female, Under18, Active) => d(2100.0, 270.0, 30.0, 60.0, 65.0),
        (Female, Under18, Athletic) => d(2400.0, 320.0, 35.0, 75.0, 65.0),
        (Female, Young, Sedentary) => d(1700.0, 200.0, 25.0, 50.0, 65.0),
        (Female, Young, Moderate) => d(2000.0, 250.0, 30.0, 50.0, 65.0),
        (Female, Young, Active) => d(2300.0, 300.0, 35.0, 65.0, 65.0),
        (Female, Young, Athletic) => d(2600.0, 350.0, 40.0, 80.0, 65.0),
        (Female, Middle, Sedentary) => d(1600.0, 180.0, 22.0, 50.0, 65.0),
        (Female, Middle, Moderate) => d(1900.0, 230.0, 27.0, 50.0, 65.0),
        (Female, Middle, Active) => d(2200.0, 280.0, 32.0, 65.0, 65.0),
        (Female, Middle, Athletic) => d(2500.0, 330.0, 37.0, 80.0, 65.0),
        (Female, Older, Sedentary) => d(1500.0, 160.0, 17.0, 50.0, 65.0),
        (Female, Older, Moderate) => d(1800.0, 210.0, 22.0, 50.0, 65.0),
        (Female, Older, Active) => d(2100.0, 260.0, 27.0, 65.0, 65.0),
        (Female, Older, Athletic) => d(2400.0, 310.0, 32.0, 80.0, 65.0),
    }
}
