use serde::{Deserialize, Serialize};

use super::result::DailyPercentages;
use crate::profile::UserProfile;

/// Percent of the daily carb target in one serving above which carbs lead the advice.
pub const CARB_HEAVY_PERCENT: f64 = 30.0;
/// Percent of the daily added-sugar limit in one serving above which sugar leads the advice.
pub const SUGAR_HEAVY_PERCENT: f64 = 25.0;
/// Carb-to-fiber ratio above which the product is called out for poor carb quality.
pub const POOR_RATIO_ADVICE_LIMIT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdviceKind {
    CarbHeavyActive,
    CarbHeavy,
    SugarHeavySenior,
    SugarHeavyYoungInactive,
    SugarHeavy,
    PoorRatio,
    BalancedActive,
    BalancedSenior,
    Balanced,
}

/// The single personalized message produced for an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub kind: AdviceKind,
    pub message: String,
}

pub(crate) struct AdviceInputs<'a> {
    pub product_name: &'a str,
    pub profile: &'a UserProfile,
    pub percent_of_daily: &'a DailyPercentages,
    pub servings_to_reach_carb_limit: Option<u32>,
    pub carb_fiber_ratio: Option<f64>,
    pub has_carbs: bool,
}

impl AdviceInputs<'_> {
    fn poor_ratio(&self) -> bool {
        match self.carb_fiber_ratio {
            Some(ratio) => ratio > POOR_RATIO_ADVICE_LIMIT,
            None => self.has_carbs,
        }
    }
}

/// First matching rule wins: carbs, then added sugars, then carb quality,
/// then a balanced message.
pub(crate) fn select_advice(inputs: &AdviceInputs<'_>) -> Advice {
    let profile = inputs.profile;
    let pct = inputs.percent_of_daily;

    if pct.carbs > CARB_HEAVY_PERCENT {
        if profile.is_active() {
            return Advice {
                kind: AdviceKind::CarbHeavyActive,
                message: format!(
                    "This {} provides {:.0}% of your daily carbohydrate needs, which is suitable for your active lifestyle.",
                    inputs.product_name, pct.carbs
                ),
            };
        }
        let limit = match inputs.servings_to_reach_carb_limit {
            Some(servings) => format!("Consider limiting to {servings} servings daily."),
            None => "Consider limiting how often you eat it.".to_string(),
        };
        return Advice {
            kind: AdviceKind::CarbHeavy,
            message: format!(
                "This {} provides {:.0}% of your daily carbohydrate needs. {}",
                inputs.product_name, pct.carbs, limit
            ),
        };
    }

    if pct.sugars > SUGAR_HEAVY_PERCENT {
        let (kind, message) = if profile.is_senior() {
            (
                AdviceKind::SugarHeavySenior,
                format!(
                    "This product is high in added sugars ({:.0}% of your daily limit). For your age profile, consider lower-sugar alternatives.",
                    pct.sugars
                ),
            )
        } else if profile.is_young() && !profile.is_active() {
            (
                AdviceKind::SugarHeavyYoungInactive,
                format!(
                    "This product contains {:.0}% of your daily added sugar limit, which is relatively high.",
                    pct.sugars
                ),
            )
        } else {
            (
                AdviceKind::SugarHeavy,
                format!("This product contains {:.0}% of your daily added sugar limit.", pct.sugars),
            )
        };
        return Advice { kind, message };
    }

    if inputs.poor_ratio() {
        let ratio = match inputs.carb_fiber_ratio {
            Some(ratio) => format!("{ratio:.1}:1"),
            None => "no fiber".to_string(),
        };
        return Advice {
            kind: AdviceKind::PoorRatio,
            message: format!(
                "This product has a poor carb-to-fiber ratio ({ratio}). Consider pairing with high-fiber foods."
            ),
        };
    }

    if profile.is_active() {
        Advice {
            kind: AdviceKind::BalancedActive,
            message: "This product is a good choice for your active lifestyle, providing balanced nutrition.".to_string(),
        }
    } else if profile.is_senior() {
        Advice {
            kind: AdviceKind::BalancedSenior,
            message: "This product is generally appropriate for your nutritional needs.".to_string(),
        }
    } else {
        Advice {
            kind: AdviceKind::Balanced,
            message: "This product fits well within your daily nutritional requirements.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ActivityLevel, AgeBand, Gender};

    fn inputs<'a>(
        profile: &'a UserProfile,
        pct: &'a DailyPercentages,
        ratio: Option<f64>,
    ) -> AdviceInputs<'a> {
        AdviceInputs {
            product_name: "Granola",
            profile,
            percent_of_daily: pct,
            servings_to_reach_carb_limit: Some(3),
            carb_fiber_ratio: ratio,
            has_carbs: true,
        }
    }

    #[test]
    fn test_carbs_take_precedence_over_sugar_and_ratio() {
        let profile = UserProfile::new(Gender::Female, AgeBand::Middle, ActivityLevel::Sedentary);
        let pct = DailyPercentages { carbs: 35.0, sugars: 80.0, ..Default::default() };
        let advice = select_advice(&inputs(&profile, &pct, Some(40.0)));
        assert_eq!(advice.kind, AdviceKind::CarbHeavy);
        assert_eq!(
            advice.message,
            "This Granola provides 35% of your daily carbohydrate needs. Consider limiting to 3 servings daily."
        );
    }

    #[test]
    fn test_carb_heavy_for_active_profile() {
        let profile = UserProfile::new(Gender::Male, AgeBand::Young, ActivityLevel::Athletic);
        let pct = DailyPercentages { carbs: 31.0, ..Default::default() };
        assert_eq!(select_advice(&inputs(&profile, &pct, None)).kind, AdviceKind::CarbHeavyActive);
    }

    #[test]
    fn test_sugar_variants_by_profile() {
        let pct = DailyPercentages { carbs: 10.0, sugars: 26.0, ..Default::default() };

        let senior = UserProfile::new(Gender::Male, AgeBand::Older, ActivityLevel::Athletic);
        assert_eq!(select_advice(&inputs(&senior, &pct, None)).kind, AdviceKind::SugarHeavySenior);

        let young = UserProfile::new(Gender::Female, AgeBand::Under18, ActivityLevel::Moderate);
        assert_eq!(select_advice(&inputs(&young, &pct, None)).kind, AdviceKind::SugarHeavyYoungInactive);

        let young_active = UserProfile::new(Gender::Female, AgeBand::Young, ActivityLevel::Active);
        assert_eq!(select_advice(&inputs(&young_active, &pct, None)).kind, AdviceKind::SugarHeavy);

        let middle = UserProfile::new(Gender::Male, AgeBand::Middle, ActivityLevel::Sedentary);
        assert_eq!(select_advice(&inputs(&middle, &pct, None)).kind, AdviceKind::SugarHeavy);
    }

    #[test]
    fn test_poor_ratio_message_and_unbounded_ratio() {
        let profile = UserProfile::default();
        let pct = DailyPercentages::default();

        let advice = select_advice(&inputs(&profile, &pct, Some(14.666)));
        assert_eq!(advice.kind, AdviceKind::PoorRatio);
        assert!(advice.message.contains("(14.7:1)"));

        let advice = select_advice(&inputs(&profile, &pct, None));
        assert_eq!(advice.kind, AdviceKind::PoorRatio);
        assert!(advice.message.contains("(no fiber)"));
    }

    #[test]
    fn test_balanced_variants() {
        let pct = DailyPercentages::default();
        let ratio = Some(10.0);

        let active = UserProfile::new(Gender::Male, AgeBand::Older, ActivityLevel::Active);
        assert_eq!(select_advice(&inputs(&active, &pct, ratio)).kind, AdviceKind::BalancedActive);

        let senior = UserProfile::new(Gender::Female, AgeBand::Older, ActivityLevel::Moderate);
        assert_eq!(select_advice(&inputs(&senior, &pct, ratio)).kind, AdviceKind::BalancedSenior);

        let other = UserProfile::new(Gender::Female, AgeBand::Middle, ActivityLevel::Moderate);
        assert_eq!(select_advice(&inputs(&other, &pct, ratio)).kind, AdviceKind::Balanced);
    }
}
