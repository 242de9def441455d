use nutriscan::analysis::{analyze, AdviceKind, Grade, WarningKind};
use nutriscan::error::{AnalysisError, NutriscanError};
use nutriscan::label::NutritionRecord;
use nutriscan::profile::{ActivityLevel, AgeBand, Gender, ProfileStore, ProfileUpdate, UserProfile};
use nutriscan::recommendations::thresholds_for;
use nutriscan::scan_store::ScanStore;
use nutriscan::scan_text;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

fn approx(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

fn baseline_record() -> NutritionRecord {
    NutritionRecord {
        product_name: "Chocolate Cereal".to_string(),
        serving_size: "30g".to_string(),
        calories: 120.0,
        total_fat: 2.5,
        saturated_fat: 1.2,
        carbohydrates: 22.0,
        sugars: 8.0,
        added_sugars: 7.0,
        fiber: 1.5,
        protein: 3.0,
        sodium: 180.0,
        added_sugars_estimated: false,
    }
}

fn baseline_profile() -> UserProfile {
    UserProfile::new(Gender::Male, AgeBand::Young, ActivityLevel::Moderate)
}

fn random_record(rng: &mut StdRng) -> NutritionRecord {
    let sugars = rng.gen_range(0.0..60.0);
    NutritionRecord {
        product_name: "Random".to_string(),
        serving_size: format!("{}g", rng.gen_range(1..250)),
        calories: rng.gen_range(0.0..900.0),
        total_fat: rng.gen_range(0.0..80.0),
        saturated_fat: rng.gen_range(0.0..40.0),
        carbohydrates: if rng.gen_bool(0.1) { 0.0 } else { rng.gen_range(0.0..120.0) },
        sugars,
        added_sugars: rng.gen_range(0.0..=sugars.max(0.0)),
        fiber: if rng.gen_bool(0.2) { 0.0 } else { rng.gen_range(0.0..30.0) },
        protein: rng.gen_range(0.0..60.0),
        sodium: rng.gen_range(0.0..3000.0),
        added_sugars_estimated: false,
    }
}

fn random_profile(rng: &mut StdRng) -> UserProfile {
    let all: Vec<UserProfile> = UserProfile::all().collect();
    all[rng.gen_range(0..all.len())]
}

#[test]
fn test_baseline_cereal_scores_grade_d() {
    let result = analyze(&baseline_record(), &baseline_profile()).unwrap();

    assert!(approx(result.per_100g.carbs, 73.333, 1e-3));
    assert!(approx(result.per_100g.fiber, 5.0, 1e-9));
    assert!(approx(result.carb_fiber_ratio.unwrap(), 14.667, 1e-3));
    assert!(approx(result.added_sugar_percentage, 31.818, 1e-3));
    assert!(approx(result.score, 41.0, 1e-6));
    assert_eq!(result.grade, Grade::D);
    assert_eq!(result.color, "#e67e22");
    assert!(result.has_warning(WarningKind::PoorCarbFiberRatio));
    assert!(result.has_warning(WarningKind::HighAddedSugar));
    assert!(result.has_warning(WarningKind::HighCarbohydrates));
    assert!(!result.has_warning(WarningKind::LowFiber));

    let recs = &result.recommendations;
    assert_eq!(recs.daily_targets.calories, 2500.0);
    assert!(approx(recs.percent_of_daily.calories, 4.8, 1e-9));
    assert!(approx(recs.percent_of_daily.carbs, 7.333, 1e-3));
    assert!(approx(recs.percent_of_daily.sugars, 19.444, 1e-3));
    assert_eq!(recs.servings_to_reach_carb_limit, Some(13));
    assert_eq!(recs.servings_to_reach_sugar_limit, Some(5));
    assert_eq!(recs.advice.kind, AdviceKind::PoorRatio);
}

#[test]
fn test_zero_fiber_substitutes_a_sentinel_and_still_warns() {
    let record = NutritionRecord { fiber: 0.0, ..baseline_record() };
    let result = analyze(&record, &baseline_profile()).unwrap();

    assert_eq!(result.carb_fiber_ratio, None);
    assert!(result.has_warning(WarningKind::PoorCarbFiberRatio));
    assert!(result.has_warning(WarningKind::LowFiber));
    assert!(result.score.is_finite());
    // Full sugar and ratio penalties, protein bonus 10.
    assert!(approx(result.score, 40.0, 1e-6));

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["carbFiberRatio"].is_null());
}

#[test]
fn test_zero_carbs_and_zero_sugar_have_defined_values() {
    let record = NutritionRecord {
        carbohydrates: 0.0,
        sugars: 0.0,
        added_sugars: 0.0,
        fiber: 0.0,
        ..baseline_record()
    };
    let result = analyze(&record, &baseline_profile()).unwrap();
    assert_eq!(result.carb_fiber_ratio, Some(0.0));
    assert_eq!(result.added_sugar_percentage, 0.0);
    assert_eq!(result.sugar_percentage, 0.0);
    assert_eq!(result.recommendations.servings_to_reach_carb_limit, None);
    assert_eq!(result.recommendations.servings_to_reach_sugar_limit, None);
    assert!(!result.has_warning(WarningKind::PoorCarbFiberRatio));
}

#[test]
fn test_degenerate_serving_size_is_a_typed_error() {
    for serving in ["0g", "", "g", "abc", "0"] {
        let record = NutritionRecord { serving_size: serving.to_string(), ..baseline_record() };
        assert_eq!(
            analyze(&record, &baseline_profile()),
            Err(AnalysisError::InvalidServingSize(serving.to_string())),
            "serving size {serving:?}"
        );
    }
}

#[test]
fn test_sugar_exactly_at_threshold_does_not_warn() {
    for profile in UserProfile::all() {
        let limit = thresholds_for(&profile).high_sugar_threshold;
        let record = NutritionRecord {
            serving_size: "100g".to_string(),
            carbohydrates: 50.0,
            sugars: limit,
            added_sugars: limit,
            fiber: 10.0,
            ..baseline_record()
        };
        let result = analyze(&record, &profile).unwrap();
        assert!(!result.has_warning(WarningKind::HighAddedSugar), "{profile:?}");
    }
}

#[test]
fn test_random_inputs_stay_bounded_consistent_and_idempotent() {
    let mut rng = StdRng::seed_from_u64(0x5ca7);
    for _ in 0..2_000 {
        let record = random_record(&mut rng);
        let profile = random_profile(&mut rng);
        let first = analyze(&record, &profile).unwrap();
        let second = analyze(&record, &profile).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
        assert!((0.0..=100.0).contains(&first.score), "score {}", first.score);
        assert_eq!(first.grade, Grade::from_score(first.score));
        match first.grade {
            Grade::A => assert!(first.score >= 90.0),
            Grade::B => assert!((75.0..90.0).contains(&first.score)),
            Grade::C => assert!((60.0..75.0).contains(&first.score)),
            Grade::D => assert!((40.0..60.0).contains(&first.score)),
            Grade::E => assert!(first.score < 40.0),
        }

        let numbers = [
            first.sugar_percentage,
            first.added_sugar_percentage,
            first.recommendations.percent_of_daily.calories,
            first.recommendations.percent_of_daily.carbs,
            first.recommendations.percent_of_daily.sugars,
            first.recommendations.percent_of_daily.protein,
            first.recommendations.percent_of_daily.fat,
        ];
        assert!(numbers.iter().all(|n| n.is_finite()));
        assert!(first.per_100g.entries().iter().all(|(_, v)| v.is_finite()));
        if let Some(ratio) = first.carb_fiber_ratio {
            assert!(ratio.is_finite());
        }
    }
}

#[test]
fn test_text_scan_to_results_round_trip() {
    let label = "\
Morning Crunch
Nutrition Facts
Serving Size 40g
Calories 160
Total Fat 3g
Saturated Fat 0.5g
Sodium 95mg
Total Carbohydrate 30g
Dietary Fiber 6g
Total Sugars 10g
Protein 5g
";
    let dir = TempDir::new().unwrap();
    let profiles = ProfileStore::open(dir.path()).unwrap();
    let scans = ScanStore::new(dir.path());

    let (record, first) = scan_text(label, &profiles.snapshot()).unwrap();
    assert_eq!(record.product_name, "Morning Crunch");
    assert!(record.added_sugars_estimated);
    assert!(approx(record.added_sugars, 7.0, 1e-9));
    scans.save_last_scan(&record).unwrap();

    // Changing the profile re-analyzes the stored scan from scratch.
    profiles
        .update(&ProfileUpdate {
            gender: Some(Gender::Female),
            age_band: Some(AgeBand::Older),
            activity_level: Some(ActivityLevel::Sedentary),
        })
        .unwrap();
    let reloaded = scans.load_last_scan().unwrap().unwrap();
    assert_eq!(reloaded, record);
    let second = analyze(&reloaded, &profiles.snapshot()).unwrap();

    assert_eq!(first.score.to_bits(), second.score.to_bits());
    assert_eq!(second.recommendations.daily_targets.sugars, 17.0);
    assert!(second.recommendations.percent_of_daily.sugars > first.recommendations.percent_of_daily.sugars);
    assert_eq!(second.recommendations.advice.kind, AdviceKind::SugarHeavySenior);
}

#[test]
fn test_scan_text_surfaces_analysis_errors() {
    let result = scan_text("Serving Size 0g\nCalories 10", &UserProfile::default());
    assert!(matches!(
        result,
        Err(NutriscanError::Analysis(AnalysisError::InvalidServingSize(_)))
    ));
}

#[tokio::test]
async fn test_label_file_read_with_tokio_is_extracted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("label.txt");
    tokio::fs::write(&path, "Oat Bar\nNUTRITION FACTS\nServing size: 50 g\nAdded Sugars 2g\nSugars 6g")
        .await
        .unwrap();
    let frame = tokio::fs::read(&path).await.unwrap();
    let record = nutriscan::label::extract_from_frame(&nutriscan::label::PlainTextRecognizer, &frame).unwrap();
    assert_eq!(record.product_name, "Oat Bar");
    assert_eq!(record.serving_size, "50g");
    assert_eq!(record.sugars, 6.0);
    assert_eq!(record.added_sugars, 2.0);
}
