//! Turns recognized label text into a [`NutritionRecord`].
//!
//! Extraction degrades gracefully: a field that cannot be found becomes `0`
//! (or the default serving size) instead of failing the scan.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::record::{NutritionRecord, DEFAULT_SERVING_SIZE, UNKNOWN_PRODUCT};
use crate::error::ExtractionError;

/// Share of total sugars assumed to be added when the label omits the line.
pub const ADDED_SUGARS_ESTIMATE_RATIO: f64 = 0.7;

const NUM: &str = r"([0-9]+(?:\.[0-9]+)?)";

fn field_regex(label: &str, unit: &str) -> Regex {
    Regex::new(&format!(r"(?i){label}[:\s]+{NUM}\s*{unit}")).unwrap()
}

static SERVING_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)serving size[:\s]*([^\n]*)").unwrap());
// "1 cup (30g)" and "2/3 cup (55g)" carry the metric amount in parentheses.
static SERVING_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\(\s*{NUM}\s*(g|ml)\b")).unwrap());
static SERVING_LEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^{NUM}\s*(g|ml)\b")).unwrap());
static CALORIES_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("calories", ""));
// Group 1 marks the fat sub-lines ("Saturated Fat", "Trans Fat") that total fat skips.
static TOTAL_FAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)((?:saturated|trans)\s+)?(?:total\s+)?fat[:\s]+{NUM}\s*g"
    ))
    .unwrap()
});
static SATURATED_FAT_RE: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r"(?:saturated\s+fat|saturates)", "g"));
static CARBS_RE: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r"(?:total\s+)?carbohydrates?", "g"));
// Group 1 distinguishes "Added Sugars" so total sugars can skip those lines.
static SUGARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)(added\s+)?sugars[:\s]+{NUM}\s*g")).unwrap());
// "Added Sugars 7g" puts the amount after the label, "Includes 7g Added Sugars" before it.
static ADDED_SUGARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)added\s+sugars[:\s]+{NUM}\s*g|includes\s+{NUM}\s*g\s+added\s+sugars"
    ))
    .unwrap()
});
static FIBER_RE: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r"(?:dietary\s+)?fib(?:er|re)", "g"));
static PROTEIN_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("protein", "g"));
static SODIUM_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("sodium", "mg"));
static NUTRITION_FACTS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)nutrition facts").unwrap());

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ExtractionError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ExtractionError::NonFiniteValue {
            field,
            raw: raw.to_string(),
        }),
    }
}

fn find_field(re: &Regex, field: &'static str, text: &str) -> Result<Option<f64>, ExtractionError> {
    match re.captures(text) {
        Some(caps) => parse_number(field, &caps[1]).map(Some),
        None => {
            debug!(field, "label field not found");
            Ok(None)
        }
    }
}

/// First match of `re` whose qualifier group (group 1) is absent, read from group 2.
fn find_unqualified(re: &Regex, field: &'static str, text: &str) -> Result<Option<f64>, ExtractionError> {
    for caps in re.captures_iter(text) {
        if caps.get(1).is_none() {
            return parse_number(field, &caps[2]).map(Some);
        }
    }
    debug!(field, "label field not found");
    Ok(None)
}

fn find_added_sugars(text: &str) -> Result<Option<f64>, ExtractionError> {
    match ADDED_SUGARS_RE.captures(text) {
        Some(caps) => {
            let raw = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            parse_number("addedSugars", raw).map(Some)
        }
        None => Ok(None),
    }
}

fn find_serving_size(text: &str) -> Result<String, ExtractionError> {
    let Some(serving) = SERVING_LINE_RE.captures(text) else {
        debug!(default = DEFAULT_SERVING_SIZE, "serving size not found");
        return Ok(DEFAULT_SERVING_SIZE.to_string());
    };
    let line = serving[1].trim();
    let metric = SERVING_PAREN_RE
        .captures(line)
        .or_else(|| SERVING_LEADING_RE.captures(line));
    match metric {
        Some(caps) => {
            parse_number("servingSize", &caps[1])?;
            Ok(format!("{}{}", &caps[1], caps[2].to_ascii_lowercase()))
        }
        None => {
            warn!(serving = line, default = DEFAULT_SERVING_SIZE, "serving size has no gram amount");
            Ok(DEFAULT_SERVING_SIZE.to_string())
        }
    }
}

/// The last non-empty line before "Nutrition Facts", if any.
pub fn extract_product_name(text: &str) -> String {
    NUTRITION_FACTS_RE
        .find(text)
        .and_then(|m| {
            text[..m.start()]
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .last()
        })
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string())
}

/// Parses recognized label text into a record.
///
/// Only a value that cannot be represented as a finite number is an error;
/// absent fields fall back to defaults.
pub fn extract(raw_text: &str) -> Result<NutritionRecord, ExtractionError> {
    let sugars = find_unqualified(&SUGARS_RE, "sugars", raw_text)?.unwrap_or(0.0);
    let (added_sugars, added_sugars_estimated) = match find_added_sugars(raw_text)? {
        Some(value) => (value, false),
        None => {
            let estimate = sugars * ADDED_SUGARS_ESTIMATE_RATIO;
            warn!(sugars, estimate, "added sugars not on label, using estimate");
            (estimate, true)
        }
    };

    let record = NutritionRecord {
        product_name: extract_product_name(raw_text),
        serving_size: find_serving_size(raw_text)?,
        calories: find_field(&CALORIES_RE, "calories", raw_text)?.unwrap_or(0.0),
        total_fat: find_unqualified(&TOTAL_FAT_RE, "totalFat", raw_text)?.unwrap_or(0.0),
        saturated_fat: find_field(&SATURATED_FAT_RE, "saturatedFat", raw_text)?.unwrap_or(0.0),
        carbohydrates: find_field(&CARBS_RE, "carbohydrates", raw_text)?.unwrap_or(0.0),
        sugars,
        added_sugars,
        fiber: find_field(&FIBER_RE, "fiber", raw_text)?.unwrap_or(0.0),
        protein: find_field(&PROTEIN_RE, "protein", raw_text)?.unwrap_or(0.0),
        sodium: find_field(&SODIUM_RE, "sodium", raw_text)?.unwrap_or(0.0),
        added_sugars_estimated,
    };
    debug!(product = %record.product_name, serving = %record.serving_size, "label extracted");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CEREAL_LABEL: &str = "\
Crunchy Oat Clusters
Nutrition Facts
Serving Size: 30 g
Calories 120
Total Fat 2.5g
  Saturated Fat 1.2g
Sodium 180mg
Total Carbohydrate 22g
  Dietary Fiber 1.5g
  Total Sugars 8g
    Includes Added Sugars 7g
Protein 3g
";

    #[test]
    fn test_extract_full_label() {
        let record = extract(CEREAL_LABEL).unwrap();
        assert_eq!(record.product_name, "Crunchy Oat Clusters");
        assert_eq!(record.serving_size, "30g");
        assert_eq!(record.calories, 120.0);
        assert_eq!(record.total_fat, 2.5);
        assert_eq!(record.saturated_fat, 1.2);
        assert_eq!(record.carbohydrates, 22.0);
        assert_eq!(record.sugars, 8.0);
        assert_eq!(record.added_sugars, 7.0);
        assert!(!record.added_sugars_estimated);
        assert_eq!(record.fiber, 1.5);
        assert_eq!(record.protein, 3.0);
        assert_eq!(record.sodium, 180.0);
    }

    #[test]
    fn test_total_sugars_skips_added_sugars_line() {
        let text = "Added Sugars 4g\nSugars 9g";
        let record = extract(text).unwrap();
        assert_eq!(record.sugars, 9.0);
        assert_eq!(record.added_sugars, 4.0);
    }

    #[test]
    fn test_missing_added_sugars_is_estimated_and_flagged() {
        let record = extract("Sugars: 10g\nTotal Carbohydrates 20g").unwrap();
        assert!((record.added_sugars - 7.0).abs() < 1e-9);
        assert!(record.added_sugars_estimated);
        assert_eq!(record.carbohydrates, 20.0);
    }

    #[test]
    fn test_empty_text_degrades_to_defaults() {
        let record = extract("").unwrap();
        assert_eq!(record.product_name, UNKNOWN_PRODUCT);
        assert_eq!(record.serving_size, DEFAULT_SERVING_SIZE);
        assert_eq!(record.calories, 0.0);
        assert_eq!(record.added_sugars, 0.0);
    }

    #[test]
    fn test_product_name_needs_text_before_heading() {
        assert_eq!(extract_product_name("NUTRITION FACTS\nCalories 10"), UNKNOWN_PRODUCT);
        assert_eq!(extract_product_name("Granola Bar\nno heading here"), UNKNOWN_PRODUCT);
        assert_eq!(
            extract_product_name("ACME Foods\nGranola Bar\n\n   \nnutrition facts"),
            "Granola Bar"
        );
    }

    #[test]
    fn test_extract_label_without_total_prefixes() {
        let label = "\
Fruit Muesli
Nutrition Facts
Serving Size 45g
Calories 170
Fat 2.5g
  of which saturates 0.4g
Carbohydrate 30g
  of which sugars 9g
Fibre 4.5g
Protein 4g
";
        let record = extract(label).unwrap();
        assert_eq!(record.total_fat, 2.5);
        assert_eq!(record.saturated_fat, 0.4);
        assert_eq!(record.carbohydrates, 30.0);
        assert_eq!(record.sugars, 9.0);
        assert_eq!(record.fiber, 4.5);
        assert_eq!(record.protein, 4.0);
    }

    #[test]
    fn test_saturated_and_trans_fat_are_not_total_fat() {
        let record = extract("Saturated Fat 1.2g\nTrans Fat 0g\nFat 6g").unwrap();
        assert_eq!(record.total_fat, 6.0);
        assert_eq!(record.saturated_fat, 1.2);

        let record = extract("Saturated Fat 1.2g").unwrap();
        assert_eq!(record.total_fat, 0.0);
    }

    #[test]
    fn test_added_sugars_amount_before_label() {
        let record = extract("Total Sugars 12g\n  Includes 7g Added Sugars 14%").unwrap();
        assert_eq!(record.sugars, 12.0);
        assert_eq!(record.added_sugars, 7.0);
        assert!(!record.added_sugars_estimated);

        let flattened = extract("Total Sugars 12g Includes 7g Added Sugars").unwrap();
        assert_eq!(flattened.sugars, 12.0);
        assert_eq!(flattened.added_sugars, 7.0);
    }

    #[test]
    fn test_serving_size_prefers_parenthesized_grams() {
        assert_eq!(extract("Serving size 1 cup (30g)").unwrap().serving_size, "30g");
        assert_eq!(extract("Serving size 2/3 cup (55g)").unwrap().serving_size, "55g");
        assert_eq!(extract("Serving Size 1 bottle (250 mL)").unwrap().serving_size, "250ml");
        assert_eq!(extract("Serving size: 40 G").unwrap().serving_size, "40g");
    }

    #[test]
    fn test_serving_size_without_metric_amount_uses_default() {
        assert_eq!(extract("Serving size 1 cup").unwrap().serving_size, DEFAULT_SERVING_SIZE);
        assert_eq!(extract("Serving size 2/3 cup").unwrap().serving_size, DEFAULT_SERVING_SIZE);
    }

    #[test]
    fn test_overflowing_number_fails_extraction() {
        let huge = "9".repeat(400);
        let result = extract(&format!("Calories {huge}"));
        assert!(matches!(
            result,
            Err(ExtractionError::NonFiniteValue { field: "calories", .. })
        ));
    }
}
