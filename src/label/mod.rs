pub mod extractor;
pub mod recognizer;
pub mod record;

pub use extractor::{extract, ADDED_SUGARS_ESTIMATE_RATIO};
pub use recognizer::{extract_from_frame, PlainTextRecognizer, TextRecognizer};
pub use record::{NutritionRecord, ServingSize};
