use tracing::debug;

use super::extractor::extract;
use super::record::NutritionRecord;
use crate::error::ExtractionError;

/// Text-recognition collaborator that feeds the extractor.
///
/// Implementations receive the raw captured frame and return the label text
/// they read from it.
pub trait TextRecognizer: Send + Sync {
    fn name(&self) -> &'static str;

    fn recognize(&self, frame: &[u8]) -> Result<String, ExtractionError>;
}

/// Recognizer for frames that already carry transcribed label text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRecognizer;

impl TextRecognizer for PlainTextRecognizer {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn recognize(&self, frame: &[u8]) -> Result<String, ExtractionError> {
        Ok(String::from_utf8(frame.to_vec())?)
    }
}

/// Runs `recognizer` over a frame and extracts a record from its text.
pub fn extract_from_frame(
    recognizer: &dyn TextRecognizer,
    frame: &[u8],
) -> Result<NutritionRecord, ExtractionError> {
    let text = recognizer.recognize(frame)?;
    debug!(recognizer = recognizer.name(), chars = text.len(), "frame recognized");
    extract(&text)
}
