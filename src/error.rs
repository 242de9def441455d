use thiserror::Error;

/// Raised when recognized label text cannot be turned into a record at all.
///
/// Missing fields are never an error: they fall back to defaults.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Label field '{field}' has a value that is not a finite number: {raw}")]
    NonFiniteValue { field: &'static str, raw: String },

    #[error("Recognized text is not valid UTF-8")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
}

/// Precondition violations detected before any arithmetic is done.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Serving size '{0}' has no usable positive gram amount")]
    InvalidServingSize(String),

    #[error("Nutrient '{field}' is negative: {value}")]
    NegativeNutrient { field: &'static str, value: f64 },

    #[error("Nutrient '{field}' is not a finite number")]
    NonFiniteNutrient { field: &'static str },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store contents at {path} are not valid JSON: {source}")]
    Serialization {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error while writing batch output: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for callers that drive the whole pipeline.
#[derive(Debug, Error)]
pub enum NutriscanError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}
