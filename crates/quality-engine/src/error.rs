//! Custom error types for the quality engine.
//!
//! Only structurally invalid input is an error here: building a [`Dataset`]
//! from mismatched columns, converting an unsupported polars frame, or an
//! invalid configuration. Degenerate data (empty datasets, constant columns,
//! all-missing columns) is never an error; every engine operation models it
//! as a defined output value.
//!
//! Errors are serializable so a boundary layer can forward them as
//! `{code, message}` objects.
//!
//! [`Dataset`]: crate::dataset::Dataset

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the quality engine.
#[derive(Error, Debug)]
pub enum QualityError {
    /// A column does not have the same length as the rest of the dataset.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share the same name.
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// A polars column has a dtype the engine cannot represent.
    #[error("Column '{column}' has unsupported dtype {dtype}")]
    UnsupportedDtype { column: String, dtype: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<QualityError>,
    },
}

impl QualityError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        QualityError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for boundary-layer handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnLengthMismatch { .. } => "COLUMN_LENGTH_MISMATCH",
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::UnsupportedDtype { .. } => "UNSUPPORTED_DTYPE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the error was caused by the shape of the input rather than by I/O.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::ColumnLengthMismatch { .. }
            | Self::DuplicateColumn(_)
            | Self::UnsupportedDtype { .. } => true,
            Self::WithContext { source, .. } => source.is_invalid_input(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for QualityError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("QualityError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for quality engine operations.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| QualityError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| QualityError::Io(e).with_context(context))
    }
}
