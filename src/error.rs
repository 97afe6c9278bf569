use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "could not determine the file encoding; re-save the file as UTF-8 or Shift_JIS and retry"
    )]
    Encoding,
    #[error("malformed csv input: {0}")]
    Malformed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("expected column {column:?} is missing from the input")]
    MissingColumn { column: String },
    #[error("required column {column:?} is missing from the input")]
    MissingRequiredColumn { column: String },
    #[error("unexpected processing error: {0}")]
    Unexpected(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export error: {0}")]
    Csv(String),
    #[error("value {0:?} cannot be represented in Shift_JIS")]
    Unencodable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
