/// Error returned by layer and geometry operations.
///
/// Failures are local: the operation that returns one leaves the layer's
/// committed state untouched.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Wrong corner count or non-finite coordinates.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Options could not be parsed.
    #[error("invalid options: {0}")]
    ConfigParse(String),
}

impl From<serde_json::Error> for TransformError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
