/// Convenience result type used across raylight.
pub type RaylightResult<T> = Result<T, RaylightError>;

/// Everything that can go wrong while configuring or attaching an effect.
///
/// Frame and resize callbacks never fail; errors only come out of `attach`, `update` and
/// catalog/option loading.
#[derive(thiserror::Error, Debug)]
pub enum RaylightError {
    /// Options that are out of range, inverted or empty.
    #[error("validation error: {0}")]
    Validation(String),

    /// A ray or light-source definition that cannot be rendered.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Malformed JSON options or catalogs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The page environment refused an operation, or the effect was already destroyed.
    #[error("host error: {0}")]
    Host(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RaylightError {
    /// Build a [`RaylightError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RaylightError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`RaylightError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`RaylightError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }
}

impl From<serde_json::Error> for RaylightError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
