use masterror::AppError;

use super::Config;

/// Errors returned when validating a [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// A padding side is negative, NaN or infinite.
    InvalidPadding { side: &'static str, value: f32 },

    /// A window dimension is not a finite number above zero.
    InvalidWindowSize { dimension: &'static str, value: f32 },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPadding { side, value } => {
                write!(f, "padding {side} must be a finite, non-negative number, got {value}")
            }
            Self::InvalidWindowSize { dimension, value } => {
                write!(f, "window {dimension} must be greater than zero, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl From<ConfigValidationError> for AppError {
    fn from(err: ConfigValidationError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

impl Config {
    /// Validates the numeric settings that serde accepts but layout cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] for negative or non-finite padding and
    /// for window dimensions that are not strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use clockface_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let padding = [
            ("top", self.padding.top),
            ("right", self.padding.right),
            ("bottom", self.padding.bottom),
            ("left", self.padding.left),
        ];

        if let Some((side, value)) = padding
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ConfigValidationError::InvalidPadding { side, value });
        }

        let window = [("width", self.window.width), ("height", self.window.height)];

        if let Some((dimension, value)) = window
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(ConfigValidationError::InvalidWindowSize { dimension, value });
        }

        Ok(())
    }
}
