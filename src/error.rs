use std::error::Error as StdError;
use std::fmt;

/// Invalid parser configuration, reported at construction time.
///
/// All variants are fatal to the parser instance that produced them; there
/// is nothing retryable about a bad configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `min_width` must be at least 1 (it appears as a divisor and as a
    /// window-scan stride).
    MinWidthZero,
    /// `window_width` must be at least `2 * min_width`.
    WindowTooSmall { window_width: usize, min_width: usize },
    /// `max_width` must be at least `min_width`.
    MaxWidthTooSmall { max_width: usize, min_width: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MinWidthZero => write!(f, "min_width must be at least 1"),
            ConfigError::WindowTooSmall { window_width, min_width } => write!(
                f,
                "window_width ({}) must be at least 2 * min_width ({})",
                window_width, min_width
            ),
            ConfigError::MaxWidthTooSmall { max_width, min_width } => write!(
                f,
                "max_width ({}) must be at least min_width ({})",
                max_width, min_width
            ),
        }
    }
}

impl StdError for ConfigError {}
