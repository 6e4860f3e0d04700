//! Error types for blocktext core

use thiserror::Error;

/// Result type for blocktext core operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Core error types
#[derive(Error, Debug)]
pub enum RenderError {
    /// Requested font face is not part of the library
    #[error("\"{0}\" is not a valid font option. Run with --list-fonts to see all fonts")]
    UnknownFont(String),

    /// Alignment is not one of left, center, right
    #[error("\"{0}\" is not a valid align option. Use left, center or right")]
    UnknownAlign(String),

    /// Foreground color token is not in the palette and not a hex color
    #[error("\"{0}\" is not a valid font color option")]
    UnknownColor(String),

    /// Background token is not in the palette, not a hex color and not "transparent"
    #[error("\"{0}\" is not a valid background option")]
    UnknownBackground(String),

    /// Output environment is neither node nor browser
    #[error("\"{0}\" is not a valid env option. Use node or browser")]
    UnknownEnv(String),

    /// Gradient must be exactly two concrete colors
    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    /// No text was given to render
    #[error("please provide text to convert")]
    EmptyInput,

    /// A font document failed to parse or is internally inconsistent
    #[error("font \"{font}\" is malformed: {reason}")]
    FontData { font: String, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// True for errors raised while checking options, before any rendering work
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RenderError::UnknownFont(_)
                | RenderError::UnknownAlign(_)
                | RenderError::UnknownColor(_)
                | RenderError::UnknownBackground(_)
                | RenderError::UnknownEnv(_)
                | RenderError::InvalidGradient(_)
        )
    }
}
