//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Backing surface could not be allocated or resized.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Text could not be laid out or rasterized.
    #[error("Text rendering failed: {0}")]
    Text(String),

    /// Font loading failed.
    #[error("Failed to load font: {0}")]
    Font(String),

    /// Snapshot encoding failed.
    #[error("Export failed: {0}")]
    Export(String),
}
