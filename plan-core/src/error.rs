//! Error types for floor plan operations.

use thiserror::Error;

/// Result type for floor plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that can occur while loading or checking a floor plan.
///
/// The renderer itself never produces these: missing layouts, unknown
/// categories and out-of-range zoom all degrade to fallbacks instead.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Layout serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Layout violates a geometric invariant.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Requested floor level is not part of the document.
    #[error("Floor not found: {0}")]
    FloorNotFound(String),
}
