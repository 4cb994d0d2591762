//! Error types for colocation.

use thiserror::Error;

/// Errors that can occur while colocating ungridded data onto a grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColocationError {
    /// The ungridded data has no points or no coordinates.
    #[error("ungridded data contains no points to colocate")]
    EmptyPoints,

    /// The ungridded data is structurally malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No coordinate in the ungridded data matches a grid axis.
    #[error("no coordinate found for grid axis '{axis}'")]
    MissingCoordinate { axis: String },

    /// The destination grid is malformed.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ColocationError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a MissingCoordinate error.
    pub fn missing_coordinate(axis: impl Into<String>) -> Self {
        Self::MissingCoordinate { axis: axis.into() }
    }

    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error was caused by bad input values (as opposed to a bad
    /// grid or configuration).
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyPoints | Self::InvalidArgument(_) | Self::MissingCoordinate { .. }
        )
    }
}

/// Result type for colocation operations.
pub type Result<T> = std::result::Result<T, ColocationError>;
