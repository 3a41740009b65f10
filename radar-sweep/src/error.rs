//! Error types for radar-sweep

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// radar-sweep error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sensor or motor driver failure
    #[error("Driver error: {0}")]
    Driver(String),

    /// Sweep did not complete within the configured time limit
    #[error("Scan timed out after {degrees} of 360 degrees")]
    Timeout {
        /// Rotation magnitude reached before giving up
        degrees: u32,
    },

    /// Rotation sensor stopped advancing
    #[error("Rotation stalled at {degrees} degrees for {polls} polls")]
    Stalled {
        /// Rotation magnitude at which progress stopped
        degrees: u32,
        /// Consecutive polls without progress
        polls: u64,
    },

    /// Sweep was cancelled by the caller
    #[error("Scan cancelled at {degrees} degrees")]
    Cancelled {
        /// Rotation magnitude reached before cancellation
        degrees: u32,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
