//! Error Types
//!
//! Construction failures are fatal to a ship build and surface as [`BuildError`].
//! Interactions never fail; only the checked element accessors return [`ShipError`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning raster layers into a ship mesh.
///
/// Any of these aborts the build before a single runtime container exists.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The structural layer has no non-empty pixel.
    #[error("structural layer contains no particles")]
    EmptyStructuralLayer,

    /// An optional layer does not match the structural layer size.
    #[error("{layer} layer is {actual_width}x{actual_height}, expected {width}x{height}")]
    LayerSizeMismatch {
        layer: &'static str,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// A structural pixel color has no material in the database.
    #[error("unrecognized structural material color #{color} at ({x}, {y})")]
    UnrecognizedStructuralColor { color: String, x: u32, y: u32 },

    /// An electrical pixel color has no electrical material in the database.
    #[error("unrecognized electrical material color #{color} at ({x}, {y})")]
    UnrecognizedElectricalColor { color: String, x: u32, y: u32 },

    /// A rope color key was found on more than two pixels.
    #[error("rope #{color} has more than two endpoints (third at ({x}, {y}))")]
    TooManyRopeEndpoints { color: String, x: u32, y: u32 },

    /// A rope color key was found on a single pixel.
    #[error("rope #{color} has only one endpoint at ({x}, {y})")]
    IncompleteRope { color: String, x: u32, y: u32 },

    /// An electrical pixel lies where there is no structural or rope particle.
    #[error("electrical particle at ({x}, {y}) has no structural substratum")]
    ElectricalWithoutSubstratum { x: u32, y: u32 },

    /// A layer image could not be decoded.
    #[error("failed to load layer image {path}: {message}")]
    LayerImage { path: PathBuf, message: String },
}

/// Errors from the checked accessors on a built ship.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShipError {
    #[error("point index {index} out of range ({count} points)")]
    InvalidPointIndex { index: usize, count: usize },

    #[error("spring index {index} out of range ({count} springs)")]
    InvalidSpringIndex { index: usize, count: usize },

    #[error("electrical element index {index} out of range ({count} elements)")]
    InvalidElectricalElementIndex { index: usize, count: usize },

    /// The element exists but is not a switch.
    #[error("electrical element {index} is not a switch")]
    NotASwitch { index: usize },

    /// The element was destroyed together with its particle.
    #[error("electrical element {index} has been destroyed")]
    ElectricalElementDestroyed { index: usize },
}

/// Errors from loading parameter or material files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two materials share the same color key.
    #[error("duplicate material color #{0}")]
    DuplicateColor(String),

    /// No structural material matches the rope name or carries the rope flag.
    #[error("no rope material '{0}' in the database")]
    MissingRopeMaterial(String),
}

/// Result alias for ship construction.
pub type BuildResult<T> = std::result::Result<T, BuildError>;
