//! Error types for the decode pipeline.
//!
//! Legacy-inconsistent input (unknown kinds, odd titles, zero-area quads,
//! orphaned replies) is normalized rather than rejected. Only structural
//! violations that would otherwise poison the geometry end up here.

/// Structural problems with the geometry handed to the coordinate transformer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("viewport scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
    #[error("viewport height must be a positive finite number, got {0}")]
    InvalidHeight(f64),
    #[error("quad has {0} coordinates, expected 8")]
    MalformedQuad(usize),
    #[error("quad coordinate {index} is not finite")]
    NonFiniteCoordinate { index: usize },
}

/// Errors produced while decoding a renderer annotation into a store record.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("annotation {id} has no page viewport")]
    MissingViewport { id: String },
    #[error("annotation {id}: invalid viewport: {source}")]
    Viewport {
        id: String,
        #[source]
        source: GeometryError,
    },
    #[error("annotation {id}: quad {quad}: {source}")]
    Quad {
        id: String,
        quad: usize,
        #[source]
        source: GeometryError,
    },
    #[error("shape payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;
