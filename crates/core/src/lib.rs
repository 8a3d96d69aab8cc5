//! Text-markup annotation decoder
//!
//! Converts renderer annotations (quads, color bytes, subtype markers,
//! free-text titles) into annotation-store records with a serialized shape
//! group and normalized risk classification.

pub mod classify;
pub mod color;
pub mod comments;
pub mod decoder;
pub mod error;
pub mod geometry;
pub mod import;
pub mod settings;
pub mod shape;

pub use classify::{classify, Classification, Rule, Trigger, MARKER_RULES, TITLE_RULES};
pub use color::{convert_to_rgb, resolve_color};
pub use comments::resolve_comments;
pub use decoder::{
    canonical_type, AnnotationDecoder, DecodedAnnotation, HighlightDecoder, FALLBACK_TYPE,
    KIND_TABLE,
};
pub use error::{DecodeError, DecodeResult, GeometryError};
pub use geometry::{quad_extents, quad_to_rect, validate_viewport};
pub use import::{AnnotationImporter, ImportStats};
pub use settings::{DecoderSettings, SettingsError};
pub use shape::{synthesize, Shape, ShapeGroup};
