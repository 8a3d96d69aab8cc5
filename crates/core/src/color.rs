//! Display color resolution
//!
//! Must run after classification: a classified subtype always overrides the
//! annotation's own color.

use crate::settings::DecoderSettings;
use markup_model::{AnnotationType, RawColor, Subtype};

/// Convert a raw renderer color to a CSS color string.
///
/// Byte triples become `rgb(r, g, b)`; named colors pass through trimmed.
/// Returns `None` when there is nothing usable.
pub fn convert_to_rgb(raw: Option<&RawColor>) -> Option<String> {
    match raw? {
        RawColor::Rgb([r, g, b]) => Some(format!("rgb({r}, {g}, {b})")),
        RawColor::Named(name) => {
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_owned())
        }
    }
}

/// Pick the final display color.
///
/// Order: subtype override, then the raw converted color, then the default
/// tool color for the annotation type, so the result is never empty.
pub fn resolve_color(
    raw: Option<&RawColor>,
    subtype: Option<Subtype>,
    annotation_type: AnnotationType,
    settings: &DecoderSettings,
) -> String {
    if let Some(subtype) = subtype {
        return settings.subtype_color(subtype).to_owned();
    }
    convert_to_rgb(raw).unwrap_or_else(|| settings.tool_color(annotation_type).to_owned())
}
