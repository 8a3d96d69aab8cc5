//! Decoding renderer annotations into annotation-store records
//!
//! A decoder turns one renderer annotation (plus its sibling list, for
//! replies) into an [`AnnotationStore`] record carrying a serialized shape
//! group and denormalized metadata. The input is never modified; the
//! corrected title/subtype come back as a copy alongside the record.

use crate::classify::{classify, Classification};
use crate::color::resolve_color;
use crate::comments::resolve_comments;
use crate::error::{DecodeError, DecodeResult};
use crate::geometry::{quad_to_rect, validate_viewport};
use crate::settings::DecoderSettings;
use crate::shape::{synthesize, ShapeGroup};
use markup_model::{
    AnnotationStore, AnnotationType, ExternalAnnotation, ExternalKind, TextContainer, Viewport,
    INK_EDITOR_TYPE,
};
use tracing::{debug, trace, warn};

/// Renderer kinds with a canonical counterpart.
pub const KIND_TABLE: [(ExternalKind, AnnotationType); 3] = [
    (ExternalKind::Highlight, AnnotationType::Highlight),
    (ExternalKind::Underline, AnnotationType::Underline),
    (ExternalKind::StrikeOut, AnnotationType::Strikeout),
];

/// Canonical type for kinds missing from [`KIND_TABLE`].
///
/// Kept as observed behavior of the existing store: unmapped kinds are filed
/// as highlights rather than rejected.
pub const FALLBACK_TYPE: AnnotationType = AnnotationType::Highlight;

/// Map a renderer kind to its canonical type, falling back to
/// [`FALLBACK_TYPE`].
pub fn canonical_type(kind: ExternalKind) -> AnnotationType {
    match KIND_TABLE.iter().find(|(external, _)| *external == kind) {
        Some((_, canonical)) => *canonical,
        None => {
            warn!(kind = kind.code(), "unmapped annotation kind, filing as highlight");
            FALLBACK_TYPE
        }
    }
}

/// Output of a decode: the store record and the corrected input copy.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAnnotation {
    pub record: AnnotationStore,
    pub corrected: ExternalAnnotation,
}

/// A decoder for one family of renderer annotations.
pub trait AnnotationDecoder: Send + Sync {
    /// Short family name for logs and statistics
    fn name(&self) -> &'static str;

    /// Whether this decoder handles annotations of `kind`
    fn supports(&self, kind: ExternalKind) -> bool;

    /// Decode `annotation`; `siblings` is the full annotation list of the
    /// document, used to resolve replies.
    fn decode(
        &self,
        annotation: &ExternalAnnotation,
        siblings: &[ExternalAnnotation],
    ) -> DecodeResult<DecodedAnnotation>;
}

/// Decoder for the text-markup family: highlight, underline and strikeout.
#[derive(Debug, Clone, Default)]
pub struct HighlightDecoder {
    settings: DecoderSettings,
}

impl HighlightDecoder {
    pub fn new(settings: DecoderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DecoderSettings {
        &self.settings
    }

    /// Viewport of `annotation`, checked for use in coordinate conversion.
    fn page_viewport(annotation: &ExternalAnnotation) -> DecodeResult<&Viewport> {
        let viewport = annotation
            .viewport
            .as_ref()
            .ok_or_else(|| DecodeError::MissingViewport { id: annotation.id.clone() })?;
        validate_viewport(viewport)
            .map_err(|source| DecodeError::Viewport { id: annotation.id.clone(), source })?;
        Ok(viewport)
    }

    /// Transform every quad and collect the resulting shapes in quad order.
    ///
    /// The viewport is only looked up once there is a quad to convert, so an
    /// annotation without quads decodes to an empty group.
    fn build_group(
        &self,
        annotation: &ExternalAnnotation,
        color: &str,
    ) -> DecodeResult<ShapeGroup> {
        let mut viewport: Option<&Viewport> = None;
        let mut group = ShapeGroup::new(annotation.id.clone());
        for (index, quad) in annotation.quads().iter().enumerate() {
            let viewport = match viewport {
                Some(viewport) => viewport,
                None => *viewport.insert(Self::page_viewport(annotation)?),
            };
            let rect = quad_to_rect(quad, viewport).map_err(|source| DecodeError::Quad {
                id: annotation.id.clone(),
                quad: index,
                source,
            })?;

            match synthesize(annotation.annotation_type, rect, color) {
                Some(shape) => {
                    trace!(id = %annotation.id, quad = index, ?rect, "synthesized shape");
                    group.push(shape);
                }
                None => trace!(id = %annotation.id, quad = index, "no shape for kind"),
            }
        }
        Ok(group)
    }

    fn corrected_copy(
        annotation: &ExternalAnnotation,
        classification: &Classification,
    ) -> ExternalAnnotation {
        let mut corrected = annotation.clone();
        corrected.title_obj.text = classification.title.clone();
        if let Some(subtype) = classification.subtype {
            corrected.subtype = Some(subtype.as_str().to_owned());
        }
        corrected
    }
}

impl AnnotationDecoder for HighlightDecoder {
    fn name(&self) -> &'static str {
        "text-markup"
    }

    fn supports(&self, kind: ExternalKind) -> bool {
        matches!(kind, ExternalKind::Highlight | ExternalKind::Underline | ExternalKind::StrikeOut)
    }

    fn decode(
        &self,
        annotation: &ExternalAnnotation,
        siblings: &[ExternalAnnotation],
    ) -> DecodeResult<DecodedAnnotation> {
        let classification = classify(annotation.subtype.as_deref(), annotation.title());
        let annotation_type = canonical_type(annotation.annotation_type);
        let color = resolve_color(
            annotation.color.as_ref(),
            classification.color_key(),
            annotation_type,
            &self.settings,
        );

        let group = self.build_group(annotation, &color)?;
        let client_rect = group.client_rect();
        let payload = group.to_payload()?;
        let shape_count = group.len();

        let record = AnnotationStore {
            id: annotation.id.clone(),
            page_number: annotation.page_number,
            page_ranges: None,
            konva_string: payload,
            konva_client_rect: client_rect,
            title: classification.title.clone(),
            annotation_type,
            color,
            pdfjs_type: annotation.annotation_type,
            pdfjs_editor_type: INK_EDITOR_TYPE,
            subtype: classification.subtype,
            date: annotation.modification_date.clone(),
            contents_obj: TextContainer { text: annotation.contents_obj.text.clone() },
            comments: resolve_comments(&annotation.id, siblings),
            readonly: true,
        };

        debug!(
            id = %record.id,
            page = record.page_number,
            kind = annotation.annotation_type.name(),
            shapes = shape_count,
            comments = record.comments.len(),
            subtype = ?record.subtype,
            "decoded text-markup annotation"
        );

        Ok(DecodedAnnotation {
            corrected: Self::corrected_copy(annotation, &classification),
            record,
        })
    }
}
