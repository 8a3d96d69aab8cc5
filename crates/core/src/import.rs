//! Batch import of renderer annotations
//!
//! Routes every entry of a document's annotation list to the first decoder
//! that supports its kind. Replies are not decoded on their own; they are
//! folded into their parent's comment thread.

use crate::decoder::{AnnotationDecoder, DecodedAnnotation, HighlightDecoder};
use crate::error::DecodeResult;
use crate::settings::DecoderSettings;
use markup_model::{AnnotationStore, ExternalAnnotation};
use std::collections::HashMap;
use tracing::{debug, info};

/// Statistics about imported annotations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Total annotations found in the list
    pub total_found: usize,
    /// Annotations successfully decoded
    pub imported: usize,
    /// Replies, attached to their parent instead of decoded
    pub replies: usize,
    /// Annotations skipped (no decoder for their kind)
    pub skipped: usize,
    /// Count by renderer kind name
    pub by_type: HashMap<String, usize>,
}

/// Decoder registry for a document's annotation list.
pub struct AnnotationImporter {
    decoders: Vec<Box<dyn AnnotationDecoder>>,
}

impl AnnotationImporter {
    /// Importer with the text-markup decoder registered.
    pub fn new(settings: DecoderSettings) -> Self {
        Self::empty().with_decoder(HighlightDecoder::new(settings))
    }

    /// Importer with no decoders; everything is skipped until one is added.
    pub fn empty() -> Self {
        Self { decoders: Vec::new() }
    }

    /// Register another decoder. Earlier registrations win on overlap.
    pub fn with_decoder(mut self, decoder: impl AnnotationDecoder + 'static) -> Self {
        self.decoders.push(Box::new(decoder));
        self
    }

    pub fn decoder_count(&self) -> usize {
        self.decoders.len()
    }

    /// Decode every supported annotation in `annotations`.
    ///
    /// Decoded annotations keep the order of the input list. The first
    /// structural error aborts the import.
    pub fn import(
        &self,
        annotations: &[ExternalAnnotation],
    ) -> DecodeResult<(Vec<DecodedAnnotation>, ImportStats)> {
        let mut decoded = Vec::new();
        let mut stats = ImportStats::default();

        for annotation in annotations {
            stats.total_found += 1;
            let kind = annotation.annotation_type;
            *stats.by_type.entry(kind.name().to_string()).or_insert(0) += 1;

            if annotation.is_reply() {
                stats.replies += 1;
                continue;
            }

            let Some(decoder) = self.decoders.iter().find(|d| d.supports(kind)) else {
                debug!(id = %annotation.id, kind = kind.code(), "no decoder for annotation kind");
                stats.skipped += 1;
                continue;
            };

            decoded.push(decoder.decode(annotation, annotations)?);
            stats.imported += 1;
        }

        info!(
            total = stats.total_found,
            imported = stats.imported,
            replies = stats.replies,
            skipped = stats.skipped,
            "imported annotations"
        );
        Ok((decoded, stats))
    }

    /// Decode and keep only the store records.
    pub fn import_records(
        &self,
        annotations: &[ExternalAnnotation],
    ) -> DecodeResult<Vec<AnnotationStore>> {
        let (decoded, _stats) = self.import(annotations)?;
        Ok(decoded.into_iter().map(|d| d.record).collect())
    }
}

impl Default for AnnotationImporter {
    fn default() -> Self {
        Self::new(DecoderSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markup_model::{ExternalKind, Quad, Viewport};

    fn markup(id: &str, kind: ExternalKind) -> ExternalAnnotation {
        ExternalAnnotation::new(id, 1, kind)
            .with_quad(Quad::from_corners([(0.0, 10.0), (20.0, 10.0), (0.0, 20.0), (20.0, 20.0)]))
            .with_viewport(Viewport::new(1.0, 100.0))
    }

    #[test]
    fn test_import_stats_default() {
        let stats = ImportStats::default();
        assert_eq!(stats.total_found, 0);
        assert_eq!(stats.imported, 0);
        assert_eq!(stats.skipped, 0);
        assert!(stats.by_type.is_empty());
    }

    #[test]
    fn test_import_routes_by_kind() {
        let annotations = vec![
            markup("1R", ExternalKind::Highlight),
            markup("2R", ExternalKind::Squiggly),
            markup("3R", ExternalKind::StrikeOut),
            ExternalAnnotation::new("4R", 1, ExternalKind::Other(1)).in_reply_to("1R"),
            ExternalAnnotation::new("5R", 1, ExternalKind::Other(3)),
        ];

        let importer = AnnotationImporter::default();
        let (decoded, stats) = importer.import(&annotations).unwrap();

        let ids: Vec<&str> = decoded.iter().map(|d| d.record.id.as_str()).collect();
        assert_eq!(ids, ["1R", "3R"]);
        assert_eq!(decoded[0].record.comments.len(), 1);
        assert_eq!(stats.total_found, 5);
        assert_eq!(stats.imported, 2);
        assert_eq!(stats.replies, 1);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.by_type.get("Highlight"), Some(&1));
        assert_eq!(stats.by_type.get("Other"), Some(&2));
    }

    #[test]
    fn test_empty_importer_skips_everything() {
        let importer = AnnotationImporter::empty();
        assert_eq!(importer.decoder_count(), 0);
        let (decoded, stats) = importer.import(&[markup("1R", ExternalKind::Highlight)]).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_import_propagates_structural_errors() {
        let mut broken = markup("1R", ExternalKind::Underline);
        broken.viewport = None;
        let result = AnnotationImporter::default().import_records(&[broken]);
        assert!(result.is_err());
    }
}
