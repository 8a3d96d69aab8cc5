//! Wire model shared between the PDF renderer, the decoder and the
//! annotation store.
//!
//! Field names follow the renderer's camelCase JSON so annotation objects can
//! be deserialized verbatim, and store records can be handed to the UI layer
//! without a second mapping step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page viewport supplied by the renderer.
///
/// `height` is already in pixel space (page height in points times `scale`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scale: f64, height: f64) -> Self {
        Self { scale, height }
    }
}

/// Axis-aligned rectangle in viewport pixel space (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect { x, y, width: right - x, height: bottom - y }
    }

    /// Union of every rectangle in `rects`, or [`Rect::ZERO`] when empty.
    pub fn union_all<'a, I>(rects: I) -> Rect
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        let mut iter = rects.into_iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(*first, |acc, rect| acc.union(rect))
    }
}

/// Annotation kind code as reported by the renderer.
///
/// Codes outside the text-markup family are preserved so the original value
/// can be carried onto the store record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum ExternalKind {
    Highlight,
    Underline,
    Squiggly,
    StrikeOut,
    Other(u16),
}

impl ExternalKind {
    pub const fn code(self) -> u16 {
        match self {
            ExternalKind::Highlight => 9,
            ExternalKind::Underline => 10,
            ExternalKind::Squiggly => 11,
            ExternalKind::StrikeOut => 12,
            ExternalKind::Other(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExternalKind::Highlight => "Highlight",
            ExternalKind::Underline => "Underline",
            ExternalKind::Squiggly => "Squiggly",
            ExternalKind::StrikeOut => "StrikeOut",
            ExternalKind::Other(_) => "Other",
        }
    }
}

impl From<u16> for ExternalKind {
    fn from(code: u16) -> Self {
        match code {
            9 => ExternalKind::Highlight,
            10 => ExternalKind::Underline,
            11 => ExternalKind::Squiggly,
            12 => ExternalKind::StrikeOut,
            other => ExternalKind::Other(other),
        }
    }
}

impl From<ExternalKind> for u16 {
    fn from(kind: ExternalKind) -> Self {
        kind.code()
    }
}

/// Raw annotation color: either the renderer's byte triple or a named/CSS
/// color string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawColor {
    Rgb([u8; 3]),
    Named(String),
}

/// One corner of a quadrilateral in the renderer's object form.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
struct QuadCorner {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum QuadRepr {
    Flat(Vec<f64>),
    Corners(Vec<QuadCorner>),
}

impl From<QuadRepr> for Quad {
    fn from(repr: QuadRepr) -> Self {
        match repr {
            QuadRepr::Flat(coords) => Quad { coords },
            QuadRepr::Corners(corners) => Quad {
                coords: corners.iter().flat_map(|c| [c.x, c.y]).collect(),
            },
        }
    }
}

/// Quadrilateral point set in document space.
///
/// Accepts both a flat `[x1, y1, ..., x4, y4]` array and a list of `{x, y}`
/// corners. The coordinate count is validated when the quad is used, not
/// when it is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuadRepr", into = "Vec<f64>")]
pub struct Quad {
    coords: Vec<f64>,
}

impl Quad {
    /// Number of coordinates a well-formed quad carries (4 corners).
    pub const COORDS: usize = 8;

    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    /// Build a quad from four `(x, y)` corners.
    pub fn from_corners(corners: [(f64, f64); 4]) -> Self {
        Self { coords: corners.iter().flat_map(|&(x, y)| [x, y]).collect() }
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }
}

impl From<Quad> for Vec<f64> {
    fn from(quad: Quad) -> Self {
        quad.coords
    }
}

/// Text wrapper used by the renderer for titles and bodies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "str", default)]
    pub text: String,
    #[serde(default)]
    pub dir: String,
}

impl TextObject {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), dir: String::new() }
    }
}

/// Annotation object as supplied by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAnnotation {
    pub id: String,
    #[serde(default)]
    pub page_number: u32,
    pub annotation_type: ExternalKind,
    #[serde(default)]
    pub color: Option<RawColor>,
    #[serde(default)]
    pub quad_points: Option<Vec<Quad>>,
    #[serde(default)]
    pub title_obj: TextObject,
    #[serde(default)]
    pub contents_obj: TextObject,
    #[serde(default)]
    pub modification_date: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub in_reply_to: Option<String>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

impl ExternalAnnotation {
    pub fn new(id: impl Into<String>, page_number: u32, kind: ExternalKind) -> Self {
        Self {
            id: id.into(),
            page_number,
            annotation_type: kind,
            color: None,
            quad_points: None,
            title_obj: TextObject::default(),
            contents_obj: TextObject::default(),
            modification_date: None,
            subtype: None,
            in_reply_to: None,
            viewport: None,
        }
    }

    pub fn with_color(mut self, color: RawColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_quad(mut self, quad: Quad) -> Self {
        self.quad_points.get_or_insert_with(Vec::new).push(quad);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title_obj = TextObject::new(title);
        self
    }

    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents_obj = TextObject::new(contents);
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_modification_date(mut self, date: impl Into<String>) -> Self {
        self.modification_date = Some(date.into());
        self
    }

    pub fn in_reply_to(mut self, parent: impl Into<String>) -> Self {
        self.in_reply_to = Some(parent.into());
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Quads in the order the renderer supplied them.
    pub fn quads(&self) -> &[Quad] {
        self.quad_points.as_deref().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        &self.title_obj.text
    }

    pub fn is_reply(&self) -> bool {
        self.in_reply_to.is_some()
    }
}

/// Canonical annotation category used by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationType {
    Highlight,
    Underline,
    Strikeout,
}

/// Risk/advice classification tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
    High,
    Normal,
    Low,
    HighAdvice,
    NormalAdvice,
    LowAdvice,
}

impl Subtype {
    pub const ALL: [Subtype; 6] = [
        Subtype::High,
        Subtype::Normal,
        Subtype::Low,
        Subtype::HighAdvice,
        Subtype::NormalAdvice,
        Subtype::LowAdvice,
    ];

    /// Parse a subtype marker. Matching is exact; anything that is not one of
    /// the six tags (including the renderer's own subtype names) yields `None`.
    pub fn parse(marker: &str) -> Option<Subtype> {
        Subtype::ALL.into_iter().find(|subtype| subtype.as_str() == marker)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Subtype::High => "High",
            Subtype::Normal => "Normal",
            Subtype::Low => "Low",
            Subtype::HighAdvice => "HighAdvice",
            Subtype::NormalAdvice => "NormalAdvice",
            Subtype::LowAdvice => "LowAdvice",
        }
    }

    pub fn is_advice(self) -> bool {
        matches!(self, Subtype::HighAdvice | Subtype::NormalAdvice | Subtype::LowAdvice)
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editor type code for the freehand/ink-compatible editor.
pub const INK_EDITOR_TYPE: u16 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextContainer {
    pub text: String,
}

/// Reply attached to an annotation through the renderer's parent reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: String,
    /// Author of the reply.
    pub title: String,
    pub date: Option<String>,
    pub content: String,
}

/// Decoded annotation as kept by the annotation store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationStore {
    pub id: String,
    pub page_number: u32,
    pub page_ranges: Option<serde_json::Value>,
    /// Serialized shape group, opaque to everything but the scene layer.
    pub konva_string: String,
    pub konva_client_rect: Rect,
    pub title: String,
    #[serde(rename = "type")]
    pub annotation_type: AnnotationType,
    pub color: String,
    pub pdfjs_type: ExternalKind,
    pub pdfjs_editor_type: u16,
    pub subtype: Option<Subtype>,
    pub date: Option<String>,
    pub contents_obj: TextContainer,
    pub comments: Vec<CommentRecord>,
    pub readonly: bool,
}
