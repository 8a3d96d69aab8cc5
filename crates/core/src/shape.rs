//! Vector shapes for text-markup annotations
//!
//! Highlight, underline and strikeout all render as rectangle primitives and
//! differ only in geometry offsets and fill vs. stroke. Shapes are grouped per
//! annotation and serialized to the scene library's node JSON so the UI can
//! redraw an annotation without rerunning the decoder.

use markup_model::{ExternalKind, Rect};
use serde::{Deserialize, Serialize};

/// Name given to every annotation shape group.
pub const SHAPE_GROUP_NAME: &str = "shapeGroup";

/// Opacity of highlight fills
pub const HIGHLIGHT_OPACITY: f64 = 0.5;

/// Stroke width of underline and strikeout lines
pub const LINE_STROKE_WIDTH: f64 = 0.5;

/// Thickness of the rectangle used to draw a line
pub const LINE_THICKNESS: f64 = 0.5;

/// Hit-test width for lines, much wider than the visible stroke so thin
/// lines stay selectable.
pub const LINE_HIT_STROKE_WIDTH: f64 = 10.0;

/// Distance of the underline above the bottom edge of the text box
pub const UNDERLINE_OFFSET: f64 = 1.5;

const RECT_CLASS: &str = "Rect";
const GROUP_CLASS: &str = "Group";

/// Attributes of a rectangle primitive, in the scene library's naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectAttrs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_stroke_width: Option<f64>,
}

/// One rectangle primitive node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub attrs: RectAttrs,
    #[serde(rename = "className")]
    pub class_name: String,
}

impl Shape {
    /// Filled rectangle covering the whole text box.
    pub fn highlight(rect: Rect, color: &str) -> Self {
        Self::rect(RectAttrs {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            opacity: Some(HIGHLIGHT_OPACITY),
            fill: Some(color.to_owned()),
            stroke: None,
            stroke_width: None,
            hit_stroke_width: None,
        })
    }

    /// Thin line just above the bottom edge of the text box.
    pub fn underline(rect: Rect, color: &str) -> Self {
        Self::line(rect.x, rect.bottom() - UNDERLINE_OFFSET, rect.width, color)
    }

    /// Thin line through the vertical middle of the text box.
    pub fn strikeout(rect: Rect, color: &str) -> Self {
        Self::line(rect.x, rect.y + rect.height / 2.0, rect.width, color)
    }

    fn line(x: f64, y: f64, width: f64, color: &str) -> Self {
        Self::rect(RectAttrs {
            x,
            y,
            width,
            height: LINE_THICKNESS,
            opacity: None,
            fill: None,
            stroke: Some(color.to_owned()),
            stroke_width: Some(LINE_STROKE_WIDTH),
            hit_stroke_width: Some(LINE_HIT_STROKE_WIDTH),
        })
    }

    fn rect(attrs: RectAttrs) -> Self {
        Self { attrs, class_name: RECT_CLASS.to_owned() }
    }

    /// Rectangle the shape occupies before stroking.
    pub fn self_rect(&self) -> Rect {
        Rect::new(self.attrs.x, self.attrs.y, self.attrs.width, self.attrs.height)
    }

    /// Rectangle the shape paints, stroke included.
    ///
    /// A stroke is centred on the outline, so stroked shapes grow by half the
    /// stroke width on every side. The hit-test width does not paint and is
    /// not counted.
    pub fn client_rect(&self) -> Rect {
        match (&self.attrs.stroke, self.attrs.stroke_width) {
            (Some(_), Some(width)) if width > 0.0 => self.self_rect().inflate(width / 2.0),
            _ => self.self_rect(),
        }
    }

    pub fn is_stroked(&self) -> bool {
        self.attrs.stroke.is_some()
    }
}

/// Build the primitive for one text box of an annotation.
///
/// Kinds outside highlight/underline/strikeout produce nothing and the caller
/// skips the quad.
pub fn synthesize(kind: ExternalKind, rect: Rect, color: &str) -> Option<Shape> {
    match kind {
        ExternalKind::Highlight => Some(Shape::highlight(rect, color)),
        ExternalKind::Underline => Some(Shape::underline(rect, color)),
        ExternalKind::StrikeOut => Some(Shape::strikeout(rect, color)),
        ExternalKind::Squiggly | ExternalKind::Other(_) => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GroupAttrs {
    draggable: bool,
    name: String,
    id: String,
}

#[derive(Serialize)]
struct GroupNodeRef<'a> {
    attrs: &'a GroupAttrs,
    #[serde(rename = "className")]
    class_name: &'static str,
    children: &'a [Shape],
}

#[derive(Deserialize)]
struct GroupNode {
    attrs: GroupAttrs,
    #[serde(default)]
    children: Vec<Shape>,
}

/// Ordered set of shapes making up one annotation.
///
/// Shapes keep insertion order, which is also their paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGroup {
    attrs: GroupAttrs,
    shapes: Vec<Shape>,
}

impl ShapeGroup {
    /// Create an empty, non-draggable group for annotation `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            attrs: GroupAttrs {
                draggable: false,
                name: SHAPE_GROUP_NAME.to_owned(),
                id: id.into(),
            },
            shapes: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.attrs.id
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Union of the client rects of all shapes; zero rect for an empty group.
    pub fn client_rect(&self) -> Rect {
        let rects: Vec<Rect> = self.shapes.iter().map(Shape::client_rect).collect();
        Rect::union_all(&rects)
    }

    /// Serialize the group to the scene library's node JSON.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&GroupNodeRef {
            attrs: &self.attrs,
            class_name: GROUP_CLASS,
            children: &self.shapes,
        })
    }

    /// Parse a payload produced by [`ShapeGroup::to_payload`].
    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        let node: GroupNode = serde_json::from_str(payload)?;
        Ok(Self { attrs: node.attrs, shapes: node.children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOR: &str = "rgb(255, 255, 0)";

    #[test]
    fn test_highlight_fills_full_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let shape = synthesize(ExternalKind::Highlight, rect, COLOR).unwrap();
        assert_eq!(shape.self_rect(), rect);
        assert_eq!(shape.attrs.opacity, Some(0.5));
        assert_eq!(shape.attrs.fill.as_deref(), Some(COLOR));
        assert!(!shape.is_stroked());
        assert_eq!(shape.client_rect(), rect);
    }

    #[test]
    fn test_underline_sits_above_bottom_edge() {
        let shape =
            synthesize(ExternalKind::Underline, Rect::new(10.0, 100.0, 50.0, 20.0), COLOR).unwrap();
        assert_eq!(shape.self_rect(), Rect::new(10.0, 118.5, 50.0, 0.5));
        assert_eq!(shape.attrs.stroke.as_deref(), Some(COLOR));
        assert_eq!(shape.attrs.stroke_width, Some(LINE_STROKE_WIDTH));
        assert_eq!(shape.attrs.hit_stroke_width, Some(LINE_HIT_STROKE_WIDTH));
        assert_eq!(shape.attrs.fill, None);
    }

    #[test]
    fn test_strikeout_sits_at_midpoint() {
        let shape =
            synthesize(ExternalKind::StrikeOut, Rect::new(10.0, 100.0, 50.0, 20.0), COLOR).unwrap();
        assert_eq!(shape.self_rect(), Rect::new(10.0, 110.0, 50.0, 0.5));
        assert_eq!(shape.attrs.hit_stroke_width, Some(LINE_HIT_STROKE_WIDTH));
    }

    #[test]
    fn test_stroked_client_rect_includes_half_stroke() {
        let shape = Shape::strikeout(Rect::new(10.0, 100.0, 50.0, 20.0), COLOR);
        assert_eq!(shape.client_rect(), Rect::new(9.75, 109.75, 50.5, 1.0));
    }

    #[test]
    fn test_unknown_kinds_produce_nothing() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(synthesize(ExternalKind::Squiggly, rect, COLOR).is_none());
        assert!(synthesize(ExternalKind::Other(3), rect, COLOR).is_none());
    }

    #[test]
    fn test_zero_size_rect_still_produces_shape() {
        let shape = synthesize(ExternalKind::Highlight, Rect::ZERO, COLOR).unwrap();
        assert_eq!(shape.client_rect(), Rect::ZERO);
    }

    #[test]
    fn test_group_client_rect_is_union() {
        let mut group = ShapeGroup::new("5R");
        group.push(Shape::highlight(Rect::new(0.0, 0.0, 100.0, 20.0), COLOR));
        group.push(Shape::highlight(Rect::new(0.0, 25.0, 40.0, 20.0), COLOR));
        assert_eq!(group.len(), 2);
        assert_eq!(group.client_rect(), Rect::new(0.0, 0.0, 100.0, 45.0));
    }

    #[test]
    fn test_empty_group_client_rect_is_zero() {
        let group = ShapeGroup::new("5R");
        assert!(group.is_empty());
        assert_eq!(group.client_rect(), Rect::ZERO);
    }

    #[test]
    fn test_payload_layout() {
        let mut group = ShapeGroup::new("5R");
        group.push(Shape::underline(Rect::new(0.0, 0.0, 100.0, 20.0), COLOR));

        let payload = group.to_payload().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(value["className"], "Group");
        assert_eq!(value["attrs"]["name"], SHAPE_GROUP_NAME);
        assert_eq!(value["attrs"]["id"], "5R");
        assert_eq!(value["attrs"]["draggable"], false);
        let child = &value["children"][0];
        assert_eq!(child["className"], "Rect");
        assert_eq!(child["attrs"]["y"], 18.5);
        assert_eq!(child["attrs"]["strokeWidth"], 0.5);
        assert_eq!(child["attrs"]["hitStrokeWidth"], 10.0);
        assert!(child["attrs"].get("fill").is_none());
    }

    #[test]
    fn test_payload_parses_back() {
        let mut group = ShapeGroup::new("5R");
        group.push(Shape::highlight(Rect::new(0.0, 0.0, 100.0, 20.0), COLOR));
        group.push(Shape::strikeout(Rect::new(0.0, 30.0, 60.0, 20.0), COLOR));

        let parsed = ShapeGroup::from_payload(&group.to_payload().unwrap()).unwrap();
        assert_eq!(parsed, group);
        assert_eq!(parsed.id(), "5R");
    }
}
