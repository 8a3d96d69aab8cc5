//! Coordinate transformation from document space to viewport pixel space
//!
//! Document space uses the PDF coordinate system:
//! - Origin (0, 0) at bottom-left of page
//! - Y increases upward
//! - Units are points
//!
//! Viewport space has its origin at the top-left and is measured in pixels,
//! so every conversion scales by the viewport zoom and flips the Y axis
//! against the (already scaled) page height.

use crate::error::GeometryError;
use markup_model::{Quad, Rect, Viewport};

/// Check that a viewport can be used for coordinate conversion.
pub fn validate_viewport(viewport: &Viewport) -> Result<(), GeometryError> {
    if !viewport.scale.is_finite() || viewport.scale <= 0.0 {
        return Err(GeometryError::InvalidScale(viewport.scale));
    }
    if !viewport.height.is_finite() || viewport.height <= 0.0 {
        return Err(GeometryError::InvalidHeight(viewport.height));
    }
    Ok(())
}

/// Bounding extents of a quad as `(min_x, min_y, max_x, max_y)` in document
/// space.
pub fn quad_extents(quad: &Quad) -> Result<(f64, f64, f64, f64), GeometryError> {
    let coords = quad.coords();
    if coords.len() != Quad::COORDS {
        return Err(GeometryError::MalformedQuad(coords.len()));
    }
    if let Some(index) = coords.iter().position(|c| !c.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate { index });
    }

    let mut min_x = coords[0];
    let mut max_x = coords[0];
    let mut min_y = coords[1];
    let mut max_y = coords[1];
    for corner in coords.chunks_exact(2).skip(1) {
        min_x = min_x.min(corner[0]);
        max_x = max_x.max(corner[0]);
        min_y = min_y.min(corner[1]);
        max_y = max_y.max(corner[1]);
    }
    Ok((min_x, min_y, max_x, max_y))
}

/// Convert one quad into an axis-aligned rectangle in viewport pixels.
///
/// Zero-width or zero-height quads come back as zero-size rectangles; it is
/// up to the shape synthesizer to decide what to draw for them.
pub fn quad_to_rect(quad: &Quad, viewport: &Viewport) -> Result<Rect, GeometryError> {
    validate_viewport(viewport)?;
    let (min_x, min_y, max_x, max_y) = quad_extents(quad)?;
    let scale = viewport.scale;

    Ok(Rect {
        x: min_x * scale,
        y: viewport.height - max_y * scale,
        width: (max_x - min_x) * scale,
        height: (max_y - min_y) * scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_quad() -> Quad {
        Quad::from_corners([(0.0, 780.0), (100.0, 780.0), (0.0, 800.0), (100.0, 800.0)])
    }

    #[test]
    fn test_quad_to_rect_flips_y_axis() {
        let rect = quad_to_rect(&line_quad(), &Viewport::new(1.0, 800.0)).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 100.0, 20.0));
    }

    #[test]
    fn test_quad_to_rect_applies_scale() {
        // Page is 800pt tall, rendered at 150%.
        let rect = quad_to_rect(&line_quad(), &Viewport::new(1.5, 1200.0)).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 150.0, 30.0));

        let quad = Quad::from_corners([(10.0, 100.0), (60.0, 100.0), (10.0, 110.0), (60.0, 110.0)]);
        let rect = quad_to_rect(&quad, &Viewport::new(2.0, 1600.0)).unwrap();
        assert_eq!(rect, Rect::new(20.0, 1380.0, 100.0, 20.0));
    }

    #[test]
    fn test_corner_order_does_not_matter() {
        let shuffled =
            Quad::from_corners([(100.0, 800.0), (0.0, 780.0), (100.0, 780.0), (0.0, 800.0)]);
        let viewport = Viewport::new(1.0, 800.0);
        assert_eq!(
            quad_to_rect(&shuffled, &viewport).unwrap(),
            quad_to_rect(&line_quad(), &viewport).unwrap()
        );
    }

    #[test]
    fn test_quad_to_rect_is_deterministic() {
        let quad = Quad::from_corners([
            (72.31, 640.127),
            (301.9, 640.127),
            (72.31, 652.44),
            (301.9, 652.44),
        ]);
        let viewport = Viewport::new(1.333_333, 1056.0);
        let first = quad_to_rect(&quad, &viewport).unwrap();
        let second = quad_to_rect(&quad, &viewport).unwrap();
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.y.to_bits(), second.y.to_bits());
        assert_eq!(first.width.to_bits(), second.width.to_bits());
        assert_eq!(first.height.to_bits(), second.height.to_bits());
    }

    #[test]
    fn test_degenerate_quad_passes_through() {
        let quad = Quad::from_corners([(50.0, 400.0); 4]);
        let rect = quad_to_rect(&quad, &Viewport::new(1.0, 800.0)).unwrap();
        assert_eq!(rect, Rect::new(50.0, 400.0, 0.0, 0.0));
    }

    #[test]
    fn test_malformed_quad_rejected() {
        let quad = Quad::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(
            quad_to_rect(&quad, &Viewport::new(1.0, 800.0)),
            Err(GeometryError::MalformedQuad(6))
        );
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let quad = Quad::new(vec![0.0, 1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(
            quad_to_rect(&quad, &Viewport::new(1.0, 800.0)),
            Err(GeometryError::NonFiniteCoordinate { index: 3 })
        );
    }

    #[test]
    fn test_invalid_viewport_rejected() {
        assert_eq!(
            validate_viewport(&Viewport::new(0.0, 800.0)),
            Err(GeometryError::InvalidScale(0.0))
        );
        assert!(matches!(
            validate_viewport(&Viewport::new(1.0, f64::INFINITY)),
            Err(GeometryError::InvalidHeight(_))
        ));
        assert_eq!(
            validate_viewport(&Viewport::new(1.0, 0.0)),
            Err(GeometryError::InvalidHeight(0.0))
        );
        assert_eq!(
            validate_viewport(&Viewport::new(1.0, -800.0)),
            Err(GeometryError::InvalidHeight(-800.0))
        );
        assert!(validate_viewport(&Viewport::new(1.0, 800.0)).is_ok());
    }
}
