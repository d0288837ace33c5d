use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

/// Corner radii in top-left, top-right, bottom-right, bottom-left order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Negative or non-finite radii become square corners; the rest are
    /// capped at half the shorter side so arcs never cross.
    pub fn fitted(self, width: f32, height: f32) -> Self {
        let limit = (width.min(height) / 2.0).max(0.0);
        let fit = |r: f32| if r.is_finite() && r > 0.0 { r.min(limit) } else { 0.0 };
        Self {
            top_left: fit(self.top_left),
            top_right: fit(self.top_right),
            bottom_right: fit(self.bottom_right),
            bottom_left: fit(self.bottom_left),
        }
    }

    pub fn expanded(self, by: f32) -> Self {
        Self {
            top_left: self.top_left + by,
            top_right: self.top_right + by,
            bottom_right: self.bottom_right + by,
            bottom_left: self.bottom_left + by,
        }
    }
}

impl From<f32> for CornerRadii {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}

/// Closed path of four straight edges joined by quadratic corners. Returns
/// `None` for empty or non-finite bounds.
pub fn rounded_rect_path(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radii: impl Into<CornerRadii>,
) -> Option<Path> {
    if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
        return None;
    }
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let r = radii.into().fitted(width, height);
    let (right, bottom) = (x + width, y + height);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r.top_left, y);
    pb.line_to(right - r.top_right, y);
    pb.quad_to(right, y, right, y + r.top_right);
    pb.line_to(right, bottom - r.bottom_right);
    pb.quad_to(right, bottom, right - r.bottom_right, bottom);
    pb.line_to(x + r.bottom_left, bottom);
    pb.quad_to(x, bottom, x, bottom - r.bottom_left);
    pb.line_to(x, y + r.top_left);
    pb.quad_to(x, y, x + r.top_left, y);
    pb.close();
    pb.finish()
}

/// Fills and/or strokes a rounded rectangle. Invalid geometry draws nothing.
pub fn draw_rounded_rect(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radii: impl Into<CornerRadii>,
    fill: Option<&Paint>,
    stroke: Option<(&Paint, &Stroke)>,
) {
    let Some(path) = rounded_rect_path(x, y, width, height, radii) else {
        return;
    };

    if let Some(paint) = fill {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
    if let Some((paint, stroke)) = stroke {
        pixmap.stroke_path(&path, paint, stroke, Transform::identity(), None);
    }
}

const GLOW_STEPS: u16 = 8;

/// Soft halo around a rounded rectangle, built from concentric translucent
/// layers since the canvas has no blur filter.
pub fn draw_glow(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radii: impl Into<CornerRadii>,
    color: Color,
    blur: f32,
) {
    if blur <= 0.0 || color.alpha() <= 0.0 {
        return;
    }

    let radii = radii.into().fitted(width, height);
    let mut layer = color;
    layer.set_alpha(color.alpha() / GLOW_STEPS as f32);

    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color(layer);

    for step in (1..=GLOW_STEPS).rev() {
        let spread = blur * step as f32 / GLOW_STEPS as f32;
        draw_rounded_rect(
            pixmap,
            x - spread,
            y - spread,
            width + spread * 2.0,
            height + spread * 2.0,
            radii.expanded(spread),
            Some(&paint),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_radius_is_capped() {
        let r = CornerRadii::uniform(50.0).fitted(40.0, 20.0);
        assert_eq!(r, CornerRadii::uniform(10.0));
    }

    #[test]
    fn invalid_radius_falls_back_to_square() {
        let r = CornerRadii::new(-5.0, f32::NAN, 4.0, f32::INFINITY).fitted(100.0, 100.0);
        assert_eq!(r, CornerRadii::new(0.0, 0.0, 4.0, 0.0));
    }

    #[test]
    fn path_spans_requested_bounds() {
        let path = rounded_rect_path(10.0, 20.0, 100.0, 40.0, 20.0).unwrap();
        let b = path.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (10.0, 20.0, 110.0, 60.0));
    }

    #[test]
    fn mixed_radii_build_a_path() {
        let radii = CornerRadii::new(30.0, 30.0, 0.0, 0.0);
        assert!(rounded_rect_path(0.0, 0.0, 200.0, 50.0, radii).is_some());
    }

    #[test]
    fn empty_bounds_produce_no_path() {
        assert!(rounded_rect_path(0.0, 0.0, 0.0, 40.0, 20.0).is_none());
        assert!(rounded_rect_path(0.0, 0.0, 10.0, -1.0, 2.0).is_none());
        assert!(rounded_rect_path(f32::NAN, 0.0, 10.0, 10.0, 2.0).is_none());
    }

    #[test]
    fn fill_paints_inside_only() {
        let mut pixmap = Pixmap::new(100, 100).unwrap();
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 0, 0, 255);

        draw_rounded_rect(&mut pixmap, 10.0, 10.0, 80.0, 80.0, 20.0, Some(&paint), None);

        assert_eq!(pixmap.pixel(50, 50).unwrap().alpha(), 255);
        // corner is cut away by the radius
        assert_eq!(pixmap.pixel(11, 11).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(5, 50).unwrap().alpha(), 0);
    }

    #[test]
    fn glow_reaches_outside_the_shape() {
        let mut pixmap = Pixmap::new(100, 100).unwrap();
        let color = Color::from_rgba8(0, 255, 170, 200);

        draw_glow(&mut pixmap, 30.0, 30.0, 40.0, 40.0, 5.0, color, 20.0);

        assert!(pixmap.pixel(50, 22).unwrap().alpha() > 0);
        assert_eq!(pixmap.pixel(50, 2).unwrap().alpha(), 0);
    }
}
