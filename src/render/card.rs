use tiny_skia::{Paint, Pixmap};

use super::shape::{CornerRadii, draw_glow, draw_rounded_rect};
use crate::utils::color::to_color;

/// Translucent rounded panel with a soft glow and a faint reflection strip
/// across its top quarter.
pub fn draw_glass_card(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
    glow: &str,
) {
    draw_glow(pixmap, x, y, width, height, radius, to_color(glow, 0.2), 30.0);

    let mut panel = Paint::default();
    panel.anti_alias = true;
    panel.set_color(to_color("#ffffff", 0.04));
    draw_rounded_rect(pixmap, x, y, width, height, radius, Some(&panel), None);

    let mut highlight = Paint::default();
    highlight.anti_alias = true;
    highlight.set_color(to_color("#ffffff", 0.06));
    draw_rounded_rect(
        pixmap,
        x + 1.0,
        y + 1.0,
        width - 2.0,
        height / 4.0,
        CornerRadii::new(radius, radius, 0.0, 0.0),
        Some(&highlight),
        None,
    );
}
