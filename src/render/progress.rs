use tiny_skia::{GradientStop, LinearGradient, Paint, Pixmap, Point, SpreadMode, Transform};

use super::shape::{draw_glow, draw_rounded_rect};
use super::style::{BAR_LABEL_SIZE, BAR_RADIUS};
use super::text::{FontFace, FontSet, draw_text};
use crate::utils::color::{hex_to_rgba, rgba_color, shade_color, to_color};
use crate::utils::sys::clamp_percent;

/// A labeled horizontal gauge.
#[derive(Clone, Debug)]
pub struct ProgressBar<'a> {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub percent: f64,
    pub label: &'a str,
    pub fill: &'a str,
    pub track: &'a str,
}

/// What a bar will draw: the fill width and the caption are both derived
/// from the same clamped percent.
#[derive(Clone, Debug, PartialEq)]
pub struct BarGeometry {
    pub percent: f64,
    pub track_width: f32,
    pub fill_width: f32,
    pub caption: String,
}

impl ProgressBar<'_> {
    pub fn geometry(&self) -> BarGeometry {
        let percent = clamp_percent(self.percent);
        let track_width = self.width.max(0.0);
        BarGeometry {
            percent,
            track_width,
            fill_width: (percent / 100.0) as f32 * track_width,
            caption: format!("{}: {:.1}%", self.label, percent),
        }
    }

    pub fn draw(&self, pixmap: &mut Pixmap, fonts: Option<&FontSet>) -> BarGeometry {
        let geometry = self.geometry();

        let mut track = Paint::default();
        track.anti_alias = true;
        track.set_color(to_color(self.track, 1.0));
        draw_rounded_rect(
            pixmap,
            self.x,
            self.y,
            geometry.track_width,
            self.height,
            BAR_RADIUS,
            Some(&track),
            None,
        );

        if geometry.fill_width > 0.0 {
            let end = shade_color(self.fill, -30).unwrap_or_else(|| self.track.to_string());
            let mut fill = Paint::default();
            fill.anti_alias = true;
            match LinearGradient::new(
                Point::from_xy(self.x, self.y),
                Point::from_xy(self.x + geometry.track_width, self.y),
                vec![
                    GradientStop::new(0.0, to_color(self.fill, 1.0)),
                    GradientStop::new(1.0, to_color(&end, 1.0)),
                ],
                SpreadMode::Pad,
                Transform::identity(),
            ) {
                Some(shader) => fill.shader = shader,
                None => fill.set_color(to_color(self.fill, 1.0)),
            }

            let glow = rgba_color(&hex_to_rgba(self.fill, 0.4))
                .unwrap_or_else(|| to_color(self.fill, 0.4));
            draw_glow(
                pixmap,
                self.x,
                self.y,
                geometry.fill_width,
                self.height,
                BAR_RADIUS,
                glow,
                20.0,
            );
            draw_rounded_rect(
                pixmap,
                self.x,
                self.y,
                geometry.fill_width,
                self.height,
                BAR_RADIUS,
                Some(&fill),
                None,
            );
        }

        let mut caption = Paint::default();
        caption.anti_alias = true;
        caption.set_color(to_color("#ffffff", 0.8));
        draw_text(
            pixmap,
            fonts,
            FontFace::Bold,
            BAR_LABEL_SIZE,
            self.x + 20.0,
            self.y + self.height / 2.0 + 8.0,
            &geometry.caption,
            &caption,
        );

        geometry
    }
}
