//! Status card rasterisation on a `tiny-skia` canvas.

pub mod card;
pub mod progress;
pub mod shape;
pub mod style;
pub mod text;

use tiny_skia::{
    GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point, Rect, SpreadMode, Stroke,
    Transform,
};

use crate::error::ReportError;
use crate::utils::color::to_color;
use card::draw_glass_card;
use progress::ProgressBar;
use style::*;
use text::{FontFace, FontSet, draw_text, draw_text_glow};

/// A label/value line of the report, shared by the card and the text body.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: String,
}

/// Everything the card shows, already formatted.
#[derive(Clone, Debug)]
pub struct CardContent {
    pub title: String,
    pub rows: Vec<ReportRow>,
    pub ram_percent: f64,
    pub cpu_percent: f64,
    pub footer: String,
}

/// Turns card content into encoded image bytes.
pub trait CardRenderer: Send + Sync {
    fn render_png(&self, card: &CardContent) -> Result<Vec<u8>, ReportError>;
}

#[derive(Clone, Default)]
pub struct PngRenderer {
    fonts: Option<FontSet>,
    palette: Palette,
}

impl PngRenderer {
    pub fn new(fonts: Option<FontSet>) -> Self {
        Self {
            fonts,
            palette: Palette::default(),
        }
    }

    /// Paints the full card without encoding it.
    pub fn paint(&self, card: &CardContent) -> Result<Pixmap, ReportError> {
        let mut pixmap = Pixmap::new(CANVAS_WIDTH, CANVAS_HEIGHT)
            .ok_or_else(|| ReportError::Render("could not allocate canvas".to_string()))?;
        let fonts = self.fonts.as_ref();
        let palette = &self.palette;

        self.paint_background(&mut pixmap)?;
        draw_glass_card(
            &mut pixmap,
            CARD_X,
            CARD_Y,
            CARD_WIDTH,
            CARD_HEIGHT,
            CARD_RADIUS,
            palette.accent,
        );

        // title
        let title_x = CARD_X + 50.0;
        draw_text_glow(
            &mut pixmap,
            fonts,
            FontFace::Bold,
            TITLE_SIZE,
            title_x,
            TITLE_BASELINE,
            &card.title,
            to_color(palette.accent, 0.53),
            TITLE_GLOW,
        );
        let mut title = Paint::default();
        title.anti_alias = true;
        title.shader =
            horizontal_gradient(title_x, title_x + 500.0, palette.accent, palette.accent_dark)?;
        draw_text(
            &mut pixmap,
            fonts,
            FontFace::Bold,
            TITLE_SIZE,
            title_x,
            TITLE_BASELINE,
            &card.title,
            &title,
        );

        // divider
        let mut pb = PathBuilder::new();
        pb.move_to(CARD_X + 50.0, DIVIDER_Y);
        pb.line_to(CARD_X + CARD_WIDTH - 50.0, DIVIDER_Y);
        if let Some(line) = pb.finish() {
            let mut paint = Paint::default();
            paint.anti_alias = true;
            paint.set_color(to_color(palette.accent, 0.13));
            let stroke = Stroke {
                width: 2.0,
                ..Stroke::default()
            };
            pixmap.stroke_path(&line, &paint, &stroke, Transform::identity(), None);
        }

        let mut label_paint = Paint::default();
        label_paint.anti_alias = true;
        label_paint.set_color(to_color(palette.accent, 1.0));
        let mut value_paint = Paint::default();
        value_paint.anti_alias = true;
        value_paint.set_color(to_color(palette.value_text, 0.8));

        for (i, row) in card.rows.iter().enumerate() {
            let baseline = FIRST_ROW_BASELINE + i as f32 * ROW_HEIGHT;
            draw_text(
                &mut pixmap,
                fonts,
                FontFace::Bold,
                LABEL_SIZE,
                LABEL_X,
                baseline,
                row.label,
                &label_paint,
            );
            draw_text(
                &mut pixmap,
                fonts,
                FontFace::Regular,
                VALUE_SIZE,
                VALUE_X,
                baseline,
                &row.value,
                &value_paint,
            );
        }

        let bars_y = bars_top(card.rows.len());
        ProgressBar {
            x: BAR_X,
            y: bars_y,
            width: BAR_WIDTH,
            height: BAR_HEIGHT,
            percent: card.ram_percent,
            label: "RAM Usage",
            fill: palette.ram_fill,
            track: palette.ram_track,
        }
        .draw(&mut pixmap, fonts);
        ProgressBar {
            x: BAR_X,
            y: bars_y + BAR_HEIGHT + BAR_GAP,
            width: BAR_WIDTH,
            height: BAR_HEIGHT,
            percent: card.cpu_percent,
            label: "CPU Load",
            fill: palette.cpu_fill,
            track: palette.cpu_track,
        }
        .draw(&mut pixmap, fonts);

        let mut footer = Paint::default();
        footer.anti_alias = true;
        footer.set_color(to_color(palette.footer_text, 1.0));
        draw_text(
            &mut pixmap,
            fonts,
            FontFace::Italic,
            FOOTER_SIZE,
            LABEL_X,
            FOOTER_BASELINE,
            &card.footer,
            &footer,
        );

        Ok(pixmap)
    }

    fn paint_background(&self, pixmap: &mut Pixmap) -> Result<(), ReportError> {
        let (width, height) = (CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
        let mut paint = Paint::default();
        paint.shader = LinearGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(width, height),
            vec![
                GradientStop::new(0.0, to_color(self.palette.background_start, 1.0)),
                GradientStop::new(1.0, to_color(self.palette.background_end, 1.0)),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        )
        .ok_or_else(|| ReportError::Render("invalid background gradient".to_string()))?;

        let area = Rect::from_xywh(0.0, 0.0, width, height)
            .ok_or_else(|| ReportError::Render("invalid canvas bounds".to_string()))?;
        pixmap.fill_rect(area, &paint, Transform::identity(), None);
        Ok(())
    }
}

impl CardRenderer for PngRenderer {
    fn render_png(&self, card: &CardContent) -> Result<Vec<u8>, ReportError> {
        self.paint(card)?
            .encode_png()
            .map_err(|e| ReportError::Encode(e.to_string()))
    }
}

fn horizontal_gradient(
    from_x: f32,
    to_x: f32,
    start: &str,
    end: &str,
) -> Result<tiny_skia::Shader<'static>, ReportError> {
    LinearGradient::new(
        Point::from_xy(from_x, 0.0),
        Point::from_xy(to_x, 0.0),
        vec![
            GradientStop::new(0.0, to_color(start, 1.0)),
            GradientStop::new(1.0, to_color(end, 1.0)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| ReportError::Render("invalid title gradient".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> CardContent {
        CardContent {
            title: "Uptt – System Monitor".to_string(),
            rows: vec![
                ReportRow {
                    label: "⏱️ Uptime",
                    value: "1d 1h 1m 1s".to_string(),
                },
                ReportRow {
                    label: "🔖 Host",
                    value: "test-host".to_string(),
                },
            ],
            ram_percent: 50.0,
            cpu_percent: 150.0,
            footer: "⏰ Generated: 2026-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn canvas_is_fully_opaque() {
        let pixmap = PngRenderer::new(None).paint(&content()).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (1400, 800));
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 255);
        assert_eq!(pixmap.pixel(1399, 799).unwrap().alpha(), 255);
    }

    #[test]
    fn encodes_as_png() {
        let bytes = PngRenderer::new(None).render_png(&content()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = Pixmap::decode_png(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1400, 800));
    }

    #[test]
    fn overfull_cpu_bar_is_filled_to_the_end() {
        let card = content();
        let pixmap = PngRenderer::new(None).paint(&card).unwrap();
        let cpu_y = (bars_top(card.rows.len()) + BAR_HEIGHT + BAR_GAP + BAR_HEIGHT / 2.0) as u32;
        let near_end = pixmap.pixel((BAR_X + BAR_WIDTH - 30.0) as u32, cpu_y).unwrap();
        // orange gradient end, not the dark brown track
        assert!(near_end.red() > 150);
    }

    #[test]
    fn system_fonts_add_ink() {
        let Some(fonts) = FontSet::from_system() else {
            return;
        };
        let plain = PngRenderer::new(None).paint(&content()).unwrap();
        let lettered = PngRenderer::new(Some(fonts)).paint(&content()).unwrap();
        assert_ne!(plain.data(), lettered.data());
    }
}
