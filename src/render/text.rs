use std::io;
use std::path::Path;

use ab_glyph::{Font, FontArc, FontVec, GlyphId, PxScale, ScaleFont, point};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use tiny_skia::{Color, Mask, Paint, Pixmap, Rect, Transform};

/// Families tried in order before any installed face is accepted.
const PREFERRED_FAMILIES: [&str; 5] = [
    "Segoe UI",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

#[derive(Clone)]
pub struct FontSet {
    regular: FontArc,
    bold: FontArc,
    italic: FontArc,
}

impl FontSet {
    /// One font file serves every face.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(Self {
            regular: font.clone(),
            bold: font.clone(),
            italic: font,
        })
    }

    pub fn from_system() -> Option<Self> {
        let mut db = Database::new();
        db.load_system_fonts();

        let regular = load_face(&db, Weight::NORMAL, Style::Normal)?;
        let bold = load_face(&db, Weight::BOLD, Style::Normal).unwrap_or_else(|| regular.clone());
        let italic =
            load_face(&db, Weight::NORMAL, Style::Italic).unwrap_or_else(|| regular.clone());

        Some(Self {
            regular,
            bold,
            italic,
        })
    }

    /// Explicit path first, then system fonts. `None` means text is skipped.
    pub fn load(path: Option<&Path>) -> Option<Self> {
        if let Some(path) = path {
            match Self::from_file(path) {
                Ok(fonts) => {
                    tracing::info!(path = %path.display(), "loaded card font");
                    return Some(fonts);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "card font unusable, trying system fonts"
                    );
                }
            }
        }

        let fonts = Self::from_system();
        if fonts.is_none() {
            tracing::warn!("no usable system font found, report cards will have no text");
        }
        fonts
    }

    pub fn face(&self, face: FontFace) -> &FontArc {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Italic => &self.italic,
        }
    }
}

fn load_face(db: &Database, weight: Weight, style: Style) -> Option<FontArc> {
    let families: Vec<Family<'_>> = PREFERRED_FAMILIES
        .iter()
        .map(|name| Family::Name(*name))
        .chain(std::iter::once(Family::SansSerif))
        .collect();

    let id = db
        .query(&Query {
            families: &families,
            weight,
            stretch: Stretch::Normal,
            style,
        })
        .or_else(|| db.faces().next().map(|face| face.id))?;

    db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
    })
    .flatten()
    .map(FontArc::new)
}

/// Coverage mask of `text` laid out from `x` on `baseline`. Characters the
/// font has no glyph for are skipped rather than drawn as boxes.
pub fn text_mask(
    font: &FontArc,
    size: f32,
    x: f32,
    baseline: f32,
    text: &str,
    width: u32,
    height: u32,
) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);

    let mut caret = x;
    let mut prev: Option<GlyphId> = None;
    let data = mask.data_mut();

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if id.0 == 0 {
            continue;
        }
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    return;
                }
                let idx = (py as usize) * width as usize + px as usize;
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                data[idx] = data[idx].max(value);
            });
        }

        caret += scaled.h_advance(id);
        prev = Some(id);
    }

    Some(mask)
}

/// Paints `text` with any paint, solid or gradient. Without fonts this is a
/// no-op.
pub fn draw_text(
    pixmap: &mut Pixmap,
    fonts: Option<&FontSet>,
    face: FontFace,
    size: f32,
    x: f32,
    baseline: f32,
    text: &str,
    paint: &Paint,
) {
    let Some(fonts) = fonts else {
        return;
    };
    let (width, height) = (pixmap.width(), pixmap.height());
    let Some(mask) = text_mask(fonts.face(face), size, x, baseline, text, width, height) else {
        return;
    };
    if let Some(area) = Rect::from_xywh(0.0, 0.0, width as f32, height as f32) {
        pixmap.fill_rect(area, paint, Transform::identity(), Some(&mask));
    }
}

/// Halo behind text: the glyphs stamped around a ring of offsets.
pub fn draw_text_glow(
    pixmap: &mut Pixmap,
    fonts: Option<&FontSet>,
    face: FontFace,
    size: f32,
    x: f32,
    baseline: f32,
    text: &str,
    color: Color,
    radius: f32,
) {
    const OFFSETS: [(f32, f32); 8] = [
        (-1.0, 0.0),
        (1.0, 0.0),
        (0.0, -1.0),
        (0.0, 1.0),
        (-0.7, -0.7),
        (0.7, -0.7),
        (-0.7, 0.7),
        (0.7, 0.7),
    ];

    let mut layer = color;
    layer.set_alpha(color.alpha() / OFFSETS.len() as f32);
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color(layer);

    for ring in [radius, radius / 2.0] {
        for (dx, dy) in OFFSETS {
            draw_text(
                pixmap,
                fonts,
                face,
                size,
                x + dx * ring,
                baseline + dy * ring,
                text,
                &paint,
            );
        }
    }
}
