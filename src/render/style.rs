//! Fixed palette and layout of the status card.

pub const CANVAS_WIDTH: u32 = 1400;
pub const CANVAS_HEIGHT: u32 = 800;

pub const CARD_X: f32 = 70.0;
pub const CARD_Y: f32 = 70.0;
pub const CARD_WIDTH: f32 = CANVAS_WIDTH as f32 - 140.0;
pub const CARD_HEIGHT: f32 = CANVAS_HEIGHT as f32 - 140.0;
pub const CARD_RADIUS: f32 = 30.0;

pub const TITLE_SIZE: f32 = 54.0;
pub const TITLE_BASELINE: f32 = CARD_Y + 80.0;
pub const TITLE_GLOW: f32 = 6.0;
pub const DIVIDER_Y: f32 = CARD_Y + 110.0;

pub const LABEL_X: f32 = CARD_X + 60.0;
pub const VALUE_X: f32 = CARD_X + 350.0;
pub const LABEL_SIZE: f32 = 26.0;
pub const VALUE_SIZE: f32 = 24.0;
pub const FIRST_ROW_BASELINE: f32 = CARD_Y + 155.0;
pub const ROW_HEIGHT: f32 = 42.0;

pub const BAR_X: f32 = LABEL_X;
pub const BAR_WIDTH: f32 = CARD_WIDTH - 120.0;
pub const BAR_HEIGHT: f32 = 40.0;
pub const BAR_RADIUS: f32 = 20.0;
pub const BAR_GAP: f32 = 20.0;
pub const BAR_LABEL_SIZE: f32 = 22.0;

pub const FOOTER_SIZE: f32 = 22.0;
pub const FOOTER_BASELINE: f32 = CANVAS_HEIGHT as f32 - 100.0;

#[derive(Clone, Debug)]
pub struct Palette {
    pub background_start: &'static str,
    pub background_end: &'static str,
    pub accent: &'static str,
    pub accent_dark: &'static str,
    pub value_text: &'static str,
    pub footer_text: &'static str,
    pub ram_fill: &'static str,
    pub ram_track: &'static str,
    pub cpu_fill: &'static str,
    pub cpu_track: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_start: "#0d1a22",
            background_end: "#091015",
            accent: "#00ffaa",
            accent_dark: "#00cc88",
            value_text: "#ffffff",
            footer_text: "#77ffd2",
            ram_fill: "#00ffaa",
            ram_track: "#003322",
            cpu_fill: "#ffaa00",
            cpu_track: "#332200",
        }
    }
}

/// Top edge of the first progress bar for a card with `rows` metric rows.
pub fn bars_top(rows: usize) -> f32 {
    FIRST_ROW_BASELINE + rows.saturating_sub(1) as f32 * ROW_HEIGHT + 29.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_rows_two_bars_and_footer_fit_the_card() {
        let second_bar_bottom = bars_top(8) + 2.0 * BAR_HEIGHT + BAR_GAP;
        assert!(second_bar_bottom < FOOTER_BASELINE - FOOTER_SIZE);
        assert!(FOOTER_BASELINE < CARD_Y + CARD_HEIGHT);
        assert!(DIVIDER_Y < FIRST_ROW_BASELINE - LABEL_SIZE);
    }
}
