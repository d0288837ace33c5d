use tiny_skia::Color;

/// Parses `#rgb` or `#rrggbb` (the `#` is optional).
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return None,
    };

    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

/// `rgba(r,g,b,alpha)` for a hex color. Malformed input yields black with
/// the requested alpha.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let (r, g, b) = parse_hex(hex).unwrap_or((0, 0, 0));
    format!("rgba({},{},{},{})", r, g, b, alpha)
}

/// Canvas color for an `rgba(r,g,b,alpha)` string as produced by
/// [`hex_to_rgba`]. Anything else is `None`.
pub fn rgba_color(css: &str) -> Option<Color> {
    let inner = css.trim().strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    let alpha = parts.next()?.parse::<f32>().ok()?;
    if parts.next().is_some() || !alpha.is_finite() {
        return None;
    }
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(Color::from_rgba8(r, g, b, a))
}

/// Shifts every channel by `delta`, clamped to 0..=255. Returns `None` for
/// malformed input so the caller can pick its own fallback.
pub fn shade_color(hex: &str, delta: i32) -> Option<String> {
    let (r, g, b) = parse_hex(hex)?;
    let shift = |c: u8| (c as i32 + delta).clamp(0, 255) as u8;
    Some(format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b)))
}

/// Canvas color for a hex string; malformed input paints black.
pub fn to_color(hex: &str, alpha: f32) -> Color {
    let (r, g, b) = parse_hex(hex).unwrap_or((0, 0, 0));
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::from_rgba8(r, g, b, a)
}
