use ratatui::buffer::Buffer;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Writes `text` at `(x, y)`, stopping before a glyph would cross `max_cols`.
///
/// Returns the number of columns written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    text: &str,
    style: Style,
) -> u16 {
    let mut used = 0u16;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if used + w > max_cols {
            break;
        }
        let mut tmp = [0u8; 4];
        buf.set_stringn(x + used, y, ch.encode_utf8(&mut tmp), w as usize, style);
        used += w;
    }
    used
}

/// Shortens `text` to `width` columns, ending in `…` when something was cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
