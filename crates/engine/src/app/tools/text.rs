use super::raster::write_pixel_rgba_clipped;

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph([u8; GLYPH_HEIGHT]);

const BLANK: Glyph = Glyph([0, 0, 0, 0, 0]);
const UNKNOWN: Glyph = Glyph([0b111, 0b001, 0b011, 0b000, 0b010]);

/// Horizontal distance between glyph origins at `scale`.
pub(crate) const fn glyph_advance(scale: i32) -> i32 {
    (GLYPH_WIDTH + 1) * scale
}

pub(crate) const fn line_advance(scale: i32) -> i32 {
    (GLYPH_HEIGHT as i32 + 2) * scale
}

pub(crate) fn text_width_px(text: &str, scale: i32) -> i32 {
    let count = text.chars().count() as i32;
    if count == 0 {
        return 0;
    }
    count * glyph_advance(scale) - scale
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_text(
    frame: &mut [u8],
    width: u32,
    height: u32,
    mut x: i32,
    y: i32,
    text: &str,
    scale: i32,
    color: [u8; 4],
) {
    if width == 0 || height == 0 || scale <= 0 {
        return;
    }
    for ch in text.chars() {
        draw_glyph(frame, width, height, x, y, glyph_for(ch), scale, color);
        x = x.saturating_add(glyph_advance(scale));
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_glyph(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    glyph: Glyph,
    scale: i32,
    color: [u8; 4],
) {
    for (row_index, row_bits) in glyph.0.iter().enumerate() {
        let glyph_y = y + row_index as i32 * scale;
        for col in 0..GLYPH_WIDTH {
            if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                continue;
            }
            let glyph_x = x + col * scale;
            for sy in 0..scale {
                let pixel_y = glyph_y + sy;
                if pixel_y < 0 || pixel_y >= height as i32 {
                    continue;
                }
                for sx in 0..scale {
                    write_pixel_rgba_clipped(frame, width as usize, glyph_x + sx, pixel_y, color);
                }
            }
        }
    }
}

// Lowercase shares the uppercase shapes.
fn glyph_for(ch: char) -> Glyph {
    match ch.to_ascii_uppercase() {
        ' ' => BLANK,
        '0' | 'O' => Glyph([0b111, 0b101, 0b101, 0b101, 0b111]),
        '1' => Glyph([0b010, 0b110, 0b010, 0b010, 0b111]),
        '2' => Glyph([0b111, 0b001, 0b111, 0b100, 0b111]),
        '3' => Glyph([0b111, 0b001, 0b111, 0b001, 0b111]),
        '4' => Glyph([0b101, 0b101, 0b111, 0b001, 0b001]),
        '5' | 'S' => Glyph([0b111, 0b100, 0b111, 0b001, 0b111]),
        '6' => Glyph([0b111, 0b100, 0b111, 0b101, 0b111]),
        '7' => Glyph([0b111, 0b001, 0b010, 0b010, 0b010]),
        '8' => Glyph([0b111, 0b101, 0b111, 0b101, 0b111]),
        '9' => Glyph([0b111, 0b101, 0b111, 0b001, 0b111]),
        'A' => Glyph([0b010, 0b101, 0b111, 0b101, 0b101]),
        'B' => Glyph([0b110, 0b101, 0b110, 0b101, 0b110]),
        'C' => Glyph([0b111, 0b100, 0b100, 0b100, 0b111]),
        'D' => Glyph([0b110, 0b101, 0b101, 0b101, 0b110]),
        'E' => Glyph([0b111, 0b100, 0b110, 0b100, 0b111]),
        'F' => Glyph([0b111, 0b100, 0b110, 0b100, 0b100]),
        'G' => Glyph([0b111, 0b100, 0b101, 0b101, 0b111]),
        'H' => Glyph([0b101, 0b101, 0b111, 0b101, 0b101]),
        'I' => Glyph([0b111, 0b010, 0b010, 0b010, 0b111]),
        'J' => Glyph([0b111, 0b001, 0b001, 0b101, 0b111]),
        'K' => Glyph([0b101, 0b101, 0b110, 0b101, 0b101]),
        'L' => Glyph([0b100, 0b100, 0b100, 0b100, 0b111]),
        'M' => Glyph([0b101, 0b111, 0b111, 0b101, 0b101]),
        'N' => Glyph([0b110, 0b101, 0b101, 0b101, 0b101]),
        'P' => Glyph([0b110, 0b101, 0b110, 0b100, 0b100]),
        'Q' => Glyph([0b111, 0b101, 0b101, 0b111, 0b001]),
        'R' => Glyph([0b110, 0b101, 0b110, 0b101, 0b101]),
        'T' => Glyph([0b111, 0b010, 0b010, 0b010, 0b010]),
        'U' => Glyph([0b101, 0b101, 0b101, 0b101, 0b111]),
        'V' => Glyph([0b101, 0b101, 0b101, 0b101, 0b010]),
        'W' => Glyph([0b101, 0b101, 0b111, 0b111, 0b101]),
        'X' => Glyph([0b101, 0b101, 0b010, 0b101, 0b101]),
        'Y' => Glyph([0b101, 0b101, 0b010, 0b010, 0b010]),
        'Z' => Glyph([0b111, 0b001, 0b010, 0b100, 0b111]),
        '!' => Glyph([0b010, 0b010, 0b010, 0b000, 0b010]),
        '-' => Glyph([0b000, 0b000, 0b111, 0b000, 0b000]),
        '.' => Glyph([0b000, 0b000, 0b000, 0b000, 0b010]),
        ',' => Glyph([0b000, 0b000, 0b000, 0b010, 0b100]),
        ':' => Glyph([0b000, 0b010, 0b000, 0b010, 0b000]),
        '/' => Glyph([0b001, 0b001, 0b010, 0b100, 0b100]),
        '(' => Glyph([0b001, 0b010, 0b010, 0b010, 0b001]),
        ')' => Glyph([0b100, 0b010, 0b010, 0b010, 0b100]),
        '[' => Glyph([0b110, 0b100, 0b100, 0b100, 0b110]),
        ']' => Glyph([0b011, 0b001, 0b001, 0b001, 0b011]),
        '\'' | '`' => Glyph([0b010, 0b010, 0b000, 0b000, 0b000]),
        '"' => Glyph([0b101, 0b101, 0b000, 0b000, 0b000]),
        '_' => Glyph([0b000, 0b000, 0b000, 0b000, 0b111]),
        '=' => Glyph([0b000, 0b111, 0b000, 0b111, 0b000]),
        '+' => Glyph([0b000, 0b010, 0b111, 0b010, 0b000]),
        '<' => Glyph([0b001, 0b010, 0b100, 0b010, 0b001]),
        '>' => Glyph([0b100, 0b010, 0b001, 0b010, 0b100]),
        '#' => Glyph([0b101, 0b111, 0b101, 0b111, 0b101]),
        '%' => Glyph([0b101, 0b001, 0b010, 0b100, 0b101]),
        _ => UNKNOWN,
    }
}
