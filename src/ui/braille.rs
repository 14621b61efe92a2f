/// Braille canvas for high-resolution terminal rendering.
/// Each terminal cell holds a 2×4 grid of Braille dots, giving 2× horizontal
/// and 4× vertical resolution.
pub struct BrailleCanvas {
    width: usize,  // Width in terminal cells
    height: usize, // Height in terminal cells
    cells: Vec<u8>,
}

// Bit for each dot, indexed [row][column]. Braille numbering:
// 1 4
// 2 5
// 3 6
// 7 8
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// 5×8 glyphs for the score digits, one byte per row, low 5 bits used
const DIGITS: [[u8; 8]; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
];

const DIGIT_SCALE: usize = 2;

/// Pixel width of one drawn digit
pub const DIGIT_WIDTH: usize = 5 * DIGIT_SCALE;
/// Pixel height of one drawn digit
pub const DIGIT_HEIGHT: usize = 8 * DIGIT_SCALE;
const DIGIT_SPACING: usize = 2;

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Width in pixels (2 per cell)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Height in pixels (4 per cell)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }

    /// Set a dot at pixel coordinates; out-of-range pixels are dropped
    pub fn set_pixel(&mut self, pixel_x: usize, pixel_y: usize) {
        let (cell_x, cell_y) = (pixel_x / 2, pixel_y / 4);
        if cell_x >= self.width || cell_y >= self.height {
            return;
        }
        self.cells[cell_y * self.width + cell_x] |= DOT_BITS[pixel_y % 4][pixel_x % 2];
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        for py in y..y.saturating_add(height) {
            for px in x..x.saturating_add(width) {
                self.set_pixel(px, py);
            }
        }
    }

    pub fn draw_horizontal_line(&mut self, pixel_y: usize) {
        for px in 0..self.pixel_width() {
            self.set_pixel(px, pixel_y);
        }
    }

    /// Vertical dashed line: `dash` pixels on, `gap` pixels off
    pub fn draw_dashed_vertical(&mut self, pixel_x: usize, from_y: usize, to_y: usize, dash: usize, gap: usize) {
        let period = (dash + gap).max(1);
        for py in from_y..to_y {
            if (py - from_y) % period < dash {
                self.set_pixel(pixel_x, py);
            }
        }
    }

    pub fn draw_digit(&mut self, digit: u8, x: usize, y: usize) {
        let glyph = &DIGITS[usize::from(digit % 10)];
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..5 {
                if bits & (0x10 >> col) != 0 {
                    self.fill_rect(
                        x + col * DIGIT_SCALE,
                        y + row * DIGIT_SCALE,
                        DIGIT_SCALE,
                        DIGIT_SCALE,
                    );
                }
            }
        }
    }

    /// Draw a number left to right starting at `x`; returns its pixel width
    pub fn draw_number(&mut self, value: u8, x: usize, y: usize) -> usize {
        let text = value.to_string();
        for (i, ch) in text.bytes().enumerate() {
            self.draw_digit(ch - b'0', x + i * (DIGIT_WIDTH + DIGIT_SPACING), y);
        }
        number_width(value)
    }

    /// Dot pattern of a cell, 0 when empty or out of range
    pub fn pattern(&self, cell_x: usize, cell_y: usize) -> u8 {
        if cell_x >= self.width || cell_y >= self.height {
            return 0;
        }
        self.cells[cell_y * self.width + cell_x]
    }

    /// Braille character for a cell (U+2800 + dot pattern)
    pub fn to_char(&self, cell_x: usize, cell_y: usize) -> char {
        if cell_x >= self.width || cell_y >= self.height {
            return ' ';
        }
        pattern_char(self.pattern(cell_x, cell_y))
    }
}

pub fn pattern_char(pattern: u8) -> char {
    char::from_u32(0x2800 + u32::from(pattern)).unwrap_or(' ')
}

/// Pixel width `draw_number` will use for `value`
pub fn number_width(value: u8) -> usize {
    let digits = value.to_string().len();
    digits * DIGIT_WIDTH + (digits - 1) * DIGIT_SPACING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dots() {
        let mut canvas = BrailleCanvas::new(2, 2);

        canvas.set_pixel(0, 0);
        assert_eq!(canvas.to_char(0, 0), '⠁'); // dot 1

        canvas.set_pixel(1, 3);
        assert_eq!(canvas.to_char(0, 0), '⢁'); // dots 1 and 8

        canvas.set_pixel(2, 4);
        assert_eq!(canvas.to_char(1, 1), '⠁');
    }

    #[test]
    fn test_fill_rect_whole_cell() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.fill_rect(0, 0, 2, 4);
        assert_eq!(canvas.to_char(0, 0), '⣿');
        assert_eq!(canvas.to_char(1, 0), '⠀');
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(5, 5);
        canvas.fill_rect(1, 3, 10, 10);
        assert_eq!(canvas.to_char(0, 0), '⢀');
        assert_eq!(canvas.to_char(3, 3), ' ');
    }

    #[test]
    fn test_dashed_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        canvas.draw_dashed_vertical(0, 0, 8, 2, 2);
        // Rows 0,1 and 4,5 lit in the left column
        assert_eq!(canvas.to_char(0, 0), '⠃');
        assert_eq!(canvas.to_char(0, 1), '⠃');
    }

    #[test]
    fn test_number_layout() {
        assert_eq!(number_width(7), DIGIT_WIDTH);
        assert_eq!(number_width(12), 2 * DIGIT_WIDTH + DIGIT_SPACING);

        let mut canvas = BrailleCanvas::new(20, 4);
        let width = canvas.draw_number(10, 0, 0);
        assert_eq!(width, number_width(10));
        // Top row of "1" starts at column 2 of the glyph (scaled: pixel 4)
        assert_eq!(canvas.to_char(2, 0) as u32 & 0xFF, 0xFF);
    }
}
