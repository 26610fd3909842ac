use std::io;
use std::io::Write;

use crossterm::execute;
use crossterm::style;
use crossterm::style::Color;

use crate::grid::Grid;
use crate::palette::Palette;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Terminal rendering of a [`Grid`], one braille dot per cell. Every cell that isn't the
/// background color `0` gets a dot.
pub struct Preview {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the cell buffer
    w: usize,

    /// Height of the cell buffer
    h: usize,
}

impl Preview {
    pub fn new(w: usize, h: usize) -> Self {
        // Each braille character covers a 2x4 block of cells, so we need `ceil(w / 2)` by
        // `ceil(h / 4)` characters, each 3 bytes of UTF-8, plus one newline per line.
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        Self {
            cb: vec![false; w * h],
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
        }
    }

    /// A preview sized to fit `grid` exactly, with the grid already drawn.
    pub fn of(grid: &Grid) -> Self {
        let mut preview = Self::new(grid.size(), grid.size());
        preview.draw(grid);

        preview
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Copy the grid into the cell buffer. Cells past the preview's bounds are cropped.
    pub fn draw(&mut self, grid: &Grid) {
        self.reset();

        for (y, row) in grid.rows().take(self.h).enumerate() {
            for (x, &color) in row.iter().take(self.w).enumerate() {
                if color != 0 {
                    let i = self.xy_from(x, y);
                    self.cb[i] = true;
                }
            }
        }
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            let (x, y) = self.xy_to(n);

            if px {
                self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }

        &self.fb
    }

    /// Write the preview to `out`, drawn in `palette`'s color `1`.
    pub fn print<W: Write>(&mut self, out: &mut W, palette: &Palette) -> io::Result<()> {
        let color = palette
            .get(1)
            .map(|rgb| Color::Rgb {
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
            })
            .unwrap_or(Color::Reset);

        let frame = self.render();

        execute!(
            out,
            style::SetForegroundColor(color),
            style::Print(frame),
            style::ResetColor,
            style::Print("\n")
        )
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
