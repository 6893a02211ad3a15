/// Downsamples a pixel buffer into terminal characters
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use ptview_core::{PixelBuffer, BACKGROUND};
use std::io::Write;

/// Character density ramp (emptiest to fullest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Which block of pixels each terminal cell stands for
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellMapping {
    cell_w: f32,
    cell_h: f32,
    col_offset: usize,
    row_offset: usize,
    cols_used: usize,
    rows_used: usize,
}

impl CellMapping {
    /// Fit a `width x height` image into `cols x rows` cells.
    ///
    /// `stretch` fills the whole grid; otherwise the image keeps its aspect
    /// ratio (cells count as twice as tall as wide) and is centered.
    fn fit(width: usize, height: usize, cols: usize, rows: usize, stretch: bool) -> Self {
        let (w, h) = (width as f32, height as f32);
        if stretch {
            return Self {
                cell_w: w / cols as f32,
                cell_h: h / rows as f32,
                col_offset: 0,
                row_offset: 0,
                cols_used: cols,
                rows_used: rows,
            };
        }

        let scale = (w / cols as f32).max(h / (2 * rows) as f32);
        let cols_used = ((w / scale).ceil() as usize).min(cols);
        let rows_used = ((h / (2.0 * scale)).ceil() as usize).min(rows);
        Self {
            cell_w: scale,
            cell_h: 2.0 * scale,
            col_offset: (cols - cols_used) / 2,
            row_offset: (rows - rows_used) / 2,
            cols_used,
            rows_used,
        }
    }

    /// Half-open pixel span covered by cell `index` along one axis
    fn span(index: usize, cell: f32, limit: usize) -> (usize, usize) {
        let start = (index as f32 * cell) as usize;
        let end = (((index + 1) as f32 * cell) as usize).max(start + 1);
        (start.min(limit), end.min(limit))
    }
}

/// ASCII renderer that turns a pixel buffer into terminal characters
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    stretch: bool,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize, stretch: bool) -> Self {
        Self {
            cols,
            rows,
            stretch,
            char_buffer: vec![' '; cols * rows],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        if (cols, rows) != (self.cols, self.rows) {
            self.cols = cols;
            self.rows = rows;
            self.char_buffer = vec![' '; cols * rows];
        }
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.char_buffer[row * self.cols + col])
        } else {
            None
        }
    }

    /// Shade every cell by how many of its pixels are lit
    pub fn rasterize(&mut self, frame: &PixelBuffer) {
        self.clear();
        if self.cols == 0 || self.rows == 0 || frame.width() == 0 || frame.height() == 0 {
            return;
        }

        let map = CellMapping::fit(frame.width(), frame.height(), self.cols, self.rows, self.stretch);
        let pixels = frame.pixels();
        let width = frame.width();

        for r in 0..map.rows_used {
            let (y0, y1) = CellMapping::span(r, map.cell_h, frame.height());
            for c in 0..map.cols_used {
                let (x0, x1) = CellMapping::span(c, map.cell_w, width);
                if x0 >= x1 || y0 >= y1 {
                    continue;
                }

                let lit = (y0..y1)
                    .map(|y| {
                        pixels[y * width + x0..y * width + x1]
                            .iter()
                            .filter(|&&p| p != BACKGROUND)
                            .count()
                    })
                    .sum::<usize>();
                let total = (x1 - x0) * (y1 - y0);

                let idx = (map.row_offset + r) * self.cols + map.col_offset + c;
                self.char_buffer[idx] = shade(lit, total);
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let c = self.char_buffer[y * self.cols + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.rows {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Glyph for a cell with `lit` of `total` pixels set; any lit pixel shows
fn shade(lit: usize, total: usize) -> char {
    if lit == 0 || total == 0 {
        return LUMINOSITY_RAMP[0];
    }
    let steps = (LUMINOSITY_RAMP.len() - 2) as f32;
    let fraction = (lit as f32 / total as f32).min(1.0);
    let index = 1 + (fraction.sqrt() * steps).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}
