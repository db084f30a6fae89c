/// Character-cell line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::LineDrawer;

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 2.0;

const LINE_CHAR: char = '#';

// Outcodes for clipping
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const ABOVE: u8 = 4;
const BELOW: u8 = 8;

/// Character buffer that `wire3d_core::render` draws lines into.
///
/// Horizontal coordinates are stretched by [`CELL_ASPECT`] so a square in
/// screen space stays square on the terminal.
pub struct LineCanvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl LineCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = LINE_CHAR;
        }
    }

    /// Cohen-Sutherland clip of a segment in cell coordinates to the canvas
    /// plus a one-cell margin. Segments with non-finite endpoints, or that
    /// miss the canvas entirely, yield `None`.
    fn clip(
        &self,
        mut start: (f64, f64),
        mut end: (f64, f64),
    ) -> Option<((f64, f64), (f64, f64))> {
        if ![start.0, start.1, end.0, end.1].iter().all(|v| v.is_finite()) {
            return None;
        }

        let (min_x, min_y) = (-1.0, -1.0);
        let (max_x, max_y) = (self.width as f64, self.height as f64);
        let outcode = |(x, y): (f64, f64)| {
            let mut code = INSIDE;
            if x < min_x {
                code |= LEFT;
            } else if x > max_x {
                code |= RIGHT;
            }
            if y < min_y {
                code |= ABOVE;
            } else if y > max_y {
                code |= BELOW;
            }
            code
        };

        loop {
            let (code_start, code_end) = (outcode(start), outcode(end));
            if code_start | code_end == INSIDE {
                return Some((start, end));
            }
            if code_start & code_end != INSIDE {
                return None;
            }

            // A set bit means the endpoints differ along that axis, so the
            // divisor below is non-zero
            let code = if code_start != INSIDE { code_start } else { code_end };
            let (dx, dy) = (end.0 - start.0, end.1 - start.1);
            let point = if code & ABOVE != 0 {
                (start.0 + dx * (min_y - start.1) / dy, min_y)
            } else if code & BELOW != 0 {
                (start.0 + dx * (max_y - start.1) / dy, max_y)
            } else if code & RIGHT != 0 {
                (max_x, start.1 + dy * (max_x - start.0) / dx)
            } else {
                (min_x, start.1 + dy * (min_x - start.0) / dx)
            };

            if code == code_start {
                start = point;
            } else {
                end = point;
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetForegroundColor(Color::Cyan))?;
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().collect();
            writer.queue(Print(line))?;
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl LineDrawer for LineCanvas {
    /// Bresenham's line algorithm; cells outside the canvas are dropped
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let start = (f64::from(x1 * CELL_ASPECT), f64::from(y1));
        let end = (f64::from(x2 * CELL_ASPECT), f64::from(y2));
        let Some((start, end)) = self.clip(start, end) else {
            return;
        };

        // Clipped endpoints lie within one cell of the canvas
        let (mut x, mut y) = (start.0.round() as i32, start.1.round() as i32);
        let (x_end, y_end) = (end.0.round() as i32, end.1.round() as i32);

        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let step_x = if x < x_end { 1 } else { -1 };
        let step_y = if y < y_end { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.plot(x, y);
            if x == x_end && y == y_end {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
    }
}
