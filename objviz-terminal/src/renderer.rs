//! Cell-buffer render surface for the terminal
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use objviz_core::{RenderSurface, Rgb, ScreenPoint};

const FILL_CHAR: char = '=';
const LINE_CHAR: char = '#';
const MARKER_CHAR: char = '@';

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    color: Rgb,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Rgb::BLACK,
};

/// A character/color buffer implementing the render-surface contract.
///
/// Faces are painted straight into the buffer in the order they arrive;
/// later faces overwrite earlier ones, which is exactly the viewer's
/// draw-order policy. There is no depth buffer.
pub struct TermSurface {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TermSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    fn set(&mut self, x: i32, y: i32, ch: char, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Cell { ch, color };
    }

    /// Bresenham line between two cells, clipped per cell.
    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set(x, y, LINE_CHAR, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Even-odd scanline fill of an arbitrary (possibly non-convex) polygon.
    fn scanline_fill(&mut self, points: &[ScreenPoint], color: Rgb) {
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
        let max_y = points
            .iter()
            .map(|p| p.y)
            .max()
            .unwrap_or(-1)
            .min(self.height as i32 - 1);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in min_y..=max_y {
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if a.y == b.y {
                    continue;
                }
                // Half-open span so shared endpoints count once.
                let (lo, hi) = if a.y < b.y { (a, b) } else { (b, a) };
                if y >= lo.y && y < hi.y {
                    let t = (y - lo.y) as f32 / (hi.y - lo.y) as f32;
                    crossings.push(lo.x as f32 + t * (hi.x - lo.x) as f32);
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let start = pair[0].ceil() as i32;
                let end = pair[1].floor() as i32;
                for x in start..=end {
                    self.set(x, y, FILL_CHAR, color);
                }
            }
        }
    }

    /// Flush the buffer to a terminal writer, one row at a time.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                writer.queue(SetForegroundColor(Color::Rgb {
                    r: cell.color.r,
                    g: cell.color.g,
                    b: cell.color.b,
                }))?;
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl RenderSurface for TermSurface {
    fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], line: Rgb, fill: Option<Rgb>) {
        if let Some(fill) = fill {
            self.scanline_fill(points, fill);
        }
        for i in 0..points.len() {
            self.line(points[i], points[(i + 1) % points.len()], line);
        }
    }

    fn draw_marker(&mut self, point: ScreenPoint, color: Rgb, size: u16) {
        // A terminal cell is as small as a marker gets; size only matters
        // above one cell.
        let r = size.saturating_sub(1) as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                self.set(point.x + dx, point.y + dy, MARKER_CHAR, color);
            }
        }
    }
}
