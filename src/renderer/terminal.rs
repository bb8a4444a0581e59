//! Crossterm-backed surface.
//!
//! One grid cell is drawn as two terminal columns by one row, which keeps
//! cells roughly square in most fonts.

use std::io::Write;

use anyhow::Result;
use crossterm::{cursor, queue, style};

use crate::types::Color;

use super::Surface;

/// Terminal columns per grid cell.
pub const COLUMNS_PER_CELL: u16 = 2;

pub struct TerminalSurface<'a, W: Write> {
    out: &'a mut W,
    origin_x: u16,
    origin_y: u16,
    /// Canvas pixels covered by one terminal column / row.
    px_per_col: u32,
    px_per_row: u32,
    width_cols: u16,
    height_rows: u16,
}

impl<'a, W: Write> TerminalSurface<'a, W> {
    pub fn new(
        out: &'a mut W,
        origin: (u16, u16),
        cell_size: u32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Self {
        let px_per_col = (cell_size / COLUMNS_PER_CELL as u32).max(1);
        let px_per_row = cell_size.max(1);
        TerminalSurface {
            out,
            origin_x: origin.0,
            origin_y: origin.1,
            px_per_col,
            px_per_row,
            width_cols: (canvas_width / px_per_col) as u16,
            height_rows: (canvas_height / px_per_row) as u16,
        }
    }
}

impl<W: Write> Surface for TerminalSurface<'_, W> {
    fn clear(&mut self) -> Result<()> {
        let blank = " ".repeat(self.width_cols as usize);
        for row in 0..self.height_rows {
            queue!(
                self.out,
                cursor::MoveTo(self.origin_x, self.origin_y + row),
                style::Print(&blank),
            )?;
        }
        Ok(())
    }

    fn draw_lattice(&mut self, cell_size: u32, width: u32, height: u32) -> Result<()> {
        let cols = (width / cell_size.max(1)) as usize;
        let rows = height / cell_size.max(1);
        let dot = "\u{00b7}".to_string() + &" ".repeat(COLUMNS_PER_CELL as usize - 1);
        let line = dot.repeat(cols);

        queue!(self.out, style::SetAttribute(style::Attribute::Dim))?;
        for row in 0..rows {
            let y = self.origin_y + (row * cell_size / self.px_per_row) as u16;
            queue!(self.out, cursor::MoveTo(self.origin_x, y), style::Print(&line))?;
        }
        queue!(self.out, style::SetAttribute(style::Attribute::Reset))?;
        Ok(())
    }

    fn fill_rect(&mut self, x: u32, y: u32, size: u32, color: &Color) -> Result<()> {
        let col = self.origin_x + (x / self.px_per_col) as u16;
        let row = self.origin_y + (y / self.px_per_row) as u16;
        let span = " ".repeat((size / self.px_per_col).max(1) as usize);
        let rows = (size / self.px_per_row).max(1) as u16;

        for r in 0..rows {
            queue!(
                self.out,
                cursor::MoveTo(col, row + r),
                style::SetBackgroundColor(to_ct_color(color)),
                style::Print(&span),
                style::ResetColor,
            )?;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Color conversion
// ---------------------------------------------------------------------------

/// Best-effort mapping of an opaque color token onto a terminal color.
///
/// Understands `#rgb`, `#rrggbb` and the basic color names; anything else
/// is shown as grey.
pub fn to_ct_color(color: &Color) -> style::Color {
    let token = color.as_str().trim();
    if let Some(hex) = token.strip_prefix('#') {
        if let Some((r, g, b)) = parse_hex(hex) {
            return style::Color::Rgb { r, g, b };
        }
    }
    match token.to_ascii_lowercase().as_str() {
        "black" => style::Color::Black,
        "red" => style::Color::Red,
        "green" => style::Color::Green,
        "yellow" => style::Color::Yellow,
        "blue" => style::Color::Blue,
        "magenta" => style::Color::Magenta,
        "cyan" => style::Color::Cyan,
        "white" => style::Color::White,
        _ => style::Color::Grey,
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_tokens() {
        assert_eq!(
            to_ct_color(&Color::from("#f00")),
            style::Color::Rgb { r: 255, g: 0, b: 0 }
        );
        assert_eq!(
            to_ct_color(&Color::from("#0080ff")),
            style::Color::Rgb { r: 0, g: 128, b: 255 }
        );
    }

    #[test]
    fn named_and_unknown_tokens() {
        assert_eq!(to_ct_color(&Color::from("Cyan")), style::Color::Cyan);
        assert_eq!(to_ct_color(&Color::from("#12")), style::Color::Grey);
        assert_eq!(to_ct_color(&Color::from("chartreuse")), style::Color::Grey);
    }

    #[test]
    fn fill_rect_targets_scaled_terminal_cell() {
        let mut buf = Vec::new();
        {
            let mut surface = TerminalSurface::new(&mut buf, (0, 1), 16, 64, 32);
            surface.fill_rect(32, 16, 16, &Color::from("#fff")).unwrap();
            surface.present().unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        // MoveTo is 1-based on the wire: column 4 → 5, row 2 → 3.
        assert!(text.contains("\x1b[3;5H"));
        assert!(text.contains("  "));
    }
}
