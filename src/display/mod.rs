//! Rendering layer. All terminal I/O lives here.
//!
//! The simulation runs in a fixed 800×600 pixel space.  Each frame is first
//! composed into a [`Frame`] of terminal cells (sampling sprites at each
//! cell's centre), then written out in one pass.  No game logic is
//! performed; this module only translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::assets::{Assets, Rgb, Sprite, RED, WHITE};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{GameState, GameStatus, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Rgb = WHITE;
const C_HINT: Rgb = [128, 128, 128];
const C_PLAYER_BULLET: Rgb = WHITE;
const C_ENEMY_BULLET: Rgb = RED;

const HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

// ── Cell buffer ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// One composed frame of terminal cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub cols: u16,
    pub rows: u16,
    cells: Vec<Cell>,
}

/// Map a logical pixel coordinate onto a cell index along one axis.
pub fn to_cell(px: i32, extent_px: i32, cells: u16) -> i32 {
    (i64::from(px) * i64::from(cells)).div_euclid(i64::from(extent_px)) as i32
}

/// Logical pixel at the centre of a cell along one axis.
fn cell_center(cell: i32, extent_px: i32, cells: u16) -> i32 {
    ((2 * i64::from(cell) + 1) * i64::from(extent_px) / (2 * i64::from(cells))) as i32
}

impl Frame {
    pub fn new(cols: u16, rows: u16) -> Self {
        let blank = Cell { ch: ' ', fg: C_TEXT, bg: [0, 0, 0] };
        Self {
            cols,
            rows,
            cells: vec![blank; usize::from(cols) * usize::from(rows)],
        }
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return None;
        }
        let idx = row as usize * usize::from(self.cols) + col as usize;
        self.cells.get_mut(idx)
    }

    /// Paint the whole screen from a screen-sized sprite.
    fn fill(&mut self, sprite: &Sprite) {
        for row in 0..i32::from(self.rows) {
            let y = cell_center(row, SCREEN_HEIGHT, self.rows);
            for col in 0..i32::from(self.cols) {
                let x = cell_center(col, SCREEN_WIDTH, self.cols);
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.bg = sprite.pixel(x, y);
                }
            }
        }
    }

    /// Cell span covered by `rect`; always at least one cell wide and tall so
    /// thin bullets stay visible on coarse terminals.
    fn span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let c0 = to_cell(rect.x, SCREEN_WIDTH, self.cols);
        let r0 = to_cell(rect.y, SCREEN_HEIGHT, self.rows);
        let c1 = to_cell(rect.right() - 1, SCREEN_WIDTH, self.cols).max(c0);
        let r1 = to_cell(rect.bottom() - 1, SCREEN_HEIGHT, self.rows).max(r0);
        (c0, r0, c1, r1)
    }

    /// Paint `rect` using `sprite`, sampled at each covered cell's centre.
    fn blit(&mut self, rect: &Rect, sprite: &Sprite) {
        let (c0, r0, c1, r1) = self.span(rect);
        let sx = |col| (cell_center(col, SCREEN_WIDTH, self.cols) - rect.x) * sprite.width as i32 / rect.w.max(1);
        let sy = |row| (cell_center(row, SCREEN_HEIGHT, self.rows) - rect.y) * sprite.height as i32 / rect.h.max(1);
        let samples: Vec<(i32, i32, Rgb)> = (r0..=r1)
            .flat_map(|row| (c0..=c1).map(move |col| (col, row)))
            .map(|(col, row)| (col, row, sprite.pixel(sx(col), sy(row))))
            .collect();
        for (col, row, color) in samples {
            if let Some(cell) = self.cell_mut(col, row) {
                cell.bg = color;
            }
        }
    }

    /// Paint `rect` in a flat colour.
    fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        let (c0, r0, c1, r1) = self.span(rect);
        for row in r0..=r1 {
            for col in c0..=c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.bg = color;
                }
            }
        }
    }

    /// Write `text` starting at a cell, keeping the backdrop behind it.
    fn text(&mut self, col: i32, row: i32, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    /// Write `text` horizontally centred on a logical row.
    fn text_centered(&mut self, y: i32, text: &str, fg: Rgb) {
        let len = text.chars().count() as i32;
        let col = (i32::from(self.cols) - len).max(0) / 2;
        let row = to_cell(y, SCREEN_HEIGHT, self.rows);
        self.text(col, row, text, fg);
    }

    /// Visible characters on one row.
    #[cfg(test)]
    fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(col, row))
            .map(|c| c.ch)
            .collect()
    }

    /// Emit the whole frame.
    pub fn write<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.write_changes(None, out)
    }

    /// Emit only the cells that differ from `prev`, batching runs of
    /// adjacent cells with identical colours.  Falls back to a full redraw
    /// when there is no previous frame or the terminal was resized.
    pub fn write_changes<W: Write>(&self, prev: Option<&Frame>, out: &mut W) -> std::io::Result<()> {
        let prev = prev.filter(|p| p.cols == self.cols && p.rows == self.rows);
        let mut run = String::new();
        let mut colors: Option<(Rgb, Rgb)> = None;

        for row in 0..self.rows {
            // Column the terminal cursor sits on after the last emitted cell.
            let mut cursor_col: Option<u16> = None;
            for col in 0..self.cols {
                let Some(cell) = self.cell(col, row) else { continue };
                if prev.and_then(|p| p.cell(col, row)) == Some(cell) {
                    continue;
                }
                if cursor_col != Some(col) {
                    flush_run(out, &mut run)?;
                    out.queue(cursor::MoveTo(col, row))?;
                }
                let next = (cell.fg, cell.bg);
                if colors != Some(next) {
                    flush_run(out, &mut run)?;
                    out.queue(style::SetForegroundColor(rgb(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(rgb(cell.bg)))?;
                    colors = Some(next);
                }
                run.push(cell.ch);
                cursor_col = Some(col + 1);
            }
            flush_run(out, &mut run)?;
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

fn flush_run<W: Write>(out: &mut W, run: &mut String) -> std::io::Result<()> {
    if !run.is_empty() {
        out.queue(Print(&*run))?;
        run.clear();
    }
    Ok(())
}

fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Build the cells for one frame without touching the terminal.
pub fn compose(state: &GameState, assets: &Assets, cols: u16, rows: u16) -> Frame {
    let mut frame = Frame::new(cols, rows);
    if cols == 0 || rows == 0 {
        return frame;
    }
    frame.fill(assets.background.get());

    match state.status {
        GameStatus::Playing => {
            frame.blit(&state.player, assets.player.get());
            for bullet in &state.bullets {
                frame.fill_rect(bullet, C_PLAYER_BULLET);
            }
            for bullet in &state.enemy_bullets {
                frame.fill_rect(bullet, C_ENEMY_BULLET);
            }
            for enemy in &state.enemies {
                frame.blit(enemy, assets.enemy.get());
            }
            let row = to_cell(10, SCREEN_HEIGHT, rows);
            let col = to_cell(10, SCREEN_WIDTH, cols);
            frame.text(col, row, &format!("Score: {}", state.score), C_TEXT);
            frame.text(1, i32::from(rows) - 1, HINT, C_HINT);
        }
        GameStatus::GameOver => {
            let over = format!("Game Over! Score: {}", state.score);
            frame.text_centered(SCREEN_HEIGHT / 2, &over, C_TEXT);
            frame.text_centered(SCREEN_HEIGHT / 2 + 50, "Press R to Restart", C_TEXT);
        }
    }
    frame
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one frame, writing only what changed since `prev`, and return
/// it so the caller can diff the next frame against it.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &Assets,
    (cols, rows): (u16, u16),
    prev: Option<&Frame>,
) -> std::io::Result<Frame> {
    let frame = compose(state, assets, cols, rows);
    frame.write_changes(prev, out)?;
    out.flush()?;
    Ok(frame)
}
