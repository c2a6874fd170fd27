//! GameView: lays a [`GameSnapshot`] out on a terminal framebuffer.
//!
//! This module is pure (no I/O). [`FrameRenderer`] is the framebuffer
//! implementation of [`Renderer`]; `GameView` owns the layout knobs and runs
//! a frame through it.

use crate::core::{get_shape, GameSnapshot, Piece};
use crate::effects::Effects;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::render::{render_frame, Overlay, PieceStyle, Renderer};
use crate::types::PieceKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const FLASH: Rgb = Rgb::new(255, 255, 255);
const DANGER: Rgb = Rgb::new(230, 70, 70);

/// Line-clear flashes per animation window.
const FLASHES: f32 = 3.0;

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}

/// Layout settings for the terminal playfield.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_effects(snap, None, viewport, fb);
    }

    pub fn render_into_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: Option<&Effects>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let mut renderer = FrameRenderer::new(self, fb, viewport, snap.width, snap.height);
        renderer.effects = effects;
        render_frame(&mut renderer, snap);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}

/// [`Renderer`] that draws into a [`FrameBuffer`].
pub struct FrameRenderer<'a> {
    view: &'a GameView,
    fb: &'a mut FrameBuffer,
    viewport: Viewport,
    board_w: u8,
    board_h: u8,
    /// Top-left corner of the playfield border.
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    effects: Option<&'a Effects>,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(
        view: &'a GameView,
        fb: &'a mut FrameBuffer,
        viewport: Viewport,
        board_w: u8,
        board_h: u8,
    ) -> Self {
        let frame_w = board_w as u16 * view.cell_w + 2;
        let frame_h = board_h as u16 * view.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match view.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Self {
            view,
            fb,
            viewport,
            board_w,
            board_h,
            start_x,
            start_y,
            frame_w,
            frame_h,
            effects: None,
        }
    }

    pub fn with_effects(mut self, effects: &'a Effects) -> Self {
        self.effects = Some(effects);
        self
    }

    fn fill_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = self.start_x + 1 + x * self.view.cell_w;
        let py = self.start_y + 1 + y * self.view.cell_h;
        self.fb.fill_rect(px, py, self.view.cell_w, self.view.cell_h, ch, style);
    }

    fn in_board(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as u16) < self.board_w as u16 && (y as u16) < self.board_h as u16
    }

    fn draw_next_preview(&mut self, x: u16, y: u16, kind: PieceKind) {
        let shape = get_shape(kind, 0);
        let min_y = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let style = CellStyle::new(piece_color(kind), PANEL_BG).bold();
        for (dx, dy) in shape {
            let px = x + dx as u16 * self.view.cell_w;
            let py = y + (dy - min_y) as u16;
            self.fb.fill_rect(px, py, self.view.cell_w, 1, '█', style);
        }
    }

    fn put_time(&mut self, x: u16, y: u16, ms: u64, style: CellStyle) {
        let secs = ms / 1000;
        let minutes = (secs / 60).min(u32::MAX as u64) as u32;
        let seconds = (secs % 60) as u32;
        let x = self.fb.put_u32(x, y, minutes, style);
        self.fb.put_char(x, y, ':', style);
        self.fb.put_u32(x + 1, y, seconds / 10, style);
        self.fb.put_u32(x + 2, y, seconds % 10, style);
    }
}

impl Renderer for FrameRenderer<'_> {
    fn draw_board(&mut self, snap: &GameSnapshot) {
        let border = if snap.top_row_occupied {
            CellStyle::new(DANGER, PANEL_BG).bold()
        } else {
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG)
        };
        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();

        self.fb.fill_rect(
            self.start_x + 1,
            self.start_y + 1,
            self.frame_w - 2,
            self.frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG),
        );
        self.fb
            .draw_box(self.start_x, self.start_y, self.frame_w, self.frame_h, border);

        // Clearing rows alternate between a white flash and their own colors.
        let flash_on = ((snap.clear_progress * FLASHES * 2.0) as u32) % 2 == 0;

        for y in 0..self.board_h as u16 {
            let clearing = snap.is_clearing(y as usize);
            for x in 0..self.board_w as u16 {
                match snap.cell(x as i8, y as i8) {
                    Some(_) if clearing && flash_on => {
                        self.fill_cell(x, y, '█', CellStyle::new(FLASH, PLAYFIELD_BG).bold());
                    }
                    Some(kind) => {
                        let mut style = CellStyle::new(piece_color(kind), PLAYFIELD_BG);
                        style.dim = clearing;
                        self.fill_cell(x, y, '█', style);
                    }
                    None => self.fill_cell(x, y, '·', empty),
                }
            }
        }
    }

    fn draw_piece(&mut self, piece: &Piece, style: PieceStyle) {
        let (ch, cell_style) = match style {
            PieceStyle::Active => {
                let color = piece_color(piece.kind);
                ('█', CellStyle::new(color, PLAYFIELD_BG).bold())
            }
            PieceStyle::Ghost => {
                let color = Rgb::new(140, 140, 140);
                ('░', CellStyle::new(color, PLAYFIELD_BG).dim())
            }
        };
        for (x, y) in piece.blocks() {
            // Minos in the spawn buffer are not drawn.
            if self.in_board(x, y) {
                self.fill_cell(x as u16, y as u16, ch, cell_style);
            }
        }
    }

    fn draw_ui(&mut self, snap: &GameSnapshot) {
        let panel_x = self.start_x.saturating_add(self.frame_w).saturating_add(2);
        if panel_x >= self.viewport.width || self.viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = self.start_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("GOAL", snap.next_level_score),
        ] {
            self.fb.put_str(panel_x, y, name, label);
            self.fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        self.fb.put_str(panel_x, y, "NEXT", label);
        self.fb.put_str(panel_x + 6, y, piece_letter(snap.next), dim);
        self.draw_next_preview(panel_x, y + 1, snap.next);
        y = y.saturating_add(4);

        self.fb.put_str(panel_x, y, "TIME", label);
        self.put_time(panel_x + 7, y, snap.stats.play_time_ms, value);
        y += 1;
        self.fb.put_str(panel_x, y, "PIECES", label);
        self.fb.put_u32(panel_x + 7, y, snap.stats.total_spawned(), value);
        y += 1;
        self.fb.put_str(panel_x, y, "HOLES", label);
        self.fb.put_u32(panel_x + 7, y, snap.holes, value);
        y += 1;
        self.fb.put_str(panel_x, y, "BUMP", label);
        self.fb.put_u32(panel_x + 7, y, snap.bumpiness, value);
        y += 2;

        if snap.top_row_occupied {
            self.fb
                .put_str(panel_x, y, "DANGER", CellStyle::new(DANGER, PANEL_BG).bold());
        }
        y += 1;

        if let Some(fx) = self.effects {
            if let Some(text) = fx.banner() {
                let fg = PANEL_BG.lerp(Rgb::new(255, 230, 120), fx.intensity());
                self.fb.put_str(panel_x, y, text, CellStyle::new(fg, PANEL_BG).bold());
            }
        }
    }

    fn draw_overlay(&mut self, overlay: Overlay) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let hint = CellStyle::new(Rgb::new(180, 180, 180), PANEL_BG);
        let mid_y = self.start_y.saturating_add(self.frame_h / 2);

        match overlay {
            Overlay::Paused => {
                self.fb
                    .put_str_centered(self.start_x, mid_y, self.frame_w, "PAUSED", style);
                self.fb
                    .put_str_centered(self.start_x, mid_y + 1, self.frame_w, "P resume", hint);
            }
            Overlay::GameOver { score } => {
                self.fb
                    .put_str_centered(self.start_x, mid_y, self.frame_w, "GAME OVER", style);
                let digits = count_digits(score);
                let x = self.start_x + 1 + (self.frame_w - 2).saturating_sub(digits) / 2;
                self.fb.put_u32(x, mid_y + 1, score, style);
                self.fb
                    .put_str_centered(self.start_x, mid_y + 2, self.frame_w, "R restart", hint);
            }
        }
    }
}

fn count_digits(mut n: u32) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_digits_works() {
        assert_eq!(count_digits(0), 1);
        assert_eq!(count_digits(9), 1);
        assert_eq!(count_digits(10), 2);
        assert_eq!(count_digits(u32::MAX), 10);
    }

    #[test]
    fn layout_is_centered() {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(80, 24);
        let r = FrameRenderer::new(&view, &mut fb, Viewport::new(80, 24), 10, 20);
        // 10 cells * 2 columns + border.
        assert_eq!(r.frame_w, 22);
        assert_eq!(r.frame_h, 22);
        assert_eq!(r.start_x, 29);
        assert_eq!(r.start_y, 1);
    }

    #[test]
    fn top_anchor() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let mut fb = FrameBuffer::new(80, 40);
        let r = FrameRenderer::new(&view, &mut fb, Viewport::new(80, 40), 10, 20);
        assert_eq!(r.start_y, 0);
    }
}
