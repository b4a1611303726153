//! RoomView: maps a `core::RoomSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::stats::format_ms;
use crate::core::{RoomSnapshot, TileSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Outcome, Phase, ShapeKind};

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

const PANEL_W: u16 = 30;
const PANEL_GAP: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const LOCK_BG: Rgb = Rgb::new(95, 30, 35);
const HINT_BG: Rgb = Rgb::new(85, 70, 20);
const FLASH_BG: Rgb = Rgb::new(170, 40, 50);
const CURSOR_BG: Rgb = Rgb::new(55, 60, 100);
const BLACK: Rgb = Rgb::new(0, 0, 0);

const HELP: &str = "arrows/hjkl move  space click  n start  r reset  q quit";

/// Screen positions of the grid and side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    grid_x: u16,
    grid_y: u16,
    frame_w: u16,
    frame_h: u16,
    panel_x: Option<u16>,
}

/// Glyph and color for a shape kind
pub fn glyph(kind: ShapeKind) -> (char, Rgb) {
    match kind {
        ShapeKind::Circle => ('●', Rgb::new(80, 200, 240)),
        ShapeKind::Ring => ('○', Rgb::new(80, 200, 240)),
        ShapeKind::Square => ('■', Rgb::new(240, 210, 80)),
        ShapeKind::Cross => ('✚', Rgb::new(240, 210, 80)),
        ShapeKind::Triangle => ('▲', Rgb::new(110, 220, 120)),
        ShapeKind::Star => ('★', Rgb::new(255, 165, 0)),
        ShapeKind::Spade => ('♠', Rgb::new(210, 210, 230)),
        ShapeKind::Heart => ('♥', Rgb::new(230, 80, 90)),
        ShapeKind::Club => ('♣', Rgb::new(210, 210, 230)),
        ShapeKind::Diamond => ('♦', Rgb::new(230, 80, 90)),
        ShapeKind::Shield => ('◈', Rgb::new(120, 150, 255)),
        ShapeKind::Bolt => ('ϟ', Rgb::new(255, 240, 120)),
        ShapeKind::Eye => ('◉', Rgb::new(200, 120, 220)),
    }
}

/// Renders the room: grid on the left, status panel on the right, results on top.
pub struct RoomView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    /// Tiles of this kind are drawn flashing
    flash: Option<ShapeKind>,
}

impl Default for RoomView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square in typical terminal fonts.
        Self {
            tile_w: 4,
            tile_h: 2,
            flash: None,
        }
    }
}

impl RoomView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            flash: None,
        }
    }

    /// Flash every unfound tile of `kind` on the following frames; `None` stops it.
    pub fn set_flash(&mut self, kind: Option<ShapeKind>) {
        self.flash = kind;
    }

    fn layout(&self, snap: &RoomSnapshot, viewport: Viewport) -> Layout {
        let frame_w = snap.cols as u16 * self.tile_w + 2;
        let frame_h = snap.rows as u16 * self.tile_h + 2;

        let with_panel = frame_w + PANEL_GAP + PANEL_W;
        let used_w = if viewport.width >= with_panel {
            with_panel
        } else {
            frame_w
        };
        let grid_x = viewport.width.saturating_sub(used_w) / 2;
        // Bottom line is reserved for the key help.
        let grid_y = viewport.height.saturating_sub(frame_h + 1) / 2;

        Layout {
            grid_x,
            grid_y,
            frame_w,
            frame_h,
            panel_x: (used_w == with_panel).then_some(grid_x + frame_w + PANEL_GAP),
        }
    }

    /// Tile index under terminal position `(x, y)`, if any
    pub fn hit_test(&self, snap: &RoomSnapshot, viewport: Viewport, x: u16, y: u16) -> Option<u16> {
        let layout = self.layout(snap, viewport);
        let inner_x = x.checked_sub(layout.grid_x + 1)?;
        let inner_y = y.checked_sub(layout.grid_y + 1)?;
        let col = inner_x / self.tile_w;
        let row = inner_y / self.tile_h;
        if col >= snap.cols as u16 || row >= snap.rows as u16 {
            return None;
        }
        Some(row * snap.cols as u16 + col)
    }

    /// Render into an existing framebuffer.
    ///
    /// `cursor` is the selected `(row, col)`; callers reuse `fb` across frames.
    pub fn render_into(
        &self,
        snap: &RoomSnapshot,
        cursor: Option<(u8, u8)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let layout = self.layout(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        fb.fill_rect(
            layout.grid_x + 1,
            layout.grid_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        fb.draw_box(
            layout.grid_x,
            layout.grid_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                if let Some(tile) = snap.tile(row, col) {
                    let selected = cursor == Some((row, col));
                    self.draw_tile(fb, &layout, row, col, tile, selected);
                }
            }
        }

        if let Some(panel_x) = layout.panel_x {
            self.draw_panel(fb, snap, panel_x, layout.grid_y, viewport);
        }

        if let Some(summary) = &snap.results {
            let mut lines: Vec<String> = summary.to_string().lines().map(str::to_owned).collect();
            lines.push(String::new());
            lines.push("p play again   x close".to_string());
            let title = match summary.outcome {
                Outcome::Success => "ROUND CLEAR",
                Outcome::Failure => "OUT OF LIVES",
            };
            self.draw_results(fb, viewport, title, &lines);
        }

        let help_y = viewport.height.saturating_sub(1);
        let help_x = viewport.width.saturating_sub(HELP.chars().count() as u16) / 2;
        fb.put_str(
            help_x,
            help_y,
            HELP,
            CellStyle::new(Rgb::new(140, 140, 150), BLACK).dim(),
        );
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &RoomSnapshot,
        cursor: Option<(u8, u8)>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        row: u8,
        col: u8,
        tile: &TileSnapshot,
        selected: bool,
    ) {
        let px = layout.grid_x + 1 + col as u16 * self.tile_w;
        let py = layout.grid_y + 1 + row as u16 * self.tile_h;

        let flashing = !tile.found && tile.kind.is_some() && tile.kind == self.flash;
        let bg = if flashing {
            FLASH_BG
        } else if tile.locked {
            LOCK_BG
        } else if tile.hinted {
            HINT_BG
        } else if selected {
            CURSOR_BG
        } else {
            BOARD_BG
        };
        fb.fill_rect(
            px,
            py,
            self.tile_w,
            self.tile_h,
            ' ',
            CellStyle::new(bg, bg),
        );

        let (ch, style) = match tile.kind {
            Some(_) if tile.found => ('✓', CellStyle::new(Rgb::new(110, 110, 120), bg).dim()),
            Some(kind) => {
                let (ch, fg) = glyph(kind);
                (ch, CellStyle::new(fg, bg).bold())
            }
            None => ('·', CellStyle::new(Rgb::new(90, 90, 100), bg).dim()),
        };
        let mid_y = py + (self.tile_h - 1) / 2;
        fb.put_char(px + self.tile_w / 2, mid_y, ch, style);

        if selected && self.tile_w >= 3 {
            let marker = CellStyle::new(Rgb::new(255, 255, 255), bg).bold();
            fb.put_char(px, mid_y, '[', marker);
            fb.put_char(px + self.tile_w - 1, mid_y, ']', marker);
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RoomSnapshot,
        x: u16,
        top: u16,
        viewport: Viewport,
    ) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        let quiet = value.dim();
        let bottom = viewport.height.saturating_sub(1);

        let mut y = top;
        fb.put_str(x, y, "REACTION ROOM", label);
        y += 1;
        fb.put_str(
            x,
            y,
            &format!("round {}  seed {}", snap.round, snap.seed),
            quiet,
        );
        y += 2;

        match snap.phase {
            Phase::Idle => {
                fb.put_str(x, y, "press n to start", value);
            }
            Phase::Countdown => {
                let n = snap.countdown.unwrap_or(0);
                let end = fb.put_str(x, y, "GET READY ", label);
                fb.put_str(end, y, &n.to_string(), label);
            }
            Phase::Revealed => {
                let end = fb.put_str(x, y, "FIND ", label);
                if let Some(kind) = snap.target {
                    let (ch, fg) = glyph(kind);
                    fb.put_char(end, y, ch, CellStyle::new(fg, BLACK).bold());
                    fb.put_str(end + 2, y, kind.as_str(), value);
                }
            }
            Phase::Ended(Outcome::Success) => {
                fb.put_str(x, y, "round clear", label);
            }
            Phase::Ended(Outcome::Failure) => {
                fb.put_str(x, y, "out of lives", label);
            }
        }
        y += 2;

        let end = fb.put_str(x, y, "LIVES ", label);
        for i in 0..snap.max_lives {
            let (ch, fg) = if i < snap.lives {
                ('♥', Rgb::new(230, 80, 90))
            } else {
                ('♡', Rgb::new(110, 110, 120))
            };
            fb.put_char(end + i as u16 * 2, y, ch, CellStyle::new(fg, BLACK));
        }
        y += 1;
        fb.put_str(
            x,
            y,
            &format!(
                "hits {}/{}  mistakes {}",
                snap.hits, snap.completion_hits, snap.mistakes
            ),
            value,
        );
        y += 2;

        let stats = &snap.stats;
        let rows = [
            ("last", format_ms(stats.last_ms)),
            ("best", format_ms(stats.best_ms)),
            ("avg", format_ms(stats.average_ms.map(|a| a.round() as u64))),
            ("worst", format_ms(stats.worst_ms)),
            ("total", format!("{} ms", stats.total_ms)),
        ];
        for (name, text) in rows {
            fb.put_str(x, y, name, quiet);
            fb.put_str(x + 7, y, &text, value);
            y += 1;
        }
        y += 1;

        if let Some(lock) = snap.current_lock {
            fb.put_str(x, y, "LOCK ", label);
            fb.put_str(x + 7, y, &lock.to_string(), CellStyle::new(Rgb::new(230, 110, 110), BLACK));
            y += 1;
        }
        if let Some(next) = snap.next_lock {
            fb.put_str(x, y, "NEXT ", label);
            fb.put_str(x + 7, y, &next.to_string(), CellStyle::new(Rgb::new(230, 200, 90), BLACK));
            y += 1;
        }
        y += 1;

        for line in &snap.log {
            if y >= bottom {
                break;
            }
            let clipped: String = line.chars().take(PANEL_W as usize).collect();
            fb.put_str(x, y, &clipped, quiet);
            y += 1;
        }
    }

    fn draw_results(&self, fb: &mut FrameBuffer, viewport: Viewport, title: &str, lines: &[String]) {
        let inner_w = lines
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(title.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        let box_w = (inner_w + 4).min(viewport.width);
        let max_lines = viewport.height.saturating_sub(4) as usize;
        let shown = lines.len().min(max_lines);
        let box_h = (shown as u16 + 4).min(viewport.height);

        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;
        let body = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(20, 20, 30));

        fb.fill_rect(x, y, box_w, box_h, ' ', body);
        fb.draw_box(x, y, box_w, box_h, body.bold());
        fb.put_str(x + 2, y + 1, title, body.bold());
        for (i, line) in lines.iter().take(shown).enumerate() {
            fb.put_str(x + 2, y + 2 + i as u16, line, body);
        }
    }
}
