//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed row by row against the previous one; only the changed span of each
//! row is rewritten.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame on screen; `None` forces a full redraw
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor and mouse capture
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`]; safe to call more than once
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        self.last = None;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller may overwrite; no frame is cloned.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        match self.last.as_mut() {
            Some(prev) => std::mem::swap(prev, fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .context("write frame to terminal")?;
        self.stdout.flush().context("flush terminal")?;
        Ok(())
    }
}

/// Encode `next` into crossterm commands, diffing against `prev` when the sizes match.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current: Option<CellStyle> = None;
    for y in 0..next.height() {
        let span = match prev {
            Some(prev) => changed_span(prev.row(y), next.row(y)),
            None => Some((0, next.width())),
        };
        let Some((start, end)) = span else {
            continue;
        };

        out.queue(cursor::MoveTo(start, y))?;
        for cell in &next.row(y)[start as usize..end as usize] {
            if current != Some(cell.style) {
                apply_style(out, cell.style)?;
                current = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Half-open column range covering every differing cell of a row
fn changed_span(prev: &[Cell], next: &[Cell]) -> Option<(u16, u16)> {
    let first = prev.iter().zip(next).position(|(a, b)| a != b)?;
    let last = prev.iter().zip(next).rposition(|(a, b)| a != b)?;
    Some((first as u16, last as u16 + 1))
}

fn apply_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_span_covers_first_to_last_difference() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 1);
        let mut b = FrameBuffer::new(6, 1);
        b.put_char(1, 0, 'x', style);
        b.put_char(4, 0, 'y', style);

        assert_eq!(changed_span(a.row(0), b.row(0)), Some((1, 5)));
        assert_eq!(changed_span(a.row(0), a.row(0)), None);
    }

    #[test]
    fn identical_frames_emit_no_text() {
        let mut a = FrameBuffer::new(4, 2);
        a.put_str(0, 0, "abcd", CellStyle::default());
        let b = a.clone();

        let mut out = Vec::new();
        encode_frame(Some(&a), &b, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains("abcd"));
    }

    #[test]
    fn size_change_forces_full_redraw() {
        let a = FrameBuffer::new(2, 2);
        let mut b = FrameBuffer::new(3, 1);
        b.put_str(0, 0, "xyz", CellStyle::default());

        let mut out = Vec::new();
        encode_frame(Some(&a), &b, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains("xyz"));
    }
}
