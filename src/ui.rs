//! UiFrame: a thin wrapper around `ratatui::Frame` that clips every draw to
//! the visible area.
//!
//! Windows on the desktop may be dragged partly off the canvas, so their
//! rectangles regularly extend past the buffer (including to negative
//! columns). Board contents are rendered into an offscreen buffer of the
//! window body's size and composited with `blit_from_signed`, which drops
//! any cell that falls outside the frame.
use crate::window::FloatRect;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Draw into an arbitrary buffer, e.g. an offscreen window body.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Copy `src` (origin 0,0) onto the frame at the signed position `dest`.
    pub fn blit_from_signed(&mut self, src: &Buffer, dest: FloatRect) {
        let frame_x0 = self.area.x as i32;
        let frame_y0 = self.area.y as i32;
        let frame_x1 = frame_x0 + self.area.width as i32;
        let frame_y1 = frame_y0 + self.area.height as i32;
        for sy in 0..dest.height as i32 {
            let dy = dest.y + sy;
            if dy < frame_y0 || dy >= frame_y1 {
                continue;
            }
            for sx in 0..dest.width as i32 {
                let dx = dest.x + sx;
                if dx < frame_x0 || dx >= frame_x1 {
                    continue;
                }
                if let (Some(src_cell), Some(dst_cell)) = (
                    src.cell((sx as u16, sy as u16)),
                    self.buffer.cell_mut((dx as u16, dy as u16)),
                ) {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }

    /// Apply `style` on top of every visible cell of `rect`.
    pub fn patch_style_signed(&mut self, rect: FloatRect, style: Style) {
        let Some(visible) = rect.visible_in(self.area) else {
            return;
        };
        self.buffer.set_style(visible, style);
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Column at which `text` starts when centered in `area`.
pub(crate) fn centered_x(area: Rect, text: &str) -> u16 {
    let len = text.chars().count() as u16;
    area.x + area.width.saturating_sub(len) / 2
}
