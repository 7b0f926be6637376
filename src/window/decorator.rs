use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use super::{CLOSE_LABEL, FloatRect, close_rect};
use crate::ui::UiFrame;

pub trait WindowDecorator: std::fmt::Debug {
    /// Draw border, header, title and close control for a window occupying
    /// `rect`. Only cells inside `bounds` are touched.
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: FloatRect,
        bounds: Rect,
        title: &str,
        focused: bool,
    );
}

#[derive(Debug, Default)]
pub struct OpenStepDecorator;

impl WindowDecorator for OpenStepDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: FloatRect,
        bounds: Rect,
        title: &str,
        focused: bool,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let bounds = bounds.intersection(frame.area());
        let buffer = frame.buffer_mut();

        let focused_header_style = Style::default()
            .bg(crate::theme::decorator_header_bg())
            .fg(crate::theme::decorator_header_fg())
            .add_modifier(Modifier::BOLD);
        let normal_header_style = Style::default()
            .bg(crate::theme::decorator_inactive_header_bg())
            .fg(crate::theme::decorator_header_fg());
        let border_style = Style::default()
            .fg(crate::theme::decorator_border())
            .bg(crate::theme::window_bg());
        let body_style = Style::default().bg(crate::theme::window_bg());

        let header_style = if focused {
            focused_header_style
        } else {
            normal_header_style
        };

        let mut put = |x: i32, y: i32, symbol: &str, style: Style| {
            let inside = x >= bounds.x as i32
                && x < bounds.x as i32 + bounds.width as i32
                && y >= bounds.y as i32
                && y < bounds.y as i32 + bounds.height as i32;
            if inside && let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        };

        let outer_left = rect.x;
        let outer_top = rect.y;
        let outer_right = rect.right() - 1;
        let outer_bottom = rect.bottom() - 1;
        let header_y = outer_top + 1;

        // Body
        for y in header_y + 1..outer_bottom {
            for x in outer_left + 1..outer_right {
                put(x, y, " ", body_style);
            }
        }

        // Header background, title and close control
        if header_y < outer_bottom {
            for x in outer_left + 1..outer_right {
                put(x, header_y, " ", header_style);
            }
            let close = close_rect(rect);
            let header_width = (outer_right - outer_left - 1 - close.width as i32 - 1).max(0);
            let title: String = title.chars().take(header_width as usize).collect();
            let title_len = title.chars().count() as i32;
            let start_x = outer_left + 1 + (header_width - title_len) / 2;
            for (idx, ch) in title.chars().enumerate() {
                put(start_x + idx as i32, header_y, &ch.to_string(), header_style);
            }
            if close.width as usize == CLOSE_LABEL.len() {
                let close_style = header_style.fg(crate::theme::decorator_close_fg());
                for (idx, ch) in CLOSE_LABEL.chars().enumerate() {
                    put(close.x + idx as i32, header_y, &ch.to_string(), close_style);
                }
            }
        }

        // Borders
        for x in outer_left..=outer_right {
            let (top, bottom) = if x == outer_left {
                ("┌", "└")
            } else if x == outer_right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            put(x, outer_top, top, border_style);
            put(x, outer_bottom, bottom, border_style);
        }
        for y in outer_top + 1..outer_bottom {
            put(outer_left, y, "│", border_style);
            put(outer_right, y, "│", border_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn draws_border_title_and_close() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let rect = FloatRect {
            x: 0,
            y: 0,
            width: 20,
            height: 5,
        };
        OpenStepDecorator.render_window(&mut frame, rect, area, "Memory", true);
        assert_eq!(row(&buf, 0), "┌──────────────────┐");
        let header = row(&buf, 1);
        assert!(header.contains("Memory"));
        assert!(header.ends_with("[X]│"));
        assert_eq!(row(&buf, 4), "└──────────────────┘");
    }

    #[test]
    fn partially_offscreen_window_does_not_panic() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let rect = FloatRect {
            x: -6,
            y: -1,
            width: 12,
            height: 8,
        };
        OpenStepDecorator.render_window(&mut frame, rect, area, "Memory Game", false);
        assert_eq!(buf.cell((5, 3)).unwrap().symbol(), "│");
        assert_eq!(buf.cell((6, 3)).unwrap().symbol(), " ");
    }
}
