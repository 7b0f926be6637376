use crossterm::event::{Event, KeyEventKind, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

const DISMISS_HINT: &str = "(press any key)";

/// Modal message box, e.g. the window-capacity warning. Any key press or
/// click dismisses it.
#[derive(Debug, Clone)]
pub struct NoticeOverlay {
    title: String,
    body: String,
    visible: bool,
    width: u16,
    height: u16,
}

impl NoticeOverlay {
    pub fn new() -> Self {
        Self {
            title: "Notice".to_string(),
            body: String::new(),
            visible: false,
            width: 60,
            height: 7,
        }
    }

    pub fn show(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Clamp the box to the available area so small terminals still fit it.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let mut width = area.width.min(self.width).max(1);
        let mut height = area.height.min(self.height).max(1);
        if area.width >= 24 {
            width = width.max(24);
        }
        if area.height >= 5 {
            height = height.max(5);
        }
        let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
        let y = area
            .y
            .saturating_add(area.height.saturating_sub(height) / 2);
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for NoticeOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for NoticeOverlay {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let backdrop = area.intersection(frame.area());
        frame.buffer_mut().set_style(backdrop, dim_style);

        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(crate::theme::dialog_border()));
        let text = format!("{}\n\n{}", self.body, DISMISS_HINT);
        let paragraph = Paragraph::new(text)
            .style(
                Style::default()
                    .bg(crate::theme::dialog_bg())
                    .fg(crate::theme::dialog_fg()),
            )
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if !self.visible {
            return false;
        }
        let dismiss = match event {
            Event::Key(key) => key.kind == KeyEventKind::Press,
            Event::Mouse(mouse) => matches!(mouse.kind, MouseEventKind::Down(_)),
            _ => false,
        };
        if dismiss {
            self.dismiss();
        }
        // Modal: swallow all input while shown.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CAPACITY_NOTICE;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent};
    use ratatui::buffer::Buffer;

    #[test]
    fn rect_for_clamps_sizes() {
        let notice = NoticeOverlay::new();
        let r = notice.rect_for(Rect::new(0, 0, 10, 2));
        assert!(r.width >= 1 && r.width <= 10);
        assert!(r.height >= 1 && r.height <= 2);
        let r2 = notice.rect_for(Rect::new(0, 0, 80, 24));
        assert_eq!(r2.width, 60);
        assert_eq!(r2.x, 10);
    }

    #[test]
    fn any_key_or_click_dismisses() {
        let mut notice = NoticeOverlay::new();
        let ctx = ComponentContext::default();
        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!notice.handle_event(&key, &ctx));

        notice.show(CAPACITY_NOTICE);
        assert!(notice.handle_event(&Event::FocusGained, &ctx));
        assert!(notice.visible());
        assert!(notice.handle_event(&key, &ctx));
        assert!(!notice.visible());

        notice.show(CAPACITY_NOTICE);
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(notice.handle_event(&click, &ctx));
        assert!(!notice.visible());
    }

    #[test]
    fn renders_message_when_visible() {
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        let mut notice = NoticeOverlay::new();
        notice.show(CAPACITY_NOTICE);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        notice.render(&mut frame, area, &ComponentContext::default());
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("You can create a maximum of 125 windows per session."));
    }
}
