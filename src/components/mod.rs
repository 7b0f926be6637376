use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod launcher;
pub mod memory_board;
pub mod notice;

pub use launcher::{LauncherAction, LauncherBar};
pub use memory_board::{BoardAction, BoardTarget, MemoryBoard};
pub use notice::NoticeOverlay;

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct DummyComp;
    impl Component for DummyComp {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _ctx: &ComponentContext) {}
    }

    #[test]
    fn default_handle_event_returns_false() {
        let mut d = DummyComp;
        assert!(!d.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            &ComponentContext::default()
        ));
    }
}
