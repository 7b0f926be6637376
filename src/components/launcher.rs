use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::layout::RegionMap;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LauncherAction {
    OpenMemoryGame,
    CloseAll,
}

impl LauncherAction {
    pub fn label(self) -> &'static str {
        match self {
            LauncherAction::OpenMemoryGame => "[ Memory (m) ]",
            LauncherAction::CloseAll => "[ Close all (c) ]",
        }
    }
}

const BUTTONS: [LauncherAction; 2] = [LauncherAction::OpenMemoryGame, LauncherAction::CloseAll];

/// One-row bar above the canvas with the app launch buttons and a status
/// readout on the right.
#[derive(Debug, Default)]
pub struct LauncherBar {
    status: String,
    regions: RegionMap<LauncherAction>,
}

impl LauncherBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status<T: Into<String>>(&mut self, value: T) {
        self.status = value.into();
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn region(&self, action: LauncherAction) -> Option<Rect> {
        self.regions.get(action)
    }

    pub fn action_at(&self, column: u16, row: u16) -> Option<LauncherAction> {
        self.regions.hit_test(column, row)
    }
}

impl Component for LauncherBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.regions.clear();
        if area.height == 0 || area.width == 0 {
            return;
        }
        let bar_style = Style::default()
            .bg(crate::theme::launcher_bg())
            .fg(crate::theme::launcher_fg());
        let button_style = Style::default()
            .bg(crate::theme::launcher_button_bg())
            .fg(crate::theme::launcher_button_fg())
            .add_modifier(Modifier::BOLD);
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let row = Rect { height: 1, ..bounds };
        buffer.set_style(row, bar_style);
        for x in row.x..row.x + row.width {
            if let Some(cell) = buffer.cell_mut((x, row.y)) {
                cell.set_symbol(" ");
            }
        }

        let mut x = area.x.saturating_add(1);
        let max_x = area.x.saturating_add(area.width);
        for action in BUTTONS {
            let label = action.label();
            let width = label.chars().count() as u16;
            if x.saturating_add(width) > max_x {
                break;
            }
            safe_set_string(buffer, bounds, x, area.y, label, button_style);
            self.regions.set(action, Rect::new(x, area.y, width, 1));
            x = x.saturating_add(width + 1);
        }

        if !self.status.is_empty() {
            let room = max_x.saturating_sub(x).saturating_sub(1) as usize;
            let status = truncate_to_width(&self.status, room);
            let status_width = status.chars().count() as u16;
            if status_width > 0 {
                let start_x = max_x.saturating_sub(status_width + 1);
                safe_set_string(buffer, bounds, start_x, area.y, &status, bar_style);
            }
        }
    }
}
