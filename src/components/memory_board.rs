use std::time::Instant;

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::layout::{RegionMap, even_split};
use crate::memory::{Card, CardRef, Effect, MemoryGame, Outcome};
use crate::ui::{UiFrame, centered_x, safe_set_string};

pub const RESTART_LABEL: &str = "[ Play again? ]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BoardTarget {
    Card(CardRef),
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Selected(Effect),
    Restarted,
}

/// Card grid view for one memory game, mounted in a window body.
///
/// Click regions are recorded in the coordinates of the area the board was
/// last rendered into, so callers translate pointer positions into that
/// space before calling `click`.
#[derive(Debug)]
pub struct MemoryBoard {
    game: MemoryGame,
    regions: RegionMap<BoardTarget>,
}

impl MemoryBoard {
    pub fn new(game: MemoryGame) -> Self {
        Self {
            game,
            regions: RegionMap::default(),
        }
    }

    pub fn game(&self) -> &MemoryGame {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut MemoryGame {
        &mut self.game
    }

    pub fn region(&self, target: BoardTarget) -> Option<Rect> {
        self.regions.get(target)
    }

    pub fn click(&mut self, column: u16, row: u16, now: Instant) -> Option<BoardAction> {
        match self.regions.hit_test(column, row)? {
            BoardTarget::Card(card) => {
                Some(BoardAction::Selected(self.game.select_card(card, now)))
            }
            BoardTarget::Restart => {
                self.game.restart();
                Some(BoardAction::Restarted)
            }
        }
    }

    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        self.game.advance(now)
    }

    fn footer_text(&self) -> String {
        match self.game.outcome().message() {
            Some(message) => message.to_string(),
            None => self.game.attempt_label(),
        }
    }

    fn render_card(&self, frame: &mut UiFrame<'_>, rect: Rect, card: &Card) {
        let glyph = card.face().glyph().to_string();
        let (fill, style, show_glyph) = if card.matched() {
            (
                " ",
                Style::default()
                    .bg(crate::theme::card_face_bg())
                    .fg(crate::theme::card_matched_fg())
                    .add_modifier(Modifier::BOLD),
                true,
            )
        } else if card.revealed() {
            (
                " ",
                Style::default()
                    .bg(crate::theme::card_face_bg())
                    .fg(crate::theme::card_face_fg()),
                card.face_visible(),
            )
        } else {
            (
                "░",
                Style::default()
                    .bg(crate::theme::card_back_bg())
                    .fg(crate::theme::card_back_fg()),
                card.face_visible(),
            )
        };
        let buffer = frame.buffer_mut();
        let bounds = rect.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        for y in bounds.y..bounds.y + bounds.height {
            for x in bounds.x..bounds.x + bounds.width {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(fill);
                    cell.set_style(style);
                }
            }
        }
        if show_glyph {
            let y = bounds.y + bounds.height / 2;
            safe_set_string(buffer, bounds, centered_x(bounds, &glyph), y, &glyph, style);
        }
    }
}

impl Component for MemoryBoard {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.regions.clear();
        if area.width == 0 || area.height < 2 {
            return;
        }
        let terminal = self.game.outcome().is_terminal();
        let footer_height = if terminal { 2 } else { 1 };
        let grid = Rect {
            height: area.height.saturating_sub(footer_height + 1),
            ..area
        };

        let size = self.game.size();
        let columns = even_split(grid.width, size.columns());
        let rows = even_split(grid.height, size.rows());
        for (r, &(y_off, height)) in rows.iter().enumerate() {
            for (c, &(x_off, width)) in columns.iter().enumerate() {
                let Some(card_ref) = size.card_at(r as u16, c as u16) else {
                    continue;
                };
                let Some(card) = self.game.card(card_ref) else {
                    continue;
                };
                // One cell of gutter between cards when there is room.
                let rect = Rect {
                    x: grid.x + x_off,
                    y: grid.y + y_off,
                    width: if width > 2 { width - 1 } else { width },
                    height: if height > 1 { height - 1 } else { height },
                };
                if rect.width == 0 || rect.height == 0 {
                    continue;
                }
                self.render_card(frame, rect, card);
                self.regions.set(BoardTarget::Card(card_ref), rect);
            }
        }

        let footer_y = area.y + area.height - footer_height;
        let mut footer_style = Style::default().fg(crate::theme::dialog_fg());
        match self.game.outcome() {
            Outcome::Won => footer_style = footer_style.fg(crate::theme::outcome_won_fg()),
            Outcome::Lost => footer_style = footer_style.fg(crate::theme::outcome_lost_fg()),
            Outcome::InProgress => {}
        }
        if ctx.focused() && terminal {
            footer_style = footer_style.add_modifier(Modifier::BOLD);
        }
        let text = self.footer_text();
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        safe_set_string(buffer, bounds, centered_x(area, &text), footer_y, &text, footer_style);

        if terminal {
            let y = footer_y + 1;
            let x = centered_x(area, RESTART_LABEL);
            let style = Style::default()
                .bg(crate::theme::launcher_button_bg())
                .fg(crate::theme::launcher_button_fg());
            safe_set_string(buffer, bounds, x, y, RESTART_LABEL, style);
            let width = (RESTART_LABEL.chars().count() as u16).min(area.width);
            self.regions.set(BoardTarget::Restart, Rect::new(x, y, width, 1));
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        self.click(mouse.column, mouse.row, Instant::now()).is_some()
    }
}
