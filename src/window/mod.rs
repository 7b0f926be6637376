//! Terminal presentation of desktop windows: mapping pixel geometry onto
//! cells and locating the parts of a window's chrome.

pub mod decorator;

use ratatui::prelude::Rect;

use crate::constants::{DEFAULT_CELL_HEIGHT_PX, DEFAULT_CELL_WIDTH_PX};
use crate::desktop::{Point, Position, PxRect, Size};

pub use decorator::{OpenStepDecorator, WindowDecorator};

/// Label drawn for a window's close control.
pub const CLOSE_LABEL: &str = "[X]";

/// Signed cell rectangle. Windows dragged off the left or top edge have a
/// negative origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, column: i32, row: i32) -> bool {
        column >= self.x && column < self.right() && row >= self.y && row < self.bottom()
    }

    /// The part of this rectangle inside `area`, if any.
    pub fn visible_in(&self, area: Rect) -> Option<Rect> {
        let x0 = self.x.max(area.x as i32);
        let y0 = self.y.max(area.y as i32);
        let x1 = self.right().min(area.x as i32 + area.width as i32);
        let y1 = self.bottom().min(area.y as i32 + area.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(
            x0 as u16,
            y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }
}

/// How many pixels one terminal cell stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    cell_width: u32,
    cell_height: u32,
}

impl Default for CellScale {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_WIDTH_PX, DEFAULT_CELL_HEIGHT_PX)
    }
}

impl CellScale {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
        }
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Pixel bounds of a canvas occupying `area` cells, with its origin at 0,0.
    pub fn canvas_bounds(&self, area: Rect) -> PxRect {
        PxRect::new(
            0,
            0,
            u32::from(area.width) * self.cell_width,
            u32::from(area.height) * self.cell_height,
        )
    }

    /// Canvas pixel at the top-left corner of the screen cell
    /// (`column`, `row`), for a canvas drawn at `origin`.
    pub fn point_at(&self, origin: Rect, column: u16, row: u16) -> Point {
        Point::new(
            (i32::from(column) - i32::from(origin.x)) * self.cell_width as i32,
            (i32::from(row) - i32::from(origin.y)) * self.cell_height as i32,
        )
    }

    /// Screen cells covered by a window at `position` of `size`.
    pub fn window_rect(&self, origin: Rect, position: Position, size: Size) -> FloatRect {
        let cw = self.cell_width as i32;
        let ch = self.cell_height as i32;
        FloatRect {
            x: i32::from(origin.x) + position.left.div_euclid(cw),
            y: i32::from(origin.y) + position.top.div_euclid(ch),
            width: size.width.div_ceil(self.cell_width).min(u32::from(u16::MAX)) as u16,
            height: size.height.div_ceil(self.cell_height).min(u32::from(u16::MAX)) as u16,
        }
    }
}

/// Which part of a window's chrome a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromePart {
    Close,
    TitleBar,
    Body,
}

/// Title row: the top border plus the header row below it.
pub fn title_bar_rect(rect: FloatRect) -> FloatRect {
    FloatRect {
        height: rect.height.min(2),
        ..rect
    }
}

/// Cells of the close control, at the right end of the header row.
pub fn close_rect(rect: FloatRect) -> FloatRect {
    let width = CLOSE_LABEL.len() as u16;
    FloatRect {
        x: rect.right() - 1 - width as i32,
        y: rect.y + 1,
        width: width.min(rect.width.saturating_sub(2)),
        height: u16::from(rect.height > 2),
    }
}

/// Content area inside the border and below the header.
pub fn body_rect(rect: FloatRect) -> FloatRect {
    FloatRect {
        x: rect.x + 1,
        y: rect.y + 2,
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(3),
    }
}

pub fn chrome_hit(rect: FloatRect, column: i32, row: i32) -> Option<ChromePart> {
    if !rect.contains(column, row) {
        return None;
    }
    if close_rect(rect).contains(column, row) {
        return Some(ChromePart::Close);
    }
    if title_bar_rect(rect).contains(column, row) {
        return Some(ChromePart::TitleBar);
    }
    Some(ChromePart::Body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_window_maps_to_cells() {
        let scale = CellScale::default();
        let origin = Rect::new(0, 1, 120, 40);
        let rect = scale.window_rect(origin, Position::new(50, 50), Size::new(450, 485));
        assert_eq!(
            rect,
            FloatRect {
                x: 5,
                y: 3,
                width: 45,
                height: 25
            }
        );
    }

    #[test]
    fn negative_positions_floor_to_cells() {
        let scale = CellScale::new(10, 20);
        let rect = scale.window_rect(
            Rect::new(0, 0, 80, 24),
            Position::new(0, -15),
            Size::new(100, 100),
        );
        assert_eq!(rect.x, -2);
        assert!(rect.visible_in(Rect::new(0, 0, 80, 24)).is_some());
    }

    #[test]
    fn point_at_is_canvas_relative() {
        let scale = CellScale::new(10, 20);
        let origin = Rect::new(0, 1, 80, 23);
        assert_eq!(scale.point_at(origin, 6, 4), Point::new(60, 60));
        assert_eq!(scale.point_at(origin, 0, 0), Point::new(0, -20));
    }

    #[test]
    fn chrome_parts_are_located() {
        let rect = FloatRect {
            x: 10,
            y: 5,
            width: 20,
            height: 10,
        };
        assert_eq!(chrome_hit(rect, 12, 5), Some(ChromePart::TitleBar));
        assert_eq!(chrome_hit(rect, 12, 6), Some(ChromePart::TitleBar));
        assert_eq!(chrome_hit(rect, 26, 6), Some(ChromePart::Close));
        assert_eq!(chrome_hit(rect, 28, 6), Some(ChromePart::Close));
        assert_eq!(chrome_hit(rect, 29, 6), Some(ChromePart::TitleBar));
        assert_eq!(chrome_hit(rect, 15, 9), Some(ChromePart::Body));
        assert_eq!(chrome_hit(rect, 30, 9), None);
    }

    #[test]
    fn visible_in_clips_and_rejects() {
        let area = Rect::new(0, 0, 10, 10);
        let r = FloatRect {
            x: -3,
            y: 8,
            width: 5,
            height: 5,
        };
        assert_eq!(r.visible_in(area), Some(Rect::new(0, 8, 2, 2)));
        let off = FloatRect { x: 10, ..r };
        assert_eq!(off.visible_in(area), None);
    }
}
