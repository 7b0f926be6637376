//! Pixel-space geometry used by the desktop core.
//!
//! Positions are signed so a window dragged partly past the canvas edge can
//! keep a negative origin; sizes are unsigned.

/// Window origin relative to the canvas, in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub top: i32,
    pub left: i32,
}

impl Position {
    pub const fn new(top: i32, left: i32) -> Self {
        Self { top, left }
    }
}

/// Pointer coordinates relative to the canvas, in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PxRect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl PxRect {
    pub const fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.left, position.top, size.width, size.height)
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height as i32)
    }

    pub fn contains(&self, point: Point) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}
