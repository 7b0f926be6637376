//! Drag and drop of window containers.
//!
//! A drag starts on a draggable container, captures the offset between the
//! window origin and the pointer, and raises the window to the top of the
//! stack. The drop lands on a registered surface and places the window at
//! `pointer + offset`. Only one drag can be in flight at a time.

use std::fmt;
use std::str::FromStr;

use super::DesktopState;
use super::geometry::{Point, Position, PxRect};
use super::lifecycle::Container;
use super::registry::{SlotId, WindowKind};
use crate::constants::MIN_VISIBLE_MARGIN_PX;
use crate::error::DeskError;

/// Data carried from drag start to drop: the dragged window and its origin
/// relative to the pointer at drag start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub id: SlotId,
    pub left: i32,
    pub top: i32,
}

/// Text form is `"{id},{left},{top}"`.
impl fmt::Display for DragPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.id, self.left, self.top)
    }
}

impl FromStr for DragPayload {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DeskError::MalformedTransfer(s.to_string());
        let mut parts = s.split(',');
        let (Some(id), Some(left), Some(top), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let digits = id.len() - id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || digits == id.len() {
            return Err(malformed());
        }
        let (kind, seq) = id.split_at(id.len() - digits);
        let seq = seq.parse::<u32>().map_err(|_| malformed())?;
        let left = left.trim().parse::<i32>().map_err(|_| malformed())?;
        let top = top.trim().parse::<i32>().map_err(|_| malformed())?;
        Ok(Self {
            id: SlotId::new(WindowKind::new(kind), seq),
            left,
            top,
        })
    }
}

/// A region that accepts dropped windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropSurface {
    name: String,
    bounds: PxRect,
    enabled: bool,
}

impl DropSurface {
    pub fn new(name: impl Into<String>, bounds: PxRect) -> Self {
        Self {
            name: name.into(),
            bounds,
            enabled: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> PxRect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: PxRect) {
        self.bounds = bounds;
    }

    pub fn accepts_drops(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragPayload>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `container` draggable. The window also becomes a drop surface so
    /// another window dragged across it is not rejected.
    pub fn enable_drag(&self, container: &mut Container) {
        container.set_draggable(true);
        container.set_accepts_drops(true);
    }

    pub fn enable_drop(&self, surface: &mut DropSurface) {
        surface.enabled = true;
    }

    pub fn active(&self) -> Option<&DragPayload> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self, id: &SlotId) -> bool {
        self.active.as_ref().is_some_and(|p| &p.id == id)
    }

    /// Begin dragging `container` from `pointer`.
    ///
    /// Returns `None` if the container is not draggable or another drag is
    /// already in flight.
    pub fn drag_start(
        &mut self,
        state: &mut DesktopState,
        container: &mut Container,
        pointer: Point,
    ) -> Option<DragPayload> {
        if !container.draggable() || self.active.is_some() {
            return None;
        }
        let position = container.position();
        let payload = DragPayload {
            id: container.id().clone(),
            left: position.left - pointer.x,
            top: position.top - pointer.y,
        };
        container.set_depth(state.depth_mut().raise());
        container.set_translucent(true);
        tracing::trace!(payload = %payload, depth = container.depth(), "drag start");
        self.active = Some(payload.clone());
        Some(payload)
    }

    /// Land the active drag on `surface` at `pointer`.
    ///
    /// The window is placed at `pointer + offset`, clamped so a grabbable
    /// strip stays inside the surface. Returns the new position, or `None`
    /// when the surface does not accept drops or `payload` is not the drag in
    /// flight.
    pub fn drop(
        &mut self,
        surface: &DropSurface,
        container: &mut Container,
        payload: &DragPayload,
        pointer: Point,
    ) -> Option<Position> {
        if !surface.accepts_drops()
            || self.active.as_ref() != Some(payload)
            || container.id() != &payload.id
        {
            return None;
        }
        self.active = None;
        let wanted = Position::new(pointer.y + payload.top, pointer.x + payload.left);
        let placed = clamp_visible(wanted, container.rect(), surface.bounds());
        container.set_position(placed);
        container.set_translucent(false);
        tracing::trace!(window = %payload.id, top = placed.top, left = placed.left, "drop");
        Some(placed)
    }

    /// Abandon the drag in flight, leaving the window where it was.
    pub fn cancel(&mut self, container: Option<&mut Container>) {
        if let Some(payload) = self.active.take() {
            tracing::trace!(window = %payload.id, "drag cancelled");
        }
        if let Some(container) = container {
            container.set_translucent(false);
        }
    }
}

fn clamp_visible(wanted: Position, window: PxRect, bounds: PxRect) -> Position {
    if bounds.width == 0 || bounds.height == 0 {
        return wanted;
    }
    let margin = MIN_VISIBLE_MARGIN_PX
        .min(window.width as i32)
        .min(bounds.width as i32);
    let min_left = bounds.left - window.width as i32 + margin;
    let max_left = bounds.right() - margin;
    let max_top = (bounds.bottom() - margin).max(bounds.top);
    Position::new(
        wanted.top.clamp(bounds.top, max_top),
        wanted.left.clamp(min_left, max_left.max(min_left)),
    )
}
