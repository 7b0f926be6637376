//! Window bookkeeping for the desktop: identities, placement, stacking, and
//! drag and drop, independent of how windows end up on screen.

pub mod canvas;
pub mod drag;
pub mod geometry;
pub mod lifecycle;
pub mod registry;
mod state;

pub use canvas::Canvas;
pub use drag::{DragController, DragPayload, DropSurface};
pub use geometry::{Point, Position, PxRect, Size};
pub use lifecycle::{Container, WindowLifecycle, WindowState};
pub use registry::{SlotId, WindowKind, WindowSlot, WindowSlotRegistry};
pub use state::{CascadeOffset, DepthCounter, DesktopState};

use crate::error::{DeskError, DeskResult};

/// Everything needed to open, stack, move and close windows on one canvas.
#[derive(Debug)]
pub struct Desktop {
    state: DesktopState,
    lifecycle: WindowLifecycle,
    drag: DragController,
    canvas: Canvas,
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new(WindowSlotRegistry::new())
    }
}

impl Desktop {
    pub fn new(registry: WindowSlotRegistry) -> Self {
        let drag = DragController::new();
        let mut canvas = Canvas::default();
        drag.enable_drop(canvas.surface_mut());
        Self {
            state: DesktopState::new(),
            lifecycle: WindowLifecycle::new(registry),
            drag,
            canvas,
        }
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn set_bounds(&mut self, bounds: PxRect) {
        self.canvas.set_bounds(bounds);
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Maximum number of live windows.
    pub fn cap(&self) -> usize {
        self.lifecycle.registry().cap()
    }

    /// Open and mount a window. On `CapacityExceeded` nothing is mounted.
    pub fn open_window(
        &mut self,
        kind: &WindowKind,
        size: Size,
        title: &str,
    ) -> DeskResult<SlotId> {
        let container = self
            .lifecycle
            .open(&mut self.state, &self.drag, kind, size, title)?;
        let id = container.id().clone();
        self.canvas.mount(container);
        Ok(id)
    }

    /// Close a mounted window, as its close control does.
    pub fn close_window(&mut self, id: &SlotId) -> DeskResult<Container> {
        let container = self
            .canvas
            .remove(id)
            .ok_or_else(|| DeskError::UnknownWindow(id.to_string()))?;
        if self.drag.is_dragging(id) {
            self.drag.cancel(None);
        }
        tracing::debug!(window = %id, "closing window");
        Ok(self.lifecycle.close(&mut self.state, container))
    }

    /// Remove every window and reset the live count and cascade.
    pub fn close_all(&mut self) -> Vec<SlotId> {
        self.drag.cancel(None);
        let removed = self.canvas.clear();
        self.lifecycle.reset(&mut self.state);
        removed.into_iter().map(|w| w.id().clone()).collect()
    }

    /// Start dragging the window `id` from `pointer`.
    pub fn begin_drag(&mut self, id: &SlotId, pointer: Point) -> Option<DragPayload> {
        let container = self.canvas.get_mut(id)?;
        self.drag.drag_start(&mut self.state, container, pointer)
    }

    /// Finish the drag in flight at `pointer`. A drop outside every surface
    /// cancels the drag and leaves the window in place.
    pub fn drop_at(&mut self, pointer: Point) -> Option<Position> {
        let payload = self.drag.active()?.clone();
        if !self.canvas.accepts_drop_at(pointer) {
            let container = self.canvas.get_mut(&payload.id);
            self.drag.cancel(container);
            return None;
        }
        let surface = self.canvas.surface().clone();
        let Some(container) = self.canvas.get_mut(&payload.id) else {
            self.drag.cancel(None);
            return None;
        };
        self.drag.drop(&surface, container, &payload, pointer)
    }

    /// Finish the drag in flight from its text transfer form,
    /// `"{id},{left},{top}"`. Data that does not describe the active drag is
    /// rejected and the drag stays in flight.
    pub fn drop_transfer(&mut self, data: &str, pointer: Point) -> DeskResult<Option<Position>> {
        let payload: DragPayload = data.parse()?;
        if self.drag.active() != Some(&payload) {
            return Err(DeskError::MalformedTransfer(data.to_string()));
        }
        Ok(self.drop_at(pointer))
    }

    pub fn cancel_drag(&mut self) {
        let Some(id) = self.drag.active().map(|p| p.id.clone()) else {
            return;
        };
        let container = self.canvas.get_mut(&id);
        self.drag.cancel(container);
    }

    /// Raise `id` above every other window without dragging it.
    pub fn bring_to_front(&mut self, id: &SlotId) {
        if self.canvas.topmost().is_some_and(|w| w.id() == id) {
            return;
        }
        let depth = self.state.depth_mut().raise();
        if let Some(w) = self.canvas.get_mut(id) {
            w.set_depth(depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_LIVE_WINDOWS;

    fn memory(desk: &mut Desktop) -> DeskResult<SlotId> {
        desk.open_window(&WindowKind::memory_game(), Size::new(450, 485), "Memory Game")
    }

    #[test]
    fn cap_of_125_and_one_more_after_close() {
        let mut desk = Desktop::default();
        let mut ids = Vec::new();
        for _ in 0..MAX_LIVE_WINDOWS {
            ids.push(memory(&mut desk).unwrap());
        }
        assert!(matches!(
            memory(&mut desk),
            Err(DeskError::CapacityExceeded { cap: MAX_LIVE_WINDOWS })
        ));
        assert_eq!(desk.state().live_windows(), MAX_LIVE_WINDOWS);
        assert_eq!(desk.canvas().len(), MAX_LIVE_WINDOWS);

        desk.close_window(&ids[7]).unwrap();
        assert!(memory(&mut desk).is_ok());
        assert!(memory(&mut desk).is_err());
    }

    #[test]
    fn closing_twice_does_not_double_decrement() {
        let mut desk = Desktop::default();
        let a = memory(&mut desk).unwrap();
        let _b = memory(&mut desk).unwrap();
        desk.close_window(&a).unwrap();
        assert!(matches!(
            desk.close_window(&a),
            Err(DeskError::UnknownWindow(_))
        ));
        assert_eq!(desk.state().live_windows(), 1);
    }

    #[test]
    fn close_all_resets_counters() {
        let mut desk = Desktop::default();
        memory(&mut desk).unwrap();
        memory(&mut desk).unwrap();
        let removed = desk.close_all();
        assert_eq!(removed.len(), 2);
        assert!(desk.canvas().is_empty());
        assert_eq!(desk.state().live_windows(), 0);
        assert_eq!(desk.state().cascade(), CascadeOffset::new());
        let next = memory(&mut desk).unwrap();
        assert_eq!(next.to_string(), "memory_game2");
    }

    #[test]
    fn drag_raises_and_drop_moves() {
        let mut desk = Desktop::default();
        desk.set_bounds(PxRect::new(0, 0, 1600, 900));
        let a = memory(&mut desk).unwrap();
        let _b = memory(&mut desk).unwrap();
        desk.begin_drag(&a, Point::new(60, 60)).unwrap();
        assert_eq!(desk.canvas().topmost().map(|w| w.id()), Some(&a));
        let placed = desk.drop_at(Point::new(400, 300)).unwrap();
        assert_eq!(placed, Position::new(290, 390));
    }

    #[test]
    fn drop_transfer_checks_payload_against_active_drag() {
        let mut desk = Desktop::default();
        desk.set_bounds(PxRect::new(0, 0, 1600, 900));
        let a = memory(&mut desk).unwrap();
        let payload = desk.begin_drag(&a, Point::new(60, 60)).unwrap();
        let data = payload.to_string();
        assert_eq!(data, "memory_game0,-10,-10");

        assert!(matches!(
            desk.drop_transfer("memory_game7,-10,-10", Point::new(100, 100)),
            Err(DeskError::MalformedTransfer(_))
        ));
        assert!(desk.drop_transfer("garbage", Point::new(100, 100)).is_err());
        assert!(desk.drag().active().is_some());

        let placed = desk.drop_transfer(&data, Point::new(100, 100)).unwrap();
        assert_eq!(placed, Some(Position::new(90, 90)));
        assert!(desk.drag().active().is_none());
    }

    #[test]
    fn drop_outside_every_surface_cancels() {
        let mut desk = Desktop::default();
        desk.set_bounds(PxRect::new(0, 0, 800, 600));
        let a = memory(&mut desk).unwrap();
        desk.begin_drag(&a, Point::new(60, 60)).unwrap();
        assert_eq!(desk.drop_at(Point::new(5000, 5000)), None);
        assert!(desk.drag().active().is_none());
        let w = desk.canvas().get(&a).unwrap();
        assert_eq!(w.position(), Position::new(50, 50));
        assert_eq!(w.opacity(), 1.0);
    }
}
