use super::drag::DropSurface;
use super::geometry::{Point, PxRect};
use super::lifecycle::Container;
use super::registry::SlotId;

pub const CANVAS_SURFACE: &str = "canvas";

/// The shared surface windows are mounted on.
#[derive(Debug)]
pub struct Canvas {
    surface: DropSurface,
    windows: Vec<Container>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(PxRect::default())
    }
}

impl Canvas {
    pub fn new(bounds: PxRect) -> Self {
        Self {
            surface: DropSurface::new(CANVAS_SURFACE, bounds),
            windows: Vec::new(),
        }
    }

    pub fn surface(&self) -> &DropSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DropSurface {
        &mut self.surface
    }

    pub fn set_bounds(&mut self, bounds: PxRect) {
        self.surface.set_bounds(bounds);
    }

    pub fn mount(&mut self, container: Container) {
        self.windows.push(container);
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, id: &SlotId) -> Option<&Container> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: &SlotId) -> Option<&mut Container> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    /// Detach a window. Returns `None` if it is not mounted, so a second
    /// close of the same window is a no-op.
    pub fn remove(&mut self, id: &SlotId) -> Option<Container> {
        let idx = self.windows.iter().position(|w| w.id() == id)?;
        Some(self.windows.remove(idx))
    }

    pub fn clear(&mut self) -> Vec<Container> {
        std::mem::take(&mut self.windows)
    }

    /// Windows back to front. Equal depths keep mount order.
    pub fn stacking_order(&self) -> Vec<&Container> {
        let mut order: Vec<&Container> = self.windows.iter().collect();
        order.sort_by_key(|w| w.depth());
        order
    }

    pub fn topmost(&self) -> Option<&Container> {
        self.stacking_order().last().copied()
    }

    /// The frontmost window under `point`.
    pub fn window_at(&self, point: Point) -> Option<&Container> {
        self.stacking_order()
            .into_iter()
            .rev()
            .find(|w| w.rect().contains(point))
    }

    /// Whether a drop at `point` has a receiving surface: the canvas itself,
    /// or a window that accepts drops.
    pub fn accepts_drop_at(&self, point: Point) -> bool {
        if let Some(window) = self.window_at(point) {
            return window.accepts_drops() || self.surface.accepts_drops();
        }
        self.surface.accepts_drops() && self.surface.bounds().contains(point)
    }
}
