use crate::constants::{
    CASCADE_LEFT_CEILING_PX, CASCADE_STEP_PX, CASCADE_TOP_CEILING_PX, DEPTH_BASE, DEPTH_CEILING,
};

/// Offsets applied to successive windows so they don't open exactly on top
/// of each other.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOffset {
    top: i32,
    left: i32,
}

impl CascadeOffset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    /// Step both offsets forward for a newly created window.
    pub fn advance(&mut self) {
        self.top += CASCADE_STEP_PX;
        if self.top > CASCADE_TOP_CEILING_PX {
            self.top = 0;
        }
        self.left += CASCADE_STEP_PX;
        if self.left >= CASCADE_LEFT_CEILING_PX {
            self.left = 0;
        }
    }

    /// Step both offsets back after a window closed. Both axes stop at 0.
    pub fn retreat(&mut self) {
        self.top = (self.top - CASCADE_STEP_PX).max(0);
        self.left = (self.left - CASCADE_STEP_PX).max(0);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Monotonic top-of-stack depth, wrapping inside `DEPTH_BASE..=DEPTH_CEILING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthCounter {
    current: u32,
}

impl Default for DepthCounter {
    fn default() -> Self {
        Self {
            current: DEPTH_BASE,
        }
    }
}

impl DepthCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `value`, clamped into the valid depth range.
    pub fn starting_at(value: u32) -> Self {
        Self {
            current: value.clamp(DEPTH_BASE, DEPTH_CEILING),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Hand out the next depth. The raise after `DEPTH_CEILING` yields
    /// `DEPTH_BASE` again.
    pub fn raise(&mut self) -> u32 {
        if self.current >= DEPTH_CEILING {
            self.current = DEPTH_BASE;
        } else {
            self.current += 1;
        }
        self.current
    }
}

/// Process-wide desktop counters.
///
/// One instance is owned by the desktop and borrowed mutably by the slot
/// registry, the lifecycle manager and the drag controller. Only the UI
/// thread touches it.
#[derive(Debug, Default, Clone)]
pub struct DesktopState {
    live_windows: usize,
    cascade: CascadeOffset,
    depth: DepthCounter,
}

impl DesktopState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_windows(&self) -> usize {
        self.live_windows
    }

    pub(crate) fn increment_live(&mut self) {
        self.live_windows += 1;
    }

    pub(crate) fn decrement_live(&mut self) {
        self.live_windows = self.live_windows.saturating_sub(1);
    }

    pub fn cascade(&self) -> CascadeOffset {
        self.cascade
    }

    pub fn cascade_mut(&mut self) -> &mut CascadeOffset {
        &mut self.cascade
    }

    pub fn depth(&self) -> DepthCounter {
        self.depth
    }

    pub fn depth_mut(&mut self) -> &mut DepthCounter {
        &mut self.depth
    }

    /// Zero the live count and both cascade offsets. The depth counter keeps
    /// climbing so windows opened afterwards still stack above older depths.
    pub fn reset(&mut self) {
        self.live_windows = 0;
        self.cascade.reset();
    }
}
