//! Per-draw state handed to components.

#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentContext {
    focused: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self { focused }
    }

    /// The component's window is frontmost.
    pub const fn focused(&self) -> bool {
        self.focused
    }
}
