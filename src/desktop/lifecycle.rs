use super::DesktopState;
use super::drag::DragController;
use super::geometry::{Position, PxRect, Size};
use super::registry::{SlotId, WindowKind, WindowSlotRegistry};
use crate::error::DeskResult;

/// CSS-style hook stamped on every window container.
pub const WINDOW_CLASS: &str = "window";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Unopened,
    Live,
    Closed,
}

/// The close affordance embedded in a title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseControl {
    id: String,
}

impl CloseControl {
    fn for_window(id: &SlotId) -> Self {
        Self {
            id: format!("xBtn{id}"),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &'static str {
        "X"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleBar {
    title: String,
    close: CloseControl,
}

impl TitleBar {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn close_control(&self) -> &CloseControl {
        &self.close
    }
}

/// A window as produced by `WindowLifecycle::open`, ready to be mounted on
/// the canvas.
#[derive(Debug, Clone)]
pub struct Container {
    id: SlotId,
    size: Size,
    position: Position,
    depth: u32,
    classes: Vec<&'static str>,
    title_bar: Option<TitleBar>,
    draggable: bool,
    drop_target: bool,
    translucent: bool,
    state: WindowState,
}

impl Container {
    fn unopened(id: SlotId) -> Self {
        Self {
            id,
            size: Size::default(),
            position: Position::default(),
            depth: 0,
            classes: Vec::new(),
            title_bar: None,
            draggable: false,
            drop_target: false,
            translucent: false,
            state: WindowState::Unopened,
        }
    }

    pub fn id(&self) -> &SlotId {
        &self.id
    }

    pub fn kind(&self) -> &WindowKind {
        self.id.kind()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn rect(&self) -> PxRect {
        PxRect::from_parts(self.position, self.size)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(&class)
    }

    pub fn title(&self) -> &str {
        self.title_bar.as_ref().map(TitleBar::title).unwrap_or("")
    }

    pub fn title_bar(&self) -> Option<&TitleBar> {
        self.title_bar.as_ref()
    }

    pub fn draggable(&self) -> bool {
        self.draggable
    }

    pub(crate) fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    /// Whether drops may land on this window's own area.
    pub fn accepts_drops(&self) -> bool {
        self.drop_target
    }

    pub(crate) fn set_accepts_drops(&mut self, accepts: bool) {
        self.drop_target = accepts;
    }

    /// 1.0 normally, dimmed while the window is being dragged.
    pub fn opacity(&self) -> f32 {
        if self.translucent { 0.5 } else { 1.0 }
    }

    pub(crate) fn set_translucent(&mut self, translucent: bool) {
        self.translucent = translucent;
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == WindowState::Live
    }
}

/// Composes window containers and tears them down again.
#[derive(Debug, Default)]
pub struct WindowLifecycle {
    registry: WindowSlotRegistry,
}

impl WindowLifecycle {
    pub fn new(registry: WindowSlotRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &WindowSlotRegistry {
        &self.registry
    }

    /// Build a new live window of `kind`.
    ///
    /// `CapacityExceeded` from the registry is returned unchanged and no
    /// container is built.
    pub fn open(
        &mut self,
        state: &mut DesktopState,
        drag: &DragController,
        kind: &WindowKind,
        size: Size,
        title: &str,
    ) -> DeskResult<Container> {
        let slot = self.registry.try_open(state, kind)?;
        let mut container = Container::unopened(slot.id);
        container.size = size;
        container.classes.push(WINDOW_CLASS);
        container.position = slot.position;
        container.title_bar = Some(TitleBar {
            title: title.to_string(),
            close: CloseControl::for_window(&container.id),
        });
        container.depth = state.depth_mut().raise();
        drag.enable_drag(&mut container);
        container.state = WindowState::Live;
        tracing::debug!(
            window = %container.id,
            top = container.position.top,
            left = container.position.left,
            depth = container.depth,
            "opened window"
        );
        Ok(container)
    }

    /// Release the slot held by `container`. Taking the container by value
    /// keeps a window from being closed twice.
    pub fn close(&mut self, state: &mut DesktopState, mut container: Container) -> Container {
        if container.state == WindowState::Live {
            self.registry.close(state, &container.id);
        }
        container.state = WindowState::Closed;
        container.title_bar = None;
        container
    }

    /// Forget every live window at once, as the "close all" control does.
    pub fn reset(&mut self, state: &mut DesktopState) {
        tracing::debug!(live = state.live_windows(), "closing all windows");
        self.registry.reset(state);
    }
}
