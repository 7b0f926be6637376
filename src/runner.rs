use std::collections::BTreeMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{
    Component, ComponentContext, LauncherAction, LauncherBar, MemoryBoard, NoticeOverlay,
};
use crate::config::DeskConfig;
use crate::constants::{CAPACITY_NOTICE, MEMORY_WINDOW_SIZE_PX};
use crate::desktop::{Desktop, Point, Position, Size, SlotId, WindowKind};
use crate::drivers::{InputDriver, OutputDriver};
use crate::error::{DeskError, DeskResult};
use crate::event_loop::{ControlFlow, EventLoop, LoopEvent};
use crate::memory::MemoryGame;
use crate::ui::UiFrame;
use crate::window::{
    ChromePart, FloatRect, OpenStepDecorator, WindowDecorator, body_rect, chrome_hit,
};

pub const MEMORY_TITLE: &str = "Memory Game";

/// How often the loop wakes to fire game timers and redraw.
pub const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// The desktop host: launcher bar, canvas of windows, and the notice box.
pub struct DeskApp {
    config: DeskConfig,
    desktop: Desktop,
    boards: BTreeMap<SlotId, MemoryBoard>,
    launcher: LauncherBar,
    notice: NoticeOverlay,
    decorator: OpenStepDecorator,
    canvas_area: Rect,
    /// Transfer text of the drag in flight, and the last pointer seen.
    drag: Option<(String, Point)>,
    deals: u64,
}

impl DeskApp {
    pub fn new(config: DeskConfig) -> Self {
        Self {
            config,
            desktop: Desktop::default(),
            boards: BTreeMap::new(),
            launcher: LauncherBar::new(),
            notice: NoticeOverlay::new(),
            decorator: OpenStepDecorator,
            canvas_area: Rect::default(),
            drag: None,
            deals: 0,
        }
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn board(&self, id: &SlotId) -> Option<&MemoryBoard> {
        self.boards.get(id)
    }

    pub fn notice(&self) -> &NoticeOverlay {
        &self.notice
    }

    pub fn launcher(&self) -> &LauncherBar {
        &self.launcher
    }

    /// Cells the canvas occupied on the last render.
    pub fn canvas_area(&self) -> Rect {
        self.canvas_area
    }

    /// Screen cells of window `id` as last laid out.
    pub fn window_rect(&self, id: &SlotId) -> Option<FloatRect> {
        let window = self.desktop.canvas().get(id)?;
        Some(
            self.config
                .scale
                .window_rect(self.canvas_area, window.position(), window.size()),
        )
    }

    fn next_game(&mut self) -> MemoryGame {
        let game = match self.config.seed {
            Some(seed) => MemoryGame::seeded(
                self.config.board,
                self.config.rules,
                seed.wrapping_add(self.deals),
            ),
            None => MemoryGame::new(self.config.board, self.config.rules),
        };
        self.deals += 1;
        game
    }

    /// Open a memory game window. When the desktop is full the capacity
    /// notice is shown and nothing opens.
    pub fn open_memory_game(&mut self) -> DeskResult<SlotId> {
        let (width, height) = MEMORY_WINDOW_SIZE_PX;
        let opened = self.desktop.open_window(
            &WindowKind::memory_game(),
            Size::new(width, height),
            MEMORY_TITLE,
        );
        match opened {
            Ok(id) => {
                let game = self.next_game();
                self.boards.insert(id.clone(), MemoryBoard::new(game));
                tracing::info!(window = %id, board = %self.config.board, "opened memory game");
                Ok(id)
            }
            Err(err) => {
                if let DeskError::CapacityExceeded { .. } = err {
                    self.notice.show(CAPACITY_NOTICE);
                }
                tracing::warn!(%err, "window refused");
                Err(err)
            }
        }
    }

    pub fn close_window(&mut self, id: &SlotId) -> DeskResult<()> {
        self.desktop.close_window(id)?;
        self.boards.remove(id);
        if self.desktop.drag().active().is_none() {
            self.drag = None;
        }
        tracing::info!(window = %id, "closed window");
        Ok(())
    }

    pub fn close_all(&mut self) {
        let closed = self.desktop.close_all();
        self.boards.clear();
        self.drag = None;
        tracing::info!(count = closed.len(), "closed all windows");
    }

    /// Fire due game timers.
    pub fn tick(&mut self, now: Instant) {
        for (id, board) in self.boards.iter_mut() {
            let effects = board.tick(now);
            if !effects.is_empty() {
                tracing::trace!(window = %id, ?effects, "timers fired");
            }
        }
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> ControlFlow {
        if self.notice.visible() {
            self.notice.handle_event(event, &ComponentContext::default());
            return ControlFlow::Continue;
        }
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => return self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
        ControlFlow::Continue
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ControlFlow::Quit;
            }
            KeyCode::Char('m') => {
                let _ = self.open_memory_game();
            }
            KeyCode::Char('c') => self.close_all(),
            KeyCode::Esc => {
                self.desktop.cancel_drag();
                self.drag = None;
            }
            _ => {}
        }
        ControlFlow::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        let pointer = self.config.scale.point_at(self.canvas_area, column, row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // A release we never saw (e.g. outside the terminal) leaves
                // the old drag in flight.
                if self.drag.take().is_some() {
                    self.desktop.cancel_drag();
                }
                if let Some(action) = self.launcher.action_at(column, row) {
                    self.run_launcher(action);
                    return;
                }
                let Some((id, rect)) = self.window_at_cell(column, row) else {
                    return;
                };
                match chrome_hit(rect, i32::from(column), i32::from(row)) {
                    Some(ChromePart::Close) => {
                        let _ = self.close_window(&id);
                    }
                    Some(ChromePart::TitleBar) => {
                        if let Some(payload) = self.desktop.begin_drag(&id, pointer) {
                            self.drag = Some((payload.to_string(), pointer));
                        }
                    }
                    Some(ChromePart::Body) => {
                        self.desktop.bring_to_front(&id);
                        self.click_board(&id, rect, column, row, now);
                    }
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((_, last)) = self.drag.as_mut() {
                    *last = pointer;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some((data, _)) = self.drag.take() else {
                    return;
                };
                match self.desktop.drop_transfer(&data, pointer) {
                    Ok(Some(placed)) => {
                        tracing::debug!(top = placed.top, left = placed.left, "window dropped");
                    }
                    Ok(None) => tracing::debug!("drop outside the canvas, drag cancelled"),
                    Err(err) => {
                        tracing::warn!(%err, "rejected drop");
                        self.desktop.cancel_drag();
                    }
                }
            }
            _ => {}
        }
    }

    fn run_launcher(&mut self, action: LauncherAction) {
        match action {
            LauncherAction::OpenMemoryGame => {
                let _ = self.open_memory_game();
            }
            LauncherAction::CloseAll => self.close_all(),
        }
    }

    /// Frontmost window covering a screen cell of the canvas.
    fn window_at_cell(&self, column: u16, row: u16) -> Option<(SlotId, FloatRect)> {
        if !crate::layout::rect_contains(self.canvas_area, column, row) {
            return None;
        }
        self.desktop
            .canvas()
            .stacking_order()
            .into_iter()
            .rev()
            .map(|w| {
                let rect = self
                    .config
                    .scale
                    .window_rect(self.canvas_area, w.position(), w.size());
                (w.id(), rect)
            })
            .find(|(_, rect)| rect.contains(i32::from(column), i32::from(row)))
            .map(|(id, rect)| (id.clone(), rect))
    }

    fn click_board(&mut self, id: &SlotId, rect: FloatRect, column: u16, row: u16, now: Instant) {
        let body = body_rect(rect);
        let local_x = i32::from(column) - body.x;
        let local_y = i32::from(row) - body.y;
        if local_x < 0
            || local_y < 0
            || local_x >= i32::from(body.width)
            || local_y >= i32::from(body.height)
        {
            return;
        }
        if let Some(board) = self.boards.get_mut(id)
            && let Some(action) = board.click(local_x as u16, local_y as u16, now)
        {
            tracing::debug!(window = %id, ?action, "board click");
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        let launcher_area = Rect {
            height: area.height.min(1),
            ..area
        };
        let canvas_area = Rect {
            y: area.y + launcher_area.height,
            height: area.height - launcher_area.height,
            ..area
        };
        self.canvas_area = canvas_area;
        let scale = self.config.scale;
        self.desktop.set_bounds(scale.canvas_bounds(canvas_area));

        self.launcher.set_status(format!(
            "{}/{} windows",
            self.desktop.state().live_windows(),
            self.desktop.cap()
        ));
        self.launcher
            .render(frame, launcher_area, &ComponentContext::default());

        let canvas_fill = canvas_area.intersection(frame.area());
        frame
            .buffer_mut()
            .set_style(canvas_fill, Style::default().bg(crate::theme::canvas_bg()));

        let topmost = self.desktop.canvas().topmost().map(|w| w.id().clone());
        for window in self.desktop.canvas().stacking_order() {
            let rect = scale.window_rect(canvas_area, window.position(), window.size());
            let focused = topmost.as_ref() == Some(window.id());
            self.decorator
                .render_window(frame, rect, canvas_area, window.title(), focused);

            let body = body_rect(rect);
            if let Some(board) = self.boards.get_mut(window.id())
                && body.width > 0
                && body.height > 0
            {
                let local = Rect::new(0, 0, body.width, body.height);
                let mut offscreen = Buffer::empty(local);
                let mut sub = UiFrame::from_parts(local, &mut offscreen);
                board.render(&mut sub, local, &ComponentContext::new(focused));
                frame.blit_from_signed(&offscreen, body);
            }
            if window.opacity() < 1.0 {
                frame.patch_style_signed(rect, Style::default().add_modifier(Modifier::DIM));
            }
        }

        if let Some(ghost) = self.drag_ghost() {
            render_ghost(frame, ghost, canvas_area);
        }

        self.notice.render(frame, area, &ComponentContext::default());
    }

    /// Where the dragged window would land if dropped now.
    fn drag_ghost(&self) -> Option<FloatRect> {
        let (_, pointer) = self.drag.as_ref()?;
        let payload = self.desktop.drag().active()?;
        let window = self.desktop.canvas().get(&payload.id)?;
        let position = Position::new(pointer.y + payload.top, pointer.x + payload.left);
        Some(
            self.config
                .scale
                .window_rect(self.canvas_area, position, window.size()),
        )
    }
}

fn render_ghost(frame: &mut UiFrame<'_>, rect: FloatRect, bounds: Rect) {
    let style = Style::default().fg(crate::theme::decorator_border());
    let bounds = bounds.intersection(frame.area());
    let buffer = frame.buffer_mut();
    let mut put = |x: i32, y: i32, symbol: &str| {
        if x >= bounds.x as i32
            && y >= bounds.y as i32
            && x < bounds.x as i32 + bounds.width as i32
            && y < bounds.y as i32 + bounds.height as i32
            && let Some(cell) = buffer.cell_mut((x as u16, y as u16))
        {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    };
    for x in rect.x..rect.right() {
        put(x, rect.y, "┄");
        put(x, rect.bottom() - 1, "┄");
    }
    for y in rect.y..rect.bottom() {
        put(rect.x, y, "┆");
        put(rect.right() - 1, y, "┆");
    }
}

/// Drive `app` until the user quits. The terminal is restored on the way
/// out even when the loop fails.
pub fn run<D, O>(app: &mut DeskApp, input: &mut D, output: &mut O) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    input.set_mouse_capture(true)?;
    tracing::info!("desktop started");

    let mut event_loop = EventLoop::new(&mut *input, POLL_INTERVAL);
    let result = event_loop.run(|_, event| match event {
        LoopEvent::Tick(now) => {
            app.tick(now);
            output.draw(|mut frame| app.render(&mut frame))?;
            Ok(ControlFlow::Continue)
        }
        LoopEvent::Input(evt) => Ok(app.handle_event(&evt, Instant::now())),
    });

    let released = input.set_mouse_capture(false);
    let exited = output.exit();
    tracing::info!(ok = result.is_ok(), "desktop stopped");
    result.and(released).and(exited)
}
