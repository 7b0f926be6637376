use crossterm::event::{Event, KeyCode, KeyEventKind};

/// Drops key events the desktop never acts on so each physical press is
/// seen once on every platform.
#[derive(Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(key) => {
                match key.kind {
                    KeyEventKind::Release => {
                        if key.code == KeyCode::Esc {
                            self.esc_down = false;
                        }
                        return None;
                    }
                    KeyEventKind::Repeat if cfg!(windows) => return None,
                    _ => {}
                }
                if cfg!(windows) && key.code == KeyCode::Esc {
                    if self.esc_down {
                        return None;
                    }
                    self.esc_down = true;
                } else {
                    self.esc_down = false;
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}
