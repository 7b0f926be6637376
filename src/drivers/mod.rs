pub mod console;
pub mod keyboard;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

use crate::ui::UiFrame;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Dummy;
    impl InputDriver for Dummy {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(true)
        }

        fn read(&mut self) -> io::Result<Event> {
            Ok(Event::Key(KeyEvent::new(
                KeyCode::Char('x'),
                KeyModifiers::NONE,
            )))
        }
    }

    fn first_key<D: InputDriver>(mut driver: D) -> KeyCode {
        assert!(driver.poll(Duration::from_millis(0)).unwrap());
        assert!(driver.set_mouse_capture(true).is_ok());
        match driver.read().unwrap() {
            Event::Key(k) => k.code,
            other => panic!("expected key, got {other:?}"),
        }
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut d = Dummy;
        assert_eq!(first_key(&mut d), KeyCode::Char('x'));
    }
}
