use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the handler is being woken up for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    /// An input event read from the driver.
    Input(Event),
    /// Start of an iteration: fire due timers and redraw.
    Tick(Instant),
}

/// Message pump for the desktop. The only place that polls or reads the
/// input driver.
///
/// Every iteration begins with a `Tick`, then drains whatever input is
/// queued so a burst of mouse-drag events is handled before the next
/// redraw. The poll interval bounds how late a game timer can fire.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, LoopEvent) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Tick(Instant::now()))? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Input(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
