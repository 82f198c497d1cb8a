use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use super::{App, Runtime};

/// One screen of the application, managed by a [`ScreenStack`].
///
/// The top of the stack is the active screen: it receives events and ticks
/// and is the only one drawn.
///
/// ```text
/// on_active ──> (foreground) ──> on_inactive ──> (background)
///     ^                                               │
///     └──────────────── screen above pops ────────────┘
///
/// Pop / Exit: on_inactive, then on_close
/// ```
///
/// A screen owns the runtime settings it needs (tick interval, render mode)
/// and should apply them in [`on_active`](Self::on_active), since the screen
/// it returns from may have changed them.
pub trait Screen: fmt::Debug {
    /// Called when this screen reaches the top of the stack, either at
    /// startup, after being pushed, or when the screen above it pops.
    fn on_active(&mut self, runtime: &mut Runtime);

    /// Called when this screen leaves the top of the stack.
    fn on_inactive(&mut self, runtime: &mut Runtime);

    /// Called after [`on_inactive`](Self::on_inactive) when this screen is
    /// removed for good (Pop, Exit) but not when it is covered by a Push.
    fn on_close(&mut self, runtime: &mut Runtime);

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    /// Called on each tick while this screen is active.
    fn update(&mut self, runtime: &mut Runtime);

    fn draw(&self, frame: &mut Frame);
}

/// What the stack does after the active screen handled an event.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Cover the active screen with a new one.
    Push(Box<dyn Screen>),
    /// Close the active screen and reactivate the one below.
    Pop,
    /// Close every screen and leave the event loop.
    Exit,
}

/// Stack of screens driven as a single [`App`].
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    should_exit: bool,
}

impl ScreenStack {
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn close_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                if let Some(previous) = self.screens.last_mut() {
                    previous.on_active(runtime);
                }
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(runtime, &event);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if let Some(current) = self.screens.last_mut() {
            current.update(runtime);
        }
    }
}
