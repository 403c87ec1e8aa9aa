//! Input events delivered to the editor once per frame.

use crate::types::ScreenPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character
    Char(char),
    Escape,
    /// Return or keypad Enter
    Return,
    Delete,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown { button: MouseButton, pos: ScreenPos },
    MouseUp { button: MouseButton, pos: ScreenPos },
    /// Positive `delta_y` scrolls up (zoom in)
    Wheel { delta_y: f64 },
    Key(Key),
    /// The user asked to close the application
    Quit,
}

/// Everything the editor needs to advance one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Mouse position at the time of polling
    pub mouse: ScreenPos,
    /// True while the primary button is held
    pub primary_held: bool,
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn new(mouse: ScreenPos, primary_held: bool, events: Vec<InputEvent>) -> Self {
        Self {
            mouse,
            primary_held,
            events,
        }
    }

    /// True if a quit request is among this frame's events
    pub fn quit_requested(&self) -> bool {
        self.events.iter().any(|event| matches!(event, InputEvent::Quit))
    }
}
