//! Text prompt - a blocking single-line input with live checking.
//!
//! The caller supplies a parse function (`&str -> Option<T>`) and a predicate
//! on the parsed value. The typed text can only be confirmed while it parses,
//! validates and fits the optional maximum width.

use crate::input::{InputEvent, Key};
use thiserror::Error;

/// What to ask and how to check the answer
pub struct PromptRequest<'a, T> {
    pub message: &'a str,
    pub parse: &'a dyn Fn(&str) -> Option<T>,
    pub validate: &'a dyn Fn(&T) -> bool,
    /// Widest the rendered input may be, in pixels
    pub max_width: Option<f64>,
}

impl<'a, T> PromptRequest<'a, T> {
    pub fn new(
        message: &'a str,
        parse: &'a dyn Fn(&str) -> Option<T>,
        validate: &'a dyn Fn(&T) -> bool,
    ) -> Self {
        Self {
            message,
            parse,
            validate,
            max_width: None,
        }
    }

    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Check `input`, whose rendered width is `measured_width` pixels
    pub fn evaluate(&self, input: &str, measured_width: f64) -> Result<T, PromptError> {
        let value = (self.parse)(input).ok_or(PromptError::Undecodable)?;
        if !(self.validate)(&value) {
            return Err(PromptError::Invalid);
        }
        if self.max_width.is_some_and(|max| measured_width > max) {
            return Err(PromptError::TooLong);
        }
        Ok(value)
    }
}

/// Why the current input cannot be confirmed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptError {
    #[error("Error: can't decode value")]
    Undecodable,
    #[error("Error: text too long")]
    TooLong,
    #[error("Error: invalid value")]
    Invalid,
}

/// Outcome of feeding one event to the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Keep editing
    Continue,
    /// Return/Enter pressed; confirm if the input checks out
    Submit,
    /// Escape pressed
    Cancel,
    /// Application quit requested; must be re-queued by the caller
    Quit,
}

/// Input buffer of a running prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPrompt {
    buffer: String,
}

impl TextPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> PromptAction {
        match *event {
            InputEvent::Quit => PromptAction::Quit,
            InputEvent::Key(Key::Escape) => PromptAction::Cancel,
            InputEvent::Key(Key::Return) => PromptAction::Submit,
            InputEvent::Key(Key::Backspace) => {
                self.buffer.pop();
                PromptAction::Continue
            }
            InputEvent::Key(Key::Char(c)) if !c.is_control() => {
                self.buffer.push(c);
                PromptAction::Continue
            }
            _ => PromptAction::Continue,
        }
    }
}
