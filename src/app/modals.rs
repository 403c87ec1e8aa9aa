//! Nested modal loops run on top of the application backend.
//!
//! While a modal is open it consumes every input event itself. A quit request
//! closes the modal and is put back in the backend's queue so the main loop
//! sees it on its next frame.

use super::Backend;
use crate::constants::{CURSOR_BLINK_PERIOD_MS, CURSOR_VISIBLE_MS};
use crate::input::InputEvent;
use crate::modal::{Gallery, GalleryAction, Modals, PromptAction, PromptRequest, TextPrompt};
use crate::perf::FrameClock;
use crate::render::{TextSize, draw_gallery, draw_prompt};
use crate::types::{Image, ImageId};
use std::time::Instant;
use tracing::debug;

pub struct BackendModals<'a, B: Backend> {
    backend: &'a mut B,
    viewport: (f64, f64),
    fps: u32,
}

impl<'a, B: Backend> BackendModals<'a, B> {
    pub fn new(backend: &'a mut B, viewport: (f64, f64), fps: u32) -> Self {
        Self {
            backend,
            viewport,
            fps,
        }
    }

    fn finish_frame(&mut self, clock: &mut FrameClock) {
        self.backend.present();
        let wait = clock.end_frame();
        self.backend.wait(wait);
    }
}

impl<B: Backend> Modals for BackendModals<'_, B> {
    fn prompt<T>(&mut self, request: &PromptRequest<'_, T>) -> Option<T> {
        let mut prompt = TextPrompt::new();
        let mut clock = FrameClock::new(self.fps);
        let opened = Instant::now();
        debug!(message = request.message, "Prompt opened");

        loop {
            clock.begin_frame();
            let mut submit = false;
            for event in self.backend.poll_events() {
                match prompt.handle_event(&event) {
                    PromptAction::Continue => {}
                    PromptAction::Submit => submit = true,
                    PromptAction::Cancel => return None,
                    PromptAction::Quit => {
                        self.backend.requeue(InputEvent::Quit);
                        return None;
                    }
                }
            }

            let measured = self.backend.text_width(prompt.text(), TextSize::Normal);
            let error = match request.evaluate(prompt.text(), measured) {
                Ok(value) if submit => return Some(value),
                Ok(_) => None,
                Err(e) => Some(e),
            };

            let cursor_visible =
                opened.elapsed().as_millis() % CURSOR_BLINK_PERIOD_MS < CURSOR_VISIBLE_MS;
            draw_prompt(
                &mut *self.backend,
                self.viewport,
                request.message,
                &prompt,
                error,
                cursor_visible,
            );
            self.finish_frame(&mut clock);
        }
    }

    fn choose_image(&mut self, images: &[&Image]) -> Option<ImageId> {
        let (width, height) = self.viewport;
        let mut gallery = Gallery::new(images, width, height);
        let mut clock = FrameClock::new(self.fps);

        loop {
            clock.begin_frame();
            for event in self.backend.poll_events() {
                match gallery.handle_event(&event) {
                    GalleryAction::Continue => {}
                    GalleryAction::Chosen(id) => return Some(id),
                    GalleryAction::Cancel => return None,
                    GalleryAction::Quit => {
                        self.backend.requeue(InputEvent::Quit);
                        return None;
                    }
                }
            }

            let mouse = self.backend.mouse_position();
            draw_gallery(&mut *self.backend, &gallery, images, mouse);
            self.finish_frame(&mut clock);
        }
    }
}
