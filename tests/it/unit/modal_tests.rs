//! Modal Loop Tests
//!
//! The prompt and gallery loops running on a headless backend.

use crate::helpers::{HeadlessBackend, typed};
use image::RgbaImage;
use progression_graph::app::{Backend, BackendModals};
use progression_graph::input::{InputEvent, Key, MouseButton};
use progression_graph::modal::{Modals, PromptRequest};
use progression_graph::types::{Image, ImageId, ScreenPos};

const VIEWPORT: (f64, f64) = (900.0, 500.0);

fn parse_int(s: &str) -> Option<i32> {
    s.parse().ok()
}

fn positive(n: &i32) -> bool {
    *n > 0
}

fn key(key: Key) -> Vec<InputEvent> {
    vec![InputEvent::Key(key)]
}

#[test]
fn test_prompt_returns_typed_value() {
    let mut backend = HeadlessBackend::new(vec![typed("42"), key(Key::Return)]);
    let request = PromptRequest::<i32>::new("Number:", &parse_int, &positive);

    let value = BackendModals::new(&mut backend, VIEWPORT, 60).prompt(&request);
    assert_eq!(value, Some(42));
    assert!(backend.drew_text("Number:"));
}

#[test]
fn test_prompt_refuses_invalid_input_until_fixed() {
    let mut backend = HeadlessBackend::new(vec![
        typed("x"),
        key(Key::Return),
        key(Key::Backspace),
        typed("-7"),
        key(Key::Return),
        key(Key::Backspace),
        key(Key::Backspace),
        typed("7"),
        key(Key::Return),
    ]);
    let request = PromptRequest::<i32>::new("Number:", &parse_int, &positive);

    let value = BackendModals::new(&mut backend, VIEWPORT, 60).prompt(&request);
    assert_eq!(value, Some(7));
    assert!(backend.drew_text("Error: can't decode value"));
    assert!(backend.drew_text("Error: invalid value"));
}

#[test]
fn test_prompt_width_limit() {
    let mut backend = HeadlessBackend::new(vec![typed("123456"), key(Key::Return), key(Key::Escape)]);
    // Six characters of the 8 px test font exceed 40 px.
    let request = PromptRequest::<i32>::new("Number:", &parse_int, &positive).with_max_width(40.0);

    let value = BackendModals::new(&mut backend, VIEWPORT, 60).prompt(&request);
    assert_eq!(value, None);
    assert!(backend.drew_text("Error: text too long"));
}

#[test]
fn test_prompt_quit_is_requeued() {
    let mut backend = HeadlessBackend::new(vec![typed("12"), vec![InputEvent::Quit], typed("3")]);
    let request = PromptRequest::<i32>::new("Number:", &parse_int, &positive);

    let value = BackendModals::new(&mut backend, VIEWPORT, 60).prompt(&request);
    assert_eq!(value, None);
    assert_eq!(backend.poll_events().first(), Some(&InputEvent::Quit));
}

#[test]
fn test_gallery_click_chooses_image() {
    let images: Vec<Image> = (0..2)
        .map(|i| Image::new(ImageId(i), format!("img{i}.png"), RgbaImage::new(10, 10)))
        .collect();
    let refs: Vec<&Image> = images.iter().collect();
    let click = InputEvent::MouseDown {
        button: MouseButton::Primary,
        pos: ScreenPos::new(150.0, 70.0),
    };
    let mut backend = HeadlessBackend::new(vec![Vec::new(), vec![click]]);

    let chosen = BackendModals::new(&mut backend, VIEWPORT, 60).choose_image(&refs);
    assert_eq!(chosen, Some(ImageId(1)));
    assert_eq!(backend.images, 2);
}

#[test]
fn test_gallery_escape_chooses_nothing() {
    let mut backend = HeadlessBackend::new(vec![key(Key::Escape)]);
    let chosen = BackendModals::new(&mut backend, VIEWPORT, 60).choose_image(&[]);
    assert_eq!(chosen, None);
}
