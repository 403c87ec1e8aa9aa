//! Modal screens - text prompt and image gallery.

use super::palette::Palette;
use super::{Color, Rect, RenderSurface, TextSize};
use crate::constants::{
    GALLERY_HOVER_PADDING, GALLERY_THUMB_SIZE, PROMPT_LINE_HEIGHT, PROMPT_MIN_INPUT_WIDTH,
};
use crate::modal::{Gallery, PromptError, TextPrompt};
use crate::types::{Image, ScreenPos};

/// Draw the prompt box over whatever is already on the surface
pub fn draw_prompt<S: RenderSurface + ?Sized>(
    surface: &mut S,
    (width, height): (f64, f64),
    message: &str,
    prompt: &TextPrompt,
    error: Option<PromptError>,
    cursor_visible: bool,
) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, width, height),
        Color::rgb(0, 0, 0).with_alpha(127),
    );
    surface.fill_rect(
        Rect::new(width * 0.2, height * 0.2, width * 0.6, height * 0.6),
        Palette::BACKGROUND,
    );

    let message_width = surface.text_width(message, TextSize::Normal);
    surface.draw_text(
        message,
        ScreenPos::new(width / 2.0 - message_width / 2.0, height * 0.3),
        TextSize::Normal,
        Palette::TEXT,
    );

    if let Some(error) = error {
        let text = error.to_string();
        let error_width = surface.text_width(&text, TextSize::Normal);
        surface.draw_text(
            &text,
            ScreenPos::new(width / 2.0 - error_width / 2.0, height * 0.3 + 20.0),
            TextSize::Normal,
            Palette::ERROR,
        );
    }

    let shown = if cursor_visible {
        format!("{}_", prompt.text())
    } else {
        prompt.text().to_string()
    };
    let input_width = surface
        .text_width(&shown, TextSize::Normal)
        .max(PROMPT_MIN_INPUT_WIDTH);
    let x = width / 2.0 - input_width / 2.0;
    let y = height / 2.0 - PROMPT_LINE_HEIGHT / 2.0;
    surface.fill_rect(
        Rect::new(x - 4.0, y - 4.0, input_width + 8.0, PROMPT_LINE_HEIGHT + 8.0),
        Palette::NEUTRAL,
    );
    surface.draw_text(&shown, ScreenPos::new(x, y), TextSize::Normal, Palette::TEXT);
}

/// Draw the gallery grid; `images` must hold every image the gallery lists
pub fn draw_gallery<S: RenderSurface + ?Sized>(
    surface: &mut S,
    gallery: &Gallery,
    images: &[&Image],
    mouse: ScreenPos,
) {
    let (width, height) = gallery.viewport();
    surface.fill_rect(Rect::new(0.0, 0.0, width, height), Palette::BACKGROUND);

    if gallery.can_scroll() {
        let content = gallery.content_height();
        let y = gallery.scroll() * height / (content - 20.0);
        let bar = height * height / content - 20.0;
        surface.fill_rect(Rect::new(width - 15.0, 10.0 + y, 5.0, bar), Palette::TEXT);
    }

    let hovered = gallery.hovered(mouse);
    for (index, thumbnail) in gallery.thumbnails().iter().enumerate() {
        if !gallery.is_cell_visible(index) {
            continue;
        }
        let origin = gallery.cell_origin(index);
        if hovered == Some(index) {
            let side = GALLERY_THUMB_SIZE + 2.0 * GALLERY_HOVER_PADDING;
            surface.fill_rect(
                Rect::new(
                    origin.x - GALLERY_HOVER_PADDING,
                    origin.y - GALLERY_HOVER_PADDING,
                    side,
                    side,
                ),
                Palette::NEUTRAL,
            );
        }
        if let Some(image) = images.iter().find(|image| image.id == thumbnail.image) {
            surface.draw_image(
                image,
                Rect::new(origin.x, origin.y, thumbnail.width, thumbnail.height),
            );
        }
    }
}
