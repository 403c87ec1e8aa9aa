//! Scene rendering - links, points and the help bar.
//!
//! ## Performance Notes
//!
//! This runs every frame. Points outside the viewport are culled through the
//! spatial index before any drawing call.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::palette::{Palette, Variant};
use super::text::{shorten, wrap};
use super::{Rect, RenderSurface, TextSize};
use crate::constants::{
    HELP_BAR_HEIGHT, HELP_BAR_HOVER_ALPHA, HELP_BAR_PADDING, POINT_MAX_MARGIN,
    POINT_TEXT_GAP, POINT_TEXT_LINE_HEIGHT, POINT_TEXT_MAX_WIDTH,
};
use crate::editor::Editor;
use crate::hit_testing::visible_points;
use crate::input::Selection;
use crate::profile_scope;
use crate::settings::Command;
use crate::types::{LinkEnds, Point, ScreenPos};

/// Draw the whole editor view: background, links, points, help bar
pub fn draw_scene<S: RenderSurface + ?Sized>(surface: &mut S, editor: &Editor) {
    profile_scope!("draw_scene");

    let camera = editor.camera();
    surface.fill_rect(
        Rect::new(0.0, 0.0, camera.width, camera.height),
        Palette::BACKGROUND,
    );
    draw_links(surface, editor);

    let store = editor.store();
    let interaction = editor.interaction();
    for id in visible_points(store, camera) {
        if let Some(point) = store.point(id) {
            let variant = Variant::new(
                interaction.hovered == Selection::Point(id),
                interaction.selection == Selection::Point(id),
            );
            draw_point(surface, editor, point, variant);
        }
    }

    draw_help_bar(surface, editor);
}

fn draw_links<S: RenderSurface + ?Sized>(surface: &mut S, editor: &Editor) {
    let store = editor.store();
    let camera = editor.camera();
    let interaction = editor.interaction();

    for link in store.links() {
        let Some(p1) = store.point(link.ends.p1()) else {
            continue;
        };
        let to = match link.ends {
            // Under construction: follow the mouse.
            LinkEnds::Pending { .. } => editor.mouse(),
            LinkEnds::Complete { p2, .. } => match store.point(p2) {
                Some(p2) => camera.to_screen(p2.pos),
                None => continue,
            },
        };
        let variant = Variant::new(
            interaction.hovered == Selection::Link(link.id),
            interaction.selection == Selection::Link(link.id),
        );
        surface.draw_line(
            camera.to_screen(p1.pos),
            to,
            link.width(),
            Palette::link(link.state, variant),
        );
    }
}

fn draw_point<S: RenderSurface + ?Sized>(
    surface: &mut S,
    editor: &Editor,
    point: &Point,
    variant: Variant,
) {
    let center = editor.camera().to_screen(point.pos);
    let size = point.size();
    let margin = (size / 10.0).floor().min(POINT_MAX_MARGIN);
    let outer = Rect::centered(center, size);

    surface.fill_rect(outer, Palette::box_outer(point.state, variant));
    surface.fill_rect(
        outer.inset(margin - 1.0),
        Palette::box_separator(point.state, variant),
    );
    surface.fill_rect(outer.inset(margin), Palette::box_inner(point.state, variant));

    if let Some(image) = point.image.and_then(|id| editor.store().image(id)) {
        let (w, h) = image.fit_within(size - 2.0 * margin - 2.0);
        let inner = outer.inset(margin + 1.0);
        surface.draw_image(image, Rect::new(inner.x, inner.y, w, h));
    }

    if let Some(text) = &point.text {
        let top = center.y + size / 2.0 + POINT_TEXT_GAP;
        let measure = |s: &str| surface.text_width(s, TextSize::Small);
        let lines = if variant == Variant::Normal {
            vec![shorten(text, POINT_TEXT_MAX_WIDTH, &measure)]
        } else {
            wrap(text, POINT_TEXT_MAX_WIDTH, &measure)
        };
        draw_text_block(surface, &lines, center.x, top);
    }
}

/// Centred lines of small text on a translucent backdrop
fn draw_text_block<S: RenderSurface + ?Sized>(
    surface: &mut S,
    lines: &[String],
    center_x: f64,
    top: f64,
) {
    let widths: Vec<f64> = lines
        .iter()
        .map(|line| surface.text_width(line, TextSize::Small))
        .collect();
    let width = widths.iter().copied().fold(0.0, f64::max);
    let height = POINT_TEXT_LINE_HEIGHT * lines.len() as f64;

    surface.fill_rect(
        Rect::new(center_x - width / 2.0, top, width, height),
        Palette::BACKGROUND.with_alpha(127),
    );
    for (row, (line, line_width)) in lines.iter().zip(widths).enumerate() {
        let pos = ScreenPos::new(
            center_x - line_width / 2.0,
            top + POINT_TEXT_LINE_HEIGHT * row as f64,
        );
        surface.draw_text(line, pos, TextSize::Small, Palette::TEXT);
    }
}

/// Key hints for the current selection
pub fn help_text(editor: &Editor) -> String {
    let keymap = editor.keymap();
    let key = |command| keymap.key_for(command).to_ascii_uppercase();

    match editor.interaction().selection {
        Selection::None => format!(
            "{}: new point, {}: save file, {}: open file, {}: load image, {}: reset zoom",
            key(Command::NewPoint),
            key(Command::Save),
            key(Command::Open),
            key(Command::Image),
            key(Command::ResetZoom),
        ),
        Selection::Link(_) => "Del: delete link".to_string(),
        Selection::Point(id) => {
            let target = match editor.store().point(id) {
                Some(point) if point.image.is_some() => "image",
                Some(point) if point.text.is_some() => "text",
                _ => "point",
            };
            format!(
                "{}: start link, {}: add image, {}: add text, Del: delete {}, {}: cycle rank, {}: cycle state",
                key(Command::StartLink),
                key(Command::Image),
                key(Command::Text),
                target,
                key(Command::CycleRank),
                key(Command::CycleState),
            )
        }
    }
}

/// Bar at the top of the screen, translucent while the mouse is over it
fn draw_help_bar<S: RenderSurface + ?Sized>(surface: &mut S, editor: &Editor) {
    let hovered = editor.mouse().y < HELP_BAR_HEIGHT;
    let alpha = if hovered { HELP_BAR_HOVER_ALPHA } else { 255 };

    surface.fill_rect(
        Rect::new(0.0, 0.0, editor.camera().width, HELP_BAR_HEIGHT),
        Palette::NEUTRAL.with_alpha(alpha),
    );
    surface.draw_text(
        &help_text(editor),
        ScreenPos::new(HELP_BAR_PADDING, HELP_BAR_PADDING),
        TextSize::Normal,
        Palette::TEXT.with_alpha(alpha),
    );
}
