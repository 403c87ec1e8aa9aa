//! Colours of the editor.
//!
//! Point and link colours derive from one base colour per progress state,
//! with a normal, hovered and selected variant each.

use super::Color;
use crate::types::ProgressState;

/// Which look an object gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Normal,
    Hovered,
    Selected,
}

impl Variant {
    pub fn new(hovered: bool, selected: bool) -> Self {
        match (hovered, selected) {
            (_, true) => Self::Selected,
            (true, false) => Self::Hovered,
            (false, false) => Self::Normal,
        }
    }
}

pub struct Palette;

impl Palette {
    pub const TEXT: Color = Color::rgb(255, 255, 255);
    pub const BACKGROUND: Color = Color::rgb(40, 40, 43);
    pub const NEUTRAL: Color = Color::rgb(80, 80, 85);
    pub const ERROR: Color = Color::rgb(255, 0, 0);

    /// Base colour of each state: red todo, olive doing, green completed
    pub fn state_base(state: ProgressState) -> Color {
        match state {
            ProgressState::Todo => Color::rgb(255, 0, 0),
            ProgressState::Doing => Color::rgb(127, 127, 0),
            ProgressState::Completed => Color::rgb(0, 255, 0),
        }
    }

    /// Scale every channel by `factor`, add `offset`, clamp to 255
    pub fn mult(color: Color, factor: f64, offset: f64) -> Color {
        let channel = |c: u8| (f64::from(c) * factor + offset).clamp(0.0, 255.0) as u8;
        Color {
            r: channel(color.r),
            g: channel(color.g),
            b: channel(color.b),
            a: color.a,
        }
    }

    pub fn link(state: ProgressState, variant: Variant) -> Color {
        let base = Self::state_base(state);
        match variant {
            Variant::Normal => base,
            Variant::Hovered => Self::mult(base, 0.6, 127.0),
            Variant::Selected => Self::mult(base, 0.3, 192.0),
        }
    }

    /// Outline of a point box
    pub fn box_outer(state: ProgressState, variant: Variant) -> Color {
        Self::mult(Self::state_base(state), 0.4, Self::offset(variant, [50.0, 60.0, 80.0]))
    }

    /// Thin line between a box's outline and its inside
    pub fn box_separator(state: ProgressState, variant: Variant) -> Color {
        Self::mult(Self::state_base(state), 0.2, Self::offset(variant, [0.0, 20.0, 40.0]))
    }

    pub fn box_inner(state: ProgressState, variant: Variant) -> Color {
        Self::mult(Self::state_base(state), 0.3, Self::offset(variant, [100.0, 120.0, 150.0]))
    }

    fn offset(variant: Variant, offsets: [f64; 3]) -> f64 {
        match variant {
            Variant::Normal => offsets[0],
            Variant::Hovered => offsets[1],
            Variant::Selected => offsets[2],
        }
    }
}
