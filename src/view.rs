//! Render-agnostic draw list
//!
//! Hosts turn a [`DrawList`] into pixels however they like (canvas 2D in the
//! browser build). Draw order is back to front.

use crate::consts::{HEADER_HEIGHT, SCORE_TEXT_X, SCORE_TEXT_Y, STARFIELD_KEY};
use crate::sim::{GameState, Rect, Rgb};

/// Colors for fixed scene elements
pub mod colors {
    use crate::sim::Rgb;

    pub const HEADER: Rgb = Rgb::WHITE;
    pub const SCORE_TEXT: Rgb = Rgb::BLACK;
    /// Fill used when the starfield texture isn't available
    pub const BACKGROUND: Rgb = Rgb(0x05, 0x05, 0x0d);
}

pub const SCORE_FONT_PX: f32 = 20.0;

/// Filled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub bounds: Rect,
    pub color: Rgb,
}

/// Text anchored at its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_px: f32,
    pub color: Rgb,
}

/// Tiled background scrolled horizontally
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiledBackground {
    pub texture: &'static str,
    pub bounds: Rect,
    /// Texture offset; screen x samples texture x + tile_offset_x
    pub tile_offset_x: f32,
}

impl TiledBackground {
    /// Screen x of the left-most tile copy for a texture `tile_width` wide
    pub fn first_tile_x(&self, tile_width: f32) -> f32 {
        -self.tile_offset_x.rem_euclid(tile_width)
    }
}

/// Everything to draw for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub background: TiledBackground,
    /// Header bar, player, then enemies in spawn order
    pub rects: Vec<DrawRect>,
    pub labels: Vec<Label>,
}

/// Build the draw list for the current gameplay state
pub fn draw_list(state: &GameState) -> DrawList {
    let width = state.tuning.screen_width;
    let height = state.tuning.screen_height;

    let mut rects = Vec::with_capacity(state.enemies.len() + 2);
    rects.push(DrawRect {
        bounds: Rect::new(0.0, 0.0, width, HEADER_HEIGHT),
        color: colors::HEADER,
    });
    rects.push(DrawRect {
        bounds: state.player.bounds(),
        color: state.player.color,
    });
    rects.extend(state.enemies.iter().map(|enemy| DrawRect {
        bounds: enemy.bounds(),
        color: enemy.color,
    }));

    DrawList {
        background: TiledBackground {
            texture: STARFIELD_KEY,
            bounds: Rect::new(0.0, 0.0, width, height),
            tile_offset_x: state.background_offset,
        },
        rects,
        labels: vec![Label {
            text: state.score_label(),
            x: SCORE_TEXT_X,
            y: SCORE_TEXT_Y,
            size_px: SCORE_FONT_PX,
            color: colors::SCORE_TEXT,
        }],
    }
}
