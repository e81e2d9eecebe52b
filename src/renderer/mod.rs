//! Rendering module
//!
//! Games describe a frame as a `DrawList` of filled rects and text in screen
//! pixels. The SDL canvas backend (feature `sdl`) executes it; tests inspect
//! it directly.

pub mod scene;
#[cfg(feature = "sdl")]
pub mod sdl_canvas;

pub use scene::{fps_overlay, maze_scene, platformer_scene, pong_scene};
#[cfg(feature = "sdl")]
pub use sdl_canvas::CanvasRenderer;

use crate::sim::{Color, Rect};

/// One drawing primitive, screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill {
        rect: Rect,
        color: Color,
    },
    /// Text with its top-left at (x, y), scaled to `height` pixels
    Text {
        text: String,
        x: i32,
        y: i32,
        height: i32,
        color: Color,
    },
}

/// Everything drawn in one frame, in order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawList {
    pub clear: Color,
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(clear: Color) -> Self {
        Self {
            clear,
            cmds: Vec::new(),
        }
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.cmds.push(DrawCmd::Fill { rect, color });
    }

    pub fn text(&mut self, text: impl Into<String>, x: i32, y: i32, height: i32, color: Color) {
        self.cmds.push(DrawCmd::Text {
            text: text.into(),
            x,
            y,
            height,
            color,
        });
    }

    /// All text strings, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            DrawCmd::Fill { .. } => None,
        })
    }

    /// Number of filled rects
    pub fn fill_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Fill { .. }))
            .count()
    }
}
