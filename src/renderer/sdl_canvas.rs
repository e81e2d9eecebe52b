//! SDL2 canvas backend
//!
//! Executes a `DrawList` with the accelerated 2D renderer. Text is rendered
//! at the font's point size and scaled to the requested height.

use std::path::Path;

use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{TextureCreator, WindowCanvas};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::WindowContext;

use super::{DrawCmd, DrawList};
use crate::error::{Error, Result};
use crate::sim::{Color, Rect};

fn sdl_color(c: Color) -> SdlColor {
    SdlColor::RGBA(c.r, c.g, c.b, c.a)
}

fn sdl_rect(r: Rect) -> SdlRect {
    SdlRect::new(r.x, r.y, r.w.max(0) as u32, r.h.max(0) as u32)
}

pub struct CanvasRenderer<'ttf> {
    canvas: WindowCanvas,
    texture_creator: TextureCreator<WindowContext>,
    font: Font<'ttf, 'static>,
}

impl<'ttf> CanvasRenderer<'ttf> {
    pub fn new(
        canvas: WindowCanvas,
        ttf: &'ttf Sdl2TtfContext,
        font_path: &Path,
        font_size: u16,
    ) -> Result<Self> {
        let font = ttf
            .load_font(font_path, font_size)
            .map_err(|message| Error::MissingFont {
                path: font_path.to_path_buf(),
                message,
            })?;
        let texture_creator = canvas.texture_creator();
        Ok(Self {
            canvas,
            texture_creator,
            font,
        })
    }

    pub fn canvas_mut(&mut self) -> &mut WindowCanvas {
        &mut self.canvas
    }

    /// Clear, draw every command in order, present
    pub fn present(&mut self, list: &DrawList) -> Result<()> {
        self.canvas.set_draw_color(sdl_color(list.clear));
        self.canvas.clear();

        for cmd in &list.cmds {
            match cmd {
                DrawCmd::Fill { rect, color } => {
                    self.canvas.set_draw_color(sdl_color(*color));
                    self.canvas.fill_rect(sdl_rect(*rect)).map_err(Error::sdl)?;
                }
                DrawCmd::Text {
                    text,
                    x,
                    y,
                    height,
                    color,
                } => self.draw_text(text, *x, *y, *height, *color)?,
            }
        }

        self.canvas.present();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, height: i32, color: Color) -> Result<()> {
        if text.is_empty() || height <= 0 {
            return Ok(());
        }
        let surface = self
            .font
            .render(text)
            .blended(sdl_color(color))
            .map_err(|e| Error::sdl(e.to_string()))?;
        let texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .map_err(|e| Error::sdl(e.to_string()))?;

        let scale = f64::from(height) / f64::from(surface.height().max(1));
        let width = (f64::from(surface.width()) * scale).round() as u32;
        let dst = SdlRect::new(x, y, width, height as u32);
        self.canvas.copy(&texture, None, Some(dst)).map_err(Error::sdl)
    }
}
