//! Platform layer
//!
//! - `window`: window size, fullscreen and FPS toggles
//! - `fps`: frame-rate counter
//! - `sdl`: the SDL2 frontend loop (feature `sdl`)

pub mod fps;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod window;

pub use fps::FpsCounter;
pub use window::{WindowCommand, WindowState};
