//! Window size and display toggles

use crate::sim::{Extent, InputEvent, Key};

/// What the frontend has to do after a window event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    None,
    SetFullscreen(bool),
    ToggleFps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub width: i32,
    pub height: i32,
    pub fullscreen: bool,
    pub show_fps: bool,
    /// Size changed during the last handled event
    pub new_size: bool,
}

impl WindowState {
    pub fn new(width: i32, height: i32, fullscreen: bool, show_fps: bool) -> Self {
        Self {
            width,
            height,
            fullscreen,
            show_fps,
            new_size: false,
        }
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Size reported by the window after a fullscreen switch
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.new_size = true;
    }

    /// Resize events update the size. F toggles fullscreen; Alt+F toggles
    /// the FPS counter instead.
    pub fn handle_event(&mut self, event: &InputEvent) -> WindowCommand {
        self.new_size = false;
        match *event {
            InputEvent::WindowResized { width, height } => {
                self.set_size(width, height);
                WindowCommand::None
            }
            InputEvent::KeyDown {
                key: Key::F,
                repeat: false,
                alt: true,
            } => {
                self.show_fps = !self.show_fps;
                WindowCommand::ToggleFps
            }
            InputEvent::KeyDown {
                key: Key::F,
                repeat: false,
                alt: false,
            } => {
                self.fullscreen = !self.fullscreen;
                self.new_size = true;
                log::debug!("Fullscreen {}", self.fullscreen);
                WindowCommand::SetFullscreen(self.fullscreen)
            }
            _ => WindowCommand::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_sets_new_size() {
        let mut win = WindowState::new(800, 600, false, true);
        let cmd = win.handle_event(&InputEvent::WindowResized {
            width: 1024,
            height: 768,
        });
        assert_eq!(cmd, WindowCommand::None);
        assert!(win.new_size);
        assert_eq!(win.extent(), Extent::new(1024, 768));

        win.handle_event(&InputEvent::key_down(Key::Up));
        assert!(!win.new_size);
    }

    #[test]
    fn test_f_toggles_fullscreen_alt_f_toggles_fps() {
        let mut win = WindowState::new(800, 600, false, true);
        assert_eq!(
            win.handle_event(&InputEvent::key_down(Key::F)),
            WindowCommand::SetFullscreen(true)
        );
        assert!(win.fullscreen);

        let alt_f = InputEvent::KeyDown {
            key: Key::F,
            repeat: false,
            alt: true,
        };
        assert_eq!(win.handle_event(&alt_f), WindowCommand::ToggleFps);
        assert!(!win.show_fps);
        assert!(win.fullscreen);
    }
}
