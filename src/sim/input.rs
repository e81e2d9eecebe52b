//! Input events, independent of the windowing backend
//!
//! The SDL frontend translates its events into `InputEvent`; tests and the
//! headless runner build them directly.

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Return,
    Escape,
    F,
    P,
    Other,
}

/// Controller buttons the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    Start,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: Key, repeat: bool, alt: bool },
    KeyUp { key: Key, repeat: bool },
    /// Game-controller stick motion
    ControllerAxis { which: u32, axis: u8, value: i16 },
    /// Raw joystick stick motion
    JoyAxis { which: u32, axis: u8, value: i16 },
    ControllerButton { which: u32, button: Button },
    WindowResized { width: i32, height: i32 },
    Quit,
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        Self::KeyDown {
            key,
            repeat: false,
            alt: false,
        }
    }

    pub fn key_up(key: Key) -> Self {
        Self::KeyUp { key, repeat: false }
    }

    /// First (non-repeat) press of `key`
    pub fn is_press(&self, key: Key) -> bool {
        matches!(*self, Self::KeyDown { key: k, repeat: false, .. } if k == key)
    }

    /// Button press on the first controller
    pub fn is_button(&self, button: Button) -> bool {
        matches!(*self, Self::ControllerButton { which: 0, button: b } if b == button)
    }
}

/// Digital direction from keys or a stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlDir {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

/// Stick axis 0 is horizontal, axis 1 vertical. Values inside the dead zone
/// are `None`.
pub fn axis_direction(axis: u8, value: i16, dead_zone: i16) -> ControlDir {
    let dead_zone = i32::from(dead_zone);
    let value = i32::from(value);
    match axis {
        0 if value < -dead_zone => ControlDir::Left,
        0 if value > dead_zone => ControlDir::Right,
        1 if value < -dead_zone => ControlDir::Up,
        1 if value > dead_zone => ControlDir::Down,
        _ => ControlDir::None,
    }
}

/// Arrow keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Track presses and releases; other events are ignored
    pub fn update(&mut self, event: &InputEvent) {
        let (key, pressed) = match *event {
            InputEvent::KeyDown { key, .. } => (key, true),
            InputEvent::KeyUp { key, .. } => (key, false),
            _ => return,
        };
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            _ => {}
        }
    }

    /// -1, 0 or 1 along x
    pub fn horizontal(&self) -> i8 {
        i8::from(self.right) - i8::from(self.left)
    }

    /// -1, 0 or 1 along y (down is positive)
    pub fn vertical(&self) -> i8 {
        i8::from(self.down) - i8::from(self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_direction_dead_zone() {
        assert_eq!(axis_direction(0, -5000, 6000), ControlDir::None);
        assert_eq!(axis_direction(0, -6001, 6000), ControlDir::Left);
        assert_eq!(axis_direction(0, 32767, 6000), ControlDir::Right);
        assert_eq!(axis_direction(1, -32768, 6000), ControlDir::Up);
        assert_eq!(axis_direction(1, 7000, 6000), ControlDir::Down);
        assert_eq!(axis_direction(3, 32767, 6000), ControlDir::None);
    }

    #[test]
    fn test_held_keys() {
        let mut held = HeldKeys::default();
        held.update(&InputEvent::key_down(Key::Left));
        assert_eq!(held.horizontal(), -1);
        held.update(&InputEvent::key_down(Key::Right));
        assert_eq!(held.horizontal(), 0);
        held.update(&InputEvent::key_up(Key::Left));
        assert_eq!(held.horizontal(), 1);
        held.update(&InputEvent::Quit);
        assert!(held.right);

        held.update(&InputEvent::key_down(Key::Up));
        assert_eq!(held.vertical(), -1);
        held.update(&InputEvent::key_down(Key::Down));
        assert_eq!(held.vertical(), 0);
        held.update(&InputEvent::key_up(Key::Up));
        assert_eq!(held.vertical(), 1);
    }

    #[test]
    fn test_is_press_ignores_repeat() {
        let repeat = InputEvent::KeyDown {
            key: Key::Space,
            repeat: true,
            alt: false,
        };
        assert!(!repeat.is_press(Key::Space));
        assert!(InputEvent::key_down(Key::Space).is_press(Key::Space));
    }
}
