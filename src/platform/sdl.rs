//! SDL2 frontend loop
//!
//! Owns the SDL context, window, renderer and first game controller. Each
//! frame: poll and translate events, advance the game by the clamped frame
//! delta, draw.

use std::time::Instant;

use sdl2::GameControllerSubsystem;
use sdl2::controller::{Axis, Button as SdlButton, GameController};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Mod};
use sdl2::video::FullscreenType;

use super::{FpsCounter, WindowCommand, WindowState};
use crate::app::Game;
use crate::consts::MAX_FRAME_MS;
use crate::error::{Error, Result};
use crate::renderer::{CanvasRenderer, fps_overlay};
use crate::settings::Settings;
use crate::sim::{Button, InputEvent, Key};

fn map_key(keycode: Option<Keycode>) -> Key {
    match keycode {
        Some(Keycode::Up) => Key::Up,
        Some(Keycode::Down) => Key::Down,
        Some(Keycode::Left) => Key::Left,
        Some(Keycode::Right) => Key::Right,
        Some(Keycode::Space) => Key::Space,
        Some(Keycode::Return) => Key::Return,
        Some(Keycode::Escape) => Key::Escape,
        Some(Keycode::F) => Key::F,
        Some(Keycode::P) => Key::P,
        _ => Key::Other,
    }
}

fn map_button(button: SdlButton) -> Button {
    match button {
        SdlButton::A => Button::A,
        SdlButton::B => Button::B,
        SdlButton::Start => Button::Start,
        _ => Button::Other,
    }
}

fn map_axis(axis: Axis) -> u8 {
    match axis {
        Axis::LeftX => 0,
        Axis::LeftY => 1,
        Axis::RightX => 2,
        Axis::RightY => 3,
        Axis::TriggerLeft => 4,
        Axis::TriggerRight => 5,
    }
}

/// SDL event to backend-neutral input; `None` for events no game uses
pub fn translate(event: &Event) -> Option<InputEvent> {
    let input = match *event {
        Event::Quit { .. } => InputEvent::Quit,
        Event::KeyDown {
            keycode,
            keymod,
            repeat,
            ..
        } => InputEvent::KeyDown {
            key: map_key(keycode),
            repeat,
            alt: keymod.intersects(Mod::LALTMOD | Mod::RALTMOD),
        },
        Event::KeyUp {
            keycode, repeat, ..
        } => InputEvent::KeyUp {
            key: map_key(keycode),
            repeat,
        },
        Event::ControllerAxisMotion {
            which, axis, value, ..
        } => InputEvent::ControllerAxis {
            which,
            axis: map_axis(axis),
            value,
        },
        Event::JoyAxisMotion {
            which,
            axis_idx,
            value,
            ..
        } => InputEvent::JoyAxis {
            which,
            axis: axis_idx,
            value,
        },
        Event::ControllerButtonDown { which, button, .. } => InputEvent::ControllerButton {
            which,
            button: map_button(button),
        },
        Event::Window {
            win_event: WindowEvent::SizeChanged(width, height),
            ..
        } => InputEvent::WindowResized { width, height },
        _ => return None,
    };
    Some(input)
}

/// Escape, window close or controller B
fn is_exit(event: &InputEvent) -> bool {
    matches!(event, InputEvent::Quit) || event.is_press(Key::Escape) || event.is_button(Button::B)
}

/// First attached game controller, if any
fn open_controller(subsystem: &GameControllerSubsystem) -> Option<GameController> {
    let count = match subsystem.num_joysticks() {
        Ok(n) => n,
        Err(e) => {
            log::warn!("Unable to enumerate joysticks: {}", e);
            return None;
        }
    };
    let controller = (0..count)
        .filter(|&i| subsystem.is_game_controller(i))
        .find_map(|i| match subsystem.open(i) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("Could not open game controller {}: {}", i, e);
                None
            }
        });
    match &controller {
        Some(c) => log::info!("Using game controller: {}", c.name()),
        None => log::warn!("No game controller found"),
    }
    controller
}

/// Run `game` in a window until the player quits, or for `max_frames`
pub fn run(game: &mut dyn Game, settings: &Settings, max_frames: Option<u64>) -> Result<()> {
    let sdl = sdl2::init().map_err(Error::sdl)?;
    let video = sdl.video().map_err(Error::sdl)?;
    let controllers = sdl.game_controller().map_err(Error::sdl)?;
    let ttf = sdl2::ttf::init().map_err(|e| Error::sdl(e.to_string()))?;

    let mut builder = video.window(
        game.title(),
        settings.window_width.max(1) as u32,
        settings.window_height.max(1) as u32,
    );
    builder.position_centered().resizable();
    if settings.fullscreen {
        builder.fullscreen_desktop();
    }
    let window = builder.build().map_err(|e| Error::sdl(e.to_string()))?;
    let canvas = window
        .into_canvas()
        .accelerated()
        .present_vsync()
        .build()
        .map_err(|e| Error::sdl(e.to_string()))?;
    let mut renderer = CanvasRenderer::new(canvas, &ttf, &settings.font_path, settings.font_size)?;

    let _controller = open_controller(&controllers);
    let mut events = sdl.event_pump().map_err(Error::sdl)?;

    let mut window_state = WindowState::new(
        settings.window_width,
        settings.window_height,
        settings.fullscreen,
        settings.show_fps,
    );
    if settings.fullscreen {
        let (w, h) = renderer.canvas_mut().window().size();
        window_state.set_size(w as i32, h as i32);
        game.resize(window_state.extent());
    }

    let clock = Instant::now();
    let mut last = 0u64;
    let mut fps = FpsCounter::new(0);
    let mut frames = 0u64;
    log::info!("{} running", game.title());

    'running: loop {
        for event in events.poll_iter() {
            let Some(input) = translate(&event) else {
                continue;
            };
            if is_exit(&input) {
                break 'running;
            }

            if let WindowCommand::SetFullscreen(on) = window_state.handle_event(&input) {
                let mode = if on {
                    FullscreenType::Desktop
                } else {
                    FullscreenType::Off
                };
                let window = renderer.canvas_mut().window_mut();
                window.set_fullscreen(mode).map_err(Error::sdl)?;
                let (w, h) = window.size();
                window_state.set_size(w as i32, h as i32);
            }
            if window_state.new_size {
                game.resize(window_state.extent());
            }
            game.handle_event(&input);
        }

        let now = clock.elapsed().as_millis() as u64;
        let dt = (now - last).min(u64::from(MAX_FRAME_MS)) as u32;
        last = now;
        game.update(dt);

        fps.frame(now);
        let mut list = game.scene();
        if window_state.show_fps {
            fps_overlay(&mut list, window_state.extent(), fps.text());
        }
        renderer.present(&list)?;

        frames += 1;
        if max_frames.is_some_and(|max| frames >= max) {
            break;
        }
    }

    log::info!("{} stopped after {} frames", game.title(), frames);
    Ok(())
}
