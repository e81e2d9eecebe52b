//! Scene builders: game state to draw list

use super::DrawList;
use crate::sim::{Camera, Color, Extent, MazePhase, MazeState, Object, PlatformerState, PongPhase, PongState};

/// HUD text height as a fraction of the window height
const HUD_TEXT: f64 = 0.04;
/// Banner text (game over, paused) height
const BANNER_TEXT: f64 = 0.1;

fn text_height(window: Extent, fraction: f64) -> i32 {
    (f64::from(window.height) * fraction).round() as i32
}

/// Horizontal start so that `chars` characters of height `h` sit centred.
/// Glyphs are taken as half as wide as they are tall.
fn centred_x(window: Extent, chars: usize, h: i32) -> i32 {
    (window.width - chars as i32 * h / 2) / 2
}

fn banner(list: &mut DrawList, window: Extent, text: &str, row: i32) {
    let h = text_height(window, BANNER_TEXT);
    let x = centred_x(window, text.chars().count(), h);
    let y = window.height / 2 + (row - 1) * h;
    list.text(text, x, y, h, Color::AMBER);
}

/// Draw `obj` through `camera`, skipping it when off screen
fn fill_visible(list: &mut DrawList, camera: &Camera, obj: &Object) {
    let rect = obj.rect();
    if camera.visible(&rect) {
        list.fill(camera.to_screen(&rect), obj.color);
    }
}

pub fn pong_scene(state: &PongState) -> DrawList {
    let window = state.world.extent();
    let mut list = DrawList::new(Color::BLACK);

    for spark in &state.sparks {
        list.fill(spark.body.rect(), spark.body.color);
    }
    list.fill(state.paddle.body.rect(), state.paddle.body.color);
    if state.phase == PongPhase::Playing {
        list.fill(state.ball.body.rect(), state.ball.body.color);
    }

    let h = text_height(window, HUD_TEXT);
    let hud = format!("Score: {}   Lives: {}", state.score, state.lives);
    list.text(hud, 10, window.height - h - 10, h, Color::AMBER);

    if state.phase == PongPhase::GameOver {
        banner(&mut list, window, "Game Over", 0);
        let best = if state.new_best {
            format!("New high score: {}", state.score)
        } else {
            format!("High score: {}", state.best)
        };
        banner(&mut list, window, &best, 1);
    } else if state.paused {
        banner(&mut list, window, "Paused", 0);
    }
    list
}

pub fn maze_scene(state: &MazeState) -> DrawList {
    let window = Extent::new(state.camera.rect.w, state.camera.rect.h);
    let mut list = DrawList::new(Color::BLACK);

    for tile in &state.tiles {
        fill_visible(&mut list, &state.camera, tile);
    }
    fill_visible(&mut list, &state.camera, &state.goal);
    fill_visible(&mut list, &state.camera, &state.ball.body);

    let h = text_height(window, HUD_TEXT);
    let seconds = state.elapsed_ms as f64 / 1000.0;
    let hud = format!("Level {}   {:.1} s", state.level + 1, seconds);
    list.text(hud, 10, window.height - h - 10, h, Color::AMBER);

    if state.phase == MazePhase::Finished {
        let secs = state.last_time_ms.unwrap_or(state.elapsed_ms) as f64 / 1000.0;
        banner(&mut list, window, &format!("Done in {:.1} s", secs), 0);
    }
    list
}

pub fn platformer_scene(state: &PlatformerState) -> DrawList {
    let window = Extent::new(state.camera.rect.w, state.camera.rect.h);
    let mut list = DrawList::new(Color::BLACK);

    for platform in &state.platforms {
        fill_visible(&mut list, &state.camera, &platform.body);
    }
    fill_visible(&mut list, &state.camera, &state.exit);
    fill_visible(&mut list, &state.camera, &state.player.body);

    let h = text_height(window, HUD_TEXT);
    list.text(
        format!("Level {}", state.level + 1),
        10,
        window.height - h - 10,
        h,
        Color::AMBER,
    );
    if state.player.exited {
        banner(&mut list, window, "Level complete", 0);
    }
    list
}

/// FPS counter in the top-left corner
pub fn fps_overlay(list: &mut DrawList, window: Extent, text: &str) {
    let h = text_height(window, HUD_TEXT);
    list.text(text, 10, 10, h, Color::AMBER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::renderer::DrawCmd;
    use crate::sim::{maze_levels, platformer_levels};

    const WINDOW: Extent = Extent::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    #[test]
    fn test_pong_scene_hud() {
        let mut state = PongState::new(1, WINDOW, 12);
        state.score = 3;
        let list = pong_scene(&state);
        assert_eq!(list.fill_count(), 2);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Score: 3   Lives: 3"]);

        state.phase = PongPhase::GameOver;
        let list = pong_scene(&state);
        let texts: Vec<_> = list.texts().collect();
        assert!(texts.contains(&"Game Over"));
        assert!(texts.contains(&"High score: 12"));
    }

    #[test]
    fn test_maze_scene_culls_and_offsets() {
        let state = MazeState::new(WINDOW, maze_levels()).unwrap();
        let list = maze_scene(&state);
        // Ball + at least one wall, but not every tile in a 2000x1500 maze
        assert!(list.fill_count() >= 2);
        assert!(list.fill_count() < state.tiles.len() + 2);

        for cmd in &list.cmds {
            if let DrawCmd::Fill { rect, .. } = cmd {
                assert!(rect.right() > 0 && rect.x < WINDOW.width);
                assert!(rect.bottom() > 0 && rect.y < WINDOW.height);
            }
        }
    }

    #[test]
    fn test_platformer_scene_level_label() {
        let state = PlatformerState::new(WINDOW, platformer_levels()).unwrap();
        let list = platformer_scene(&state);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Level 1"]);
        let last = list.cmds.iter().rev().find_map(|cmd| match cmd {
            DrawCmd::Fill { rect, .. } => Some(*rect),
            DrawCmd::Text { .. } => None,
        });
        // Player is drawn last, in screen space
        assert_eq!(last, Some(state.camera.to_screen(&state.player.body.rect())));
    }
}
