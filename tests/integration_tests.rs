//! Whole games driven through the `Game` interface with scripted input

use glam::DVec2;
use sb_arcade::app::{MazeGame, PlatformerGame, PongGame};
use sb_arcade::consts::{PONG_LIVES, SCREEN_HEIGHT, SCREEN_WIDTH};
use sb_arcade::renderer::DrawList;
use sb_arcade::sim::{Extent, InputEvent, Key, LevelSet, PongPhase, Rect, maze_levels};
use sb_arcade::{Game, GameKind, Settings};

const WINDOW: Extent = Extent::new(SCREEN_WIDTH, SCREEN_HEIGHT);
const DT: u32 = 16;

fn run_frames(game: &mut dyn Game, frames: usize) -> DrawList {
    for _ in 0..frames {
        game.update(DT);
    }
    game.scene()
}

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("sb-arcade-it-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_pong_same_seed_same_frames() {
    let mut a = PongGame::new(1234, WINDOW, None).unwrap();
    let mut b = PongGame::new(1234, WINDOW, None).unwrap();
    for frame in 0..600 {
        if frame % 90 == 0 {
            let key = if frame % 180 == 0 { Key::Up } else { Key::Down };
            a.handle_event(&InputEvent::key_down(key));
            b.handle_event(&InputEvent::key_down(key));
        }
        a.update(DT);
        b.update(DT);
    }
    assert_eq!(a.scene(), b.scene());
    assert_eq!(a.state.lives, b.state.lives);
}

#[test]
fn test_pong_game_over_saves_high_score() {
    let dir = scratch_dir("pong");
    let path = dir.join("halfpong.save");
    let _ = std::fs::remove_file(&path);

    let mut game = PongGame::new(99, WINDOW, Some(path.clone())).unwrap();
    game.state.score = 4;
    // Paddle to the top, out of the ball's way
    game.handle_event(&InputEvent::key_down(Key::Up));

    for _ in 0..PONG_LIVES {
        let mut frames = 0;
        while game.state.phase == PongPhase::Scored && frames < 200 {
            game.update(DT);
            frames += 1;
        }
        assert_eq!(game.state.phase, PongPhase::Playing);

        let paddle = game.state.paddle.body.rect();
        game.state
            .ball
            .body
            .set_rect(Rect::new(700, paddle.bottom() + 100, 24, 24), WINDOW);
        game.state.ball.body.velocity = DVec2::new(1.0 / 2000.0, 0.0);
        while game.state.phase == PongPhase::Playing && frames < 400 {
            game.update(DT);
            frames += 1;
        }
    }
    assert_eq!(game.state.phase, PongPhase::GameOver);
    assert_eq!(game.state.lives, 0);

    let texts: Vec<String> = game.scene().texts().map(String::from).collect();
    assert!(texts.iter().any(|t| t == "Game Over"));
    assert!(texts.iter().any(|t| t == "New high score: 4"));

    let saved = sb_arcade::HighScores::load(&path).unwrap();
    assert_eq!(saved.scores, vec![4]);
}

#[test]
fn test_pong_resize_scales_paddle() {
    let mut game = PongGame::new(5, WINDOW, None).unwrap();
    let before = game.state.paddle.body.rect();
    game.resize(Extent::new(SCREEN_WIDTH * 2, SCREEN_HEIGHT * 2));
    let after = game.state.paddle.body.rect();
    assert_eq!(after.w, before.w * 2);
    assert_eq!(after.h, before.h * 2);
    assert_eq!(after.x, before.x * 2);
}

#[test]
fn test_maze_space_resets_level() {
    let mut game = MazeGame::new(WINDOW, maze_levels()).unwrap();
    let start = game.state.ball.body.rect();

    game.handle_event(&InputEvent::key_down(Key::Right));
    game.handle_event(&InputEvent::key_down(Key::Down));
    run_frames(&mut game, 30);
    assert_ne!(game.state.ball.body.rect(), start);
    assert!(game.state.elapsed_ms > 0);

    game.handle_event(&InputEvent::key_down(Key::Space));
    assert_eq!(game.state.ball.body.rect(), start);
    assert_eq!(game.state.elapsed_ms, 0);
}

#[test]
fn test_maze_ball_stays_in_level() {
    let mut game = MazeGame::new(WINDOW, maze_levels()).unwrap();
    for _ in 0..8 {
        game.handle_event(&InputEvent::key_down(Key::Right));
        game.handle_event(&InputEvent::key_down(Key::Down));
    }
    let level = game.state.world.extent().rect();
    for _ in 0..2000 {
        game.update(DT);
        let ball = game.state.ball.body.rect();
        assert!(level.contains(&ball), "ball escaped: {:?}", ball);
    }
}

#[test]
fn test_platformer_jump_and_land() {
    let mut game = PlatformerGame::new(WINDOW, sb_arcade::sim::platformer_levels()).unwrap();
    let start = game.state.player.body.rect();

    game.handle_event(&InputEvent::key_down(Key::Up));
    run_frames(&mut game, 5);
    assert!(game.state.player.body.rect().y < start.y);
    assert!(!game.state.player.on_surface);

    game.handle_event(&InputEvent::key_up(Key::Up));
    run_frames(&mut game, 120);
    assert_eq!(game.state.player.body.rect(), start);
    assert!(game.state.player.on_surface);
}

#[test]
fn test_platformer_custom_level_pack() {
    let dir = scratch_dir("levels");
    let path = dir.join("levels.json");
    std::fs::write(
        &path,
        r#"{
            "levels": [{
                "tiles": [{"rect": {"x": 0.0, "y": 0.97, "w": 1.0, "h": 0.03}}],
                "goal": {"x": 0.5, "y": 0.85, "w": 0.03, "h": 0.12},
                "start": [0.45, 0.9]
            }]
        }"#,
    )
    .unwrap();

    let levels = LevelSet::load(&path).unwrap();
    let mut game = PlatformerGame::new(WINDOW, levels).unwrap();
    assert_eq!(game.state.platforms.len(), 1);

    // Walk right into the exit
    game.handle_event(&InputEvent::key_down(Key::Right));
    run_frames(&mut game, 60);
    assert!(game.state.player.exited);
    assert!(game.state.exit.rect().contains(&game.state.player.body.rect()));

    // Single level wraps back onto itself
    game.handle_event(&InputEvent::key_up(Key::Right));
    run_frames(&mut game, 100);
    assert_eq!(game.state.level, 0);
    assert!(!game.state.player.exited);
    assert_eq!(game.state.player.body.rect().x, 900);

    let mut settings = Settings::default();
    settings.platformer_levels = Some(path);
    let game = GameKind::Platformer.create(&settings, 0).unwrap();
    assert_eq!(game.title(), "Platformer");
}

#[test]
fn test_scene_offsets_follow_camera() {
    let game = PlatformerGame::new(WINDOW, sb_arcade::sim::platformer_levels()).unwrap();
    let camera = game.state.camera.rect;
    assert!(camera.x > 0 && camera.y > 0);
    let player = game.state.player.body.rect();
    let expected = Rect::new(player.x - camera.x, player.y - camera.y, player.w, player.h);
    let scene = game.scene();
    assert!(scene.cmds.iter().any(|cmd| matches!(
        cmd,
        sb_arcade::renderer::DrawCmd::Fill { rect, .. } if *rect == expected
    )));
}
