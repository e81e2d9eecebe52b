//! Level geometry tables
//!
//! Levels are lists of normalized rectangles (fractions of the level extent),
//! a goal rectangle and a start position. Tiles may carry a movement range and
//! velocity, which makes them moving platforms. The built-in tables cover both
//! scrolling games; custom platformer packs load from JSON.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rect::{MovementRange, RelRect};
use crate::error::{Error, Result};

/// One tile or platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    pub rect: RelRect,
    /// Travel allowed around the initial rect
    #[serde(default)]
    pub range: Option<MovementRange>,
    /// Initial velocity, level fractions per ms
    #[serde(default)]
    pub velocity: Option<DVec2>,
}

impl TileSpec {
    pub const fn fixed(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            rect: RelRect::new(x, y, w, h),
            range: None,
            velocity: None,
        }
    }

    pub fn moving(rect: RelRect, range: MovementRange, velocity: DVec2) -> Self {
        Self {
            rect,
            range: Some(range),
            velocity: Some(velocity),
        }
    }

    /// Movement only applies when both a range and a velocity are given
    pub fn motion(&self) -> Option<(MovementRange, DVec2)> {
        self.range.zip(self.velocity)
    }
}

fn default_start() -> DVec2 {
    DVec2::new(0.9, 0.9)
}

/// Geometry of a single level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCoordinates {
    pub tiles: Vec<TileSpec>,
    pub goal: RelRect,
    /// Top-left of the player / ball at level start
    #[serde(default = "default_start")]
    pub start: DVec2,
}

/// Ordered list of levels; play cycles through them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<LevelCoordinates>,
}

impl LevelSet {
    pub fn from_json(json: &str) -> Result<Self> {
        let set: LevelSet = serde_json::from_str(json)?;
        if set.levels.is_empty() {
            return Err(Error::EmptyLevelSet);
        }
        Ok(set)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let set = Self::from_json(&json)?;
        log::info!(
            "Loaded {} levels from {}",
            set.levels.len(),
            path.as_ref().display()
        );
        Ok(set)
    }

    pub fn get(&self, number: usize) -> Result<&LevelCoordinates> {
        self.levels.get(number).ok_or(Error::LevelNotFound {
            number,
            available: self.levels.len(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level after `number`, wrapping to the first
    pub fn next_index(&self, number: usize) -> usize {
        if self.levels.is_empty() {
            0
        } else {
            (number + 1) % self.levels.len()
        }
    }
}

/// Outer boxes shared by the platformer levels
fn platformer_walls() -> Vec<TileSpec> {
    vec![
        TileSpec::fixed(0.0, 0.0, 1.0, 0.03),
        TileSpec::fixed(0.97, 0.0, 0.03, 1.0),
        TileSpec::fixed(0.0, 0.0, 0.03, 1.0),
        TileSpec::fixed(0.0, 0.97, 1.0, 0.03),
    ]
}

/// Built-in platformer levels
pub fn platformer_levels() -> LevelSet {
    let mut lev0 = platformer_walls();
    lev0.push(TileSpec::fixed(0.85, 0.75, 0.12, 0.03));

    let mut lev1 = platformer_walls();
    lev1.extend([
        TileSpec::fixed(0.6, 0.8, 0.15, 0.03),
        TileSpec::moving(
            RelRect::new(0.35, 0.65, 0.12, 0.03),
            MovementRange::new(0.15, 0.15, 0.0, 0.0),
            DVec2::new(1.0 / 8000.0, 0.0),
        ),
        TileSpec::fixed(0.05, 0.5, 0.15, 0.03),
    ]);

    let mut lev2 = platformer_walls();
    lev2.extend([
        TileSpec::moving(
            RelRect::new(0.45, 0.85, 0.1, 0.03),
            MovementRange::new(0.0, 0.0, 0.35, 0.09),
            DVec2::new(0.0, -1.0 / 10000.0),
        ),
        TileSpec::fixed(0.1, 0.3, 0.2, 0.03),
    ]);

    LevelSet {
        levels: vec![
            LevelCoordinates {
                tiles: lev0,
                goal: RelRect::new(0.94, 0.63, 0.03, 0.12),
                start: default_start(),
            },
            LevelCoordinates {
                tiles: lev1,
                goal: RelRect::new(0.08, 0.38, 0.03, 0.12),
                start: default_start(),
            },
            LevelCoordinates {
                tiles: lev2,
                goal: RelRect::new(0.15, 0.18, 0.03, 0.12),
                start: default_start(),
            },
        ],
    }
}

fn maze_walls() -> Vec<TileSpec> {
    vec![
        TileSpec::fixed(0.0, 0.0, 1.0, 0.01),
        TileSpec::fixed(0.99, 0.0, 0.01, 1.0),
        TileSpec::fixed(0.0, 0.0, 0.01, 1.0),
        TileSpec::fixed(0.0, 0.99, 1.0, 0.01),
    ]
}

/// Built-in maze levels
pub fn maze_levels() -> LevelSet {
    let mut lev0 = maze_walls();
    lev0.extend([
        TileSpec::fixed(0.2, 0.0, 0.02, 0.8),
        TileSpec::fixed(0.45, 0.2, 0.02, 0.8),
        TileSpec::fixed(0.7, 0.0, 0.02, 0.8),
    ]);

    let mut lev1 = maze_walls();
    lev1.extend([
        TileSpec::fixed(0.0, 0.25, 0.8, 0.02),
        TileSpec::fixed(0.2, 0.5, 0.8, 0.02),
        TileSpec::fixed(0.0, 0.75, 0.8, 0.02),
    ]);

    LevelSet {
        levels: vec![
            LevelCoordinates {
                tiles: lev0,
                goal: RelRect::new(0.85, 0.85, 0.08, 0.08),
                start: DVec2::new(0.05, 0.1),
            },
            LevelCoordinates {
                tiles: lev1,
                goal: RelRect::new(0.05, 0.85, 0.08, 0.08),
                start: DVec2::new(0.05, 0.1),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_nonempty() {
        let plat = platformer_levels();
        assert_eq!(plat.len(), 3);
        assert!(plat.levels.iter().all(|l| l.tiles.len() >= 4));
        assert!(maze_levels().len() >= 2);
    }

    #[test]
    fn test_level_lookup_out_of_range() {
        let plat = platformer_levels();
        assert!(plat.get(2).is_ok());
        let err = plat.get(7).unwrap_err();
        assert!(matches!(err, Error::LevelNotFound { number: 7, available: 3 }));
        assert_eq!(plat.next_index(2), 0);
    }

    #[test]
    fn test_level_set_from_json() {
        let json = r#"{
            "levels": [{
                "tiles": [
                    {"rect": {"x": 0.0, "y": 0.97, "w": 1.0, "h": 0.03}},
                    {"rect": {"x": 0.4, "y": 0.7, "w": 0.1, "h": 0.03},
                     "range": {"left": 0.1, "right": 0.1, "top": 0.0, "bottom": 0.0},
                     "velocity": [0.0001, 0.0]}
                ],
                "goal": {"x": 0.9, "y": 0.85, "w": 0.03, "h": 0.12}
            }]
        }"#;
        let set = LevelSet::from_json(json).unwrap();
        let level = set.get(0).unwrap();
        assert_eq!(level.tiles.len(), 2);
        assert!(level.tiles[0].motion().is_none());
        let (_, v) = level.tiles[1].motion().unwrap();
        assert_eq!(v, DVec2::new(0.0001, 0.0));
        assert_eq!(level.start, DVec2::new(0.9, 0.9));
    }

    #[test]
    fn test_empty_level_set_rejected() {
        assert!(matches!(
            LevelSet::from_json(r#"{"levels": []}"#),
            Err(Error::EmptyLevelSet)
        ));
    }
}
