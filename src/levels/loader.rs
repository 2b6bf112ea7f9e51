// src/levels/loader.rs
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::engine::texture::TextureSource;
use crate::engine::timestep::DEFAULT_FIXED_TIMESTEP;
use crate::error::GameError;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LevelData {
    pub name: String,
    #[serde(default = "default_fixed_timestep")]
    pub fixed_timestep: f32,
    pub player: PlayerData,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub controls: Controls,
    #[serde(default)]
    pub bounds: Bounds,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub spawn: (f32, f32),
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub gravity: f32,
    pub texture: TextureSource,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    // Drawn quad size when the art is narrower than the hitbox
    #[serde(default)]
    pub sprite_size: Option<(f32, f32)>,
    pub texture: TextureSource,
}

/// How much each held key changes the player per frame.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Controls {
    pub lateral_thrust: f32,
    pub vertical_boost: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            lateral_thrust: 0.5,
            vertical_boost: 0.05,
        }
    }
}

/// Limits that decide whether a flight ends in a win or a loss.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Bounds {
    pub floor_y: f32,
    pub side_x: f32,
    pub landing_ceiling_y: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            floor_y: -4.5,
            side_x: 5.5,
            landing_ceiling_y: -1.0,
        }
    }
}

fn default_fixed_timestep() -> f32 {
    DEFAULT_FIXED_TIMESTEP
}

impl Default for LevelData {
    fn default() -> Self {
        Self {
            name: "lander".to_string(),
            fixed_timestep: DEFAULT_FIXED_TIMESTEP,
            player: PlayerData {
                spawn: (-4.0, 4.0),
                width: 1.0,
                height: 1.0,
                speed: 1.0,
                gravity: -1.5,
                texture: TextureSource::file("assets/bbird.png", [40, 40, 200, 255]),
            },
            platforms: vec![
                Platform {
                    x: 2.25,
                    y: -3.8,
                    width: 1.0,
                    height: 3.0,
                    sprite_size: Some((0.9, 3.0)),
                    texture: TextureSource::file("assets/hand.png", [230, 190, 150, 255]),
                },
                Platform {
                    x: 4.0,
                    y: -1.9,
                    width: 2.0,
                    height: 4.0,
                    sprite_size: None,
                    texture: TextureSource::file("assets/mizore.png", [120, 60, 160, 255]),
                },
            ],
            controls: Controls::default(),
            bounds: Bounds::default(),
        }
    }
}

pub fn load_level(path: &Path) -> Result<LevelData, GameError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let level_data = serde_json::from_reader(reader)?;
    log::debug!("Loaded level from {}", path.display());
    Ok(level_data)
}
