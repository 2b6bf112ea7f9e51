// src/game/lander.rs
use nalgebra::Vector3;

use crate::engine::program::{TextureId, quad_vertices};
use crate::engine::timestep::FixedTimestep;
use crate::error::GameError;
use crate::game::entity::Entity;
use crate::levels::loader::{Bounds, Controls, LevelData};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InFlight,
    Won,
    Lost,
}

/// Keys held during the current frame.
#[derive(Copy, Clone, Debug, Default)]
pub struct LanderInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
}

/// Texture handles for the lander's sprites, in level order.
#[derive(Clone, Debug, Default)]
pub struct LanderTextures {
    pub player: TextureId,
    pub platforms: Vec<TextureId>,
}

/// The landing game: one falling player, a handful of static platforms, and
/// the rules that turn collisions into a win or a loss.
pub struct LanderGame {
    player: Entity,
    platforms: Vec<Entity>,
    player_sprite: [f32; 12],
    platform_sprites: Vec<[f32; 12]>,
    timestep: FixedTimestep,
    controls: Controls,
    bounds: Bounds,
    outcome: Outcome,
}

impl LanderGame {
    pub fn new(level: &LevelData, textures: &LanderTextures) -> Result<Self, GameError> {
        let player_data = &level.player;
        let player = Entity::builder()
            .position(player_data.spawn.0, player_data.spawn.1)
            .extents(player_data.width, player_data.height)
            .speed(player_data.speed)
            .acceleration(Vector3::new(0.0, player_data.gravity, 0.0))
            .texture(textures.player)
            .build()?;

        let mut platforms = Vec::with_capacity(level.platforms.len());
        let mut platform_sprites = Vec::with_capacity(level.platforms.len());
        for (index, platform) in level.platforms.iter().enumerate() {
            let texture = textures.platforms.get(index).copied().unwrap_or_default();
            platforms.push(
                Entity::builder()
                    .position(platform.x, platform.y)
                    .extents(platform.width, platform.height)
                    .texture(texture)
                    .build()?,
            );
            let (w, h) = platform.sprite_size.unwrap_or((platform.width, platform.height));
            platform_sprites.push(quad_vertices(w, h));
        }

        log::info!("Lander level '{}' ready with {} platforms", level.name, platforms.len());

        Ok(Self {
            player_sprite: quad_vertices(player_data.width, player_data.height),
            player,
            platforms,
            platform_sprites,
            timestep: FixedTimestep::new(level.fixed_timestep)?,
            controls: level.controls.clone(),
            bounds: level.bounds.clone(),
            outcome: Outcome::InFlight,
        })
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.player
    }

    pub fn platforms(&self) -> &[Entity] {
        &self.platforms
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Apply one frame of held keys.
    ///
    /// Side thrust accumulates into the player's acceleration for as long as
    /// the key is held; up gives a small kick to vertical velocity.
    pub fn apply_input(&mut self, input: LanderInput) {
        if self.outcome != Outcome::InFlight {
            return;
        }

        self.player.set_movement(Vector3::zeros());

        if input.left {
            self.player.apply_force(Vector3::new(-self.controls.lateral_thrust, 0.0, 0.0));
        } else if input.right {
            self.player.apply_force(Vector3::new(self.controls.lateral_thrust, 0.0, 0.0));
        }

        if input.thrust {
            let mut velocity = self.player.velocity();
            velocity.y += self.controls.vertical_boost;
            self.player.set_velocity(velocity);
        }
    }

    /// Advance by one frame of wall-clock time.
    ///
    /// The outcome is judged from the previous step's collisions before any
    /// new steps run, and only on frames where at least one step is due.
    pub fn update(&mut self, frame_time: f32) {
        let steps = self.timestep.accumulate(frame_time);
        if steps == 0 {
            return;
        }

        if self.outcome == Outcome::InFlight {
            self.outcome = self.judge();
            if self.outcome != Outcome::InFlight {
                self.player.deactivate();
                log::info!(
                    "Lander {:?} at ({:.2}, {:.2})",
                    self.outcome,
                    self.player.position().x,
                    self.player.position().y
                );
            }
        }

        let step = self.timestep.step();
        for _ in 0..steps {
            self.player.update(step, &self.platforms);
        }
    }

    fn judge(&self) -> Outcome {
        let position = self.player.position();
        let collisions = self.player.collisions();

        if collisions.horizontal()
            || position.y < self.bounds.floor_y
            || position.x.abs() > self.bounds.side_x
        {
            Outcome::Lost
        } else if collisions.bottom && position.y > self.bounds.landing_ceiling_y {
            // Came to rest on top of something too tall
            Outcome::Lost
        } else if collisions.bottom && position.y < self.bounds.landing_ceiling_y {
            Outcome::Won
        } else {
            Outcome::InFlight
        }
    }

    pub fn player_sprite(&self) -> &[f32; 12] {
        &self.player_sprite
    }

    pub fn platform_sprites(&self) -> &[[f32; 12]] {
        &self.platform_sprites
    }
}
