// src/game/states/lander.rs
use winit::event::{VirtualKeyCode, WindowEvent};

use crate::engine::input::{Keyboard, is_quit_key};
use crate::engine::program::{ShaderProgram, TextureLoader};
use crate::engine::state::GameState;
use crate::error::GameError;
use crate::game::lander::{LanderGame, LanderInput, LanderTextures, Outcome};
use crate::levels::loader::LevelData;

pub struct LanderState {
    game: LanderGame,
    keyboard: Keyboard,
}

impl LanderState {
    pub fn new(level: &LevelData, loader: &mut dyn TextureLoader) -> Result<Self, GameError> {
        let textures = LanderTextures {
            player: loader.load_texture(&level.player.texture),
            platforms: level
                .platforms
                .iter()
                .map(|platform| loader.load_texture(&platform.texture))
                .collect(),
        };

        Ok(Self {
            game: LanderGame::new(level, &textures)?,
            keyboard: Keyboard::new(),
        })
    }

    pub fn game(&self) -> &LanderGame {
        &self.game
    }

    fn input(&self) -> LanderInput {
        LanderInput {
            left: self.keyboard.is_held(VirtualKeyCode::A),
            right: self.keyboard.is_held(VirtualKeyCode::D),
            thrust: self.keyboard.is_held(VirtualKeyCode::W),
        }
    }
}

impl GameState for LanderState {
    fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.keyboard.handle_event(event).is_some_and(is_quit_key)
    }

    fn update(&mut self, dt: f32) {
        self.game.apply_input(self.input());
        self.game.update(dt);
    }

    fn render(&self, program: &mut dyn ShaderProgram) {
        self.game.player().render(program, self.game.player_sprite());
        for (platform, sprite) in self.game.platforms().iter().zip(self.game.platform_sprites()) {
            platform.render(program, sprite);
        }
    }

    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }

    fn title(&self) -> String {
        match self.game.outcome() {
            Outcome::InFlight => "Lander".to_string(),
            Outcome::Won => "Lander - WIN".to_string(),
            Outcome::Lost => "Lander - LOSE".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::draw_list::DrawList;
    use crate::engine::program::TextureId;
    use crate::engine::texture::TextureSource;
    use winit::event::ElementState;

    #[derive(Default)]
    struct CountingLoader {
        loaded: Vec<TextureSource>,
    }

    impl TextureLoader for CountingLoader {
        fn load_texture(&mut self, source: &TextureSource) -> TextureId {
            self.loaded.push(source.clone());
            TextureId(self.loaded.len() as u32 - 1)
        }
    }

    #[test]
    fn test_textures_loaded_in_level_order() {
        let level = LevelData::default();
        let mut loader = CountingLoader::default();
        let state = LanderState::new(&level, &mut loader).unwrap();

        assert_eq!(loader.loaded.len(), 3);
        assert_eq!(loader.loaded[0], level.player.texture);
        assert_eq!(state.game().platforms()[1].texture(), TextureId(2));
    }

    #[test]
    fn test_render_draws_player_then_platforms() {
        let mut loader = CountingLoader::default();
        let state = LanderState::new(&LevelData::default(), &mut loader).unwrap();
        let mut list = DrawList::new();
        state.render(&mut list);

        let textures: Vec<_> = list.draws().iter().map(|d| d.texture).collect();
        assert_eq!(textures, vec![TextureId(0), TextureId(1), TextureId(2)]);
        // The target pad is drawn narrower than its hitbox
        assert_eq!(list.draws()[1].vertices[1].position, [0.45, -1.5]);
    }

    #[test]
    fn test_held_keys_drive_the_player() {
        let mut loader = CountingLoader::default();
        let mut state = LanderState::new(&LevelData::default(), &mut loader).unwrap();
        state.keyboard.set(VirtualKeyCode::D, ElementState::Pressed);
        state.update(0.0);
        state.update(0.0);
        assert_eq!(state.game().player().acceleration().x, 1.0);
        assert_eq!(state.title(), "Lander");
    }
}
