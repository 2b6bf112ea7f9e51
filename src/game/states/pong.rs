// src/game/states/pong.rs
use winit::event::{VirtualKeyCode, WindowEvent};

use crate::engine::input::{Keyboard, is_quit_key};
use crate::engine::program::{ShaderProgram, TextureLoader};
use crate::engine::state::GameState;
use crate::engine::texture::TextureSource;
use crate::game::pong::{PongGame, PongInput, PongTextures};

pub struct PongState {
    game: PongGame,
    keyboard: Keyboard,
}

impl PongState {
    pub fn new(loader: &mut dyn TextureLoader) -> Self {
        let textures = PongTextures {
            paddle: loader.load_texture(&TextureSource::solid([255, 255, 255, 255])),
            ball: loader.load_texture(&TextureSource::solid([255, 220, 60, 255])),
        };

        Self {
            game: PongGame::new(textures),
            keyboard: Keyboard::new(),
        }
    }

    pub fn game(&self) -> &PongGame {
        &self.game
    }

    fn input(&self) -> PongInput {
        PongInput {
            left_up: self.keyboard.is_held(VirtualKeyCode::W),
            left_down: self.keyboard.is_held(VirtualKeyCode::S),
            right_up: self.keyboard.is_held(VirtualKeyCode::Up),
            right_down: self.keyboard.is_held(VirtualKeyCode::Down),
        }
    }
}

impl GameState for PongState {
    fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.keyboard.handle_event(event).is_some_and(is_quit_key)
    }

    fn update(&mut self, dt: f32) {
        self.game.apply_input(self.input());
        self.game.update(dt);
    }

    fn render(&self, program: &mut dyn ShaderProgram) {
        let paddle = PongGame::paddle_sprite();
        self.game.left_paddle().render(program, &paddle);
        self.game.right_paddle().render(program, &paddle);
        self.game.ball().render(program, &PongGame::ball_sprite());
    }

    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color::BLACK
    }

    fn title(&self) -> String {
        "Pong".to_string()
    }

    fn is_finished(&self) -> bool {
        self.game.is_finished()
    }
}
