// src/game/states/showcase.rs
use winit::event::WindowEvent;

use crate::engine::input::{Keyboard, is_quit_key};
use crate::engine::program::{ShaderProgram, TextureLoader};
use crate::engine::state::GameState;
use crate::engine::texture::TextureSource;
use crate::game::showcase::{Showcase, ShowcaseTextures};

pub struct ShowcaseState {
    showcase: Showcase,
    keyboard: Keyboard,
}

impl ShowcaseState {
    pub fn new(loader: &mut dyn TextureLoader) -> Self {
        let textures = ShowcaseTextures {
            left: loader.load_texture(&TextureSource::file("assets/left.png", [220, 80, 80, 255])),
            right: loader.load_texture(&TextureSource::file("assets/right.png", [80, 80, 220, 255])),
            bouncer: loader.load_texture(&TextureSource::file("assets/bouncer.png", [240, 200, 60, 255])),
        };

        Self {
            showcase: Showcase::new(textures),
            keyboard: Keyboard::new(),
        }
    }
}

impl GameState for ShowcaseState {
    fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.keyboard.handle_event(event).is_some_and(is_quit_key)
    }

    fn update(&mut self, dt: f32) {
        self.showcase.update(dt);
    }

    fn render(&self, program: &mut dyn ShaderProgram) {
        self.showcase.render(program);
    }

    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: 0.29,
            g: 0.48,
            b: 0.28,
            a: 1.0,
        }
    }

    fn title(&self) -> String {
        "Showcase".to_string()
    }
}
