// src/game/showcase.rs
use nalgebra::{Matrix4, Vector3};

use crate::engine::program::{ShaderProgram, TextureId, draw_sprite, quad_vertices};

const SPIN_DEGREES_PER_SECOND: f32 = 90.0;
const BOUNCE_SPEED: f32 = 2.0;
// Frames between bounce direction changes
const BOUNCE_FRAMES: u32 = 100;
const SPRITE_SIZE: f32 = 2.0;

#[derive(Copy, Clone, Debug, Default)]
pub struct ShowcaseTextures {
    pub left: TextureId,
    pub right: TextureId,
    pub bouncer: TextureId,
}

/// Two sprites spinning in opposite directions above a third one bobbing up
/// and down.
pub struct Showcase {
    textures: ShowcaseTextures,
    rotation_degrees: f32,
    bounce_offset: f32,
    frame_counter: u32,
    rising: bool,
}

impl Showcase {
    pub fn new(textures: ShowcaseTextures) -> Self {
        Self {
            textures,
            rotation_degrees: 0.0,
            bounce_offset: 0.0,
            frame_counter: 0,
            rising: true,
        }
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub fn bounce_offset(&self) -> f32 {
        self.bounce_offset
    }

    pub fn update(&mut self, dt: f32) {
        self.frame_counter += 1;
        self.rotation_degrees += SPIN_DEGREES_PER_SECOND * dt;

        if self.frame_counter > BOUNCE_FRAMES {
            self.rising = !self.rising;
            self.frame_counter = 0;
        }

        if self.rising {
            self.bounce_offset += BOUNCE_SPEED * dt;
        } else {
            self.bounce_offset -= BOUNCE_SPEED * dt;
        }
    }

    pub fn model_matrices(&self) -> [Matrix4<f32>; 3] {
        let angle = self.rotation_degrees.to_radians();
        let left = Matrix4::new_translation(&Vector3::new(-2.0, 2.0, 0.0))
            * Matrix4::new_rotation(Vector3::z() * -angle);
        let right = Matrix4::new_translation(&Vector3::new(2.0, 2.0, 0.0))
            * Matrix4::new_rotation(Vector3::z() * angle);
        let bouncer = Matrix4::new_translation(&Vector3::new(0.0, -4.0 + self.bounce_offset, 0.0));
        [left, right, bouncer]
    }

    pub fn render(&self, program: &mut dyn ShaderProgram) {
        let quad = quad_vertices(SPRITE_SIZE, SPRITE_SIZE);
        let [left, right, bouncer] = self.model_matrices();
        draw_sprite(program, &left, self.textures.left, &quad);
        draw_sprite(program, &right, self.textures.right, &quad);
        draw_sprite(program, &bouncer, self.textures.bouncer, &quad);
    }
}
