// src/game/pong.rs
use nalgebra::Vector3;

use crate::engine::program::{TextureId, quad_vertices};
use crate::game::entity::Entity;

const PADDLE_X: f32 = 4.5;
const PADDLE_SPEED: f32 = 1.5;
const PADDLE_LIMIT: f32 = 3.0;
const PADDLE_SIZE: (f32, f32) = (0.2, 1.0);

const BALL_SPEED: f32 = 2.5;
const BALL_SIZE: f32 = 0.4;

const WALL_Y: f32 = 3.5;
const GOAL_X: f32 = 5.0;

// Centre distance under which a paddle returns the ball
const HIT_DISTANCE: f32 = 0.5;

/// Keys held during the current frame.
#[derive(Copy, Clone, Debug, Default)]
pub struct PongInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PongTextures {
    pub paddle: TextureId,
    pub ball: TextureId,
}

/// Two paddles and a ball. The rally ends as soon as the ball passes either
/// goal line.
pub struct PongGame {
    left: Entity,
    right: Entity,
    ball: Entity,
    direction: Vector3<f32>,
    finished: bool,
}

impl PongGame {
    pub fn new(textures: PongTextures) -> Self {
        let paddle = |x: f32| {
            let mut entity = Entity::new();
            entity.set_position(Vector3::new(x, 0.0, 0.0));
            entity.set_texture(textures.paddle);
            entity
        };

        let mut ball = Entity::new();
        ball.set_speed(BALL_SPEED);
        ball.set_texture(textures.ball);

        Self {
            left: paddle(-PADDLE_X),
            right: paddle(PADDLE_X),
            ball,
            direction: Vector3::new(1.0, 0.0, 0.0),
            finished: false,
        }
    }

    pub fn left_paddle(&self) -> &Entity {
        &self.left
    }

    pub fn right_paddle(&self) -> &Entity {
        &self.right
    }

    pub fn ball(&self) -> &Entity {
        &self.ball
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn apply_input(&mut self, input: PongInput) {
        steer(&mut self.left, input.left_up, input.left_down);
        steer(&mut self.right, input.right_up, input.right_down);
    }

    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        for paddle in [&mut self.left, &mut self.right] {
            paddle.set_velocity(paddle.movement() * PADDLE_SPEED);
            paddle.set_movement(Vector3::zeros());
            paddle.update(dt, &[]);
        }

        // The ball's x velocity comes from movement; y has to be set directly
        self.ball.set_movement(self.direction);
        self.ball.set_velocity(Vector3::new(0.0, self.direction.y * BALL_SPEED, 0.0));
        self.ball.update(dt, &[]);

        let position = self.ball.position();
        if position.y.abs() > WALL_Y {
            self.direction.y = -self.direction.y;
        }
        if position.x.abs() > GOAL_X {
            log::info!("Ball out at x = {:.2}, rally over", position.x);
            self.finished = true;
        }

        if is_hit(&self.left, &self.ball) {
            self.direction.x = -self.direction.x;
            if self.direction.y.abs() < 1.0 {
                self.direction.y = 1.0;
            }
        } else if is_hit(&self.right, &self.ball) {
            self.direction.x = -self.direction.x;
            if self.direction.y.abs() < 1.0 {
                self.direction.y = -1.0;
            }
        }
    }

    pub fn paddle_sprite() -> [f32; 12] {
        quad_vertices(PADDLE_SIZE.0, PADDLE_SIZE.1)
    }

    pub fn ball_sprite() -> [f32; 12] {
        quad_vertices(BALL_SIZE, BALL_SIZE)
    }
}

// Paddles only move while they are inside the court
fn steer(paddle: &mut Entity, up: bool, down: bool) {
    let y = paddle.position().y;
    let mut movement = Vector3::zeros();
    if up {
        if y < PADDLE_LIMIT {
            movement.y = 1.0;
        }
    } else if down && y > -PADDLE_LIMIT {
        movement.y = -1.0;
    }
    paddle.set_movement(movement);
}

fn is_hit(paddle: &Entity, ball: &Entity) -> bool {
    let delta = ball.position() - paddle.position();
    (delta.x * delta.x + delta.y * delta.y).sqrt() < HIT_DISTANCE
}
