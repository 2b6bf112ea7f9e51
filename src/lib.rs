//! Three small 2D demos (a lander, Pong and a sprite showcase) built on a
//! shared entity physics/collision core.

pub mod engine;
pub mod error;
pub mod game;
pub mod levels;

pub use error::GameError;
pub use game::entity::{CollisionFlags, Entity};
