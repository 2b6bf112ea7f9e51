pub mod entity;
pub mod lander;
pub mod pong;
pub mod showcase;
pub mod states;
