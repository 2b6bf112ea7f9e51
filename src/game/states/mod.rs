pub mod lander;
pub mod pong;
pub mod showcase;
