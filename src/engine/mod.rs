pub mod draw_list;
pub mod graphics;
pub mod input;
pub mod program;
pub mod state;
pub mod texture;
pub mod timestep;
