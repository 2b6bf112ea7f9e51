// src/engine/draw_list.rs
use nalgebra::Matrix4;

use crate::engine::program::{ShaderProgram, TextureId};

// A vertex for our sprites
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

/// One recorded draw call, ready to be uploaded.
#[derive(Clone, Debug)]
pub struct SpriteDraw {
    pub model_matrix: Matrix4<f32>,
    pub texture: TextureId,
    pub vertices: Vec<Vertex>,
}

/// Records [`ShaderProgram`] calls as a list of sprite draws.
///
/// Acts like a small state machine over the bound matrix, texture and
/// attribute arrays; each `draw_triangles` snapshots that state.
pub struct DrawList {
    model_matrix: Matrix4<f32>,
    texture: Option<TextureId>,
    positions: Option<Vec<f32>>,
    tex_coords: Option<Vec<f32>>,
    draws: Vec<SpriteDraw>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            model_matrix: Matrix4::identity(),
            texture: None,
            positions: None,
            tex_coords: None,
            draws: Vec::new(),
        }
    }

    pub fn draws(&self) -> &[SpriteDraw] {
        &self.draws
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderProgram for DrawList {
    fn set_model_matrix(&mut self, matrix: &Matrix4<f32>) {
        self.model_matrix = *matrix;
    }

    fn bind_texture(&mut self, texture: TextureId) {
        self.texture = Some(texture);
    }

    fn set_position_attribute(&mut self, coords: &[f32]) {
        self.positions = Some(coords.to_vec());
    }

    fn set_tex_coord_attribute(&mut self, coords: &[f32]) {
        self.tex_coords = Some(coords.to_vec());
    }

    fn draw_triangles(&mut self, vertex_count: usize) {
        let (Some(texture), Some(positions), Some(tex_coords)) =
            (self.texture, &self.positions, &self.tex_coords)
        else {
            log::warn!("Dropping draw of {} vertices: texture or attributes not bound", vertex_count);
            return;
        };

        let available = (positions.len() / 2).min(tex_coords.len() / 2);
        if vertex_count > available {
            log::warn!(
                "Dropping draw of {} vertices: only {} bound",
                vertex_count,
                available
            );
            return;
        }

        let vertices = positions
            .chunks_exact(2)
            .zip(tex_coords.chunks_exact(2))
            .take(vertex_count)
            .map(|(p, t)| Vertex {
                position: [p[0], p[1]],
                tex_coords: [t[0], t[1]],
            })
            .collect();

        self.draws.push(SpriteDraw {
            model_matrix: self.model_matrix,
            texture,
            vertices,
        });
    }

    fn disable_attributes(&mut self) {
        self.positions = None;
        self.tex_coords = None;
    }
}
