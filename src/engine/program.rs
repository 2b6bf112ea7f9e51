// src/engine/program.rs
use nalgebra::Matrix4;

use crate::engine::texture::TextureSource;

/// Opaque handle to a texture owned by the renderer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Texture coordinates matching the vertex order produced by [`quad_vertices`].
pub const QUAD_TEX_COORDS: [f32; 12] = [
    0.0, 1.0, 1.0, 1.0, 1.0, 0.0,
    0.0, 1.0, 0.0, 0.0, 1.0, 0.0,
];

/// The shader/program abstraction sprites are drawn through.
///
/// Calls mirror a classic fixed attribute pipeline: set the model matrix, bind a
/// texture, point the position and texcoord attributes at client data, draw,
/// then disable the attributes so nothing leaks into the next draw.
pub trait ShaderProgram {
    fn set_model_matrix(&mut self, matrix: &Matrix4<f32>);
    fn bind_texture(&mut self, texture: TextureId);
    /// Flat `x, y` pairs, one per vertex.
    fn set_position_attribute(&mut self, coords: &[f32]);
    /// Flat `u, v` pairs, one per vertex.
    fn set_tex_coord_attribute(&mut self, coords: &[f32]);
    fn draw_triangles(&mut self, vertex_count: usize);
    fn disable_attributes(&mut self);
}

/// Something that can turn a texture description into a handle.
pub trait TextureLoader {
    fn load_texture(&mut self, source: &TextureSource) -> TextureId;
}

/// Two triangles covering a `width` x `height` rectangle centred on the origin.
pub fn quad_vertices(width: f32, height: f32) -> [f32; 12] {
    let hw = width / 2.0;
    let hh = height / 2.0;
    [
        -hw, -hh, hw, -hh, hw, hh,
        -hw, -hh, -hw, hh, hw, hh,
    ]
}

/// Issue one textured quad draw.
///
/// The model matrix is set before the texture is bound and the attributes are
/// pointed; attributes are disabled after the draw call.
pub fn draw_sprite<P: ShaderProgram + ?Sized>(
    program: &mut P,
    model_matrix: &Matrix4<f32>,
    texture: TextureId,
    vertices: &[f32; 12],
) {
    program.set_model_matrix(model_matrix);
    program.bind_texture(texture);
    program.set_position_attribute(vertices);
    program.set_tex_coord_attribute(&QUAD_TEX_COORDS);
    program.draw_triangles(6);
    program.disable_attributes();
}
