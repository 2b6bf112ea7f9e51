// src/game/entity.rs
use nalgebra::{Matrix4, Vector3};

use crate::engine::program::{ShaderProgram, TextureId, draw_sprite};
use crate::error::GameError;

/// Sides on which an overlap was resolved during the last update.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }

    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }
}

/// An axis-aligned box that moves under direct input control plus a constant
/// acceleration, and pushes itself out of other entities it runs into.
///
/// `position` is the centre of the box; `width` and `height` are full extents.
#[derive(Clone, Debug)]
pub struct Entity {
    active: bool,

    position: Vector3<f32>,
    velocity: Vector3<f32>,
    acceleration: Vector3<f32>,

    // Normalised input direction; x is turned into velocity every update
    movement: Vector3<f32>,
    speed: f32,

    width: f32,
    height: f32,

    collisions: CollisionFlags,
    texture: TextureId,
}

impl Entity {
    pub fn new() -> Self {
        Self {
            active: true,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            movement: Vector3::zeros(),
            speed: 0.0,
            width: 1.0,
            height: 1.0,
            collisions: CollisionFlags::default(),
            texture: TextureId::default(),
        }
    }

    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector3<f32>) {
        self.velocity = velocity;
    }

    pub fn acceleration(&self) -> Vector3<f32> {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vector3<f32>) {
        self.acceleration = acceleration;
    }

    /// Add to the constant acceleration applied every update.
    pub fn apply_force(&mut self, delta: Vector3<f32>) {
        self.acceleration += delta;
    }

    pub fn movement(&self) -> Vector3<f32> {
        self.movement
    }

    pub fn set_movement(&mut self, movement: Vector3<f32>) {
        self.movement = movement;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_extents(&mut self, width: f32, height: f32) -> Result<(), GameError> {
        validate_extents(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn collisions(&self) -> CollisionFlags {
        self.collisions
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
    }

    /// Translation to the current position; no rotation or scale.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position)
    }

    /// Advance one fixed step and resolve overlaps with `collidables`.
    ///
    /// Horizontal input overwrites `velocity.x` before acceleration is
    /// integrated. The y axis is moved and resolved before the x axis so the
    /// x pass sees the corrected vertical position. Does nothing while
    /// inactive.
    pub fn update(&mut self, delta_time: f32, collidables: &[Entity]) {
        if !self.active {
            return;
        }

        self.collisions = CollisionFlags::default();

        self.velocity.x = self.movement.x * self.speed;
        self.velocity += self.acceleration * delta_time;

        self.position.y += self.velocity.y * delta_time;
        self.check_collision_y(collidables);

        self.position.x += self.velocity.x * delta_time;
        self.check_collision_x(collidables);
    }

    /// Strict AABB overlap; boxes that only touch do not collide.
    pub fn check_collision(&self, other: &Entity) -> bool {
        if !self.active || !other.active {
            return false;
        }

        let x_distance = (self.position.x - other.position.x).abs() - (self.width + other.width) / 2.0;
        let y_distance = (self.position.y - other.position.y).abs() - (self.height + other.height) / 2.0;

        x_distance < 0.0 && y_distance < 0.0
    }

    // Direction is taken once per pass, so every overlapping collidable corrects
    // on top of the previous one and the last overlap in the list wins. A box
    // with no vertical velocity is left where it is, even when overlapping.
    // Re-reading velocity per collidable would let the first overlap win instead,
    // since the first correction zeroes it; keep the latch.
    fn check_collision_y(&mut self, collidables: &[Entity]) {
        let direction = self.velocity.y;

        for other in collidables {
            if !self.check_collision(other) {
                continue;
            }

            let y_distance = (self.position.y - other.position.y).abs();
            let y_overlap = (y_distance - self.height / 2.0 - other.height / 2.0).abs();
            if direction > 0.0 {
                self.position.y -= y_overlap;
                self.velocity.y = 0.0;
                self.collisions.top = true;
            } else if direction < 0.0 {
                self.position.y += y_overlap;
                self.velocity.y = 0.0;
                self.collisions.bottom = true;
            }
        }
    }

    fn check_collision_x(&mut self, collidables: &[Entity]) {
        let direction = self.velocity.x;

        for other in collidables {
            if !self.check_collision(other) {
                continue;
            }

            let x_distance = (self.position.x - other.position.x).abs();
            let x_overlap = (x_distance - self.width / 2.0 - other.width / 2.0).abs();
            if direction > 0.0 {
                self.position.x -= x_overlap;
                self.velocity.x = 0.0;
                self.collisions.right = true;
            } else if direction < 0.0 {
                self.position.x += x_overlap;
                self.velocity.x = 0.0;
                self.collisions.left = true;
            }
        }
    }

    /// Draw the entity's quad with its model matrix and texture.
    ///
    /// `vertices` are six local-space `x, y` pairs (two triangles).
    pub fn render<P: ShaderProgram + ?Sized>(&self, program: &mut P, vertices: &[f32; 12]) {
        draw_sprite(program, &self.model_matrix(), self.texture, vertices);
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_extents(width: f32, height: f32) -> Result<(), GameError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidExtents { width, height })
    }
}

/// Set-up time configuration for an [`Entity`].
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity: Entity,
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self {
            entity: Entity::new(),
        }
    }
}

impl EntityBuilder {
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.entity.position = Vector3::new(x, y, 0.0);
        self
    }

    pub fn extents(mut self, width: f32, height: f32) -> Self {
        self.entity.width = width;
        self.entity.height = height;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.entity.speed = speed;
        self
    }

    pub fn acceleration(mut self, acceleration: Vector3<f32>) -> Self {
        self.entity.acceleration = acceleration;
        self
    }

    pub fn texture(mut self, texture: TextureId) -> Self {
        self.entity.texture = texture;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.entity.active = false;
        self
    }

    pub fn build(self) -> Result<Entity, GameError> {
        validate_extents(self.entity.width, self.entity.height)?;
        Ok(self.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn block(x: f32, y: f32, width: f32, height: f32) -> Entity {
        Entity::builder()
            .position(x, y)
            .extents(width, height)
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_entity_is_zeroed_and_active() {
        let entity = Entity::new();
        assert!(entity.is_active());
        assert_eq!(entity.position(), Vector3::zeros());
        assert_eq!(entity.velocity(), Vector3::zeros());
        assert_eq!(entity.acceleration(), Vector3::zeros());
        assert_eq!(entity.movement(), Vector3::zeros());
        assert_eq!(entity.speed(), 0.0);
        assert_eq!(entity.collisions(), CollisionFlags::default());
    }

    #[test]
    fn test_builder_rejects_degenerate_extents() {
        assert!(matches!(
            Entity::builder().extents(0.0, 1.0).build(),
            Err(GameError::InvalidExtents { .. })
        ));
        assert!(matches!(
            Entity::builder().extents(1.0, -2.0).build(),
            Err(GameError::InvalidExtents { .. })
        ));

        let mut entity = Entity::new();
        assert!(entity.set_extents(f32::INFINITY, 1.0).is_err());
        assert_eq!((entity.width(), entity.height()), (1.0, 1.0));
        entity.set_extents(2.0, 3.0).unwrap();
        assert_eq!((entity.width(), entity.height()), (2.0, 3.0));
    }

    #[test]
    fn test_inactive_entity_does_not_move() {
        let mut entity = block(0.0, 1.0, 1.0, 1.0);
        entity.set_velocity(Vector3::new(3.0, -2.0, 0.0));
        entity.set_acceleration(Vector3::new(0.0, -9.8, 0.0));
        entity.set_movement(Vector3::new(1.0, 0.0, 0.0));
        entity.set_speed(4.0);

        // Land once so there are flags to preserve
        let floor = block(0.0, 0.0, 1.0, 1.0);
        entity.update(0.1, std::slice::from_ref(&floor));
        let flags = entity.collisions();
        assert!(flags.bottom);

        entity.deactivate();
        let position = entity.position();
        let velocity = entity.velocity();
        entity.update(1.0, &[floor, block(5.0, 5.0, 1.0, 1.0)]);

        assert_eq!(entity.position(), position);
        assert_eq!(entity.velocity(), velocity);
        assert_eq!(entity.collisions(), flags);
    }

    #[test]
    fn test_flags_reset_each_update() {
        let mut entity = block(0.0, 1.0, 1.0, 1.0);
        entity.set_velocity(Vector3::new(0.0, -2.0, 0.0));
        let floor = block(0.0, 0.0, 1.0, 1.0);

        entity.update(0.1, std::slice::from_ref(&floor));
        assert!(entity.collisions().bottom);

        // Resting on the floor with no velocity: nothing collides this step
        entity.update(0.1, std::slice::from_ref(&floor));
        assert_eq!(entity.collisions(), CollisionFlags::default());
    }

    #[test]
    fn test_check_collision_is_strict() {
        let a = block(0.0, 0.0, 2.0, 2.0);
        let touching = block(2.0, 0.0, 2.0, 2.0);
        let overlapping = block(1.9, 0.5, 2.0, 2.0);
        let above = block(0.0, 2.0, 2.0, 2.0);

        assert!(!a.check_collision(&touching));
        assert!(!a.check_collision(&above));
        assert!(a.check_collision(&overlapping));
        assert!(overlapping.check_collision(&a));
    }

    #[test]
    fn test_inactive_entities_never_collide() {
        let a = block(0.0, 0.0, 1.0, 1.0);
        let mut b = block(0.2, 0.2, 1.0, 1.0);
        assert!(a.check_collision(&b));

        b.deactivate();
        assert!(!a.check_collision(&b));
        assert!(!b.check_collision(&a));
    }

    #[test]
    fn test_inactive_collidable_is_skipped() {
        let mut entity = block(0.0, 1.0, 1.0, 1.0);
        entity.set_velocity(Vector3::new(0.0, -2.0, 0.0));
        let floor = Entity::builder().position(0.0, 0.0).inactive().build().unwrap();

        entity.update(0.1, &[floor]);
        assert_relative_eq!(entity.position().y, 0.8, epsilon = EPSILON);
        assert!(!entity.collisions().any());
    }

    #[test]
    fn test_falling_entity_lands_on_floor() {
        let mut entity = block(0.0, 1.0, 1.0, 1.0);
        entity.set_velocity(Vector3::new(0.0, -2.0, 0.0));
        let floor = block(0.0, 0.0, 1.0, 1.0);

        entity.update(0.1, &[floor]);

        assert_relative_eq!(entity.position().y, 1.0, epsilon = EPSILON);
        assert_eq!(entity.velocity().y, 0.0);
        assert_eq!(
            entity.collisions(),
            CollisionFlags {
                bottom: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_hitting_a_ceiling() {
        let mut entity = block(0.0, -1.0, 1.0, 1.0);
        entity.set_velocity(Vector3::new(0.0, 2.0, 0.0));
        let ceiling = block(0.0, 0.0, 1.0, 1.0);

        entity.update(0.1, &[ceiling]);

        assert_relative_eq!(entity.position().y, -1.0, epsilon = EPSILON);
        assert_eq!(entity.velocity().y, 0.0);
        assert!(entity.collisions().top);
        assert!(!entity.collisions().bottom);
    }

    #[test]
    fn test_walls_stop_horizontal_motion() {
        let wall = block(1.0, 0.0, 1.0, 1.0);

        let mut right = block(0.0, 0.0, 1.0, 1.0);
        right.set_movement(Vector3::new(1.0, 0.0, 0.0));
        right.set_speed(2.0);
        right.update(0.1, std::slice::from_ref(&wall));
        assert_relative_eq!(right.position().x, 0.0, epsilon = EPSILON);
        assert_eq!(right.velocity().x, 0.0);
        assert!(right.collisions().right);

        let mut left = block(2.0, 0.0, 1.0, 1.0);
        left.set_movement(Vector3::new(-1.0, 0.0, 0.0));
        left.set_speed(2.0);
        left.update(0.1, std::slice::from_ref(&wall));
        assert_relative_eq!(left.position().x, 2.0, epsilon = EPSILON);
        assert!(left.collisions().left);
    }

    #[test]
    fn test_y_resolves_before_x() {
        // Falling diagonally onto the corner of a block
        let mut entity = block(0.75, 1.0, 1.0, 1.0);
        entity.set_velocity(Vector3::new(0.0, -0.5, 0.0));
        entity.set_movement(Vector3::new(-1.0, 0.0, 0.0));
        entity.set_speed(0.5);
        let obstacle = block(0.0, 0.0, 1.0, 1.0);

        entity.update(0.25, &[obstacle]);

        // The y pass puts the box back on top, so the x pass sees no overlap
        assert!(entity.collisions().bottom);
        assert!(!entity.collisions().horizontal());
        assert_eq!(entity.position().y, 1.0);
        assert_eq!(entity.position().x, 0.625);
        assert_eq!(entity.velocity().x, -0.5);
    }

    #[test]
    fn test_last_overlapping_collidable_wins() {
        let low = block(0.0, 0.0, 1.0, 1.0);
        let high = block(0.25, 0.25, 1.0, 1.0);

        let mut entity = block(0.0, 1.0, 1.0, 1.0);
        entity.set_velocity(Vector3::new(0.0, -0.5, 0.0));
        entity.update(0.25, &[low.clone(), high.clone()]);

        // 0.875 -> 1.0 off the low block, then -> 1.25 off the high block
        assert_eq!(entity.position().y, 1.25);
        assert_eq!(entity.velocity().y, 0.0);
        assert!(entity.collisions().bottom);
        assert!(!entity.check_collision(&low));
        assert!(!entity.check_collision(&high));
    }

    #[test]
    fn test_collidable_order_changes_the_result() {
        let below = block(0.0, 0.0, 1.0, 1.0);
        let above = block(0.0, 1.5, 1.0, 1.0);

        let mut a = block(0.0, 1.0, 1.0, 1.0);
        a.set_velocity(Vector3::new(0.0, -0.5, 0.0));
        a.update(0.25, &[below.clone(), above.clone()]);

        let mut b = block(0.0, 1.0, 1.0, 1.0);
        b.set_velocity(Vector3::new(0.0, -0.5, 0.0));
        b.update(0.25, &[above, below]);

        // [below, above]: 0.875 -> 1.0, then the second correction lands on 1.5
        assert_eq!(a.position().y, 1.5);
        // [above, below]: 0.875 -> 1.25, which already clears the lower block
        assert_eq!(b.position().y, 1.25);
        assert!(a.collisions().bottom && b.collisions().bottom);
    }

    #[test]
    fn test_stationary_overlap_is_not_corrected() {
        let mut entity = block(0.0, 0.5, 1.0, 1.0);
        let floor = block(0.0, 0.0, 1.0, 1.0);
        assert!(entity.check_collision(&floor));

        entity.update(0.1, &[floor]);

        assert_relative_eq!(entity.position().y, 0.5, epsilon = EPSILON);
        assert!(!entity.collisions().any());
    }

    #[test]
    fn test_movement_overrides_horizontal_velocity() {
        let mut entity = Entity::new();
        entity.set_velocity(Vector3::new(7.0, 0.0, 0.0));
        entity.set_movement(Vector3::new(1.0, 0.0, 0.0));
        entity.set_speed(2.0);

        entity.update(0.1, &[]);
        assert_eq!(entity.velocity().x, 2.0);

        // Without input the previous velocity is discarded too
        entity.set_movement(Vector3::zeros());
        entity.update(0.1, &[]);
        assert_eq!(entity.velocity().x, 0.0);
    }

    #[test]
    fn test_acceleration_applies_after_movement() {
        let mut entity = Entity::new();
        entity.set_movement(Vector3::new(1.0, 0.0, 0.0));
        entity.set_speed(2.0);
        entity.set_acceleration(Vector3::new(1.0, -10.0, 0.0));

        entity.update(0.5, &[]);

        assert_relative_eq!(entity.velocity(), Vector3::new(2.5, -5.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(entity.position(), Vector3::new(1.25, -2.5, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_apply_force_accumulates() {
        let mut entity = Entity::new();
        entity.apply_force(Vector3::new(0.5, -1.5, 0.0));
        entity.apply_force(Vector3::new(0.5, 0.0, 0.0));
        assert_eq!(entity.acceleration(), Vector3::new(1.0, -1.5, 0.0));
    }

    #[test]
    fn test_model_matrix_is_translation() {
        let mut entity = Entity::new();
        entity.set_velocity(Vector3::new(0.0, 1.0, 0.0));
        entity.set_position(Vector3::new(1.0, 2.0, 0.5));
        entity.update(1.0, &[]);

        let expected = Matrix4::new_translation(&Vector3::new(1.0, 3.0, 0.5));
        assert_relative_eq!(entity.model_matrix(), expected, epsilon = EPSILON);
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        ModelMatrix(Matrix4<f32>),
        Texture(TextureId),
        Positions(usize),
        TexCoords(usize),
        Draw(usize),
        Disable,
    }

    #[derive(Default)]
    struct RecordingProgram {
        calls: Vec<Call>,
    }

    impl ShaderProgram for RecordingProgram {
        fn set_model_matrix(&mut self, matrix: &Matrix4<f32>) {
            self.calls.push(Call::ModelMatrix(*matrix));
        }

        fn bind_texture(&mut self, texture: TextureId) {
            self.calls.push(Call::Texture(texture));
        }

        fn set_position_attribute(&mut self, coords: &[f32]) {
            self.calls.push(Call::Positions(coords.len()));
        }

        fn set_tex_coord_attribute(&mut self, coords: &[f32]) {
            self.calls.push(Call::TexCoords(coords.len()));
        }

        fn draw_triangles(&mut self, vertex_count: usize) {
            self.calls.push(Call::Draw(vertex_count));
        }

        fn disable_attributes(&mut self) {
            self.calls.push(Call::Disable);
        }
    }

    #[test]
    fn test_render_call_order() {
        let entity = Entity::builder()
            .position(1.0, -1.0)
            .texture(TextureId(7))
            .build()
            .unwrap();
        let mut program = RecordingProgram::default();

        entity.render(&mut program, &crate::engine::program::quad_vertices(1.0, 1.0));

        assert_eq!(
            program.calls,
            vec![
                Call::ModelMatrix(entity.model_matrix()),
                Call::Texture(TextureId(7)),
                Call::Positions(12),
                Call::TexCoords(12),
                Call::Draw(6),
                Call::Disable,
            ]
        );
    }
}
