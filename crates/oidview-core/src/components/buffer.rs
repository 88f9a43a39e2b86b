//! The displayed buffer, as seen by the navigation code.
//!
//! Pixel storage and texture upload belong to the host; this component only
//! carries the buffer's extents and its on-screen orientation, which the
//! camera needs to fit and center the view.

use std::any::Any;

use crate::math::quarter_turn;
use crate::scene::{Component, GameObject, SceneContext};

/// Name of the game object that holds the displayed buffer.
pub const BUFFER_OBJECT: &str = "buffer";
/// Name the [`Buffer`] component is registered under.
pub const BUFFER_COMPONENT: &str = "buffer_component";

/// Extents and orientation of the buffer being viewed.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    /// Width in buffer-local units (pixels).
    pub buffer_width_f: f32,
    /// Height in buffer-local units (pixels).
    pub buffer_height_f: f32,
    /// Counter-clockwise quarter turns applied to the buffer's pose.
    rotation: i32,
}

impl Buffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer_width_f: width as f32,
            buffer_height_f: height as f32,
            rotation: 0,
        }
    }

    /// A fresh `"buffer"` game object holding a buffer of the given size.
    pub fn game_object(width: u32, height: u32) -> GameObject {
        GameObject::new(BUFFER_OBJECT).with_component(BUFFER_COMPONENT, Self::new(width, height))
    }

    /// Quarter turns, normalized to `0..4`.
    pub fn rotation(&self) -> i32 {
        self.rotation.rem_euclid(4)
    }

    pub fn rotate_90_cw(&mut self, ctx: &mut SceneContext<'_>) {
        self.rotate_by(ctx, -1);
    }

    pub fn rotate_90_ccw(&mut self, ctx: &mut SceneContext<'_>) {
        self.rotate_by(ctx, 1);
    }

    fn rotate_by(&mut self, ctx: &mut SceneContext<'_>, turns: i32) {
        self.rotation = (self.rotation + turns).rem_euclid(4);
        self.update_object_pose(ctx);
        ctx.request_render_update();
        tracing::debug!("buffer rotated to {} quarter turns", self.rotation);
    }

    fn update_object_pose(&self, ctx: &mut SceneContext<'_>) {
        ctx.set_owner_pose(quarter_turn(self.rotation));
    }
}

impl Component for Buffer {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn post_initialize(&mut self, ctx: &mut SceneContext<'_>) -> bool {
        self.update_object_pose(ctx);
        true
    }

    fn post_buffer_update(&mut self, ctx: &mut SceneContext<'_>) -> bool {
        self.update_object_pose(ctx);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Mat4, Vec4};
    use crate::scene::Stage;

    fn stage_with_buffer(width: u32, height: u32) -> Stage {
        let mut stage = Stage::new();
        stage.add_game_object(Buffer::game_object(width, height)).unwrap();
        stage
    }

    fn buffer_pose(stage: &Stage) -> Mat4 {
        stage.require_game_object(BUFFER_OBJECT).unwrap().pose()
    }

    #[test]
    fn extents_are_exposed_as_floats() {
        let buffer = Buffer::new(640, 480);
        assert_eq!(buffer.buffer_width_f, 640.0);
        assert_eq!(buffer.buffer_height_f, 480.0);
        assert_eq!(buffer.rotation(), 0);
    }

    #[test]
    fn game_object_uses_well_known_names() {
        let stage = stage_with_buffer(8, 4);
        let (_, buffer) = stage
            .require_component::<Buffer>(BUFFER_OBJECT, BUFFER_COMPONENT)
            .unwrap();
        assert_eq!(buffer.buffer_width_f, 8.0);
    }

    #[test]
    fn initialization_keeps_identity_pose() {
        let mut stage = stage_with_buffer(8, 4);
        stage.post_initialize().unwrap();
        assert_eq!(buffer_pose(&stage), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_updates_pose_and_requests_render() {
        let mut stage = stage_with_buffer(8, 4);
        stage
            .with_component_mut(BUFFER_OBJECT, BUFFER_COMPONENT, |b: &mut Buffer, ctx| {
                b.rotate_90_ccw(ctx)
            })
            .unwrap();

        assert!(stage.take_render_request());
        let corner = buffer_pose(&stage) * Vec4::new(8.0, 4.0, 0.0, 1.0);
        assert_eq!(corner, Vec4::new(-4.0, 8.0, 0.0, 1.0));
    }

    #[test]
    fn full_turn_restores_identity() {
        let mut stage = stage_with_buffer(8, 4);
        for _ in 0..4 {
            stage
                .with_component_mut(BUFFER_OBJECT, BUFFER_COMPONENT, |b: &mut Buffer, ctx| {
                    b.rotate_90_cw(ctx)
                })
                .unwrap();
        }

        let (_, buffer) = stage
            .require_component::<Buffer>(BUFFER_OBJECT, BUFFER_COMPONENT)
            .unwrap();
        assert_eq!(buffer.rotation(), 0);
        assert_eq!(buffer_pose(&stage), Mat4::IDENTITY);
    }
}
