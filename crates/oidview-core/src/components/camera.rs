//! Pan/zoom camera for the buffer viewport.
//!
//! The camera owns a pure diagonal zoom matrix (`scale`), a pan offset in
//! buffer-local units and an orthographic projection sized to the canvas.
//! Its game object's pose is always `scale · T(-pan)`; the renderer inverts
//! that pose to get the view matrix, so operations composed here are applied
//! to world coordinates in reverse order.
//!
//! Zoom is exponential: the linear zoom is `zoom_factor ^ zoom_power`, and
//! `scale` holds its reciprocal. Every mutation folds whatever translation
//! a composition leaves in `scale` back into the pan offset and zeroes it,
//! so `scale` never carries position.

use std::any::Any;

use serde::{Deserialize, Serialize};

use super::buffer::{BUFFER_COMPONENT, BUFFER_OBJECT, Buffer};
use crate::config::CameraConfig;
use crate::error::SceneError;
use crate::input::Key;
use crate::math::{self, Mat4, Mat4Ext, Vec4};
use crate::scene::{Component, EventProcessCode, GameObject, SceneContext, Stage};

/// Name of the game object that holds the camera.
pub const CAMERA_OBJECT: &str = "camera";
/// Name the [`Camera`] component is registered under.
pub const CAMERA_COMPONENT: &str = "camera_component";

/// Snapshot of a camera's navigation state, used to link views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub zoom_power: f32,
    pub camera_pos_x: f32,
    pub camera_pos_y: f32,
    /// Diagonal of the zoom matrix (x, y).
    pub scale: [f32; 2],
}

/// Navigation engine for the buffer viewport.
#[derive(Debug, Clone)]
pub struct Camera {
    projection: Mat4,
    zoom_power: f32,
    camera_pos_x: f32,
    camera_pos_y: f32,
    scale: Mat4,
    canvas_width: i32,
    canvas_height: i32,
    config: CameraConfig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            projection: Mat4::IDENTITY,
            zoom_power: 0.0,
            camera_pos_x: 0.0,
            camera_pos_y: 0.0,
            scale: Mat4::IDENTITY,
            canvas_width: 0,
            canvas_height: 0,
            config,
        }
    }

    /// A fresh `"camera"` game object holding a camera.
    pub fn game_object(config: CameraConfig) -> GameObject {
        GameObject::new(CAMERA_OBJECT).with_component(CAMERA_COMPONENT, Self::new(config))
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn zoom_power(&self) -> f32 {
        self.zoom_power
    }

    /// Pan offset in buffer-local units.
    pub fn camera_pos(&self) -> (f32, f32) {
        (self.camera_pos_x, self.camera_pos_y)
    }

    /// The zoom matrix. Its translation entries are always zero.
    pub fn scale(&self) -> Mat4 {
        self.scale
    }

    /// Orthographic projection spanning the canvas, rebuilt on resize.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn canvas_size(&self) -> (i32, i32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Linear zoom level, `zoom_factor ^ zoom_power`.
    pub fn compute_zoom(&self) -> f32 {
        self.config.zoom_factor.powf(self.zoom_power)
    }

    /// The pose this camera keeps on its game object.
    pub fn pose(&self) -> Mat4 {
        let position = Vec4::new(-self.camera_pos_x, -self.camera_pos_y, 0.0, 1.0);
        self.scale * math::translation(position)
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    /// Zoom by `delta` steps, keeping the point under `center_ndc` fixed.
    ///
    /// Positive `delta` zooms in.
    pub fn scale_at(&mut self, ctx: &mut SceneContext<'_>, center_ndc: Vec4, delta: f32) {
        let vp_inv = self.pose() * self.projection.inv();
        let delta_zoom = self.config.zoom_factor.powf(-delta);
        let center_pos = self.scale.inv() * vp_inv * center_ndc;

        self.scale = self.scale
            * math::translation(center_pos)
            * math::scale(Vec4::new(delta_zoom, delta_zoom, 1.0, 1.0))
            * math::translation(-center_pos);

        // Move the translation picked up above into the pan offset.
        self.camera_pos_x -= self.scale.at(0, 3) / self.scale.at(0, 0);
        self.camera_pos_y -= self.scale.at(1, 3) / self.scale.at(1, 1);
        self.scale.set_at(0, 3, 0.0);
        self.scale.set_at(1, 3, 0.0);

        // Keep compute_zoom() on par with the accumulated matrix zoom.
        self.zoom_power += delta;

        tracing::trace!(
            "zoom {delta:+} at ({}, {}), power now {}",
            center_ndc.x,
            center_ndc.y,
            self.zoom_power
        );

        self.update_object_pose(ctx);
        ctx.request_render_update();
    }

    /// Pick the largest whole zoom power at which the buffer fits the canvas.
    ///
    /// Requires the canvas size (see `window_resized`). Discards any zoom
    /// translation; the pan offset is left alone. Fails on a zoom factor that
    /// does not grow, since the fit search would never end.
    pub fn set_initial_zoom(&mut self, stage: &Stage) -> Result<(), SceneError> {
        self.config.validate()?;
        let (buffer_obj, buffer) =
            stage.require_component::<Buffer>(BUFFER_OBJECT, BUFFER_COMPONENT)?;
        let buf_dim = buffer_obj.pose()
            * Vec4::new(buffer.buffer_width_f, buffer.buffer_height_f, 0.0, 1.0);
        let (buf_w, buf_h) = (buf_dim.x.abs(), buf_dim.y.abs());
        let (canvas_w, canvas_h) = (self.canvas_width as f32, self.canvas_height as f32);

        self.zoom_power = 0.0;

        if !(buf_w > 0.0 && buf_h > 0.0 && canvas_w > 0.0 && canvas_h > 0.0) {
            tracing::warn!(
                "cannot fit {buf_w}x{buf_h} buffer into {canvas_w}x{canvas_h} canvas, keeping unit zoom"
            );
            self.reset_scale();
            return Ok(());
        }

        if canvas_w > buf_w && canvas_h > buf_h {
            // Zoom in while the next power still fits, then back off one step.
            self.zoom_power += 1.0;
            let mut new_zoom = self.compute_zoom();
            while canvas_w > new_zoom * buf_w && canvas_h > new_zoom * buf_h {
                self.zoom_power += 1.0;
                new_zoom = self.compute_zoom();
            }
            self.zoom_power -= 1.0;
        } else if canvas_w < buf_w || canvas_h < buf_h {
            // Zoom out until the buffer fits.
            self.zoom_power -= 1.0;
            let mut new_zoom = self.compute_zoom();
            while canvas_w < new_zoom * buf_w || canvas_h < new_zoom * buf_h {
                self.zoom_power -= 1.0;
                new_zoom = self.compute_zoom();
            }
        }

        self.reset_scale();
        tracing::debug!(
            "fitted {buf_w}x{buf_h} buffer into {canvas_w}x{canvas_h} canvas at zoom power {}",
            self.zoom_power
        );
        Ok(())
    }

    /// Center the view on `(x, y)` in buffer-local coordinates.
    pub fn move_to(
        &mut self,
        ctx: &mut SceneContext<'_>,
        x: f32,
        y: f32,
    ) -> Result<(), SceneError> {
        let (buffer_pose, centered_coord) = {
            let (buffer_obj, buffer) = ctx
                .stage()
                .require_component::<Buffer>(BUFFER_OBJECT, BUFFER_COMPONENT)?;
            let centered = Vec4::new(
                buffer.buffer_width_f * 0.5 - x,
                buffer.buffer_height_f * 0.5 - y,
                0.0,
                1.0,
            );
            (buffer_obj.pose(), centered)
        };

        // Drop any residual zoom translation before mapping the goal.
        self.reset_scale();

        let goal = self.scale.inv() * buffer_pose * centered_coord;
        self.camera_pos_x = goal.x;
        self.camera_pos_y = goal.y;

        tracing::debug!("camera moved to ({x}, {y})");
        self.update_object_pose(ctx);
        ctx.request_render_update();
        Ok(())
    }

    /// The buffer-local coordinate currently at the center of the canvas.
    pub fn get_position(&self, stage: &Stage) -> Result<Vec4, SceneError> {
        let (buffer_obj, buffer) =
            stage.require_component::<Buffer>(BUFFER_OBJECT, BUFFER_COMPONENT)?;
        let pos_vec = Vec4::new(self.camera_pos_x, self.camera_pos_y, 0.0, 1.0);
        let offset = buffer_obj.pose().inv() * self.scale * pos_vec;

        Ok(Vec4::new(
            buffer.buffer_width_f * 0.5 - offset.x,
            buffer.buffer_height_f * 0.5 - offset.y,
            0.0,
            1.0,
        ))
    }

    /// Reset the pan and fit the buffer to the canvas again.
    pub fn recenter_camera(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        self.camera_pos_x = 0.0;
        self.camera_pos_y = 0.0;

        self.set_initial_zoom(ctx.stage())?;
        self.update_object_pose(ctx);
        ctx.request_render_update();
        Ok(())
    }

    // ── Linked views ────────────────────────────────────────────────────────

    pub fn view_state(&self) -> CameraView {
        CameraView {
            zoom_power: self.zoom_power,
            camera_pos_x: self.camera_pos_x,
            camera_pos_y: self.camera_pos_y,
            scale: [self.scale.at(0, 0), self.scale.at(1, 1)],
        }
    }

    /// Adopt another camera's zoom and pan. The canvas and projection stay
    /// this camera's own.
    pub fn apply_view_state(&mut self, ctx: &mut SceneContext<'_>, view: &CameraView) {
        self.zoom_power = view.zoom_power;
        self.camera_pos_x = view.camera_pos_x;
        self.camera_pos_y = view.camera_pos_y;
        self.scale = math::scale(Vec4::new(view.scale[0], view.scale[1], 1.0, 1.0));

        self.update_object_pose(ctx);
        ctx.request_render_update();
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn resize(&mut self, width: i32, height: i32) {
        self.projection = math::ortho(width as f32 / 2.0, height as f32 / 2.0, -1.0, 1.0);
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Rebuild `scale` as a pure diagonal at the current zoom power.
    fn reset_scale(&mut self) {
        let zoom = 1.0 / self.compute_zoom();
        self.scale = math::scale(Vec4::new(zoom, zoom, 1.0, 1.0));
    }

    fn update_object_pose(&self, ctx: &mut SceneContext<'_>) {
        ctx.set_owner_pose(self.pose());
    }

    /// Keyboard pan, polled once per update while the modifier is held.
    fn handle_key_events(&mut self, ctx: &mut SceneContext<'_>) {
        let keyboard = ctx.keyboard();
        if !keyboard.is_modifier_key_pressed(self.config.navigation_modifier) {
            return;
        }

        let step = self.config.pan_step;
        let mut delta_pos = Vec4::ZERO;
        let mut intercepted = false;

        if keyboard.is_key_pressed(Key::Up) {
            delta_pos.y = -step;
            intercepted = true;
        } else if keyboard.is_key_pressed(Key::Down) {
            delta_pos.y = step;
            intercepted = true;
        }

        if keyboard.is_key_pressed(Key::Left) {
            delta_pos.x = -step;
            intercepted = true;
        } else if keyboard.is_key_pressed(Key::Right) {
            delta_pos.x = step;
            intercepted = true;
        }

        if intercepted {
            self.camera_pos_x -= delta_pos.x + self.scale.at(0, 3);
            self.camera_pos_y -= delta_pos.y + self.scale.at(1, 3);
            self.reset_scale();

            tracing::trace!("keyboard pan to ({}, {})", self.camera_pos_x, self.camera_pos_y);
            self.update_object_pose(ctx);
            ctx.request_render_update();
        }
    }
}

impl Component for Camera {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn post_initialize(&mut self, ctx: &mut SceneContext<'_>) -> bool {
        let viewport = ctx.viewport();
        self.resize(viewport.width, viewport.height);

        if let Err(e) = self.set_initial_zoom(ctx.stage()) {
            tracing::warn!("camera could not fit the buffer: {e}");
            return false;
        }
        self.update_object_pose(ctx);
        true
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) {
        self.handle_key_events(ctx);
    }

    fn key_press_event(&mut self, ctx: &mut SceneContext<'_>, key: Key) -> EventProcessCode {
        if !ctx
            .keyboard()
            .is_modifier_key_pressed(self.config.navigation_modifier)
        {
            return EventProcessCode::Ignored;
        }

        let screen_center = Vec4::new(0.0, 0.0, 0.0, 1.0);
        match key {
            Key::Plus => {
                self.scale_at(ctx, screen_center, 1.0);
                EventProcessCode::Intercepted
            }
            Key::Minus => {
                self.scale_at(ctx, screen_center, -1.0);
                EventProcessCode::Intercepted
            }
            // Panning happens in update(); just keep arrows from propagating.
            key if key.is_arrow() => EventProcessCode::Intercepted,
            _ => EventProcessCode::Ignored,
        }
    }

    fn mouse_drag_event(
        &mut self,
        ctx: &mut SceneContext<'_>,
        dx: i32,
        dy: i32,
    ) -> EventProcessCode {
        // Raw pixel deltas, deliberately not scaled by the zoom level.
        self.camera_pos_x += dx as f32;
        self.camera_pos_y += dy as f32;

        self.update_object_pose(ctx);
        if dx != 0 || dy != 0 {
            ctx.request_render_update();
        }
        EventProcessCode::Intercepted
    }

    fn scroll_callback(&mut self, ctx: &mut SceneContext<'_>, delta: f32) -> EventProcessCode {
        let (x, y) = ctx.viewport().mouse_ndc();
        self.scale_at(ctx, Vec4::new(x, y, 0.0, 1.0), delta);
        EventProcessCode::Intercepted
    }

    fn window_resized(
        &mut self,
        _ctx: &mut SceneContext<'_>,
        width: i32,
        height: i32,
    ) -> EventProcessCode {
        self.resize(width, height);
        EventProcessCode::Ignored
    }
}
