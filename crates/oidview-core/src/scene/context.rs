//! Per-callback view of the stage handed to a component.

use super::game_object::GameObject;
use super::stage::{GameObjectId, Stage};
use crate::error::SceneError;
use crate::input::{KeyboardState, Viewport};
use crate::math::Mat4;

/// What a component can see and touch while one of its callbacks runs.
///
/// The owner relation is a handle, never a borrow held by the component, so
/// buffers can be swapped out between callbacks without dangling references.
pub struct SceneContext<'a> {
    stage: &'a mut Stage,
    owner: GameObjectId,
}

impl<'a> SceneContext<'a> {
    pub(crate) fn new(stage: &'a mut Stage, owner: GameObjectId) -> Self {
        Self { stage, owner }
    }

    pub fn owner_id(&self) -> GameObjectId {
        self.owner
    }

    /// The game object the running component belongs to.
    pub fn owner(&self) -> Result<&GameObject, SceneError> {
        self.stage.game_object(self.owner).ok_or(SceneError::StaleHandle)
    }

    pub fn owner_pose(&self) -> Result<Mat4, SceneError> {
        self.owner().map(GameObject::pose)
    }

    /// Replace the owner's pose. No-op if the owner has been removed.
    pub fn set_owner_pose(&mut self, pose: Mat4) {
        match self.stage.game_object_mut(self.owner) {
            Some(owner) => owner.set_pose(pose),
            None => tracing::trace!("pose update for a removed game object dropped"),
        }
    }

    pub fn stage(&self) -> &Stage {
        self.stage
    }

    pub fn viewport(&self) -> Viewport {
        self.stage.viewport()
    }

    pub fn keyboard(&self) -> &KeyboardState {
        self.stage.keyboard()
    }

    /// Ask the host to redraw on its next frame.
    pub fn request_render_update(&mut self) {
        self.stage.request_render_update();
    }
}
