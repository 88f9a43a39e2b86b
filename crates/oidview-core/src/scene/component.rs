//! The capability interface every scene component implements.

use std::any::Any;

use super::context::SceneContext;
use crate::input::Key;

/// Outcome of an input callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventProcessCode {
    /// The component consumed the event; later handlers should not see it.
    Intercepted,
    /// The component did not act on the event.
    Ignored,
}

impl EventProcessCode {
    pub const fn is_intercepted(&self) -> bool {
        matches!(self, Self::Intercepted)
    }
}

/// A unit of behaviour attached to exactly one [`GameObject`](super::GameObject).
///
/// Every callback has a no-op default, so a component only implements the
/// part of the lifecycle and input surface it cares about. While a callback
/// runs the component is detached from its owner; the [`SceneContext`] gives
/// it access to the owner's pose and to the rest of the stage.
pub trait Component {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Called once after the scene is assembled. Returning `false` rejects
    /// the whole scene.
    fn post_initialize(&mut self, _ctx: &mut SceneContext<'_>) -> bool {
        true
    }

    /// Called once per tick before rendering.
    fn update(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// Called when the displayed buffer's contents or geometry changed.
    fn post_buffer_update(&mut self, _ctx: &mut SceneContext<'_>) -> bool {
        true
    }

    fn key_press_event(&mut self, _ctx: &mut SceneContext<'_>, _key: Key) -> EventProcessCode {
        EventProcessCode::Ignored
    }

    fn mouse_drag_event(
        &mut self,
        _ctx: &mut SceneContext<'_>,
        _dx: i32,
        _dy: i32,
    ) -> EventProcessCode {
        EventProcessCode::Ignored
    }

    fn scroll_callback(&mut self, _ctx: &mut SceneContext<'_>, _delta: f32) -> EventProcessCode {
        EventProcessCode::Ignored
    }

    fn window_resized(
        &mut self,
        _ctx: &mut SceneContext<'_>,
        _width: i32,
        _height: i32,
    ) -> EventProcessCode {
        EventProcessCode::Ignored
    }
}
