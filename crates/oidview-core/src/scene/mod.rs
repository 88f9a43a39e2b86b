//! Entity/component scene graph: components, game objects and the stage.

pub mod component;
pub mod context;
pub mod game_object;
pub mod stage;

pub use component::{Component, EventProcessCode};
pub use context::SceneContext;
pub use game_object::GameObject;
pub use stage::{GameObjectId, Stage};
