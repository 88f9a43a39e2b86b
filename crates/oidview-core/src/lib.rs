//! oidview Core: scene composition and camera navigation for buffer viewing.
//!
//! This crate holds the entity/component scene graph (`GameObject`,
//! `Component`, `Stage`) and the camera transform engine that pans, zooms and
//! auto-fits a debugged buffer inside a resizable canvas. No windowing or GPU
//! dependencies: the host owns the surface and forwards input events.

pub mod components;
pub mod config;
pub mod error;
pub mod input;
pub mod math;
pub mod scene;

// Re-exports for convenience.
pub use components::buffer::Buffer;
pub use components::camera::{Camera, CameraView};
pub use config::CameraConfig;
pub use error::{ConfigError, SceneError};
pub use input::{Key, KeyboardState, ModifierKey, Viewport};
pub use math::{Mat4, Vec4};
pub use scene::{Component, EventProcessCode, GameObject, GameObjectId, SceneContext, Stage};
