//! Components shipped with the viewer: the displayed buffer and the camera.

pub mod buffer;
pub mod camera;
