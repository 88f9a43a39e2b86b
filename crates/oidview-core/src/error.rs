//! Error types for scene lookup and configuration.

/// Errors raised while building or querying a [`Stage`](crate::Stage).
///
/// These are contract violations by whoever assembled the scene: the graph
/// is built once by a trusted builder, so none of them are retryable.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("game object not found: {0}")]
    GameObjectNotFound(String),

    #[error("component `{component}` not found on game object `{object}`")]
    ComponentNotFound { object: String, component: String },

    #[error("game object `{0}` already exists on this stage")]
    DuplicateGameObject(String),

    #[error("game object handle refers to a removed object")]
    StaleHandle,

    #[error("component `{component}` on `{object}` failed to initialize")]
    InitializationFailed { object: String, component: String },

    #[error("component `{component}` on `{object}` rejected the buffer update")]
    BufferUpdateRejected { object: String, component: String },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Errors raised while loading a [`CameraConfig`](crate::CameraConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse camera config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid camera config: {0}")]
    Invalid(&'static str),
}
