//! # Core Module
//!
//! Shared configuration for every subsystem of the cubemap scene.

pub mod config;

pub use config::{
    ApplicationConfig,
    AssetConfig,
    Config,
    ConfigError,
    EngineConfig,
    PreviewConfig,
    SceneConfig,
};
