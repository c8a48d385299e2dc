//! Utility modules: build info, logging, persistence, settings and saves.

pub mod build_info;
pub mod logging;
pub mod persistence;
pub mod save_manager;
pub mod settings;

pub use save_manager::{SaveManager, SaveRecord};
pub use settings::Settings;
