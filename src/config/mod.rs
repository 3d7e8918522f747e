//! Configuration module for gestion-sol
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::GestionPaths;
pub use settings::Settings;
