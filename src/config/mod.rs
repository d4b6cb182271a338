//! Configuration module for hoa-ledger
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::HoaPaths;
pub use settings::Settings;
