// SPDX-License-Identifier: Apache-2.0

//! Service layer orchestrating the domain engine against the file system.

pub mod config_manager;

// Re-export commonly used types
pub use config_manager::ConfigManager;
