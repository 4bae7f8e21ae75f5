// SPDX-License-Identifier: Apache-2.0

//! Concrete implementations of the port traits.
//!
//! The feature modules (blog, auth, organizations) implement
//! [`FeatureModule`](crate::ports::FeatureModule); the console prompter and
//! the npm runner back the interactive and side-effecting ports.

pub mod auth;
pub mod blog;
pub mod console;
pub mod npm;
pub mod organizations;

// Re-export commonly used types
pub use auth::AuthModule;
pub use blog::BlogModule;
pub use console::ConsolePrompter;
pub use npm::NpmPackageManager;
pub use organizations::OrganizationsModule;
