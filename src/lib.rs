// SPDX-License-Identifier: Apache-2.0

//! A hexagonal architecture feature-module manager for TypeScript app configs.
//!
//! This crate toggles optional feature modules (blog, auth, organizations) in
//! a project's `config.ts` by rewriting the anchored `modules: { ... }`
//! section of the document while leaving every other byte untouched. All
//! rewrites run under a backup guard: the file is snapshotted first,
//! re-validated after the rewrite, and restored byte-for-byte if anything
//! goes wrong.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and the text engine (`ModuleName`,
//!   `ModuleValue`, the code-aware scanner, the section locator, errors)
//! - **Ports**: Trait definitions for the outside world (`FeatureModule`,
//!   `Prompter`, `PackageManager`)
//! - **Adapters**: The built-in feature modules plus console and npm
//!   implementations
//! - **Service**: `ConfigManager`, orchestrating backup, rewrite, and
//!   validation against the file system
//!
//! # Feature Flags
//!
//! - `cli`: Enable the clap-based command-line binary (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use modcfg::prelude::*;
//!
//! # fn main() -> modcfg::domain::Result<()> {
//! let manager = ConfigManager::new("/path/to/project");
//! let blog = ModuleName::new("blog")?;
//! manager.add_module(&blog, &ModuleValue::Bool(true))?;
//! for (name, value) in manager.list_modules()? {
//!     println!("{}: {}", name, value);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
#[cfg(feature = "cli")]
pub mod cli;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{AuthModule, BlogModule, OrganizationsModule};
    pub use crate::domain::{
        ConfigError, EnvVarSpec, ModuleManifest, ModuleName, ModuleValue, Result, SectionQuery,
    };
    pub use crate::ports::{FeatureModule, PackageManager, Prompter};
    pub use crate::service::ConfigManager;
}
