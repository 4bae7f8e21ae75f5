// SPDX-License-Identifier: Apache-2.0

//! Domain layer containing core types and the text-processing engine.
//!
//! This module holds the pure logic of the crate: module names and values,
//! the error taxonomy, the code-aware delimiter scanner, the modules-section
//! locator, and the entry parser. Nothing in here performs I/O; the service
//! layer orchestrates these pieces against the file system.

pub mod errors;
pub mod manifest;
pub mod module_name;
pub mod module_value;
pub mod object;
pub mod scan;
pub mod section;

// Re-export commonly used types
pub use errors::{ConfigError, Result};
pub use manifest::{EnvVarSpec, ModuleManifest};
pub use module_name::ModuleName;
pub use module_value::ModuleValue;
pub use section::{ModulesSection, SectionQuery};
