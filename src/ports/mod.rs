// SPDX-License-Identifier: Apache-2.0

//! Port traits that the command handlers depend on.
//!
//! The handlers in the service and CLI layers talk to the outside world
//! only through these traits; the adapters module provides the production
//! implementations, and tests substitute scripted ones.

pub mod feature;
pub mod package;
pub mod prompt;

// Re-export commonly used traits
pub use feature::FeatureModule;
pub use package::PackageManager;
pub use prompt::Prompter;
