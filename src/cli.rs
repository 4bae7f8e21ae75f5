// SPDX-License-Identifier: Apache-2.0

//! Command-line interface.
//!
//! Wires the built-in feature modules, the configuration manager, the npm
//! runner, and the console prompter into the `add`, `remove`, and `list`
//! subcommands. The handlers themselves take the ports as trait objects so
//! tests can drive them with scripted prompters and a recording package
//! manager.

use crate::adapters::{
    AuthModule, BlogModule, ConsolePrompter, NpmPackageManager, OrganizationsModule,
};
use crate::domain::{ConfigError, ModuleName, Result};
use crate::ports::{FeatureModule, PackageManager, Prompter};
use crate::service::ConfigManager;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Feature module manager for TypeScript application configs.
#[derive(Debug, Parser)]
#[command(name = "modcfg", version, about)]
pub struct Cli {
    /// Project directory holding config.ts (defaults to the current one)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Install a feature module into the project
    Add {
        /// Module to install (blog, auth, organizations)
        module: String,
    },
    /// Remove a feature module from the project
    Remove {
        /// Module to remove
        module: String,
    },
    /// List the modules configured in the project
    List,
}

/// Runs a parsed command against the real console and npm.
pub fn run(cli: Cli) -> Result<()> {
    let root = cli.project_root.unwrap_or_else(|| PathBuf::from("."));
    let manager = ConfigManager::new(&root);
    let packages = NpmPackageManager::new(&root);
    let mut prompter = ConsolePrompter::new();

    match cli.command {
        Command::Add { module } => handle_add(&root, &manager, &packages, &mut prompter, &module),
        Command::Remove { module } => {
            handle_remove(&root, &manager, &packages, &mut prompter, &module)
        }
        Command::List => handle_list(&manager),
    }
}

/// The built-in feature modules, in presentation order.
fn builtin_modules() -> Vec<Box<dyn FeatureModule>> {
    vec![
        Box::new(BlogModule::new()),
        Box::new(AuthModule::new()),
        Box::new(OrganizationsModule::new()),
    ]
}

fn feature_module(name: &str) -> Result<Box<dyn FeatureModule>> {
    builtin_modules()
        .into_iter()
        .find(|module| module.name().as_ref() == name)
        .ok_or_else(|| ConfigError::UnknownModule {
            name: name.to_string(),
        })
}

fn handle_add(
    root: &Path,
    manager: &ConfigManager,
    packages: &dyn PackageManager,
    prompter: &mut dyn Prompter,
    name: &str,
) -> Result<()> {
    let module = feature_module(name)?;

    if manager.has_module(&module.name()) && module.is_scaffolded(root) {
        println!("The {} module is already installed.", module.name());
        // The blog offers its article generator as a follow-up.
        if name == "blog" && prompter.confirm("Create a new article?")? {
            if let Some(path) = BlogModule::new().create_article(root, prompter)? {
                println!("Article created: {}", path.display());
            }
        }
        return Ok(());
    }

    if name == "organizations" && !manager.has_module(&ModuleName::new_unchecked("auth")) {
        println!("Note: organizations builds on the auth module; install it first for sign-in support.");
    }

    let value = module.configure(prompter)?;
    manager.add_module(&module.name(), &value)?;

    if !module.packages().is_empty() {
        packages.install(module.packages())?;
    }
    module.scaffold(root, prompter)?;

    println!("\nModule {} installed.", module.name());
    print_env_instructions(module.as_ref());
    println!("Restart the dev server for the changes to take effect:\n   npm run dev");
    Ok(())
}

fn handle_remove(
    root: &Path,
    manager: &ConfigManager,
    packages: &dyn PackageManager,
    prompter: &mut dyn Prompter,
    name: &str,
) -> Result<()> {
    let module = feature_module(name)?;

    if !manager.has_module(&module.name()) {
        println!("The {} module is not installed; nothing to remove.", module.name());
        return Ok(());
    }

    println!("This removes the {} entry from config.ts and module-owned files.", module.name());
    println!("Your content and data files are kept.");
    if !prompter.confirm(&format!("Remove the {} module?", module.name()))? {
        println!("Cancelled; the module stays installed.");
        return Ok(());
    }

    manager.remove_module(&module.name())?;

    let to_uninstall = removable_packages(manager, module.as_ref());
    if !to_uninstall.is_empty() {
        let refs: Vec<&str> = to_uninstall.iter().map(String::as_str).collect();
        if let Err(error) = packages.uninstall(&refs) {
            println!("Warning: could not uninstall packages ({}).", error);
            println!("Remove them manually: npm uninstall {}", refs.join(" "));
        }
    }
    if let Err(error) = module.teardown(root) {
        println!("Warning: could not clean up module files ({}).", error);
    }

    println!("Module {} removed.", module.name());
    Ok(())
}

/// The module's packages minus any still needed by another installed module.
fn removable_packages(manager: &ConfigManager, module: &dyn FeatureModule) -> Vec<String> {
    let others = builtin_modules();
    let still_needed: Vec<&str> = others
        .iter()
        .filter(|other| other.name() != module.name() && manager.has_module(&other.name()))
        .flat_map(|other| other.packages().to_vec())
        .collect();

    module
        .packages()
        .iter()
        .filter(|package| !still_needed.contains(package))
        .map(|package| package.to_string())
        .collect()
}

fn handle_list(manager: &ConfigManager) -> Result<()> {
    let modules = manager.list_modules()?;
    if modules.is_empty() {
        println!("No modules configured.");
        return Ok(());
    }
    for (name, value) in modules {
        let state = if value.is_enabled() { "enabled" } else { "disabled" };
        println!("{:<16} {}", name, state);
    }
    Ok(())
}

fn print_env_instructions(module: &dyn FeatureModule) {
    let manifest = module.manifest();
    if manifest.is_empty() {
        return;
    }
    println!("\nAdd these variables to your .env file:");
    for var in &manifest.env_vars {
        let marker = if var.required { "required" } else { "optional" };
        match &var.default_value {
            Some(default) => println!(
                "   {}= ({}, defaults to {}) {}",
                var.key, marker, default, var.description
            ),
            None => println!("   {}= ({}) {}", var.key, marker, var.description),
        }
    }
}
