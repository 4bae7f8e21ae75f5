// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the configuration mutation engine.
//!
//! These tests drive `ConfigManager` and the feature modules against real
//! files in temp directories, covering the full add/remove lifecycle and
//! the rollback guarantee.

mod common;

use common::{doc_with_modules, project_with, ScriptedPrompter, BARE_DOC};
use modcfg::adapters::{AuthModule, BlogModule, OrganizationsModule};
use modcfg::domain::{ConfigError, ModuleName, ModuleValue};
use modcfg::ports::FeatureModule;
use modcfg::service::ConfigManager;
use std::fs;
use tempfile::TempDir;

fn name(s: &str) -> ModuleName {
    ModuleName::new(s).unwrap()
}

#[test]
fn test_add_to_document_without_section() {
    let (_dir, manager) = project_with(BARE_DOC);
    manager.add_module(&name("blog"), &ModuleValue::Bool(true)).unwrap();

    let doc = fs::read_to_string(manager.config_path()).unwrap();
    assert!(doc.contains("// === APPLICATION MODULES ==="));
    assert!(doc.contains("modules: {\n    blog: true\n  }"));
    assert!(doc.trim_end().ends_with("} as const;"));
    assert!(manager.validate_config());
}

#[test]
fn test_add_second_module_recovers_both() {
    let (_dir, manager) = project_with(BARE_DOC);
    manager.add_module(&name("blog"), &ModuleValue::Bool(true)).unwrap();

    let auth = AuthModule::new().default_config();
    manager.add_module(&name("auth"), &auth).unwrap();

    let modules = manager.list_modules().unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0], (name("blog"), ModuleValue::Bool(true)));
    assert_eq!(modules[1].0, name("auth"));
    assert_eq!(modules[1].1, auth);
}

#[test]
fn test_has_module_on_missing_file() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path());
    assert!(!manager.has_module(&name("blog")));
}

#[test]
fn test_remove_nonexistent_leaves_file_unchanged() {
    let original = doc_with_modules("    blog: true");
    let (_dir, manager) = project_with(&original);

    assert!(!manager.remove_module(&name("payments")).unwrap());
    assert_eq!(fs::read_to_string(manager.config_path()).unwrap(), original);
}

#[test]
fn test_removing_last_module_excises_section() {
    let (_dir, manager) = project_with(BARE_DOC);
    manager.add_module(&name("blog"), &ModuleValue::Bool(true)).unwrap();
    assert!(manager.remove_module(&name("blog")).unwrap());

    let doc = fs::read_to_string(manager.config_path()).unwrap();
    assert!(!doc.contains("// === APPLICATION MODULES ==="));
    assert!(!doc.contains("modules:"));
    assert!(manager.validate_config());
}

#[test]
fn test_failed_mutation_restores_original_bytes() {
    let original = doc_with_modules("    blog: true");
    let (_dir, manager) = project_with(&original);

    let broken = ModuleValue::Raw("{ unbalanced".to_string());
    let result = manager.add_module(&name("auth"), &broken);
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));

    assert_eq!(fs::read_to_string(manager.config_path()).unwrap(), original);
    // The guard cleans up its snapshot too.
    assert!(!manager.config_path().with_extension("ts.backup").exists());
}

#[test]
fn test_remove_then_add_round_trip() {
    let (_dir, manager) = project_with(BARE_DOC);
    let value = OrganizationsModule::new().default_config();

    manager.add_module(&name("organizations"), &value).unwrap();
    assert!(manager.remove_module(&name("organizations")).unwrap());
    manager.add_module(&name("organizations"), &value).unwrap();

    let modules = manager.list_modules().unwrap();
    assert_eq!(modules, vec![(name("organizations"), value)]);
    assert!(manager.validate_config());
}

#[test]
fn test_rewrite_survives_braces_in_strings_and_comments() {
    let body = "    blog: {\n      // closing brace in a comment: }\n      \
                prefix: \"/blog/{id}\"\n    }";
    let (_dir, manager) = project_with(&doc_with_modules(body));

    manager.add_module(&name("auth"), &ModuleValue::Bool(true)).unwrap();

    let modules = manager.list_modules().unwrap();
    assert_eq!(modules.len(), 2);
    let doc = fs::read_to_string(manager.config_path()).unwrap();
    assert!(doc.contains("\"/blog/{id}\""));
    assert!(manager.validate_config());
}

#[test]
fn test_update_existing_module_in_place() {
    let (_dir, manager) = project_with(BARE_DOC);
    manager.add_module(&name("auth"), &ModuleValue::Bool(true)).unwrap();
    manager.add_module(&name("blog"), &ModuleValue::Bool(true)).unwrap();

    let updated = AuthModule::new().default_config();
    manager.add_module(&name("auth"), &updated).unwrap();

    let modules = manager.list_modules().unwrap();
    // auth keeps its first position.
    assert_eq!(modules[0].0, name("auth"));
    assert_eq!(modules[0].1, updated);
    assert_eq!(modules[1].0, name("blog"));
}

#[test]
fn test_blog_scaffold_and_article_lifecycle() {
    let (dir, manager) = project_with(BARE_DOC);
    let blog = BlogModule::new();

    manager
        .add_module(&blog.name(), &blog.default_config())
        .unwrap();
    let mut prompter = ScriptedPrompter::new(&["s"]);
    blog.scaffold(dir.path(), &mut prompter).unwrap();

    assert!(blog.is_scaffolded(dir.path()));
    assert!(dir.path().join("content/blog/welcome-to-your-blog.md").exists());
    assert!(dir.path().join("content.config.ts").exists());

    let mut prompter = ScriptedPrompter::new(&["Hello World", "First post", "1", "1"]);
    let article = blog
        .create_article(dir.path(), &mut prompter)
        .unwrap()
        .unwrap();
    assert!(article.ends_with("content/blog/hello-world.md"));

    // Teardown keeps articles and seed files.
    blog.teardown(dir.path()).unwrap();
    assert!(!dir.path().join("content.config.ts").exists());
    assert!(article.exists());
    assert!(dir.path().join("content/blog/authors.json").exists());
}

#[test]
fn test_malformed_section_blocks_mutations() {
    let doc = "export const config = {\n  \
               // === APPLICATION MODULES ===\n  modules: {\n    blog: true\n";
    let (_dir, manager) = project_with(doc);

    assert!(matches!(
        manager.add_module(&name("auth"), &ModuleValue::Bool(true)),
        Err(ConfigError::MalformedSection { .. })
    ));
    assert!(matches!(
        manager.remove_module(&name("blog")),
        Err(ConfigError::MalformedSection { .. })
    ));
    // Lookups stay soft.
    assert!(!manager.has_module(&name("blog")));
}
