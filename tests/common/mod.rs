// SPDX-License-Identifier: Apache-2.0

//! Shared fixtures for the integration tests.

use modcfg::domain::{ConfigError, Result};
use modcfg::ports::Prompter;
use modcfg::service::ConfigManager;
use std::fs;
use tempfile::TempDir;

/// A minimal configuration document without a modules section.
#[allow(dead_code)]
pub const BARE_DOC: &str = "export const config = {\n  appName: \"Demo\",\n  \
                            appDescription: \"A demo application\"\n} as const;\n";

/// Creates a temp project containing `content` as its `config.ts`.
#[allow(dead_code)]
pub fn project_with(content: &str) -> (TempDir, ConfigManager) {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("config.ts"), content).expect("write config");
    let manager = ConfigManager::new(dir.path());
    (dir, manager)
}

/// Builds a document with the given body inside the modules block.
#[allow(dead_code)]
pub fn doc_with_modules(body: &str) -> String {
    format!(
        "export const config = {{\n  appName: \"Demo\",\n\n  \
         // === APPLICATION MODULES ===\n  modules: {{\n{}\n  }}\n}} as const;\n",
        body
    )
}

/// A prompter answering from a fixed script.
pub struct ScriptedPrompter {
    answers: Vec<String>,
}

impl ScriptedPrompter {
    /// Creates a prompter that plays back `answers` in order.
    #[allow(dead_code)]
    pub fn new(answers: &[&str]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().rev().map(|s| s.to_string()).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, _prompt: &str) -> Result<String> {
        self.answers.pop().ok_or(ConfigError::PromptClosed)
    }
}
