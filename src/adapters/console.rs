// SPDX-License-Identifier: Apache-2.0

//! Terminal-backed prompter.

use crate::domain::{ConfigError, Result};
use crate::ports::Prompter;
use std::io::{self, BufRead, Write};

/// A [`Prompter`] reading answers line by line from standard input.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    /// Creates a console prompter.
    pub fn new() -> Self {
        ConsolePrompter
    }
}

impl Prompter for ConsolePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(ConfigError::PromptClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
