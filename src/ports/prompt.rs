// SPDX-License-Identifier: Apache-2.0

//! Interactive prompt trait definition.
//!
//! This module defines the `Prompter` trait, the port through which command
//! handlers ask the user questions. Implementations only provide the single
//! `read_line` primitive; the yes/no vocabulary and the numeric selection
//! parsing are provided methods, so the console adapter and scripted test
//! prompters share exactly the same interpretation of answers.

use crate::domain::Result;

/// A line-based question/answer channel.
///
/// # Answer vocabulary
///
/// - Confirmations accept `s`, `si`, `y`, and `yes` (case-insensitive) as
///   affirmative; anything else is negative.
/// - Single selections are 1-based numbers; anything unparseable or out of
///   range yields `None`.
/// - Multi-selections are comma-separated 1-based numbers; invalid or
///   out-of-range items are dropped, duplicates are kept once.
///
/// # Examples
///
/// ```
/// use modcfg::domain::Result;
/// use modcfg::ports::Prompter;
///
/// struct Scripted(Vec<String>);
///
/// impl Prompter for Scripted {
///     fn read_line(&mut self, _prompt: &str) -> Result<String> {
///         Ok(self.0.remove(0))
///     }
/// }
///
/// let mut prompter = Scripted(vec!["si".to_string(), "1, 3".to_string()]);
/// assert!(prompter.confirm("Install the module?").unwrap());
///
/// let options = vec!["email".to_string(), "google".to_string(), "github".to_string()];
/// let picked = prompter.multi_select("Methods", &options).unwrap();
/// assert_eq!(picked, vec![0, 2]);
/// ```
pub trait Prompter {
    /// Displays `prompt` and reads one line of input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PromptClosed`](crate::domain::ConfigError::PromptClosed)
    /// when the input stream ends, or an I/O error from the underlying
    /// stream.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Asks a free-text question and returns the trimmed answer.
    fn input(&mut self, prompt: &str) -> Result<String> {
        Ok(self.read_line(prompt)?.trim().to_string())
    }

    /// Asks a yes/no question.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.input(&format!("{} (s/n): ", question))?;
        Ok(matches!(
            answer.to_lowercase().as_str(),
            "s" | "si" | "y" | "yes"
        ))
    }

    /// Asks the user to pick one option by its 1-based number.
    ///
    /// Returns `None` when the answer is not a number in range.
    fn select(&mut self, question: &str, options: &[String]) -> Result<Option<usize>> {
        let mut prompt = String::new();
        for (i, option) in options.iter().enumerate() {
            prompt.push_str(&format!("   {}. {}\n", i + 1, option));
        }
        prompt.push_str(&format!("{} (1-{}): ", question, options.len()));

        let answer = self.input(&prompt)?;
        Ok(answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=options.len()).contains(n))
            .map(|n| n - 1))
    }

    /// Asks the user to pick any number of options, comma-separated.
    ///
    /// Invalid and out-of-range items are dropped; an empty answer yields
    /// an empty selection.
    fn multi_select(&mut self, question: &str, options: &[String]) -> Result<Vec<usize>> {
        let mut prompt = String::new();
        for (i, option) in options.iter().enumerate() {
            prompt.push_str(&format!("   {}. {}\n", i + 1, option));
        }
        prompt.push_str(&format!("{} (comma-separated): ", question));

        let answer = self.input(&prompt)?;
        let mut picked = Vec::new();
        for item in answer.split(',') {
            if let Ok(n) = item.trim().parse::<usize>() {
                if (1..=options.len()).contains(&n) && !picked.contains(&(n - 1)) {
                    picked.push(n - 1);
                }
            }
        }
        Ok(picked)
    }
}
