//! Interactive prompts on the controlling terminal.

use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Password};

/// Where commands get answers they could not take from flags.
pub trait Prompter {
    /// Ask a yes/no question. Declining is the default.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Ask for a secret with hidden input.
    fn password(&self, prompt: &str) -> Result<String>;
}

/// Prompts through `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl Prompter for Terminal {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("No terminal to confirm on; pass --yes to skip the question")?;
        Ok(answer)
    }

    fn password(&self, prompt: &str) -> Result<String> {
        let password: String = Password::new()
            .with_prompt(prompt)
            .interact()
            .with_context(|| format!("No terminal to read the {} from", prompt.to_lowercase()))?;
        Ok(password)
    }
}

/// The value given by flag or environment, otherwise a hidden prompt.
pub fn password_or_prompt(
    given: Option<String>,
    prompter: &impl Prompter,
    prompt: &str,
) -> Result<String> {
    match given {
        Some(password) => Ok(password),
        None => prompter.password(prompt),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorded {
        asked: RefCell<Vec<String>>,
    }

    impl Prompter for Recorded {
        fn confirm(&self, prompt: &str) -> Result<bool> {
            self.asked.borrow_mut().push(prompt.to_string());
            Ok(false)
        }

        fn password(&self, prompt: &str) -> Result<String> {
            self.asked.borrow_mut().push(prompt.to_string());
            Ok("typed".into())
        }
    }

    #[test]
    fn given_password_skips_the_prompt() {
        let prompter = Recorded::default();
        let password = password_or_prompt(Some("flag".into()), &prompter, "Password").unwrap();
        assert_eq!(password, "flag");
        assert!(prompter.asked.borrow().is_empty());
    }

    #[test]
    fn missing_password_is_asked_for() {
        let prompter = Recorded::default();
        let password = password_or_prompt(None, &prompter, "New password").unwrap();
        assert_eq!(password, "typed");
        assert_eq!(*prompter.asked.borrow(), ["New password"]);
    }
}
