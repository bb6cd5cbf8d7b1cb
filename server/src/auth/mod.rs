//! Aggregation API Credentials
//!
//! Basic-auth credentials shared by both API versions. Supplied through the
//! configuration or prompted for at startup; the password is never echoed
//! and is wiped from memory on drop.

pub mod prompt;

use std::fmt;
use std::io;

use zeroize::{Zeroize, ZeroizeOnDrop};

pub use prompt::{Prompter, TerminalPrompter};

/// Username and password for the data-aggregation API
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    #[zeroize(skip)]
    user: String,
    password: String,
}

// Custom Debug implementation that redacts the password
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Use the configured values, prompting for whichever is missing
    pub fn resolve(
        user: Option<String>,
        password: Option<String>,
        prompter: &mut dyn Prompter,
    ) -> io::Result<Self> {
        let user = match user {
            Some(user) => user,
            None => prompter.ask("Data Aggregation API user: ")?,
        };
        let password = match password {
            Some(password) => password,
            None => prompter.ask_hidden("Data Aggregation API password: ")?,
        };
        Ok(Self::new(user, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers prompts from a fixed script and records what was asked
    struct ScriptedPrompter {
        answers: Vec<&'static str>,
        asked: Vec<(String, bool)>,
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, label: &str) -> io::Result<String> {
            self.asked.push((label.to_string(), false));
            Ok(self.answers.remove(0).to_string())
        }

        fn ask_hidden(&mut self, label: &str) -> io::Result<String> {
            self.asked.push((label.to_string(), true));
            Ok(self.answers.remove(0).to_string())
        }
    }

    #[test]
    fn test_prompts_for_missing_values() {
        let mut prompter = ScriptedPrompter {
            answers: vec!["netops", "hunter2"],
            asked: Vec::new(),
        };
        let creds = Credentials::resolve(None, None, &mut prompter).unwrap();
        assert_eq!(creds.user(), "netops");
        assert_eq!(creds.password(), "hunter2");
        assert!(!prompter.asked[0].1);
        assert!(prompter.asked[1].1, "password must be read without echo");
    }

    #[test]
    fn test_configured_values_skip_prompt() {
        let mut prompter = ScriptedPrompter {
            answers: vec!["typed-password"],
            asked: Vec::new(),
        };
        let creds =
            Credentials::resolve(Some("netops".to_string()), None, &mut prompter).unwrap();
        assert_eq!(creds.user(), "netops");
        assert_eq!(creds.password(), "typed-password");
        assert_eq!(prompter.asked.len(), 1);
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("netops", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("netops"));
        assert!(!debug.contains("hunter2"));
    }
}
