// --- File: crates/bookdesk_console/src/dialogs.rs ---
//! Blocking operator prompts.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

/// Blocking alert and yes/no confirmation, as the operator sees them.
#[cfg_attr(test, mockall::automock)]
pub trait Dialogs: Send + Sync {
    fn alert(&self, message: &str);

    /// `true` when the operator accepts.
    fn confirm(&self, message: &str) -> bool;
}

/// Prompts on the terminal: alerts go to stderr, confirmations read a line
/// from stdin (`y`, `yes`, `д`, `да`).
pub struct TerminalDialogs {
    assume_yes: bool,
}

impl TerminalDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "д" | "да"
    )
}

/// Dialogs that record every prompt and answer confirmations from a script.
#[derive(Default)]
pub struct ScriptedDialogs {
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<bool>>,
}

impl ScriptedDialogs {
    /// Confirmations are answered from `answers` in order, then declined.
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Dialogs for ScriptedDialogs {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if let Ok(mut confirms) = self.confirms.lock() {
            confirms.push(message.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .unwrap_or(false)
    }
}
