use tracing::debug;

use crate::error::SessionError;
use crate::runtime::KeyInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingState {
    Running,
    Completed,
    Aborted,
}

impl TypingState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TypingState::Running)
    }
}

/// Free-typing run against a fixed target text.
///
/// Every typed character is kept, right or wrong, until it is erased with
/// backspace. The mistake counter records every mismatch ever typed and is
/// never decremented.
#[derive(Debug, Clone)]
pub struct TypingSession {
    target: Vec<char>,
    input: Vec<char>,
    mistakes: usize,
    state: TypingState,
}

impl TypingSession {
    pub fn new(target: &str) -> Result<Self, SessionError> {
        let target: Vec<char> = target.chars().collect();
        if target.is_empty() {
            return Err(SessionError::EmptyTarget);
        }
        Ok(Self {
            input: Vec::with_capacity(target.len()),
            target,
            mistakes: 0,
            state: TypingState::Running,
        })
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    /// Number of symbols currently in the buffer
    pub fn typed(&self) -> usize {
        self.input.len()
    }

    pub fn expected_char(&self, idx: usize) -> Option<char> {
        self.target.get(idx).copied()
    }

    pub fn is_correct_at(&self, idx: usize) -> bool {
        matches!(
            (self.input.get(idx), self.target.get(idx)),
            (Some(typed), Some(expected)) if typed == expected
        )
    }

    /// Applies one key event and returns the resulting state. Keys arriving
    /// after the session ended are ignored.
    pub fn apply_key(&mut self, key: KeyInput) -> TypingState {
        if self.state.is_terminal() {
            return self.state;
        }

        match key {
            KeyInput::Escape => {
                self.state = TypingState::Aborted;
                debug!(typed = self.input.len(), "typing session aborted");
            }
            KeyInput::Backspace => {
                self.input.pop();
            }
            KeyInput::Enter => self.write('\n'),
            KeyInput::Char(c) => self.write(c),
        }

        if self.state == TypingState::Running && self.input == self.target {
            self.state = TypingState::Completed;
            debug!(mistakes = self.mistakes, "typing session completed");
        }
        self.state
    }

    fn write(&mut self, c: char) {
        let Some(expected) = self.expected_char(self.input.len()) else {
            // Buffer is full of a wrong attempt; it has to be erased first.
            return;
        };
        if c != expected {
            self.mistakes += 1;
        }
        self.input.push(c);
    }
}
