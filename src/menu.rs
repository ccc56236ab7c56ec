use crate::runtime::KeyInput;

/// Training mode chosen on the start screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Mode {
    #[strum(serialize = "Random text mode")]
    RandomText = 1,
    #[strum(serialize = "Load from file")]
    FromFile = 2,
    #[strum(serialize = "Running line mode")]
    RunningLine = 3,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::RandomText, Mode::FromFile, Mode::RunningLine];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Mode::RandomText),
            "2" => Some(Mode::FromFile),
            "3" => Some(Mode::RunningLine),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptResult {
    Continue,
    Submit,
}

/// Single-line editor shown at the bottom of the menu screens as `:text`.
/// Enter or Escape submit whatever has been typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePrompt {
    text: String,
}

impl LinePrompt {
    pub const PREFIX: char = ':';

    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// The line as painted, prefix included
    pub fn display(&self) -> String {
        format!("{}{}", Self::PREFIX, self.text)
    }

    pub fn handle(&mut self, key: KeyInput) -> PromptResult {
        match key {
            KeyInput::Enter | KeyInput::Escape => return PromptResult::Submit,
            KeyInput::Backspace => {
                self.text.pop();
            }
            KeyInput::Char(c) => self.text.push(c),
        }
        PromptResult::Continue
    }
}
