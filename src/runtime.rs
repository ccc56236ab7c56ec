use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Decoded key event consumed by the sessions and prompts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Enter,
    Escape,
}

impl KeyInput {
    /// Maps a raw terminal key event. Returns `None` for keys the trainer
    /// has no use for, which the loop treats as an empty frame.
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyInput::Escape)
            }
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                None
            }
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Tab => Some(KeyInput::Char('\t')),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Esc => Some(KeyInput::Escape),
            _ => None,
        }
    }
}

/// Non-blocking source of key events
pub trait InputSource {
    /// Returns the next pending key, or `Ok(None)` if nothing is available
    /// right now. Must never block.
    fn poll_key(&mut self) -> io::Result<Option<KeyInput>>;
}

/// Production input source using crossterm
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn poll_key(&mut self) -> io::Result<Option<KeyInput>> {
        while event::poll(Duration::ZERO)? {
            // Resize and mouse events are drained so a key behind them is
            // still seen this frame.
            if let CtEvent::Key(key) = event::read()? {
                return Ok(KeyInput::from_key_event(key));
            }
        }
        Ok(None)
    }
}

/// Test input source replaying a fixed script.
///
/// A `None` entry is an empty poll. Once the script is used up every poll
/// fails with `UnexpectedEof`, so a scripted run cannot spin forever.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<Option<KeyInput>>,
}

impl ScriptedInput {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Option<KeyInput>>,
    {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Script that presses each key in order with no empty polls between
    pub fn keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = KeyInput>,
    {
        Self::new(keys.into_iter().map(Some))
    }

    /// Script that types `text` character by character
    pub fn typing(text: &str) -> Self {
        Self::keys(text.chars().map(|c| match c {
            '\n' => KeyInput::Enter,
            c => KeyInput::Char(c),
        }))
    }

    pub fn then(mut self, key: Option<KeyInput>) -> Self {
        self.script.push_back(key);
        self
    }

    pub fn then_idle(mut self, polls: usize) -> Self {
        self.script.extend(std::iter::repeat(None).take(polls));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> io::Result<Option<KeyInput>> {
        self.script.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted")
        })
    }
}

/// Configurable ticker interface
pub trait Ticker {
    fn interval(&self) -> Duration;

    /// Best-effort pause between two frames
    fn pause(&self) {
        let interval = self.interval();
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Ticker that never sleeps
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}
