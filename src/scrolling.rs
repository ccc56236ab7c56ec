use std::time::Duration;

use tracing::debug;

use crate::error::SessionError;
use crate::runtime::KeyInput;

const BASE_SHIFT_MS: i64 = 150;
const DIFFICULTY_STEP_MS: i64 = 100;

/// User-selected difficulty tier for the running line
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Difficulty {
    #[strum(serialize = "easy")]
    Easy = 1,
    #[strum(serialize = "medium")]
    Medium = 2,
    #[strum(serialize = "hard")]
    Hard = 3,
}

impl Difficulty {
    pub fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parses a typed tier number, ignoring surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<u8>().ok().and_then(Self::from_tier)
    }

    pub fn tier(self) -> u8 {
        self as u8
    }

    /// `min(tier - 2, 1)`: -1 for easy, 0 for medium, 1 for hard
    pub fn offset(self) -> i64 {
        (i64::from(self.tier()) - 2).min(1)
    }

    /// Time between two shift ticks
    pub fn shift_interval(self) -> Duration {
        let ms = BASE_SHIFT_MS - self.offset() * DIFFICULTY_STEP_MS;
        Duration::from_millis(ms.max(1) as u64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollState {
    Running,
    Lost,
    Aborted,
}

impl ScrollState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ScrollState::Running)
    }
}

/// Running-line run: the text scrolls left one column per shift tick and
/// every correctly typed symbol pushes the cursor back one column. The run
/// is lost when the cursor reaches the left edge.
#[derive(Debug, Clone)]
pub struct ScrollingSession {
    target: Vec<char>,
    width: usize,
    left_border: usize,
    cursor: usize,
    symbols_typed: usize,
    last_shift: Duration,
    shift_interval: Duration,
    state: ScrollState,
    ended_at: Option<Duration>,
}

impl ScrollingSession {
    /// Builds a run over `text` for a viewport `width` columns wide. The
    /// text is left-padded with `width - 1` blanks so it enters from the
    /// right edge.
    pub fn new(
        text: &str,
        width: u16,
        difficulty: Difficulty,
        now: Duration,
    ) -> Result<Self, SessionError> {
        if text.is_empty() {
            return Err(SessionError::EmptyTarget);
        }
        if width == 0 {
            return Err(SessionError::ViewportTooNarrow(width));
        }

        let width = usize::from(width);
        let cursor = width - 1;
        let target: Vec<char> = std::iter::repeat(' ')
            .take(cursor)
            .chain(text.chars())
            .collect();

        Ok(Self {
            target,
            width,
            left_border: 0,
            cursor,
            symbols_typed: 0,
            last_shift: now,
            shift_interval: difficulty.shift_interval(),
            state: ScrollState::Running,
            ended_at: None,
        })
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn left_border(&self) -> usize {
        self.left_border
    }

    pub fn symbols_typed(&self) -> usize {
        self.symbols_typed
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn shift_interval(&self) -> Duration {
        self.shift_interval
    }

    /// Timestamp at which the run was lost or aborted
    pub fn ended_at(&self) -> Option<Duration> {
        self.ended_at
    }

    /// Symbol the user has to type next, if the text is not exhausted
    pub fn expected_char(&self) -> Option<char> {
        self.target.get(self.left_border + self.cursor).copied()
    }

    /// Slice of the padded text currently inside the viewport
    pub fn visible_window(&self) -> &[char] {
        let start = self.left_border.min(self.target.len());
        let end = (self.left_border + self.width).min(self.target.len());
        &self.target[start..end]
    }

    /// Advances the shift timer to `now`. Called once per frame whether or
    /// not a key arrived.
    pub fn tick(&mut self, now: Duration) -> ScrollState {
        if self.state.is_terminal() {
            return self.state;
        }

        if now.saturating_sub(self.last_shift) > self.shift_interval {
            self.cursor = self.cursor.saturating_sub(1);
            self.left_border += 1;
            self.last_shift = now;
        }

        if self.cursor == 0 {
            self.state = ScrollState::Lost;
            self.ended_at = Some(now);
            debug!(
                symbols = self.symbols_typed,
                left_border = self.left_border,
                "running line lost"
            );
        }
        self.state
    }

    /// Applies one key. Only a symbol matching the one at the cursor counts;
    /// anything else is ignored.
    pub fn apply_key(&mut self, key: KeyInput, now: Duration) -> ScrollState {
        if self.state.is_terminal() {
            return self.state;
        }

        match key {
            KeyInput::Escape => {
                self.state = ScrollState::Aborted;
                self.ended_at = Some(now);
                debug!(symbols = self.symbols_typed, "running line aborted");
            }
            KeyInput::Char(c) if Some(c) == self.expected_char() => {
                self.symbols_typed += 1;
                self.cursor += 1;
            }
            _ => {}
        }
        self.state
    }
}
