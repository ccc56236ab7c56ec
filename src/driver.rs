//! The per-frame loop tying input, time, session state and painting
//! together. One iteration samples time, recomputes the frame, paints it,
//! polls input once and applies at most one key.

use tracing::info;

use crate::clock::{SessionClock, TimeSource};
use crate::error::Result;
use crate::menu::{LinePrompt, PromptResult};
use crate::render::{render_scrolling, render_typing, RenderFrame};
use crate::runtime::{InputSource, KeyInput, Ticker};
use crate::scrolling::{Difficulty, ScrollState, ScrollingSession};
use crate::typing::{TypingSession, TypingState};
use crate::ui::{session_text_rows, Painter, View};

/// Which line prompt to show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptScreen {
    Mode,
    Difficulty,
}

impl PromptScreen {
    fn view<'a>(&self, prompt: &'a LinePrompt) -> View<'a> {
        match self {
            PromptScreen::Mode => View::Menu { prompt },
            PromptScreen::Difficulty => View::DifficultyMenu { prompt },
        }
    }
}

/// How a session ended, plus the last frame painted for it
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport<S> {
    pub state: S,
    pub last_frame: RenderFrame,
}

pub struct Driver<I, C, P, T> {
    input: I,
    clock: C,
    painter: P,
    ticker: T,
}

impl<I, C, P, T> Driver<I, C, P, T>
where
    I: InputSource,
    C: TimeSource,
    P: Painter,
    T: Ticker,
{
    pub fn new(input: I, clock: C, painter: P, ticker: T) -> Self {
        Self {
            input,
            clock,
            painter,
            ticker,
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    /// Free typing of `text` until it is completed or aborted
    pub fn run_typing(&mut self, text: &str) -> Result<RunReport<TypingState>> {
        let mut session = TypingSession::new(text)?;
        let (rows, cols) = self.painter.viewport()?;
        let text_rows = session_text_rows(rows);
        let clock = SessionClock::started_at(self.clock.now());
        info!(chars = session.target().len(), "typing session started");

        loop {
            let elapsed = clock.elapsed(self.clock.now());
            let frame = render_typing(&session, elapsed, cols, text_rows);
            self.painter.draw(&View::Session(&frame))?;

            if session.state().is_terminal() {
                info!(
                    state = ?session.state(),
                    spm = frame.info.spm,
                    mistakes = session.mistakes(),
                    elapsed = frame.info.elapsed_secs,
                    "typing session ended"
                );
                return Ok(RunReport {
                    state: session.state(),
                    last_frame: frame,
                });
            }

            match self.input.poll_key()? {
                Some(key) => {
                    session.apply_key(key);
                }
                None => self.ticker.pause(),
            }
        }
    }

    /// Running line over `text` until it is lost or aborted
    pub fn run_scrolling(
        &mut self,
        text: &str,
        difficulty: Difficulty,
    ) -> Result<RunReport<ScrollState>> {
        let (_, cols) = self.painter.viewport()?;
        let start = self.clock.now();
        let mut session = ScrollingSession::new(text, cols, difficulty, start)?;
        let clock = SessionClock::started_at(start);
        info!(
            %difficulty,
            width = cols,
            interval_ms = session.shift_interval().as_millis() as u64,
            "running line started"
        );

        loop {
            let now = self.clock.now();
            session.tick(now);
            let frame = render_scrolling(&session, clock.elapsed(now));
            self.painter.draw(&View::Session(&frame))?;

            if session.state().is_terminal() {
                info!(
                    state = ?session.state(),
                    spm = frame.info.spm,
                    symbols = session.symbols_typed(),
                    elapsed = frame.info.elapsed_secs,
                    "running line ended"
                );
                return Ok(RunReport {
                    state: session.state(),
                    last_frame: frame,
                });
            }

            match self.input.poll_key()? {
                Some(key) => {
                    session.apply_key(key, now);
                }
                None => self.ticker.pause(),
            }
        }
    }

    /// Edits a `:`-prefixed line on the given screen until it is submitted
    pub fn read_line(&mut self, screen: PromptScreen) -> Result<String> {
        let mut prompt = LinePrompt::new();
        loop {
            self.painter.draw(&screen.view(&prompt))?;
            let key = self.next_key()?;
            if prompt.handle(key) == PromptResult::Submit {
                return Ok(prompt.value().to_string());
            }
        }
    }

    /// Paints `view` and waits for any key
    pub fn wait_key(&mut self, view: &View) -> Result<KeyInput> {
        self.painter.draw(view)?;
        self.next_key()
    }

    fn next_key(&mut self) -> Result<KeyInput> {
        loop {
            if let Some(key) = self.input.poll_key()? {
                return Ok(key);
            }
            self.ticker.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::Error;
    use crate::runtime::{FixedTicker, ScriptedInput};
    use crate::ui::TerminalPainter;
    use assert_matches::assert_matches;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    type TestDriver = Driver<ScriptedInput, ManualClock, TerminalPainter<TestBackend>, FixedTicker>;

    fn driver(input: ScriptedInput, step: Duration, width: u16) -> TestDriver {
        let painter = TerminalPainter::new(Terminal::new(TestBackend::new(width, 12)).unwrap());
        Driver::new(
            input,
            ManualClock::stepping(step),
            painter,
            FixedTicker::unthrottled(),
        )
    }

    #[test]
    fn test_typing_run_completes() {
        let input = ScriptedInput::typing("hi");
        let mut driver = driver(input, Duration::from_millis(250), 40);

        let report = driver.run_typing("hi").unwrap();
        assert_eq!(report.state, TypingState::Completed);
        assert_eq!(report.last_frame.info.mistakes, Some(0));
        assert_eq!(driver.input().remaining(), 0);
    }

    #[test]
    fn test_typing_run_survives_empty_polls() {
        let input = ScriptedInput::typing("a")
            .then_idle(3)
            .then(Some(KeyInput::Char('x')))
            .then(Some(KeyInput::Backspace))
            .then(Some(KeyInput::Char('b')));
        let mut driver = driver(input, Duration::from_millis(100), 40);

        let report = driver.run_typing("ab").unwrap();
        assert_eq!(report.state, TypingState::Completed);
        assert_eq!(report.last_frame.info.mistakes, Some(1));
    }

    #[test]
    fn test_typing_run_aborts_on_escape() {
        let input = ScriptedInput::typing("ab").then(Some(KeyInput::Escape));
        let mut driver = driver(input, Duration::ZERO, 40);

        let report = driver.run_typing("abcdef").unwrap();
        assert_eq!(report.state, TypingState::Aborted);
        assert_eq!(report.last_frame.row_text(0), "abcdef");
    }

    #[test]
    fn test_typing_run_follows_input_past_last_visible_row() {
        let text = (0..12).map(|i| format!("line{i:02}")).collect::<Vec<_>>().join("\n");
        let typed: String = text.chars().take(70).collect();
        let input = ScriptedInput::typing(&typed).then(Some(KeyInput::Escape));
        let mut driver = driver(input, Duration::ZERO, 40);

        let report = driver.run_typing(&text).unwrap();
        assert_eq!(report.state, TypingState::Aborted);
        // 12-row screen leaves 7 text rows; the next symbol starts line10
        assert_eq!(report.last_frame.row_text(6), "line10");

        let buffer = driver.painter().terminal().backend().buffer();
        let row: String = (0..6u16).map(|x| buffer[(x, 6u16)].symbol().to_string()).collect();
        assert_eq!(row, "line10");
    }

    #[test]
    fn test_running_line_lost_without_input() {
        // every frame is 60 ms apart, so hard mode shifts once per frame
        let width = 8u16;
        let input = ScriptedInput::default().then_idle(usize::from(width) * 2);
        let mut driver = driver(input, Duration::from_millis(60), width);

        let report = driver.run_scrolling("some text", Difficulty::Hard).unwrap();
        assert_eq!(report.state, ScrollState::Lost);
        assert_eq!(report.last_frame.info.mistakes, None);
        assert_eq!(report.last_frame.info.spm, 0);
    }

    #[test]
    fn test_running_line_aborts_on_escape() {
        let input = ScriptedInput::keys([KeyInput::Char('s'), KeyInput::Escape]);
        let mut driver = driver(input, Duration::from_millis(1), 20);

        let report = driver.run_scrolling("some text", Difficulty::Easy).unwrap();
        assert_eq!(report.state, ScrollState::Aborted);
    }

    #[test]
    fn test_exhausted_script_is_an_error() {
        let mut driver = driver(ScriptedInput::default(), Duration::ZERO, 40);
        assert_matches!(driver.run_typing("abc"), Err(Error::Io(_)));
    }

    #[test]
    fn test_empty_text_is_session_error() {
        let mut driver = driver(ScriptedInput::default(), Duration::ZERO, 40);
        assert_matches!(driver.run_typing(""), Err(Error::Session(_)));
    }

    #[test]
    fn test_read_line_submits_on_enter() {
        let input = ScriptedInput::keys([
            KeyInput::Char('3'),
            KeyInput::Char('x'),
            KeyInput::Backspace,
            KeyInput::Enter,
        ]);
        let mut driver = driver(input, Duration::ZERO, 40);

        assert_eq!(driver.read_line(PromptScreen::Difficulty).unwrap(), "3");
    }

    #[test]
    fn test_wait_key_skips_empty_polls() {
        let input = ScriptedInput::default()
            .then_idle(2)
            .then(Some(KeyInput::Char('q')));
        let mut driver = driver(input, Duration::ZERO, 40);

        let view = View::Notice {
            frame: None,
            message: "press a key",
        };
        assert_eq!(driver.wait_key(&view).unwrap(), KeyInput::Char('q'));
    }
}
