use rand::Rng;
use tracing::{debug, info};

use crate::clock::TimeSource;
use crate::driver::{Driver, PromptScreen};
use crate::error::Result;
use crate::menu::Mode;
use crate::runtime::{InputSource, KeyInput, Ticker};
use crate::scrolling::{Difficulty, ScrollState};
use crate::text_source::{random_text, TextLibrary};
use crate::ui::{Painter, View};

pub const FINISHED_MESSAGE: &str =
    "You have finished. Press Esc to leave or another button to repeat";
pub const LOST_MESSAGE: &str = "You lose! Press any key";

/// A validated choice from the start screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    RandomText,
    FromFile,
    RunningLine(Difficulty),
}

/// Top-level loop: menu, session, finish screen, repeat
pub struct App<R> {
    library: TextLibrary,
    rng: R,
}

impl<R: Rng> App<R> {
    pub fn new(library: TextLibrary, rng: R) -> Self {
        Self { library, rng }
    }

    /// Runs sessions until the user leaves from the finish screen
    pub fn run<I, C, P, T>(&mut self, driver: &mut Driver<I, C, P, T>) -> Result<()>
    where
        I: InputSource,
        C: TimeSource,
        P: Painter,
        T: Ticker,
    {
        loop {
            let selection = self.select(driver)?;
            info!(?selection, "starting session");

            let last_frame = match selection {
                Selection::RandomText => {
                    let text = random_text(&mut self.rng);
                    driver.run_typing(&text)?.last_frame
                }
                Selection::FromFile => {
                    let text = self.library.random_numbered(&mut self.rng)?;
                    driver.run_typing(&text)?.last_frame
                }
                Selection::RunningLine(difficulty) => {
                    let text = self.library.long_text()?;
                    let report = driver.run_scrolling(&text, difficulty)?;
                    if report.state == ScrollState::Lost {
                        driver.wait_key(&View::Notice {
                            frame: Some(&report.last_frame),
                            message: LOST_MESSAGE,
                        })?;
                    }
                    report.last_frame
                }
            };

            let key = driver.wait_key(&View::Notice {
                frame: Some(&last_frame),
                message: FINISHED_MESSAGE,
            })?;
            if key == KeyInput::Escape {
                info!("leaving");
                return Ok(());
            }
        }
    }

    /// Prompts until a valid mode (and difficulty, for the running line) is
    /// entered. Any invalid answer starts over from the mode menu.
    pub fn select<I, C, P, T>(&mut self, driver: &mut Driver<I, C, P, T>) -> Result<Selection>
    where
        I: InputSource,
        C: TimeSource,
        P: Painter,
        T: Ticker,
    {
        loop {
            let answer = driver.read_line(PromptScreen::Mode)?;
            let Some(mode) = Mode::parse(&answer) else {
                debug!(%answer, "invalid mode choice");
                continue;
            };

            match mode {
                Mode::RandomText => return Ok(Selection::RandomText),
                Mode::FromFile => return Ok(Selection::FromFile),
                Mode::RunningLine => {
                    let answer = driver.read_line(PromptScreen::Difficulty)?;
                    match Difficulty::parse(&answer) {
                        Some(difficulty) => return Ok(Selection::RunningLine(difficulty)),
                        None => debug!(%answer, "invalid difficulty choice"),
                    }
                }
            }
        }
    }
}
