use crate::menu::LinePrompt;
use crate::render::RenderFrame;

/// Everything the painter can put on screen. Each variant is one screen of
/// the application.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    /// Start screen listing the training modes
    Menu { prompt: &'a LinePrompt },
    /// Difficulty choice before the running line
    DifficultyMenu { prompt: &'a LinePrompt },
    /// A frame of a typing or running-line session
    Session(&'a RenderFrame),
    /// A message shown on top of the last session frame
    Notice {
        frame: Option<&'a RenderFrame>,
        message: &'a str,
    },
}

