//! Maps session state to positioned, styled cells. Nothing here touches the
//! terminal; the painter in `ui` turns a `RenderFrame` into pixels.

use std::time::Duration;

use unicode_width::UnicodeWidthChar;

use crate::metrics::{round_secs, spm};
use crate::scrolling::ScrollingSession;
use crate::typing::TypingSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleTag {
    Correct,
    Incorrect,
    Plain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
    pub ch: char,
    pub style: StyleTag,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfoPanel {
    pub spm: u64,
    /// `None` where the mode keeps no mistake count
    pub mistakes: Option<usize>,
    pub elapsed_secs: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub cells: Vec<Cell>,
    pub info: InfoPanel,
}

impl RenderFrame {
    /// Text of one row, blanks filled in, trailing blanks removed
    pub fn row_text(&self, row: u16) -> String {
        let mut cells: Vec<&Cell> = self.cells.iter().filter(|c| c.row == row).collect();
        cells.sort_by_key(|c| c.col);

        let mut line = String::new();
        let mut col = 0;
        for cell in cells {
            while col < cell.col {
                line.push(' ');
                col += 1;
            }
            line.push(cell.ch);
            col += 1;
        }
        line.trim_end().to_string()
    }
}

/// Glyph shown for a typed whitespace character that does not belong there
fn visible_mistake(c: char) -> char {
    match c {
        ' ' => '·',
        '\n' => '↵',
        '\t' => '→',
        c => c,
    }
}

fn display_width(c: char) -> u16 {
    c.width().map_or(1, |w| w.max(1) as u16)
}

/// Lays the target text out row by row and overlays what was typed.
///
/// Positions always follow the target (its newlines break rows, long rows
/// wrap at `width`), so a wrong keystroke never shifts the rest of the text.
/// Only `height` rows are emitted; the layout scrolls so the row holding the
/// next expected symbol is the last one shown once it would fall below.
pub fn render_typing(
    session: &TypingSession,
    elapsed: Duration,
    width: u16,
    height: u16,
) -> RenderFrame {
    let width = width.max(1);
    let height = usize::from(height.max(1));
    let input = session.input();
    let mut placed: Vec<(usize, u16, char, StyleTag)> =
        Vec::with_capacity(session.target().len());
    let (mut row, mut col) = (0usize, 0u16);
    let mut cursor_row = None;

    for (idx, &expected) in session.target().iter().enumerate() {
        let (glyph, style) = match input.get(idx) {
            Some(&typed) if typed == expected => (typed, StyleTag::Correct),
            Some(&typed) => (visible_mistake(typed), StyleTag::Incorrect),
            None => (expected, StyleTag::Plain),
        };

        if expected == '\n' {
            if style == StyleTag::Incorrect {
                if col >= width {
                    row += 1;
                    col = 0;
                }
                placed.push((row, col, glyph, style));
            }
            if idx == input.len() {
                cursor_row = Some(row);
            }
            row += 1;
            col = 0;
            continue;
        }

        let cell_width = display_width(glyph);
        if col > 0 && col.saturating_add(cell_width) > width {
            row += 1;
            col = 0;
        }
        if idx == input.len() {
            cursor_row = Some(row);
        }
        placed.push((row, col, glyph, style));
        col = col.saturating_add(cell_width);
    }

    let cursor_row = cursor_row.unwrap_or_else(|| placed.last().map_or(0, |p| p.0));
    let first_row = cursor_row.saturating_sub(height - 1);
    let cells = placed
        .into_iter()
        .filter(|&(r, ..)| r >= first_row && r - first_row < height)
        .map(|(r, col, ch, style)| Cell {
            // bounded by `height`, which came from a u16
            row: (r - first_row) as u16,
            col,
            ch,
            style,
        })
        .collect();

    RenderFrame {
        cells,
        info: InfoPanel {
            spm: spm(elapsed, input.len()),
            mistakes: Some(session.mistakes()),
            elapsed_secs: round_secs(elapsed),
        },
    }
}

/// Renders the visible window of a running line on row 0. Symbols left of
/// the cursor have already been passed and are marked correct.
pub fn render_scrolling(session: &ScrollingSession, elapsed: Duration) -> RenderFrame {
    let width = session.width();
    let cells = session
        .visible_window()
        .iter()
        .take(width)
        .enumerate()
        .map(|(i, &ch)| Cell {
            row: 0,
            col: i as u16,
            ch,
            style: if i < session.cursor() {
                StyleTag::Correct
            } else {
                StyleTag::Plain
            },
        })
        .collect();

    RenderFrame {
        cells,
        info: InfoPanel {
            spm: spm(elapsed, session.symbols_typed()),
            mistakes: None,
            elapsed_secs: round_secs(elapsed),
        },
    }
}
