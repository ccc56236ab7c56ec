pub mod screen;

use std::io;

use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Terminal,
};

pub use screen::View;

use crate::menu::{LinePrompt, Mode};
use crate::render::{RenderFrame, StyleTag};
use crate::scrolling::Difficulty;

const INFO_HEIGHT: u16 = 5;
const TITLE: &str = "Welcome to the Speed Printing Trainer!";

/// Screen painter the driver draws through
pub trait Painter {
    /// `(rows, cols)` of the drawable surface
    fn viewport(&self) -> io::Result<(u16, u16)>;
    fn draw(&mut self, view: &View) -> io::Result<()>;
}

/// Painter backed by a ratatui terminal
pub struct TerminalPainter<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalPainter<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Painter for TerminalPainter<B> {
    fn viewport(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.height, size.width))
    }

    fn draw(&mut self, view: &View) -> io::Result<()> {
        self.terminal.draw(|f| f.render_widget(view, f.area()))?;
        Ok(())
    }
}

fn cell_style(tag: StyleTag) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match tag {
        StyleTag::Correct => bold.fg(Color::Green),
        StyleTag::Incorrect => bold.fg(Color::Red),
        StyleTag::Plain => Style::default(),
    }
}

impl Widget for &View<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match *self {
            View::Menu { prompt } => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        TITLE,
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from("Choose a training mode (type a number):"),
                    Line::from(""),
                ];
                lines.extend(
                    Mode::ALL
                        .iter()
                        .map(|mode| Line::from(format!("{}. {}", mode.number(), mode))),
                );
                render_menu(lines, prompt, area, buf);
            }
            View::DifficultyMenu { prompt } => {
                let mut lines = vec![Line::from("Choose difficulty:"), Line::from("")];
                lines.extend(
                    [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
                        .iter()
                        .map(|d| Line::from(format!("{} = {}", d, d.tier()))),
                );
                render_menu(lines, prompt, area, buf);
            }
            View::Session(frame) => {
                render_session(frame, area, buf);
            }
            View::Notice { frame, message } => {
                if let Some(frame) = frame {
                    render_session(frame, area, buf);
                }
                render_notice(message, area, buf);
            }
        }
    }
}

fn render_menu(lines: Vec<Line>, prompt: &LinePrompt, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let prompt_row = area.bottom() - 1;
    let body = Rect::new(area.x, area.y, area.width, area.height - 1);

    Paragraph::new(lines).render(body, buf);
    Paragraph::new(prompt.display()).render(Rect::new(area.x, prompt_row, area.width, 1), buf);
}

/// Splits the screen into the text area and the info panel below it
fn session_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(INFO_HEIGHT)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Rows of the text area on a screen `rows` high
pub fn session_text_rows(rows: u16) -> u16 {
    session_layout(Rect::new(0, 0, 1, rows)).0.height
}

fn render_session(frame: &RenderFrame, area: Rect, buf: &mut Buffer) {
    let (text_area, info_area) = session_layout(area);

    for cell in &frame.cells {
        if cell.row >= text_area.height || cell.col >= text_area.width {
            continue;
        }
        if let Some(target) = buf.cell_mut((text_area.x + cell.col, text_area.y + cell.row)) {
            target.set_char(cell.ch);
            target.set_style(cell_style(cell.style));
        }
    }

    let info = &frame.info;
    let mut lines = vec![Line::from(format!("- symbols per minute: {}", info.spm))];
    if let Some(mistakes) = info.mistakes {
        lines.push(Line::from(format!("- mistakes: {mistakes}")));
    }
    lines.push(Line::from(format!("- time elapsed: {}", info.elapsed_secs)));

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Info about typing"),
        )
        .render(info_area, buf);
}

fn render_notice(message: &str, area: Rect, buf: &mut Buffer) {
    let (text_area, _) = session_layout(area);
    if text_area.height == 0 {
        return;
    }
    let row = Rect::new(text_area.x, text_area.bottom() - 1, text_area.width, 1);

    Clear.render(row, buf);
    Paragraph::new(Span::styled(
        message,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .render(row, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Cell, InfoPanel};
    use crate::runtime::KeyInput;
    use ratatui::backend::TestBackend;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cell_at(buffer: &Buffer, x: u16, y: u16) -> &ratatui::buffer::Cell {
        &buffer[(x, y)]
    }

    fn frame() -> RenderFrame {
        RenderFrame {
            cells: vec![
                Cell {
                    row: 0,
                    col: 0,
                    ch: 'o',
                    style: StyleTag::Correct,
                },
                Cell {
                    row: 0,
                    col: 1,
                    ch: 'x',
                    style: StyleTag::Incorrect,
                },
                Cell {
                    row: 1,
                    col: 0,
                    ch: 'k',
                    style: StyleTag::Plain,
                },
            ],
            info: InfoPanel {
                spm: 120,
                mistakes: Some(1),
                elapsed_secs: 3.25,
            },
        }
    }

    #[test]
    fn test_session_view_paints_cells_and_info() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buffer = Buffer::empty(area);
        let frame = frame();

        (&View::Session(&frame)).render(area, &mut buffer);

        assert_eq!(cell_at(&buffer, 0, 0).symbol(), "o");
        assert_eq!(cell_at(&buffer, 0, 0).fg, Color::Green);
        assert_eq!(cell_at(&buffer, 1, 0).symbol(), "x");
        assert_eq!(cell_at(&buffer, 1, 0).fg, Color::Red);
        assert_eq!(cell_at(&buffer, 0, 1).symbol(), "k");

        let text = buffer_text(&buffer);
        assert!(text.contains("Info about typing"));
        assert!(text.contains("- symbols per minute: 120"));
        assert!(text.contains("- mistakes: 1"));
        assert!(text.contains("- time elapsed: 3.25"));
    }

    #[test]
    fn test_session_view_omits_mistakes_when_absent() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buffer = Buffer::empty(area);
        let mut frame = frame();
        frame.info.mistakes = None;

        (&View::Session(&frame)).render(area, &mut buffer);
        assert!(!buffer_text(&buffer).contains("mistakes"));
    }

    #[test]
    fn test_cells_outside_text_area_are_clipped() {
        let area = Rect::new(0, 0, 4, 7);
        let mut buffer = Buffer::empty(area);
        let frame = RenderFrame {
            cells: vec![
                Cell {
                    row: 0,
                    col: 10,
                    ch: 'z',
                    style: StyleTag::Plain,
                },
                Cell {
                    row: 5,
                    col: 0,
                    ch: 'z',
                    style: StyleTag::Plain,
                },
            ],
            info: InfoPanel {
                spm: 0,
                mistakes: None,
                elapsed_secs: 0.0,
            },
        };

        (&View::Session(&frame)).render(area, &mut buffer);
        assert!(!buffer_text(&buffer).contains('z'));
    }

    #[test]
    fn test_menu_view_lists_modes_and_prompt() {
        let area = Rect::new(0, 0, 50, 10);
        let mut buffer = Buffer::empty(area);
        let mut prompt = LinePrompt::new();
        prompt.handle(KeyInput::Char('2'));

        (&View::Menu { prompt: &prompt }).render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains(TITLE));
        assert!(text.contains("1. Random text mode"));
        assert!(text.contains("2. Load from file"));
        assert!(text.contains("3. Running line mode"));
        assert!(text.lines().last().unwrap().starts_with(":2"));
    }

    #[test]
    fn test_difficulty_view() {
        let area = Rect::new(0, 0, 30, 8);
        let mut buffer = Buffer::empty(area);
        let prompt = LinePrompt::new();

        (&View::DifficultyMenu { prompt: &prompt }).render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("easy = 1"));
        assert!(text.contains("medium = 2"));
        assert!(text.contains("hard = 3"));
    }

    #[test]
    fn test_notice_over_frame() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buffer = Buffer::empty(area);
        let frame = frame();

        (&View::Notice {
            frame: Some(&frame),
            message: "You lose! Press any key",
        })
            .render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("You lose! Press any key"));
        assert_eq!(cell_at(&buffer, 0, 0).symbol(), "o");
    }

    #[test]
    fn test_session_text_rows_leave_room_for_info() {
        assert_eq!(session_text_rows(24), 19);
        assert_eq!(session_text_rows(12), 7);
    }

    #[test]
    fn test_terminal_painter_reports_viewport_and_draws() {
        let backend = TestBackend::new(30, 10);
        let mut painter = TerminalPainter::new(Terminal::new(backend).unwrap());
        assert_eq!(painter.viewport().unwrap(), (10, 30));

        let prompt = LinePrompt::new();
        painter.draw(&View::Menu { prompt: &prompt }).unwrap();

        let text = buffer_text(painter.terminal().backend().buffer());
        assert!(text.contains("Choose a training mode"));
    }
}
