use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{
    BoardDisplay, NameEntryDisplay, PieceDisplay, SessionStatsDisplay, color, style,
};

/// Name being typed on the game over popup.
#[derive(Debug, Clone, Copy)]
pub struct NameEntry<'a> {
    pub name: &'a str,
    pub message: Option<&'a str>,
}

/// The play field: stats on the left, the board, the next piece on the right.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    name_entry: Option<NameEntry<'a>>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            name_entry: None,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn name_entry(self, name_entry: NameEntry<'a>) -> Self {
        Self {
            name_entry: Some(name_entry),
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let state = self.session.state();
        let border_style = match state {
            SessionState::MainMenu | SessionState::Playing if self.session.is_soft_dropping() => {
                color::CYAN
            }
            SessionState::MainMenu | SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let render_board = self.session.render_board();
        let game_board = BoardDisplay::new(&render_board).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let next_panel = {
            let panel = PieceDisplay::new().block(
                Block::bordered()
                    .title(Line::from("NEXT").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            if state.is_game_over() {
                panel
            } else {
                panel.piece(*self.session.next_piece())
            }
        };
        let session_stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        match state {
            SessionState::Paused => {
                let style = style::PAUSED;
                let block = Block::new().style(style);
                let text = Text::styled("PAUSED", style).centered();
                let area = board_area
                    .centered(Constraint::Length(game_board_width), Constraint::Length(3));
                let inner = block.inner(area);
                Clear.render(area, buf);
                block.render(area, buf);
                text.render(inner.centered_vertically(Constraint::Length(1)), buf);
            }
            SessionState::GameOver => {
                let entry = self.name_entry.unwrap_or(NameEntry {
                    name: "",
                    message: None,
                });
                let area = board_area.centered(
                    Constraint::Length(game_board_width),
                    Constraint::Length(NameEntryDisplay::height()),
                );
                NameEntryDisplay::new(self.session.stats().score(), entry.name)
                    .message(entry.message)
                    .render(area, buf);
            }
            SessionState::MainMenu | SessionState::Playing => {}
        }
    }
}
