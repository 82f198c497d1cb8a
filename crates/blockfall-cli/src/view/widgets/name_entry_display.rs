use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Clear, Widget},
};

use crate::view::widgets::style;

/// Game over popup asking for a name to record the final score under.
#[derive(Debug)]
pub struct NameEntryDisplay<'a> {
    score: u64,
    name: &'a str,
    message: Option<&'a str>,
}

impl<'a> NameEntryDisplay<'a> {
    pub fn new(score: u64, name: &'a str) -> Self {
        Self {
            score,
            name,
            message: None,
        }
    }

    pub fn message(self, message: Option<&'a str>) -> Self {
        Self { message, ..self }
    }

    pub fn height() -> u16 {
        // border + title + blank + score + name + message + border
        7
    }
}

impl Widget for NameEntryDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = BlockWidget::bordered().style(style::GAME_OVER);
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);

        let [title_area, _, score_area, name_area, message_area] =
            inner.layout(&Layout::vertical([Constraint::Length(1); 5]));
        Line::from("GAME OVER!!").centered().render(title_area, buf);
        Line::from(format!("SCORE: {}", self.score))
            .centered()
            .render(score_area, buf);
        if self.score > 0 {
            Line::from(format!("NAME: {}_", self.name))
                .centered()
                .render(name_area, buf);
        }
        if let Some(message) = self.message {
            Line::from(message).centered().render(message_area, buf);
        }
    }
}
