use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block as BlockWidget, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::view::widgets::{color, style};

const HIGHLIGHT_SYMBOL: &str = ">> ";

/// Vertical list of menu entries with the selected one highlighted.
#[derive(Debug)]
pub struct MenuDisplay<'a> {
    items: &'a [&'a str],
    selected: usize,
    block: Option<BlockWidget<'a>>,
}

impl<'a> MenuDisplay<'a> {
    pub fn new(items: &'a [&'a str], selected: usize) -> Self {
        Self {
            items,
            selected,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let longest = self.items.iter().map(|item| item.len()).max().unwrap_or(0);
        super::cells(longest + HIGHLIGHT_SYMBOL.len())
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells(self.items.len()) + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for MenuDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = self.items.iter().copied().map(ListItem::new);
        let mut list = List::new(items)
            .style(style::DEFAULT)
            .highlight_style(
                Style::default()
                    .fg(color::YELLOW)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(HIGHLIGHT_SYMBOL);
        if let Some(block) = self.block {
            list = list.block(block);
        }

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}
