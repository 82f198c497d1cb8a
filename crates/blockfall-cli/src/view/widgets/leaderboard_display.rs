use blockfall_engine::Leaderboard;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::view::widgets::style;

const NAME_WIDTH: usize = 16;
const SCORE_WIDTH: usize = 10;

/// High score table, best first, optionally highlighting one rank.
#[derive(Debug)]
pub struct LeaderboardDisplay<'a> {
    leaderboard: &'a Leaderboard,
    highlight: Option<usize>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> LeaderboardDisplay<'a> {
    pub fn new(leaderboard: &'a Leaderboard) -> Self {
        Self {
            leaderboard,
            highlight: None,
            block: None,
        }
    }

    pub fn highlight(self, rank: Option<usize>) -> Self {
        Self {
            highlight: rank,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        // "999. " + name + " " + score
        super::cells(5 + NAME_WIDTH + 1 + SCORE_WIDTH)
            + super::block_horizontal_margin(self.block.as_ref())
    }
}

fn format_row(rank: usize, player: &str, score: u64) -> String {
    let player = if player.chars().count() > NAME_WIDTH {
        let mut truncated = player.chars().take(NAME_WIDTH - 1).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        player.to_owned()
    };
    format!(
        "{:>3}. {player:<NAME_WIDTH$} {score:>SCORE_WIDTH$}",
        rank + 1
    )
}

impl Widget for LeaderboardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = if self.leaderboard.is_empty() {
            vec![ListItem::new(Line::from("No high scores yet").centered())]
        } else {
            self.leaderboard
                .entries()
                .iter()
                .enumerate()
                .map(|(rank, entry)| ListItem::new(format_row(rank, &entry.player, entry.score)))
                .collect()
        };

        let mut list = List::new(items)
            .style(style::DEFAULT)
            .highlight_style(style::HIGHLIGHT);
        if let Some(block) = self.block {
            list = list.block(block);
        }

        let mut list_state = ListState::default();
        list_state.select(self.highlight);

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}
