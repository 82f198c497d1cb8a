use blockfall_engine::{MAX_SHAPE_SIZE, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::CellDisplay;

/// Preview of a single piece, centered in a fixed `4 × 4` cell area.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
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
        super::cells(MAX_SHAPE_SIZE) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells(MAX_SHAPE_SIZE) * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_cell = CellDisplay::empty(false);
        Widget::render(&empty_cell, area, buf);

        let Some(piece) = self.piece else {
            return;
        };

        // Only the occupied region is drawn, so the preview stays centered
        // whatever the matrix padding.
        let bounds = piece.bounds();
        let piece_area = area.centered(
            Constraint::Length(super::cells(bounds.width) * CellDisplay::width()),
            Constraint::Length(super::cells(bounds.height) * CellDisplay::height()),
        );

        let col_constraints = (0..bounds.width).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..bounds.height).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_cell = CellDisplay::filled(piece.color());
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if piece
                    .matrix()
                    .is_occupied(bounds.x_offset + x, bounds.y_offset + y)
                {
                    Widget::render(&occupied_cell, grid_cell, buf);
                }
            }
        }
    }
}
