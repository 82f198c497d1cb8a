//! Property tests for rotation, line clearing and whole-game invariants.

use blockfall_engine::{
    Board, BoundingBox, Color, EngineConfig, GameSession, GameStats, PIECE_CELLS, Piece,
    PieceSeed, ShapeKind, TickOutcome,
};
use proptest::prelude::*;

fn shape_kind() -> impl Strategy<Value = ShapeKind> {
    prop::sample::select(ShapeKind::ALL.to_vec())
}

fn board_rows(rows: usize, cols: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(
        prop_oneof![
            // Full rows are rare at random; generate them on purpose.
            Just(vec![1u8; cols]),
            prop::collection::vec(0u8..=5, cols),
        ],
        rows,
    )
}

fn board_from(cells: &[Vec<u8>]) -> Board {
    let rows = cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|&c| if c == 0 { '.' } else { char::from(b'0' + c) })
                .collect::<String>()
        })
        .collect::<Vec<_>>();
    let rows = rows.iter().map(String::as_str).collect::<Vec<_>>();
    Board::from_rows(&rows)
}

#[test]
fn four_rotations_restore_every_shape() {
    for kind in ShapeKind::ALL {
        let original = Piece::new(kind, Color::DenimBlue);
        let mut piece = original;
        for _ in 0..4 {
            piece.rotate_clockwise();
        }
        assert_eq!(piece, original, "{kind:?}");
    }
}

proptest! {
    #[test]
    fn rotation_keeps_four_cells_and_minimal_bounds(
        kind in shape_kind(),
        turns in 0usize..12,
    ) {
        let mut piece = Piece::new(kind, Color::Scarlet);
        for _ in 0..turns {
            piece.rotate_clockwise();
        }
        prop_assert_eq!(piece.matrix().occupied_count(), PIECE_CELLS);
        prop_assert_eq!(piece.bounds(), BoundingBox::of(piece.matrix()));

        let base = kind.definition().bounds;
        let expected = if turns % 2 == 0 {
            (base.width, base.height)
        } else {
            (base.height, base.width)
        };
        prop_assert_eq!((piece.bounds().width, piece.bounds().height), expected);
    }

    #[test]
    fn clear_lines_keeps_size_and_leaves_no_full_row(
        cells in (4usize..12, 5usize..10).prop_flat_map(|(rows, cols)| board_rows(rows, cols)),
    ) {
        let mut board = board_from(&cells);
        let (rows, cols) = (board.rows(), board.cols());
        let full_rows = cells.iter().filter(|row| row.iter().all(|&c| c != 0)).count();
        let kept_cells = cells
            .iter()
            .filter(|row| !row.iter().all(|&c| c != 0))
            .flatten()
            .filter(|&&c| c != 0)
            .count();

        let cleared = board.clear_lines();

        prop_assert_eq!(cleared, full_rows);
        prop_assert_eq!((board.rows(), board.cols()), (rows, cols));
        prop_assert_eq!(board.filled_count(), kept_cells);
        for y in 0..rows {
            prop_assert!(!board.is_row_complete(y));
        }
        // Cleared rows reappear empty at the top.
        for y in 0..cleared {
            prop_assert!(board.row_cells().nth(y).unwrap().iter().all(|&c| c == 0));
        }
    }

    #[test]
    fn stats_are_monotonic_and_level_rises_by_one(
        drops in prop::collection::vec(0usize..=4, 1..60),
    ) {
        let mut stats = GameStats::new();
        for lines in drops {
            let (score, total, level) = (stats.score(), stats.total_cleared_lines(), stats.level());
            let result = stats.complete_piece_drop(lines);

            prop_assert!(stats.total_cleared_lines() >= total);
            prop_assert_eq!(stats.total_cleared_lines(), total + lines);
            prop_assert_eq!(stats.score(), score + result.score_delta);
            prop_assert_eq!(result.score_delta == 0, lines == 0);
            prop_assert!(stats.level() == level || stats.level() == level + 1);
            prop_assert_eq!(result.leveled_up, stats.level() == level + 1);
        }
    }

    #[test]
    fn generated_game_respects_invariants(
        seed in any::<[u8; 16]>(),
        inputs in prop::collection::vec(0u8..6, 1..400),
    ) {
        let mut session =
            GameSession::with_seed(EngineConfig::default(), PieceSeed::from_bytes(seed)).unwrap();
        session.start().unwrap();

        for input in inputs {
            match input {
                0 => { session.move_left(); }
                1 => { session.move_right(); }
                2 => { session.rotate_clockwise(); }
                3 => { session.soft_drop(true); }
                _ => {}
            }

            let before = session.board().filled_count();
            let lines_before = session.stats().total_cleared_lines();
            let outcome = session.tick();

            // The falling piece never overlaps the board while playing.
            if session.state().is_playing() {
                prop_assert!(!session.board().is_colliding(session.falling_piece()));
            }
            match outcome {
                TickOutcome::Locked(result) | TickOutcome::GameOver(result) => {
                    let cols = session.board().cols();
                    prop_assert_eq!(
                        session.board().filled_count() + result.cleared_lines * cols,
                        before + PIECE_CELLS
                    );
                    prop_assert_eq!(
                        session.stats().total_cleared_lines(),
                        lines_before + result.cleared_lines
                    );
                }
                TickOutcome::Fell | TickOutcome::Idle => {
                    prop_assert_eq!(session.board().filled_count(), before);
                }
            }
            if outcome.is_game_over() {
                prop_assert!(session.tick_interval().is_none());
                break;
            }
        }
    }
}
