//! Active falling piece logic

use crate::board::{Board, COLS};
use crate::tetromino::{RotationDirection, Shape, TetrominoType};

/// Horizontal offsets tried, in order, when a rotation collides.
/// No shift first, then one cell, then two, left before right.
pub const WALL_KICKS: [i32; 5] = [0, -1, 1, -2, 2];

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    /// The type of tetromino
    pub kind: TetrominoType,
    /// Index into `kind.rotations()`
    pub rotation: usize,
    /// Position of the shape grid's top-left corner; row 0 is the top
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    /// Create a new piece at spawn position, horizontally centred on row 0
    pub fn spawn(kind: TetrominoType) -> Self {
        let width = kind.shape(0).width();
        Self {
            kind,
            rotation: 0,
            row: 0,
            col: ((COLS - width) / 2) as i32,
        }
    }

    /// Current rotation state
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape(self.rotation)
    }

    /// Absolute (row, col) of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape()
            .cells()
            .map(|(dr, dc)| (self.row + dr, self.col + dc))
    }

    /// Whether the piece overlaps walls, floor, or locked cells right now
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(self.shape(), self.row, self.col)
    }

    /// Try to shift by (d_row, d_col), returns true if successful
    pub fn try_move(&mut self, board: &Board, d_row: i32, d_col: i32) -> bool {
        if board.collides(self.shape(), self.row + d_row, self.col + d_col) {
            return false;
        }
        self.row += d_row;
        self.col += d_col;
        true
    }

    pub fn move_left(&mut self, board: &Board) -> bool {
        self.try_move(board, 0, -1)
    }

    pub fn move_right(&mut self, board: &Board) -> bool {
        self.try_move(board, 0, 1)
    }

    pub fn move_down(&mut self, board: &Board) -> bool {
        self.try_move(board, 1, 0)
    }

    /// Try to rotate, kicking sideways through `WALL_KICKS`
    ///
    /// Rotation index and column change together or not at all.
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let rotations = self.kind.rotations();
        let next = direction.apply(self.rotation, rotations.len());
        let shape = &rotations[next];

        for kick in WALL_KICKS {
            if !board.collides(shape, self.row, self.col + kick) {
                self.rotation = next;
                self.col += kick;
                return true;
            }
        }
        false
    }

    /// Move down as far as possible and return distance dropped
    pub fn drop_to_floor(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.move_down(board) {
            distance += 1;
        }
        distance
    }

    /// Where the piece would land if dropped now
    pub fn ghost(&self, board: &Board) -> ActivePiece {
        let mut ghost = *self;
        ghost.drop_to_floor(board);
        ghost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, ROWS};
    use proptest::prelude::*;
    use ratatui::style::Color;

    #[test]
    fn test_spawn_position() {
        // 3-wide pieces start at col 3, I (4 wide) at col 3, O (2 wide) at col 4
        assert_eq!(ActivePiece::spawn(TetrominoType::T).col, 3);
        assert_eq!(ActivePiece::spawn(TetrominoType::I).col, 3);
        assert_eq!(ActivePiece::spawn(TetrominoType::O).col, 4);
        let piece = ActivePiece::spawn(TetrominoType::T);
        assert_eq!(piece.row, 0);
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn test_move_down() {
        let board = Board::new();
        let mut piece = ActivePiece::spawn(TetrominoType::T);
        assert!(piece.move_down(&board));
        assert_eq!(piece.row, 1);
    }

    #[test]
    fn test_blocked_move_is_noop() {
        let board = Board::new();
        let mut piece = ActivePiece::spawn(TetrominoType::O);
        while piece.move_left(&board) {}
        assert_eq!(piece.col, 0);
        let before = piece;
        assert!(!piece.move_left(&board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_hard_drop_reaches_floor() {
        let board = Board::new();
        let mut piece = ActivePiece::spawn(TetrominoType::I);
        let distance = piece.drop_to_floor(&board);
        // Horizontal I occupies grid row 1, floor is row 19
        assert_eq!(distance, ROWS as u32 - 2);
        assert!(piece.cells().all(|(r, _)| r == ROWS as i32 - 1));
    }

    #[test]
    fn test_ghost_does_not_move_piece() {
        let board = Board::new();
        let piece = ActivePiece::spawn(TetrominoType::L);
        let ghost = piece.ghost(&board);
        assert_eq!(piece.row, 0);
        assert!(ghost.row > piece.row);
        assert_eq!(ghost.col, piece.col);
        let mut below = ghost;
        assert!(!below.move_down(&board));
    }

    #[test]
    fn test_rotation_cycle_returns_home() {
        let board = Board::new();
        for kind in TetrominoType::ALL {
            let mut piece = ActivePiece::spawn(kind);
            piece.row = 8;
            let start = piece;
            for _ in 0..kind.rotations().len() {
                assert!(piece.rotate(RotationDirection::Clockwise, &board));
            }
            assert_eq!(piece, start, "{kind:?}");
            for _ in 0..kind.rotations().len() {
                assert!(piece.rotate(RotationDirection::CounterClockwise, &board));
            }
            assert_eq!(piece, start, "{kind:?}");
        }
    }

    #[test]
    fn test_kick_off_left_wall() {
        let board = Board::new();
        // Vertical I in rotation 3 occupies grid col 1; push it to the wall
        let mut piece = ActivePiece {
            kind: TetrominoType::I,
            rotation: 3,
            row: 5,
            col: -1,
        };
        assert!(!piece.collides(&board));
        // Rotation 0 needs cols -1..=2: the first fit is one to the right
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.col, 0);
    }

    #[test]
    fn test_kick_right_when_left_blocked() {
        let mut board = Board::new();
        // T pointing right; the block sits where rotation 2's bar would start
        let mut piece = ActivePiece {
            kind: TetrominoType::T,
            rotation: 1,
            row: 10,
            col: 4,
        };
        board.set(11, 4, Cell::Filled(Color::Red));
        assert!(!piece.collides(&board));
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.rotation, 2);
        // Offset -1 overlaps too, so +1 is taken
        assert_eq!(piece.col, 5);
    }

    /// T in rotation 2 at row 10, col 4 with the given cells filled
    fn flat_t_between(blocks: &[(i32, i32)]) -> (ActivePiece, Board) {
        let mut board = Board::new();
        for &(row, col) in blocks {
            board.set(row, col, Cell::Filled(Color::Red));
        }
        let piece = ActivePiece {
            kind: TetrominoType::T,
            rotation: 2,
            row: 10,
            col: 4,
        };
        assert!(!piece.collides(&board));
        (piece, board)
    }

    #[test]
    fn test_kick_left_before_right() {
        // Rotation 3's stem top lands on (10, 5); both single kicks clear it
        let (mut piece, board) = flat_t_between(&[(10, 5)]);
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.rotation, 3);
        assert_eq!(piece.col, 3);
    }

    #[test]
    fn test_kick_two_left_when_single_kicks_fail() {
        let (mut piece, board) = flat_t_between(&[(10, 4), (10, 5), (10, 6)]);
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.rotation, 3);
        assert_eq!(piece.col, 2);
    }

    #[test]
    fn test_kick_two_right_last() {
        let (mut piece, board) = flat_t_between(&[(10, 3), (10, 4), (10, 5), (10, 6)]);
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.rotation, 3);
        assert_eq!(piece.col, 6);
    }

    #[test]
    fn test_rotation_rejected_when_boxed_in() {
        let mut board = Board::new();
        let mut piece = ActivePiece {
            kind: TetrominoType::I,
            rotation: 1,
            row: 10,
            col: 3,
        };
        // Wall off every column except the I's own (col 5) on rows 10..14
        for row in 10..14 {
            for col in 0..COLS as i32 {
                if col != 5 {
                    board.set(row, col, Cell::Filled(Color::Red));
                }
            }
        }
        let before = piece;
        assert!(!piece.rotate(RotationDirection::Clockwise, &board));
        assert!(!piece.rotate(RotationDirection::CounterClockwise, &board));
        assert_eq!(piece, before);
    }

    fn any_kind() -> impl Strategy<Value = TetrominoType> {
        prop::sample::select(TetrominoType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_rotation_never_overlaps(
            kind in any_kind(),
            row in 0i32..18,
            col in -1i32..9,
            turns in prop::collection::vec(any::<bool>(), 1..12),
            blocked in prop::collection::vec((0i32..ROWS as i32, 0i32..COLS as i32), 0..25),
        ) {
            let mut board = Board::new();
            for (r, c) in &blocked {
                board.set(*r, *c, Cell::Filled(Color::Gray));
            }
            let mut piece = ActivePiece { kind, rotation: 0, row, col };
            prop_assume!(!piece.collides(&board));

            for clockwise in turns {
                let dir = if clockwise {
                    RotationDirection::Clockwise
                } else {
                    RotationDirection::CounterClockwise
                };
                let before = piece;
                if !piece.rotate(dir, &board) {
                    prop_assert_eq!(piece, before);
                }
                prop_assert!(!piece.collides(&board));
            }
        }
    }
}
