//! Active falling piece
//!
//! Owns a mutable copy of its shape matrix and the (row, col) offset of that
//! matrix onto the board. Every movement is tentative: apply, test against
//! the board, revert on collision, so the piece never rests in a colliding
//! state.

use crate::board::{Board, BOARD_WIDTH};
use crate::rotation::{rotated, RotationDirection};
use crate::tetromino::{PieceKind, ShapeGrid};

/// An active falling piece
#[derive(Debug, Clone)]
pub struct Piece {
    /// The kind this piece was drawn as
    pub kind: PieceKind,
    /// Owned shape matrix; replaced wholesale on rotation
    pub matrix: ShapeGrid,
    /// Board row of the matrix's top-left corner
    pub row: i32,
    /// Board column of the matrix's top-left corner
    pub col: i32,
}

impl Piece {
    /// Create a piece at its spawn position: row 0, horizontally centered
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = kind.matrix();
        let col = (BOARD_WIDTH - matrix.len()) as i32 / 2;
        Self {
            kind,
            matrix,
            row: 0,
            col,
        }
    }

    /// Try to shift horizontally by delta, returns true if successful
    pub fn shift(&mut self, delta: i32, board: &Board) -> bool {
        self.col += delta;
        if board.collides(&self.matrix, self.row, self.col) {
            self.col -= delta;
            return false;
        }
        true
    }

    /// Try to move down one row, returns true if successful
    pub fn descend(&mut self, board: &Board) -> bool {
        self.row += 1;
        if board.collides(&self.matrix, self.row, self.col) {
            self.row -= 1;
            return false;
        }
        true
    }

    /// Try to rotate, resolving collisions with horizontal kicks
    ///
    /// After rotating, alternating offsets of growing magnitude (+1, -2, +3,
    /// -4, ...) are added to the column until the piece fits. Once the offset
    /// magnitude exceeds the matrix width the rotation is impossible here:
    /// shape and position roll back and the call reports false.
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let start_col = self.col;
        let next = rotated(&self.matrix, direction);
        let previous = std::mem::replace(&mut self.matrix, next);
        let width = self.matrix.len() as i32;

        let mut offset = 1;
        while board.collides(&self.matrix, self.row, self.col) {
            self.col += offset;
            offset = -(offset + offset.signum());
            if offset.abs() > width {
                self.matrix = previous;
                self.col = start_col;
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_top_centered() {
        assert_eq!(Piece::spawn(PieceKind::O).col, 4);
        assert_eq!(Piece::spawn(PieceKind::T).col, 3);
        assert_eq!(Piece::spawn(PieceKind::I).col, 3);
        assert_eq!(Piece::spawn(PieceKind::T).row, 0);
    }

    #[test]
    fn test_shift_reverts_at_wall() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::O);

        while piece.shift(-1, &board) {}
        let at_wall = piece.col;
        assert!(!piece.shift(-1, &board));
        assert_eq!(piece.col, at_wall);
        assert_eq!(at_wall, 0);
    }

    #[test]
    fn test_descend_stops_on_floor() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::O);

        let mut steps = 0;
        while piece.descend(&board) {
            steps += 1;
        }
        // O is 2 tall and starts at row 0, so it can fall 18 rows
        assert_eq!(steps, 18);
        assert!(!piece.descend(&board));
        assert_eq!(piece.row, 18);
    }

    #[test]
    fn test_rotate_without_obstruction_keeps_column() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::T);
        let spawn_col = piece.col;

        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.col, spawn_col);
        assert_eq!(
            piece.matrix,
            vec![
                vec![0, 6, 0],
                vec![0, 6, 6],
                vec![0, 6, 0],
            ]
        );
    }

    #[test]
    fn test_rotate_kicks_off_locked_cells() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceKind::T);
        // rotated T would occupy (1, 4); block it so the first kick applies
        board.set(1, 4, 1);

        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.col, 4);
    }

    #[test]
    fn test_rotate_rolls_back_when_no_kick_fits() {
        let mut board = Board::new();
        let piece_footprint = [(0usize, 4usize), (1, 3), (1, 4), (1, 5)];
        // wall the piece in: every cell of the top rows except its own
        for row in 0..3 {
            for col in 0..BOARD_WIDTH {
                if !piece_footprint.contains(&(row, col)) {
                    board.set(row, col, 1);
                }
            }
        }

        let mut piece = Piece::spawn(PieceKind::T);
        let before = piece.clone();
        assert!(!piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.col, before.col);
        assert_eq!(piece.row, before.row);
        assert_eq!(piece.matrix, before.matrix);
    }
}
