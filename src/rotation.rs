//! 90° matrix rotation
//!
//! Transpose-then-flip on the square shape matrix: reversing each row gives
//! the clockwise orientation, reversing the row order the counter-clockwise
//! one. Kick resolution against the board lives with the active piece.

use crate::tetromino::ShapeGrid;

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Compute the rotated copy of a shape matrix
///
/// The input is left untouched so a preview can keep rendering it while a
/// kick search probes the rotated form.
pub fn rotated(shape: &ShapeGrid, direction: RotationDirection) -> ShapeGrid {
    let mut matrix = shape.clone();

    // Transpose in place, swapping across the diagonal
    for y in 0..matrix.len() {
        for x in 0..y {
            let swapped = matrix[y][x];
            matrix[y][x] = matrix[x][y];
            matrix[x][y] = swapped;
        }
    }

    match direction {
        RotationDirection::Clockwise => {
            for row in &mut matrix {
                row.reverse();
            }
        }
        RotationDirection::CounterClockwise => matrix.reverse(),
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::PieceKind;

    #[test]
    fn test_clockwise_quarter_turn() {
        let rotated_j = rotated(&PieceKind::J.matrix(), RotationDirection::Clockwise);
        assert_eq!(
            rotated_j,
            vec![
                vec![0, 2, 2],
                vec![0, 2, 0],
                vec![0, 2, 0],
            ]
        );
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::all() {
            for direction in [
                RotationDirection::Clockwise,
                RotationDirection::CounterClockwise,
            ] {
                let original = kind.matrix();
                let mut matrix = original.clone();
                for _ in 0..4 {
                    matrix = rotated(&matrix, direction);
                }
                assert_eq!(matrix, original);
            }
        }
    }

    #[test]
    fn test_directions_are_inverses() {
        for kind in PieceKind::all() {
            let original = kind.matrix();
            let there = rotated(&original, RotationDirection::Clockwise);
            let back = rotated(&there, RotationDirection::CounterClockwise);
            assert_eq!(back, original);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let original = PieceKind::S.matrix();
        let copy = original.clone();
        let _ = rotated(&original, RotationDirection::Clockwise);
        assert_eq!(original, copy);
    }
}
