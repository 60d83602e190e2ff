//! Tetromino catalog: the 7 piece shapes and their color mapping
//!
//! Shapes are stored as square matrices of cell values so the transpose-based
//! rotation applies uniformly. A cell value doubles as the color index on the
//! board: 0 is empty, 1..=7 identifies the piece kind.

use ratatui::style::Color;

/// A shape matrix: square grid of cell values with exactly one non-zero id
pub type ShapeGrid = Vec<Vec<u8>>;

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Cell value this kind writes to the board (1..=7)
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Recover the kind from a board cell value
    pub fn from_id(id: u8) -> Option<PieceKind> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Get the color for this kind
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Rgb(255, 107, 107),
            PieceKind::J => Color::Rgb(78, 205, 196),
            PieceKind::L => Color::Rgb(255, 230, 109),
            PieceKind::O => Color::Rgb(106, 5, 114),
            PieceKind::S => Color::Rgb(26, 83, 92),
            PieceKind::T => Color::Rgb(255, 159, 28),
            PieceKind::Z => Color::Rgb(46, 196, 182),
        }
    }

    /// Get all kinds, in cell-value order
    pub fn all() -> [PieceKind; 7] {
        [
            PieceKind::I,
            PieceKind::J,
            PieceKind::L,
            PieceKind::O,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ]
    }

    /// The spawn-orientation shape matrix, pre-padded to a square
    ///
    /// Each call hands out a fresh owned copy; the active piece mutates its
    /// matrix on rotation.
    pub fn matrix(&self) -> ShapeGrid {
        match self {
            PieceKind::I => vec![
                vec![0, 0, 0, 0],
                vec![1, 1, 1, 1],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            PieceKind::J => vec![
                vec![2, 0, 0],
                vec![2, 2, 2],
                vec![0, 0, 0],
            ],
            PieceKind::L => vec![
                vec![0, 0, 3],
                vec![3, 3, 3],
                vec![0, 0, 0],
            ],
            PieceKind::O => vec![
                vec![4, 4],
                vec![4, 4],
            ],
            PieceKind::S => vec![
                vec![0, 5, 5],
                vec![5, 5, 0],
                vec![0, 0, 0],
            ],
            PieceKind::T => vec![
                vec![0, 6, 0],
                vec![6, 6, 6],
                vec![0, 0, 0],
            ],
            PieceKind::Z => vec![
                vec![7, 7, 0],
                vec![0, 7, 7],
                vec![0, 0, 0],
            ],
        }
    }
}
