//! Terminal UI rendering with ratatui
//!
//! Read-only view of the engine: board plus active piece once per frame,
//! next-piece preview and session stats on the side, phase overlays on top.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::{Game, Phase};
use crate::piece::Piece;
use crate::settings::Settings;
use crate::tetromino::{PieceKind, ShapeGrid};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Total width needed: board(10*2 + 2 for borders) + next/stats(16) = 38
const GAME_WIDTH: u16 = 38;
/// Total height needed: board(20) + 2 for borders = 22
const GAME_HEIGHT: u16 = 22;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board
            Constraint::Length(16), // Next + stats
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Next preview
            Constraint::Min(9),    // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], game.next, settings);
    render_stats(frame, right_layout[1], game);

    match game.phase {
        Phase::Inactive => render_overlay(frame, area, "BLOCKFALL", "Press Enter to start"),
        Phase::Paused => render_overlay(frame, area, "PAUSED", "Press Enter to resume"),
        Phase::Over => render_overlay(frame, area, "GAME OVER", "Press R to reset"),
        Phase::Running => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the board with the active piece overlaid
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let block_char = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..BOARD_HEIGHT {
        let mut spans = Vec::new();
        for col in 0..BOARD_WIDTH {
            let value = piece_cell(&game.piece, row, col)
                .unwrap_or_else(|| game.board.cell(row, col));
            let span = match PieceKind::from_id(value) {
                Some(kind) => Span::styled(block_char, Style::default().fg(kind.color())),
                None => Span::raw(EMPTY),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Cell value the active piece contributes at a board coordinate
fn piece_cell(piece: &Piece, row: usize, col: usize) -> Option<u8> {
    let y = row as i32 - piece.row;
    let x = col as i32 - piece.col;
    if y < 0 || x < 0 {
        return None;
    }
    piece
        .matrix
        .get(y as usize)
        .and_then(|line| line.get(x as usize))
        .copied()
        .filter(|&value| value != 0)
}

/// Render the next piece preview box
fn render_next(frame: &mut Frame, area: Rect, next: PieceKind, settings: &Settings) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_mini_shape(frame, inner, &next.matrix(), settings.visual.block_chars());
}

/// Render a shape matrix small, for the preview
fn render_mini_shape(frame: &mut Frame, area: Rect, matrix: &ShapeGrid, block_char: &str) {
    let mut lines: Vec<Line> = Vec::new();
    for line in matrix {
        if line.iter().all(|&value| value == 0) {
            continue;
        }
        let spans: Vec<Span> = line
            .iter()
            .map(|&value| match PieceKind::from_id(value) {
                Some(kind) => Span::styled(block_char, Style::default().fg(kind.color())),
                None => Span::raw(EMPTY),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.progress.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.progress.level),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.progress.lines),
            Style::default().fg(Color::Green),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render a centered message box above everything else
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let overlay = center_rect(area, 30, 5);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    /// Lines a board renders to, without styling
    fn board_glyphs(board: &Board) -> Vec<String> {
        board
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&cell| if cell == 0 { '.' } else { '#' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_piece_cell_maps_board_coordinates() {
        let piece = Piece::spawn(PieceKind::T);
        // T spawns at col 3: its center cell sits at (0, 4)
        assert_eq!(piece_cell(&piece, 0, 4), Some(6));
        assert_eq!(piece_cell(&piece, 0, 3), None);
        assert_eq!(piece_cell(&piece, 1, 3), Some(6));
        assert_eq!(piece_cell(&piece, 5, 5), None);
    }

    #[test]
    fn test_piece_cell_ignores_cells_left_of_the_matrix() {
        let mut piece = Piece::spawn(PieceKind::I);
        piece.col = 2;
        assert_eq!(piece_cell(&piece, 1, 1), None);
        assert_eq!(piece_cell(&piece, 1, 2), Some(1));
    }

    #[test]
    fn test_board_glyphs_shape() {
        let mut board = Board::new();
        board.set(19, 0, 3);
        let glyphs = board_glyphs(&board);
        assert_eq!(glyphs.len(), BOARD_HEIGHT);
        assert_eq!(glyphs[19], "#.........");
        assert!(glyphs[0].chars().all(|c| c == '.'));
    }
}
