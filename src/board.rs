use once_cell::sync::Lazy;

use crate::types::{
    BOARD_SIZE, Color, Move, MoveKind, MoveSet, Piece, Position, STARTING_ROWS,
};

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

static STARTING_LAYOUT: Lazy<Board> = Lazy::new(Board::starting_layout);

/// Checkers board: an 8x8 grid, each cell empty or holding one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// black on the dark squares of rows 0-2, white on rows 5-7.
    pub fn new() -> Self {
        *STARTING_LAYOUT
    }

    /// Creates a board with no pieces. Useful for setting up positions.
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    fn starting_layout() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::from_grid(row, col);
                if !pos.is_dark() {
                    continue;
                }
                if row < STARTING_ROWS {
                    board.place(pos, Piece::new(Color::Black));
                } else if row >= BOARD_SIZE - STARTING_ROWS {
                    board.place(pos, Piece::new(Color::White));
                }
            }
        }
        board
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.row() as usize][pos.col() as usize]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Puts `piece` on `pos`, replacing whatever was there.
    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.cells[pos.row() as usize][pos.col() as usize] = Some(piece);
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.row() as usize][pos.col() as usize].take()
    }

    /// Moves the piece on `from` to `to` and clears `from`.
    /// Returns `false` without touching the board when `from` is empty.
    pub fn move_piece(&mut self, from: Position, to: Position) -> bool {
        match self.remove(from) {
            Some(piece) => {
                self.place(to, piece);
                true
            }
            None => false,
        }
    }

    /// Live number of pieces of `color`.
    pub fn count(&self, color: Color) -> u8 {
        self.pieces(color).count() as u8
    }

    /// Positions of every piece of `color`, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().flat_map(move |(row, line)| {
            line.iter().enumerate().filter_map(move |(col, cell)| match cell {
                Some(piece) if piece.color == color => Some(Position::from_grid(row, col)),
                _ => None,
            })
        })
    }

    /// Jumps available to the piece on `pos`, in any diagonal direction.
    pub fn capture_moves(&self, pos: Position) -> Vec<Move> {
        let Some(piece) = self.get(pos) else {
            return Vec::new();
        };
        let opponent = piece.color.opponent();

        DIAGONALS
            .iter()
            .filter_map(|&(dr, dc)| {
                let over = pos.offset(dr, dc)?;
                let to = pos.offset(dr * 2, dc * 2)?;
                let jumped = self.get(over)?;
                if jumped.color == opponent && self.is_empty(to) {
                    Some(Move {
                        to,
                        captured: Some(over),
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// One-step forward diagonal moves of the piece on `pos`.
    pub fn ordinary_moves(&self, pos: Position) -> Vec<Move> {
        let Some(piece) = self.get(pos) else {
            return Vec::new();
        };
        let dr = piece.color.forward();

        [-1i8, 1]
            .iter()
            .filter_map(|&dc| {
                let to = pos.offset(dr, dc)?;
                self.is_empty(to).then_some(Move { to, captured: None })
            })
            .collect()
    }

    /// Captures when any exist, otherwise ordinary moves.
    pub fn legal_moves(&self, pos: Position) -> MoveSet {
        let captures = self.capture_moves(pos);
        if !captures.is_empty() {
            return MoveSet {
                kind: MoveKind::Capture,
                moves: captures,
            };
        }
        MoveSet {
            kind: MoveKind::Ordinary,
            moves: self.ordinary_moves(pos),
        }
    }

    pub fn has_any_capture(&self, color: Color) -> bool {
        self.pieces(color)
            .any(|pos| self.legal_moves(pos).is_capture())
    }

    /// Converts board to rows of cells, `None` for empty squares.
    pub fn to_cells(&self) -> Vec<Vec<Option<Color>>> {
        self.cells
            .iter()
            .map(|line| line.iter().map(|cell| cell.map(|p| p.color)).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn board_with(pieces: &[(u8, u8, Color)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, color) in pieces {
            board.place(pos(row, col), Piece::new(color));
        }
        board
    }

    fn all_positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| pos(row, col)))
    }

    #[test]
    fn initial_layout_fills_three_rows_per_side_on_dark_squares() {
        let board = Board::new();

        assert_eq!(board.count(Color::White), 12);
        assert_eq!(board.count(Color::Black), 12);

        for p in all_positions() {
            let expected = match (p.is_dark(), p.row()) {
                (true, 0..=2) => Some(Color::Black),
                (true, 5..=7) => Some(Color::White),
                _ => None,
            };
            assert_eq!(board.get(p).map(|piece| piece.color), expected, "{p:?}");
        }
    }

    #[test]
    fn new_is_identical_every_time() {
        assert_eq!(Board::new(), Board::new());
        assert_eq!(Board::new(), Board::starting_layout());
    }

    #[test]
    fn white_ordinary_moves_step_toward_row_zero() {
        let board = board_with(&[(5, 1, Color::White)]);

        let set = board.legal_moves(pos(5, 1));

        assert_eq!(set.kind, MoveKind::Ordinary);
        assert_eq!(set.targets(), vec![pos(4, 0), pos(4, 2)]);
    }

    #[test]
    fn black_ordinary_moves_step_toward_row_seven() {
        let board = board_with(&[(2, 3, Color::Black)]);

        let set = board.legal_moves(pos(2, 3));

        assert_eq!(set.targets(), vec![pos(3, 2), pos(3, 4)]);
    }

    #[test]
    fn ordinary_moves_skip_occupied_squares() {
        let board = board_with(&[(5, 1, Color::White), (4, 0, Color::White)]);

        assert_eq!(board.legal_moves(pos(5, 1)).targets(), vec![pos(4, 2)]);
    }

    #[test]
    fn capture_excludes_ordinary_moves() {
        let board = board_with(&[(5, 1, Color::White), (4, 2, Color::Black)]);

        let set = board.legal_moves(pos(5, 1));

        assert_eq!(set.kind, MoveKind::Capture);
        assert_eq!(
            set.moves,
            vec![Move {
                to: pos(3, 3),
                captured: Some(pos(4, 2)),
            }]
        );
    }

    #[test]
    fn capture_needs_empty_landing_square() {
        let board = board_with(&[
            (5, 1, Color::White),
            (4, 2, Color::Black),
            (3, 3, Color::Black),
        ]);

        let set = board.legal_moves(pos(5, 1));

        assert_eq!(set.kind, MoveKind::Ordinary);
        assert_eq!(set.targets(), vec![pos(4, 0)]);
    }

    #[test]
    fn own_pieces_are_never_jumped() {
        let board = board_with(&[(5, 1, Color::White), (4, 2, Color::White)]);

        assert!(board.capture_moves(pos(5, 1)).is_empty());
    }

    #[test]
    fn captures_are_allowed_backwards() {
        let board = board_with(&[(3, 3, Color::White), (4, 4, Color::Black)]);

        let set = board.legal_moves(pos(3, 3));

        assert_eq!(set.kind, MoveKind::Capture);
        assert_eq!(set.targets(), vec![pos(5, 5)]);
    }

    #[test]
    fn edge_pieces_never_target_off_board() {
        let mut board = Board::empty();
        for p in all_positions().filter(|p| p.is_dark()) {
            let color = if p.row() % 2 == 0 { Color::White } else { Color::Black };
            board.place(p, Piece::new(color));
        }
        for hole in [pos(0, 1), pos(7, 6), pos(3, 0), pos(4, 7), pos(2, 5)] {
            board.remove(hole);
        }

        for p in all_positions() {
            for mv in board.legal_moves(p).moves {
                assert!(Position::new(mv.to.row(), mv.to.col()).is_some());
                if let Some(c) = mv.captured {
                    assert!(Position::new(c.row(), c.col()).is_some());
                    assert_ne!(board.get(c).map(|x| x.color), board.get(p).map(|x| x.color));
                }
                assert!(board.is_empty(mv.to));
            }
        }
    }

    #[test]
    fn corner_piece_has_single_inward_capture() {
        let board = board_with(&[(7, 0, Color::White), (6, 1, Color::Black)]);

        assert_eq!(board.legal_moves(pos(7, 0)).targets(), vec![pos(5, 2)]);
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert_eq!(Board::new().legal_moves(pos(4, 1)), MoveSet::empty());
    }

    #[test]
    fn has_any_capture_scans_every_piece_of_color() {
        let board = board_with(&[
            (5, 1, Color::White),
            (6, 5, Color::White),
            (5, 4, Color::Black),
        ]);

        assert!(board.has_any_capture(Color::White));
        // Black jumps (6,5) backwards into (7,6).
        assert!(board.has_any_capture(Color::Black));
        assert!(!Board::new().has_any_capture(Color::White));
        assert!(!Board::new().has_any_capture(Color::Black));

        let quiet = board_with(&[(5, 0, Color::White), (2, 3, Color::Black)]);
        assert!(!quiet.has_any_capture(Color::White));
        assert!(!quiet.has_any_capture(Color::Black));
    }

    #[test]
    fn move_piece_clears_source() {
        let mut board = board_with(&[(5, 1, Color::White)]);

        assert!(board.move_piece(pos(5, 1), pos(4, 2)));
        assert!(board.is_empty(pos(5, 1)));
        assert_eq!(board.get(pos(4, 2)), Some(Piece::new(Color::White)));
        assert!(!board.move_piece(pos(5, 1), pos(4, 0)));
    }
}
