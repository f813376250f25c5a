use serde::Serialize;

pub const BOARD_SIZE: usize = 8;
pub const PIECES_PER_SIDE: u8 = 12;
/// Rows filled with pieces at the start, counted from each side's back edge.
pub const STARTING_ROWS: usize = 3;

/// Side to move. White starts at the bottom (rows 5-7) and moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of an ordinary move.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

/// A board coordinate. Only constructible on the board, so indexing with it never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Returns `None` when `(row, col)` lies outside the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Grid indices already known to be in range.
    pub(crate) fn from_grid(row: usize, col: usize) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if in_bounds(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Dark squares are the only playable ones: `(row + col)` is odd.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

fn in_bounds(row: i16, col: i16) -> bool {
    (0..BOARD_SIZE as i16).contains(&row) && (0..BOARD_SIZE as i16).contains(&col)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub color: Color,
}

impl Piece {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

/// One legal destination for a piece. `captured` is set for jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub to: Position,
    pub captured: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Capture,
    Ordinary,
}

/// Legal moves of a single piece. Captures, when present, exclude ordinary moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveSet {
    pub kind: MoveKind,
    pub moves: Vec<Move>,
}

impl MoveSet {
    pub fn empty() -> Self {
        Self {
            kind: MoveKind::Ordinary,
            moves: Vec::new(),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.kind == MoveKind::Capture && !self.moves.is_empty()
    }

    pub fn find(&self, to: Position) -> Option<Move> {
        self.moves.iter().copied().find(|mv| mv.to == to)
    }

    pub fn targets(&self) -> Vec<Position> {
        self.moves.iter().map(|mv| mv.to).collect()
    }
}

/// Final result after one side has no pieces left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Color,
    pub white_left: u8,
    pub black_left: u8,
}

/// Most recently applied move, kept for animating the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastMove {
    pub from: Position,
    pub to: Position,
    pub captured: Option<Position>,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// `cells[row][col]`, `None` for an empty square.
    pub cells: Vec<Vec<Option<Color>>>,
    pub current_player: Color,
    pub selected: Option<Position>,
    /// Contract: only `true` while `selected` is set.
    pub capture_chain_active: bool,
    pub white_count: u8,
    pub black_count: u8,
    pub is_game_over: bool,
    pub winner: Option<Color>,
    pub last_move: Option<LastMove>,
}
