use std::fmt;

use crate::board::Board;
use crate::log;
use crate::types::{
    Color, GameResult, GameState, LastMove, Move, MoveSet, PIECES_PER_SIDE, Position,
};

/// Why a move attempt left the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    GameOver,
    NoSelection,
    /// Another move of the current player captures, so this ordinary move is illegal.
    MustCapture,
    NotATarget,
    /// The chaining piece has to keep jumping; no other piece may move.
    ChainInProgress,
}

impl MoveRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveRejection::GameOver => "game is already over",
            MoveRejection::NoSelection => "no piece is selected",
            MoveRejection::MustCapture => "must capture",
            MoveRejection::NotATarget => "illegal move",
            MoveRejection::ChainInProgress => "capture chain in progress",
        }
    }
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for MoveRejection {}

/// What happened after a move was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The same piece must jump again; the turn does not pass.
    ContinueCapture { next_moves: Vec<Move> },
    TurnSwitched { next_player: Color },
    GameEnded(GameResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveApplied {
    pub from: Position,
    pub to: Position,
    pub captured: Option<Position>,
    pub outcome: MoveOutcome,
}

/// Result of `Game::select_piece`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(MoveSet),
    /// The already-selected piece was picked again.
    Cleared,
    Ignored,
}

/// One game session. State changes only through the methods below.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Color,
    selection: Option<Position>,
    capture_chain_active: bool,
    white_count: u8,
    black_count: u8,
    ended: bool,
    winner: Option<Color>,
    last_move: Option<LastMove>,
    debug: bool,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Color::White,
            selection: None,
            capture_chain_active: false,
            white_count: PIECES_PER_SIDE,
            black_count: PIECES_PER_SIDE,
            ended: false,
            winner: None,
            last_move: None,
            debug: false,
        }
    }

    /// Replaces the whole session with a fresh one. The debug flag survives.
    pub fn new_game(&mut self) {
        *self = Self {
            debug: self.debug,
            ..Self::new()
        };
        self.trace(|| "new game".to_string());
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    pub fn capture_chain_active(&self) -> bool {
        self.capture_chain_active
    }

    pub fn is_game_over(&self) -> bool {
        self.ended
    }

    /// Returns `(white_count, black_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.white_count, self.black_count)
    }

    /// Legal moves of the piece on `pos`. Empty unless it belongs to the side to move.
    pub fn legal_moves(&self, pos: Position) -> MoveSet {
        if self.ended {
            return MoveSet::empty();
        }
        match self.board.get(pos) {
            Some(piece) if piece.color == self.current_player => self.board.legal_moves(pos),
            _ => MoveSet::empty(),
        }
    }

    pub fn has_any_capture(&self, player: Color) -> bool {
        self.board.has_any_capture(player)
    }

    pub fn select_piece(&mut self, pos: Position) -> Selection {
        if self.ended || self.capture_chain_active {
            return Selection::Ignored;
        }
        match self.board.get(pos) {
            Some(piece) if piece.color == self.current_player => {}
            _ => return Selection::Ignored,
        }

        if self.selection == Some(pos) {
            self.selection = None;
            return Selection::Cleared;
        }

        self.selection = Some(pos);
        let moves = self.board.legal_moves(pos);
        self.trace(|| format!("select {pos:?}: {:?} {:?}", moves.kind, moves.targets()));
        Selection::Selected(moves)
    }

    /// Clears the selection unless the selected piece is in the middle of a capture chain.
    pub fn deselect(&mut self) -> bool {
        if self.capture_chain_active || self.selection.is_none() {
            return false;
        }
        self.selection = None;
        true
    }

    /// Moves the selected piece to `destination`.
    pub fn attempt_move(&mut self, destination: Position) -> Result<MoveApplied, MoveRejection> {
        if self.ended {
            return Err(MoveRejection::GameOver);
        }
        let from = self.selection.ok_or(MoveRejection::NoSelection)?;

        let moves = self.board.legal_moves(from);
        if self.board.has_any_capture(self.current_player) && !moves.is_capture() {
            self.trace(|| format!("reject {from:?} -> {destination:?}: must capture"));
            return Err(MoveRejection::MustCapture);
        }
        let chosen = moves.find(destination).ok_or(MoveRejection::NotATarget)?;

        self.board.move_piece(from, destination);
        self.last_move = Some(LastMove {
            from,
            to: destination,
            captured: chosen.captured,
        });

        let outcome = match chosen.captured {
            Some(captured) => self.resolve_capture(destination, captured),
            None => {
                self.end_turn();
                MoveOutcome::TurnSwitched {
                    next_player: self.current_player,
                }
            }
        };
        self.trace(|| format!("move {from:?} -> {destination:?}: {outcome:?}"));

        Ok(MoveApplied {
            from,
            to: destination,
            captured: chosen.captured,
            outcome,
        })
    }

    /// Two-argument form: selects `from` when it is not already selected, then moves.
    /// A rejected attempt restores the previous selection.
    pub fn attempt_move_from(
        &mut self,
        from: Position,
        destination: Position,
    ) -> Result<MoveApplied, MoveRejection> {
        if self.ended {
            return Err(MoveRejection::GameOver);
        }
        let previous = self.selection;
        if previous != Some(from) {
            if self.capture_chain_active {
                return Err(MoveRejection::ChainInProgress);
            }
            if !matches!(self.select_piece(from), Selection::Selected(_)) {
                return Err(MoveRejection::NoSelection);
            }
        }

        let result = self.attempt_move(destination);
        if result.is_err() {
            self.selection = previous;
        }
        result
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            cells: self.board.to_cells(),
            current_player: self.current_player,
            selected: self.selection,
            capture_chain_active: self.capture_chain_active,
            white_count: self.white_count,
            black_count: self.black_count,
            is_game_over: self.ended,
            winner: self.winner,
            last_move: self.last_move,
        }
    }

    /// `None` until one side has lost every piece.
    pub fn result(&self) -> Option<GameResult> {
        self.winner.map(|winner| GameResult {
            winner,
            white_left: self.white_count,
            black_left: self.black_count,
        })
    }

    fn resolve_capture(&mut self, landing: Position, captured: Position) -> MoveOutcome {
        if let Some(piece) = self.board.remove(captured) {
            match piece.color {
                Color::White => self.white_count -= 1,
                Color::Black => self.black_count -= 1,
            }
        }
        debug_assert_eq!(self.white_count, self.board.count(Color::White));
        debug_assert_eq!(self.black_count, self.board.count(Color::Black));

        if self.white_count == 0 || self.black_count == 0 {
            self.ended = true;
            self.winner = Some(self.current_player);
            self.selection = None;
            self.capture_chain_active = false;
            return MoveOutcome::GameEnded(GameResult {
                winner: self.current_player,
                white_left: self.white_count,
                black_left: self.black_count,
            });
        }

        let next_moves = self.board.capture_moves(landing);
        if next_moves.is_empty() {
            self.end_turn();
            return MoveOutcome::TurnSwitched {
                next_player: self.current_player,
            };
        }

        self.selection = Some(landing);
        self.capture_chain_active = true;
        MoveOutcome::ContinueCapture { next_moves }
    }

    fn end_turn(&mut self) {
        self.selection = None;
        self.capture_chain_active = false;
        self.current_player = self.current_player.opponent();
    }

    fn trace(&self, msg: impl FnOnce() -> String) {
        if self.debug {
            log::debug(&msg());
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Color) {
        self.board = board;
        self.current_player = current_player;
        self.selection = None;
        self.capture_chain_active = false;
        self.white_count = board.count(Color::White);
        self.black_count = board.count(Color::Black);
        self.ended = false;
        self.winner = None;
        self.last_move = None;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
