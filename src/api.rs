use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::{Game, MoveApplied, MoveOutcome, Selection};
use crate::types::{Color, GameResult, Move, MoveSet, Position};

/// Applied move with its outcome spread over top-level fields:
/// `must_continue_capture` + `next_moves`, `turn_switched`, or `game_ended`.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct AppliedJson {
    applied: bool,
    from: Position,
    to: Position,
    captured: Option<Position>,
    must_continue_capture: bool,
    next_moves: Option<Vec<Move>>,
    turn_switched: Option<Color>,
    game_ended: Option<GameResult>,
}

impl AppliedJson {
    fn new(applied: MoveApplied) -> Self {
        let mut json = Self {
            applied: true,
            from: applied.from,
            to: applied.to,
            captured: applied.captured,
            must_continue_capture: false,
            next_moves: None,
            turn_switched: None,
            game_ended: None,
        };
        match applied.outcome {
            MoveOutcome::ContinueCapture { next_moves } => {
                json.must_continue_capture = true;
                json.next_moves = Some(next_moves);
            }
            MoveOutcome::TurnSwitched { next_player } => json.turn_switched = Some(next_player),
            MoveOutcome::GameEnded(result) => json.game_ended = Some(result),
        }
        json
    }
}

#[derive(Serialize)]
struct RejectedJson {
    rejected: String,
}

#[derive(Serialize)]
struct SelectionJson {
    status: &'static str,
    moves: Option<MoveSet>,
}

/// `None` fields become `null` so the presentation can test one sentinel.
fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

fn rejected(reason: impl ToString) -> JsValue {
    to_js(&RejectedJson {
        rejected: reason.to_string(),
    })
}

fn color_from_str(s: &str) -> Option<Color> {
    match s {
        "white" => Some(Color::White),
        "black" => Some(Color::Black),
        _ => None,
    }
}

/// Checkers session handed to the presentation layer.
#[wasm_bindgen]
pub struct CheckersGame {
    game: Game,
}

#[wasm_bindgen]
impl CheckersGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CheckersGame {
        CheckersGame { game: Game::new() }
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.game.set_debug(enabled);
    }

    pub fn get_state(&self) -> JsValue {
        to_js(&self.game.to_game_state())
    }

    /// `{ status: "selected" | "cleared" | "ignored", moves }`.
    pub fn select_piece(&mut self, row: u8, col: u8) -> JsValue {
        let selection = match Position::new(row, col) {
            Some(pos) => self.game.select_piece(pos),
            None => Selection::Ignored,
        };
        let json = match selection {
            Selection::Selected(moves) => SelectionJson {
                status: "selected",
                moves: Some(moves),
            },
            Selection::Cleared => SelectionJson {
                status: "cleared",
                moves: None,
            },
            Selection::Ignored => SelectionJson {
                status: "ignored",
                moves: None,
            },
        };
        to_js(&json)
    }

    pub fn deselect(&mut self) -> bool {
        self.game.deselect()
    }

    pub fn get_legal_moves(&self, row: u8, col: u8) -> JsValue {
        let moves = Position::new(row, col)
            .map(|pos| self.game.legal_moves(pos))
            .unwrap_or_else(MoveSet::empty);
        to_js(&moves)
    }

    /// `player` is `"white"` or `"black"`; anything else reports `false`.
    pub fn has_any_capture(&self, player: &str) -> bool {
        color_from_str(player).is_some_and(|color| self.game.has_any_capture(color))
    }

    pub fn attempt_move(&mut self, row: u8, col: u8) -> JsValue {
        let Some(destination) = Position::new(row, col) else {
            return rejected("row/col out of range");
        };
        match self.game.attempt_move(destination) {
            Ok(applied) => to_js(&AppliedJson::new(applied)),
            Err(reason) => rejected(reason),
        }
    }

    pub fn attempt_move_from(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> JsValue {
        let (Some(from), Some(to)) = (
            Position::new(from_row, from_col),
            Position::new(to_row, to_col),
        ) else {
            return rejected("row/col out of range");
        };
        match self.game.attempt_move_from(from, to) {
            Ok(applied) => to_js(&AppliedJson::new(applied)),
            Err(reason) => rejected(reason),
        }
    }

    /// `null` while the game is still running.
    pub fn get_result(&self) -> JsValue {
        match self.game.result() {
            Some(result) => to_js(&result),
            None => JsValue::NULL,
        }
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_names_match_serialized_form() {
        assert_eq!(color_from_str("white"), Some(Color::White));
        assert_eq!(color_from_str("black"), Some(Color::Black));
        assert_eq!(color_from_str("red"), None);
    }

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn continued_capture_is_reported_at_top_level() {
        let next = Move {
            to: pos(1, 5),
            captured: Some(pos(2, 4)),
        };
        let json = AppliedJson::new(MoveApplied {
            from: pos(5, 1),
            to: pos(3, 3),
            captured: Some(pos(4, 2)),
            outcome: MoveOutcome::ContinueCapture {
                next_moves: vec![next],
            },
        });

        assert!(json.applied);
        assert!(json.must_continue_capture);
        assert_eq!(json.next_moves, Some(vec![next]));
        assert_eq!(json.turn_switched, None);
        assert_eq!(json.game_ended, None);
    }

    #[test]
    fn turn_switch_and_game_end_are_reported_at_top_level() {
        let switched = AppliedJson::new(MoveApplied {
            from: pos(5, 2),
            to: pos(4, 3),
            captured: None,
            outcome: MoveOutcome::TurnSwitched {
                next_player: Color::Black,
            },
        });
        assert!(!switched.must_continue_capture);
        assert_eq!(switched.turn_switched, Some(Color::Black));
        assert_eq!(switched.game_ended, None);

        let result = GameResult {
            winner: Color::White,
            white_left: 3,
            black_left: 0,
        };
        let ended = AppliedJson::new(MoveApplied {
            from: pos(5, 2),
            to: pos(3, 4),
            captured: Some(pos(4, 3)),
            outcome: MoveOutcome::GameEnded(result),
        });
        assert_eq!(ended.game_ended, Some(result));
        assert_eq!(ended.turn_switched, None);
        assert_eq!(ended.next_moves, None);
    }

    #[test]
    fn wrapper_forwards_to_engine() {
        let mut game = CheckersGame::new();

        assert!(!game.has_any_capture("white"));
        assert!(!game.deselect());
        game.game.select_piece(Position::new(5, 2).unwrap());
        assert!(game.deselect());
    }
}
