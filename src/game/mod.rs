//! Core Connect Four rules: board representation, gravity drops, win and tie
//! detection, turn alternation and resume reconciliation.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, GridError, Position, HEIGHT, RUN_LENGTH, WIDTH};
pub use player::Player;
pub use state::{
    infer_active_player, GameOutcome, GameState, GameStatus, MoveError, Placement, TIE_MESSAGE,
};
