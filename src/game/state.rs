use super::{Board, Player, WIDTH};
use crate::error::ResumeError;

/// Announcement shown when the board fills without a winner.
pub const TIE_MESSAGE: &str = "Tied - Both of you are winners!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

impl GameOutcome {
    /// End-of-game announcement for the presentation layer.
    pub fn message(&self) -> String {
        match self {
            GameOutcome::Winner(player) => format!("{} won!", player.name()),
            GameOutcome::Draw => TIE_MESSAGE.to_string(),
        }
    }
}

/// Lifecycle of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Empty,
    InProgress,
    Won(Player),
    Tied,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is outside the board")]
    InvalidColumn,
    #[error("game is over")]
    GameOver,
}

/// Where a legal move landed and what it did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: Player,
    pub outcome: Option<GameOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::One, // Player 1 starts
            outcome: None,
        }
    }

    /// Rebuild an unfinished game from a persisted board, deriving whose turn
    /// it is from the piece counts.
    pub fn resume(board: Board) -> Result<Self, ResumeError> {
        let player_one = board.count(Player::One);
        let player_two = board.count(Player::Two);
        if player_one < player_two || player_one - player_two > 1 {
            return Err(ResumeError::ImbalancedCounts {
                player_one,
                player_two,
            });
        }

        if let Some(pos) = board.floating_piece() {
            return Err(ResumeError::FloatingPiece {
                row: pos.row,
                col: pos.col,
            });
        }

        if board.has_win(Player::One) || board.has_win(Player::Two) || board.is_full() {
            return Err(ResumeError::Finished);
        }

        Ok(GameState {
            board,
            current_player: infer_active_player(&board),
            outcome: None,
        })
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome {
            Some(GameOutcome::Winner(player)) => GameStatus::Won(player),
            Some(GameOutcome::Draw) => GameStatus::Tied,
            None if self.board.is_empty() => GameStatus::Empty,
            None => GameStatus::InProgress,
        }
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..WIDTH)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably. The turn only passes when the game goes on.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if column >= WIDTH {
            return Err(MoveError::InvalidColumn);
        }

        let player = self.current_player;
        let row = self
            .board
            .drop_piece(column, player)
            .ok_or(MoveError::ColumnFull)?;

        // Win is checked before tie
        if self.board.has_win(player) {
            self.outcome = Some(GameOutcome::Winner(player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.current_player = player.other();
        }

        Ok(Placement {
            row,
            column,
            player,
            outcome: self.outcome,
        })
    }

    /// Clear the board and hand the first move back to Player 1.
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Whose turn it is on `board`, assuming Player 1 moved first and turns
/// strictly alternated.
pub fn infer_active_player(board: &Board) -> Player {
    if board.count(Player::One) > board.count(Player::Two) {
        Player::Two
    } else {
        Player::One
    }
}
