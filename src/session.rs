//! Game controller: owns the live game, keeps the persisted slot in sync and
//! reports placements and endings to the presentation layer.

use tracing::{debug, info, warn};

use crate::error::ResumeError;
use crate::game::{Board, GameOutcome, GameState, Player};
use crate::store::GridStore;

/// Shown when a saved board had to be thrown away.
pub const RECOVERED_NOTICE: &str = "Saved game could not be restored - starting a new game.";

/// Receives what happened on the board.
pub trait GameObserver {
    fn on_piece_dropped(&mut self, row: usize, column: usize, player: Player);

    fn on_game_ended(&mut self, message: &str);

    /// Informational message that is neither a move nor an ending.
    fn on_notice(&mut self, _message: &str) {}
}

/// What `Session::open` found in the storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    /// Nothing worth resuming; an empty game is ready.
    Fresh,
    /// An unfinished game is waiting for `resume_game` or `start_new_game`.
    ResumeAvailable,
    /// The slot held an unusable board which was replaced by an empty one.
    Recovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOutcome {
    Ongoing,
    Win(Player),
    Tie,
    Rejected,
}

/// Result of choosing a column: landing row (if any) and the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnChoice {
    pub row: Option<usize>,
    pub outcome: ColumnOutcome,
}

impl ColumnChoice {
    fn rejected() -> Self {
        ColumnChoice {
            row: None,
            outcome: ColumnOutcome::Rejected,
        }
    }
}

pub struct Session<S, O> {
    state: GameState,
    pending: Option<GameState>,
    store: S,
    observer: O,
    startup: Startup,
}

impl<S: GridStore, O: GameObserver> Session<S, O> {
    /// Load the storage slot once and decide how the session starts.
    pub fn open(mut store: S, mut observer: O) -> Self {
        let (pending, startup) = match store.load() {
            Ok(Some(board)) if !board.is_empty() => match GameState::resume(board) {
                Ok(state) => {
                    info!(
                        pieces = board.pieces().count(),
                        next = state.current_player().name(),
                        "found unfinished game"
                    );
                    (Some(state), Startup::ResumeAvailable)
                }
                Err(ResumeError::Finished) => {
                    info!("saved game already finished, starting fresh");
                    persist(&mut store, &Board::new());
                    (None, Startup::Fresh)
                }
                Err(e) => {
                    warn!(error = %e, "discarding inconsistent saved board");
                    (None, Startup::Recovered)
                }
            },
            Ok(_) => (None, Startup::Fresh),
            Err(e) => {
                warn!(error = %e, "discarding unreadable saved board");
                (None, Startup::Recovered)
            }
        };

        if startup == Startup::Recovered {
            persist(&mut store, &Board::new());
            observer.on_notice(RECOVERED_NOTICE);
        }

        Session {
            state: GameState::initial(),
            pending,
            store,
            observer,
            startup,
        }
    }

    pub fn startup(&self) -> Startup {
        self.startup
    }

    /// True until the caller picks `resume_game` or `start_new_game`.
    pub fn is_awaiting_resume(&self) -> bool {
        self.pending.is_some()
    }

    /// The live game.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The saved game offered for resume, if any.
    pub fn pending(&self) -> Option<&GameState> {
        self.pending.as_ref()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drop the active player's piece into `column`.
    pub fn choose_column(&mut self, column: usize) -> ColumnChoice {
        if self.pending.is_some() {
            debug!(column, "move ignored until resume decision");
            return ColumnChoice::rejected();
        }

        let placement = match self.state.apply_move_mut(column) {
            Ok(placement) => placement,
            Err(e) => {
                debug!(column, reason = %e, "move rejected");
                return ColumnChoice::rejected();
            }
        };

        debug!(
            row = placement.row,
            column,
            player = placement.player.name(),
            "piece dropped"
        );
        self.observer
            .on_piece_dropped(placement.row, placement.column, placement.player);

        let outcome = match placement.outcome {
            None => {
                persist(&mut self.store, self.state.board());
                ColumnOutcome::Ongoing
            }
            Some(outcome) => {
                info!(result = %outcome.message(), "game over");
                // A finished game is not kept in the slot
                persist(&mut self.store, &Board::new());
                self.observer.on_game_ended(&outcome.message());
                match outcome {
                    GameOutcome::Winner(player) => ColumnOutcome::Win(player),
                    GameOutcome::Draw => ColumnOutcome::Tie,
                }
            }
        };

        ColumnChoice {
            row: Some(placement.row),
            outcome,
        }
    }

    /// Adopt the saved game and replay its pieces to the observer, bottom row
    /// first. Returns false when nothing was waiting.
    pub fn resume_game(&mut self) -> bool {
        let Some(state) = self.pending.take() else {
            return false;
        };
        self.state = state;

        for (pos, player) in self.state.board().pieces() {
            self.observer.on_piece_dropped(pos.row, pos.col, player);
        }
        info!(next = self.state.current_player().name(), "resumed saved game");
        true
    }

    /// Throw away the current or saved game and start from an empty board.
    pub fn start_new_game(&mut self) {
        self.pending = None;
        self.state.reset();
        persist(&mut self.store, self.state.board());
        info!("started new game");
    }
}

/// Save failures are logged; the in-memory game stays authoritative.
fn persist<S: GridStore>(store: &mut S, board: &Board) {
    if let Err(e) = store.save(board) {
        warn!(error = %e, "failed to save board");
    }
}
