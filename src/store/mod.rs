//! Persistence of the board in a single fixed slot. Only the grid is stored;
//! whose turn it is and whether the game is over are derived on load.

mod file;
mod memory;

pub use file::{FileStore, DEFAULT_BOARD_FILE};
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::game::Board;

/// Load/save access to the persisted board.
pub trait GridStore {
    /// Load the saved board. An empty or missing slot yields `Ok(None)`.
    fn load(&mut self) -> Result<Option<Board>, StoreError>;

    /// Overwrite the slot with `board`.
    fn save(&mut self, board: &Board) -> Result<(), StoreError>;
}

/// Parse a raw slot value. Blank text and JSON `null` count as an empty slot.
fn decode(slot: &str, raw: &str) -> Result<Option<Board>, StoreError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<Board>>(raw).map_err(|source| StoreError::Corrupted {
        slot: slot.to_string(),
        source,
    })
}
