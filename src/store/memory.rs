use super::{decode, GridStore};
use crate::error::StoreError;
use crate::game::Board;

/// Keeps the serialized board in memory. Holds the same JSON text a
/// [`FileStore`](super::FileStore) would write.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw slot contents, e.g. a blob written by another client.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        MemoryStore {
            slot: Some(raw.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl GridStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Board>, StoreError> {
        match &self.slot {
            Some(raw) => decode("memory", raw),
            None => Ok(None),
        }
    }

    fn save(&mut self, board: &Board) -> Result<(), StoreError> {
        self.slot = Some(serde_json::to_string(board)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_empty_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.contents(), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut board = Board::new();
        board.drop_piece(1, Player::One).unwrap();

        store.save(&board).unwrap();
        assert!(store.contents().unwrap().starts_with("[[null"));
        assert_eq!(store.load().unwrap(), Some(board));
    }

    #[test]
    fn test_corrupted_contents() {
        let mut store = MemoryStore::with_contents("not json");
        assert!(matches!(
            store.load(),
            Err(StoreError::Corrupted { .. })
        ));
    }
}
