use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{decode, GridStore};
use crate::error::StoreError;
use crate::game::Board;

/// Default location of the saved board.
pub const DEFAULT_BOARD_FILE: &str = "connect_four_board.json";

/// Stores the board as JSON in one file. Writes go to a sibling temp file
/// first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl GridStore for FileStore {
    fn load(&mut self) -> Result<Option<Board>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved board");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        decode(&self.path.display().to_string(), &raw)
    }

    fn save(&mut self, board: &Board) -> Result<(), StoreError> {
        let json = serde_json::to_string(board)?;
        let write_err = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Atomic rename
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), "saved board");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_missing_file_is_empty_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("board.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("board.json");
        let mut store = FileStore::new(&path);

        let mut board = Board::new();
        board.drop_piece(3, Player::One).unwrap();
        board.drop_piece(3, Player::Two).unwrap();
        store.save(&board).unwrap();

        assert!(path.exists());
        assert!(!store.tmp_path().exists());
        assert_eq!(store.load().unwrap(), Some(board));

        // A fresh handle on the same slot sees the same board
        let mut reopened = FileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(board));
    }

    #[test]
    fn test_save_overwrites_previous_board() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("board.json"));

        let mut board = Board::new();
        board.drop_piece(0, Player::One).unwrap();
        store.save(&board).unwrap();
        store.save(&Board::new()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_reads_browser_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(
            &path,
            "[[null,null,null,null,null,null,null],\
              [null,null,null,null,null,null,null],\
              [null,null,null,null,null,null,null],\
              [null,null,null,null,null,null,null],\
              [null,null,null,2,null,null,null],\
              [null,null,1,1,null,null,null]]",
        )
        .unwrap();

        let board = FileStore::new(&path).load().unwrap().unwrap();
        assert_eq!(board.count(Player::One), 2);
        assert_eq!(board.count(Player::Two), 1);
        assert_eq!(board.get(4, 3).owner(), Some(Player::Two));
    }

    #[test]
    fn test_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "[[1, 2, 3]]").unwrap();

        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
    }

    #[test]
    fn test_unreadable_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file
        let err = FileStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
