mod fake_completion_client;

pub use fake_completion_client::FakeCompletionClient;

use crate::services::SqliteVersionStore;
use tempfile::TempDir;

/// A store backed by a database file inside a fresh temp directory.
pub fn temp_store() -> (TempDir, SqliteVersionStore) {
    let dir = TempDir::new().unwrap();
    let store = SqliteVersionStore::open(dir.path().join("release_notes.db")).unwrap();
    (dir, store)
}
