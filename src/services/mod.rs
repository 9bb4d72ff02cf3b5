mod completion_http;
mod sqlite_version_store;

pub use completion_http::HttpCompletionClient;
pub use sqlite_version_store::SqliteVersionStore;
