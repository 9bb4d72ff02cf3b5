mod completion_client;
mod version_store;

pub use completion_client::CompletionClient;
pub use version_store::VersionStore;
