use crate::ports::{CompletionClient, VersionStore};

/// Application context holding dependencies for command execution.
pub struct AppContext<S: VersionStore, C: CompletionClient> {
    store: S,
    client: C,
}

impl<S: VersionStore, C: CompletionClient> AppContext<S, C> {
    /// Create a new application context.
    pub fn new(store: S, client: C) -> Self {
        Self { store, client }
    }

    /// Get a reference to the version store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the completion client.
    pub fn client(&self) -> &C {
        &self.client
    }
}
