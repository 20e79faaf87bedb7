//! Guest identity: mapping opaque sender ids to remembered display names.
//!
//! Reads degrade to "no name known" on any failure so that a broken
//! identity store never blocks another handling mode. Writes propagate
//! their error; the caller surfaces it as a generic failure of the
//! name-capture mode.

use ada_types::error::RepositoryError;
use tracing::warn;

/// Repository trait for the guest-name key-value store.
///
/// Implementations live in ada-infra (e.g. `SqliteGuestRepository`).
pub trait GuestIdentityRepository: Send + Sync {
    /// Fetch the remembered display name for a sender, if any.
    fn get(
        &self,
        sender_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Remember (create or replace) the display name for a sender.
    fn set(
        &self,
        sender_id: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Guest identity store with the read-degradation policy applied.
pub struct GuestIdentityStore<G: GuestIdentityRepository> {
    repo: G,
}

impl<G: GuestIdentityRepository> GuestIdentityStore<G> {
    pub fn new(repo: G) -> Self {
        Self { repo }
    }

    /// Look up the remembered name for a sender.
    ///
    /// Any repository failure degrades to `None` -- a read failure must
    /// never block another mode.
    pub async fn lookup(&self, sender_id: &str) -> Option<String> {
        match self.repo.get(sender_id).await {
            Ok(name) => name,
            Err(err) => {
                warn!(sender_id, error = %err, "guest name lookup failed, treating as unknown");
                None
            }
        }
    }

    /// Remember a sender's display name.
    ///
    /// Write failures propagate; the caller reports a generic
    /// name-capture failure.
    pub async fn remember(&self, sender_id: &str, name: &str) -> Result<(), RepositoryError> {
        self.repo.set(sender_id, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeRepo {
        names: Mutex<HashMap<String, String>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                names: Mutex::new(HashMap::new()),
                fail_reads: false,
                fail_writes: false,
            }
        }
    }

    impl GuestIdentityRepository for FakeRepo {
        async fn get(&self, sender_id: &str) -> Result<Option<String>, RepositoryError> {
            if self.fail_reads {
                return Err(RepositoryError::Connection);
            }
            Ok(self.names.lock().unwrap().get(sender_id).cloned())
        }

        async fn set(&self, sender_id: &str, name: &str) -> Result<(), RepositoryError> {
            if self.fail_writes {
                return Err(RepositoryError::Connection);
            }
            self.names
                .lock()
                .unwrap()
                .insert(sender_id.to_string(), name.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_remember_then_lookup() {
        let store = GuestIdentityStore::new(FakeRepo::new());
        store.remember("sender-1", "Bob").await.unwrap();
        assert_eq!(store.lookup("sender-1").await.as_deref(), Some("Bob"));
        assert_eq!(store.lookup("sender-2").await, None);
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_none() {
        let repo = FakeRepo {
            fail_reads: true,
            ..FakeRepo::new()
        };
        let store = GuestIdentityStore::new(repo);
        assert_eq!(store.lookup("sender-1").await, None);
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let repo = FakeRepo {
            fail_writes: true,
            ..FakeRepo::new()
        };
        let store = GuestIdentityStore::new(repo);
        assert!(store.remember("sender-1", "Bob").await.is_err());
    }
}
