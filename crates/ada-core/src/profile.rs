//! User profiles: lazy default creation and patch-style updates.

use ada_types::error::RepositoryError;
use ada_types::profile::{ProfileUpdate, UserProfile};
use chrono::Utc;
use tracing::info;

/// Repository trait for profile persistence.
///
/// Implementations live in ada-infra (e.g. `SqliteProfileRepository`).
pub trait ProfileRepository: Send + Sync {
    /// Fetch a user's profile, if one has been created.
    fn get(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserProfile>, RepositoryError>> + Send;

    /// Create or replace a user's profile.
    fn save(
        &self,
        profile: &UserProfile,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Profile store with the lazy-default policy applied.
pub struct ProfileStore<P: ProfileRepository> {
    repo: P,
}

impl<P: ProfileRepository> ProfileStore<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Fetch the user's profile, writing the default one on first read.
    pub async fn get_or_create(&self, user_id: &str) -> Result<UserProfile, RepositoryError> {
        if let Some(profile) = self.repo.get(user_id).await? {
            return Ok(profile);
        }

        let profile = UserProfile::new_default(user_id.to_string());
        self.repo.save(&profile).await?;
        info!(user_id, "default profile created");
        Ok(profile)
    }

    /// Apply a partial update and return the resulting profile.
    ///
    /// Updating a profile that does not exist yet creates the default
    /// first, so a PUT before the first GET still lands.
    pub async fn apply_update(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError> {
        let mut profile = self.get_or_create(user_id).await?;

        if let Some(v) = update.display_name {
            profile.display_name = v;
        }
        if let Some(v) = update.photo_url {
            profile.photo_url = v;
        }
        if let Some(v) = update.age {
            profile.age = v;
        }
        if let Some(v) = update.location {
            profile.location = v;
        }
        if let Some(v) = update.bio {
            profile.bio = v;
        }
        if let Some(v) = update.theme {
            profile.theme = v;
        }
        if let Some(v) = update.code_theme {
            profile.code_theme = v;
        }
        if let Some(v) = update.font_size {
            profile.font_size = v;
        }
        profile.updated_at = Utc::now();

        self.repo.save(&profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeProfileRepo {
        profiles: Mutex<HashMap<String, UserProfile>>,
    }

    impl FakeProfileRepo {
        fn new() -> Self {
            Self {
                profiles: Mutex::new(HashMap::new()),
            }
        }
    }

    impl ProfileRepository for FakeProfileRepo {
        async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, RepositoryError> {
            Ok(self.profiles.lock().unwrap().get(user_id).cloned())
        }

        async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
            self.profiles
                .lock()
                .unwrap()
                .insert(profile.user_id.clone(), profile.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_first_read_creates_default() {
        let store = ProfileStore::new(FakeProfileRepo::new());
        let profile = store.get_or_create("user-1").await.unwrap();
        assert_eq!(profile.theme, "dark");

        // Second read returns the stored row, not a fresh default.
        let again = store.get_or_create("user-1").await.unwrap();
        assert_eq!(again, profile);
    }

    #[tokio::test]
    async fn test_update_patches_only_given_fields() {
        let store = ProfileStore::new(FakeProfileRepo::new());
        store.get_or_create("user-1").await.unwrap();

        let updated = store
            .apply_update(
                "user-1",
                ProfileUpdate {
                    display_name: Some("Amit".to_string()),
                    font_size: Some(16),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.display_name, "Amit");
        assert_eq!(updated.font_size, 16);
        // Untouched fields keep their defaults.
        assert_eq!(updated.theme, "dark");
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn test_update_before_first_read_creates_then_patches() {
        let store = ProfileStore::new(FakeProfileRepo::new());
        let updated = store
            .apply_update(
                "user-1",
                ProfileUpdate {
                    bio: Some("Rustacean".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.bio, "Rustacean");
        assert_eq!(updated.code_theme, "dracula");
    }
}
