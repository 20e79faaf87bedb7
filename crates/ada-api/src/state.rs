//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository and provider traits, but AppState
//! pins them to the concrete infra implementations.

use std::sync::Arc;

use ada_core::chat::service::ChatService;
use ada_core::guest::GuestIdentityStore;
use ada_core::profile::ProfileStore;
use ada_infra::auth::JwtTokenVerifier;
use ada_infra::config::AppConfig;
use ada_infra::llm::GroqProvider;
use ada_infra::providers::{OpenAiImageProvider, SerperSearchProvider, YoutubeSearchProvider};
use ada_infra::sqlite::{
    DatabasePool, SqliteGuestRepository, SqliteProfileRepository, SqliteSessionRepository,
};

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteSessionRepository>;
pub type ConcreteGuestStore = GuestIdentityStore<SqliteGuestRepository>;
pub type ConcreteProfileStore = ProfileStore<SqliteProfileRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub guest_store: Arc<ConcreteGuestStore>,
    pub profile_store: Arc<ConcreteProfileStore>,
    pub llm: Arc<GroqProvider>,
    pub search: Arc<SerperSearchProvider>,
    pub video: Arc<YoutubeSearchProvider>,
    pub image: Arc<OpenAiImageProvider>,
    pub verifier: Arc<JwtTokenVerifier>,
    /// Sender id granted the privileged intent set, when configured.
    pub owner_id: Option<String>,
    pub chat_model: String,
    pub title_model: String,
    pub max_tokens: u32,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        // Ensure data directory exists before SQLite opens the file
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let db_pool = DatabasePool::new(&config.database_url).await?;

        let chat_service = ChatService::new(SqliteSessionRepository::new(db_pool.clone()));
        let guest_store = GuestIdentityStore::new(SqliteGuestRepository::new(db_pool.clone()));
        let profile_store = ProfileStore::new(SqliteProfileRepository::new(db_pool.clone()));

        let llm = GroqProvider::new(config.groq_api_key)?;

        // One HTTP client shared by all outbound adapters
        let http_client = reqwest_client()?;
        let search = SerperSearchProvider::new(http_client.clone(), config.serper_api_key);
        let video = YoutubeSearchProvider::new(http_client.clone(), config.youtube_api_key);
        let image = OpenAiImageProvider::new(http_client, config.image_api_key);

        let verifier = JwtTokenVerifier::new(&config.jwt_secret);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            guest_store: Arc::new(guest_store),
            profile_store: Arc::new(profile_store),
            llm: Arc::new(llm),
            search: Arc::new(search),
            video: Arc::new(video),
            image: Arc::new(image),
            verifier: Arc::new(verifier),
            owner_id: config.owner_id,
            chat_model: config.chat_model,
            title_model: config.title_model,
            max_tokens: config.max_tokens,
        })
    }
}

fn reqwest_client() -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?)
}
