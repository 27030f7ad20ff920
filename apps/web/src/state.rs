//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::ports::{
    GroupRepository, Mailer, PasswordService, PostRepository, TokenService, UserRepository,
};
use yatube_infra::{
    Argon2PasswordService, InMemoryGroupRepository, InMemoryPostRepository,
    InMemoryUserRepository, JwtConfig, JwtTokenService, LogMailer,
};

#[cfg(feature = "postgres")]
use yatube_infra::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};

use crate::config::{AppConfig, Settings};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    pub mailer: Arc<dyn Mailer>,
    pub settings: Settings,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match yatube_infra::database::connect(db_config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(conn.clone())),
                        groups: Arc::new(PostgresGroupRepository::new(conn.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn)),
                        passwords: Arc::new(Argon2PasswordService::new()),
                        tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
                        mailer,
                        settings: config.settings.clone(),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        let state = Self::in_memory(config.settings.clone(), config.jwt.clone(), mailer);
        tracing::info!("Application state initialized (in-memory)");
        state
    }

    /// State backed entirely by in-memory repositories.
    pub fn in_memory(settings: Settings, jwt: JwtConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            groups: Arc::new(InMemoryGroupRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            passwords: Arc::new(Argon2PasswordService::new()),
            tokens: Arc::new(JwtTokenService::new(jwt)),
            mailer,
            settings,
        }
    }
}
