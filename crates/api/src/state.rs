use std::sync::Arc;

use contractly_core::content::ContentGenerator;
use contractly_core::identity::IdentityCheck;

use crate::config::ServerConfig;

/// Everything a handler needs, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: contractly_db::DbPool,
    /// Session cookie settings are read from `config.jwt`.
    pub config: Arc<ServerConfig>,
    /// Resolves session credentials to vendor identities.
    pub identity: Arc<dyn IdentityCheck>,
    /// Contract content generation service.
    pub generator: Arc<dyn ContentGenerator>,
}
