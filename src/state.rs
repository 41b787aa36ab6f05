//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. La configuración se construye una vez en
//! el arranque y es inmutable desde entonces.

use reqwest::Client;
use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::services::mail_service::MailService;
use crate::services::storage_service::StorageService;
use crate::services::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub tokens: TokenService,
    pub mail: MailService,
    pub storage: StorageService,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let http_client = Client::new();
        let tokens = TokenService::new(&config.jwt_secret);
        let mail = MailService::new(http_client.clone(), &config);
        let storage = StorageService::new(http_client, &config);

        Self {
            pool,
            config,
            tokens,
            mail,
            storage,
        }
    }
}
