//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. La ausencia de una
//! variable requerida es un error fatal en el arranque, nunca por request.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Secreto de firma de los tokens
    pub jwt_secret: String,
    /// URL pública base para los enlaces de activación/reset en los emails
    pub base_url: String,
    // Transporte de email (API HTTP)
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    // Object storage compatible S3 (API HTTP)
    pub storage_endpoint: String,
    pub storage_bucket: String,
    pub storage_api_key: String,
    /// Base pública desde donde se sirven los objetos subidos
    pub storage_public_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            port: env::var("PORT")
                .expect("PORT must be set")
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").expect("HOST must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            base_url: env::var("BASE_URL").expect("BASE_URL must be set"),
            mail_api_url: env::var("MAIL_API_URL").expect("MAIL_API_URL must be set"),
            mail_api_key: env::var("MAIL_API_KEY").expect("MAIL_API_KEY must be set"),
            mail_from: env::var("MAIL_FROM").expect("MAIL_FROM must be set"),
            storage_endpoint: env::var("STORAGE_ENDPOINT").expect("STORAGE_ENDPOINT must be set"),
            storage_bucket: env::var("STORAGE_BUCKET").expect("STORAGE_BUCKET must be set"),
            storage_api_key: env::var("STORAGE_API_KEY").expect("STORAGE_API_KEY must be set"),
            storage_public_url: env::var("STORAGE_PUBLIC_URL")
                .expect("STORAGE_PUBLIC_URL must be set"),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
