//! Servicio de object storage
//!
//! Cliente del almacenamiento de objetos compatible S3 expuesto por HTTP:
//! `put` sube bytes bajo una key y devuelve la URL pública, `delete` borra
//! el objeto. Los fallos de transporte o de la API se superficializan como
//! error de storage; no hay reintentos automáticos.

use reqwest::Client;
use tracing::info;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct StorageService {
    client: Client,
    endpoint: String,
    bucket: String,
    api_key: String,
    public_url: String,
}

impl StorageService {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            endpoint: config.storage_endpoint.clone(),
            bucket: config.storage_bucket.clone(),
            api_key: config.storage_api_key.clone(),
            public_url: config.storage_public_url.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.endpoint, self.bucket, key)
    }

    /// URL pública desde donde se sirve un objeto subido
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_url, self.bucket, key)
    }

    pub async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<String> {
        let response = self
            .client
            .put(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Error uploading object: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "Storage API returned status {} on upload",
                response.status()
            )));
        }

        info!("📦 Objeto subido: {}", key);
        Ok(self.public_url(key))
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(self.object_url(key))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Error deleting object: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "Storage API returned status {} on delete",
                response.status()
            )));
        }

        info!("🗑️ Objeto borrado: {}", key);
        Ok(())
    }
}
