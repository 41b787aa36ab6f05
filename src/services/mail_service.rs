//! Servicio de envío de emails
//!
//! Envía a través de una API HTTP de correo (JSON + bearer key) y construye
//! las tres plantillas del sistema: activación de company, activación de
//! employee (con contraseña temporal) y reset de contraseña.

use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct MailService {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
    base_url: String,
}

impl MailService {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Envía un email; cualquier fallo de transporte es MailDelivery
    pub async fn send(&self, recipient: &str, subject: &str, html: &str) -> AppResult<()> {
        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": recipient,
                "subject": subject,
                "html": html,
            }))
            .send()
            .await
            .map_err(|e| AppError::MailDelivery(format!("Error sending email: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::MailDelivery(format!(
                "Mail API returned status {}",
                response.status()
            )));
        }

        info!("📧 Email enviado a {}", recipient);
        Ok(())
    }

    fn confirm_email_link(&self, token: &str) -> String {
        format!("{}/auth/confirm-email?token={}", self.base_url, token)
    }

    fn reset_password_link(&self, token: &str) -> String {
        format!("{}/auth/reset-password?token={}", self.base_url, token)
    }

    pub async fn send_activation_email_to_company(
        &self,
        recipient: &str,
        company_name: &str,
        token: &str,
    ) -> AppResult<()> {
        let link = self.confirm_email_link(token);
        let html = format!(
            "<p>Hello {},</p>\
             <p>Welcome! Please confirm your email address to activate your account:</p>\
             <p><a href=\"{}\">Activate account</a></p>\
             <p>The link expires in 15 minutes.</p>",
            company_name, link
        );

        self.send(recipient, "Activate your account", &html).await
    }

    pub async fn send_activation_email_to_employee(
        &self,
        recipient: &str,
        first_name: &str,
        token: &str,
        temporary_password: &str,
    ) -> AppResult<()> {
        let link = self.confirm_email_link(token);
        let html = format!(
            "<p>Hello {},</p>\
             <p>An account has been created for you. Your temporary password is \
             <strong>{}</strong>.</p>\
             <p>Follow this link to activate your account and set your own password:</p>\
             <p><a href=\"{}\">Activate account</a></p>\
             <p>The link expires in 15 minutes.</p>",
            first_name, temporary_password, link
        );

        self.send(recipient, "Activate your account", &html).await
    }

    /// Reenvío de activación a un employee que ya recibió su contraseña
    /// temporal en el alta
    pub async fn resend_activation_email_to_employee(
        &self,
        recipient: &str,
        first_name: &str,
        token: &str,
    ) -> AppResult<()> {
        let link = self.confirm_email_link(token);
        let html = format!(
            "<p>Hello {},</p>\
             <p>Your account is still pending activation. Follow this link to \
             activate it and set your own password:</p>\
             <p><a href=\"{}\">Activate account</a></p>\
             <p>The link expires in 15 minutes.</p>",
            first_name, link
        );

        self.send(recipient, "Activate your account", &html).await
    }

    pub async fn send_reset_password_email(
        &self,
        recipient: &str,
        company_name: &str,
        token: &str,
    ) -> AppResult<()> {
        let link = self.reset_password_link(token);
        let html = format!(
            "<p>Hello {},</p>\
             <p>We received a request to reset your password. Follow this link to \
             choose a new one:</p>\
             <p><a href=\"{}\">Reset password</a></p>\
             <p>The link expires in 15 minutes. If you did not request this, you can \
             ignore this email.</p>",
            company_name, link
        );

        self.send(recipient, "Reset your password", &html).await
    }
}
