//! Servicio de tokens firmados
//!
//! Emite y valida los tokens de activación, reset y sesión. Los tokens de
//! activación y reset caducan a los 15 minutos; los de sesión a la hora.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::models::auth::{Claims, Role};
use crate::utils::errors::{AppError, AppResult};

/// TTL de los tokens de activación y de reset de contraseña
pub const SHORT_LIVED_MINUTES: i64 = 15;
/// TTL de los tokens de sesión
pub const SESSION_HOURS: i64 = 1;

/// Servicio JWT
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    fn issue(&self, mut claims: Claims, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        claims.iat = now.timestamp();
        claims.exp = (now + ttl).timestamp();

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("Error generating token: {}", e)))
    }

    /// Token de activación (15 minutos). Las companies no llevan
    /// `company_id`; los employees sí.
    pub fn issue_activation(
        &self,
        subject_id: Uuid,
        email: &str,
        role: Role,
        company_id: Option<Uuid>,
    ) -> AppResult<String> {
        self.issue(
            Claims {
                sub: subject_id,
                email: email.to_string(),
                role,
                is_active: None,
                company_id,
                exp: 0,
                iat: 0,
            },
            Duration::minutes(SHORT_LIVED_MINUTES),
        )
    }

    /// Token de reset de contraseña (15 minutos, solo companies)
    pub fn issue_reset(&self, company_id: Uuid, email: &str) -> AppResult<String> {
        self.issue(
            Claims {
                sub: company_id,
                email: email.to_string(),
                role: Role::Company,
                is_active: None,
                company_id: None,
                exp: 0,
                iat: 0,
            },
            Duration::minutes(SHORT_LIVED_MINUTES),
        )
    }

    /// Token de sesión (1 hora) con los campos propios del rol
    pub fn issue_session(
        &self,
        subject_id: Uuid,
        email: &str,
        role: Role,
        is_active: bool,
        company_id: Option<Uuid>,
    ) -> AppResult<String> {
        self.issue(
            Claims {
                sub: subject_id,
                email: email.to_string(),
                role,
                is_active: Some(is_active),
                company_id,
                exp: 0,
                iat: 0,
            },
            Duration::hours(SESSION_HOURS),
        )
    }

    /// Valida firma y expiración; falla con Unauthorized en ambos casos
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(self.algorithm);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key")
    }

    #[test]
    fn test_session_token_roundtrip() {
        let service = service();
        let id = Uuid::new_v4();
        let company_id = Uuid::new_v4();

        let token = service
            .issue_session(id, "worker@example.com", Role::Employee, true, Some(company_id))
            .unwrap();
        assert!(!token.is_empty());

        let claims = service.decode(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "worker@example.com");
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.is_active, Some(true));
        assert_eq!(claims.company_id, Some(company_id));
    }

    #[test]
    fn test_activation_token_for_company_has_no_company_id() {
        let service = service();
        let token = service
            .issue_activation(Uuid::new_v4(), "acme@example.com", Role::Company, None)
            .unwrap();
        let claims = service.decode(&token).unwrap();
        assert_eq!(claims.role, Role::Company);
        assert!(claims.company_id.is_none());
        assert!(claims.is_active.is_none());
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let token = service()
            .issue_session(Uuid::new_v4(), "acme@example.com", Role::Company, true, None)
            .unwrap();

        let other = TokenService::new("another-secret");
        assert!(matches!(
            other.decode(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_decode_rejects_expired_token() {
        let service = service();
        let token = service
            .issue(
                Claims {
                    sub: Uuid::new_v4(),
                    email: "acme@example.com".to_string(),
                    role: Role::Company,
                    is_active: Some(true),
                    company_id: None,
                    exp: 0,
                    iat: 0,
                },
                Duration::seconds(-120),
            )
            .unwrap();

        assert!(matches!(
            service.decode(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(service().decode("not-a-token").is_err());
    }
}
