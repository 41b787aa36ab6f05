//! Modelos de autenticación
//!
//! Claims del JWT y actor autenticado que se inyecta en las requests.
//! El campo `role` discrimina entre sujetos company y employee; solo los
//! employees llevan `company_id`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Rol del sujeto del token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Company,
    Employee,
}

/// Claims del JWT
///
/// `is_active` solo viaja en tokens de sesión; los tokens de activación
/// y de reset no lo llevan. `company_id` solo está presente para employees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Uuid>,
    pub exp: i64,
    pub iat: i64,
}

/// Actor autenticado que se inyecta en las requests tras pasar el guard
/// de autenticación
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub company_id: Option<Uuid>,
    pub is_active: bool,
}

impl AuthenticatedUser {
    /// Empresa sobre la que operan los guards de subscripción: la propia
    /// para un actor company, la empleadora para un employee
    pub fn acting_company_id(&self) -> AppResult<Uuid> {
        match self.role {
            Role::Company => Ok(self.id),
            Role::Employee => self
                .company_id
                .ok_or_else(|| AppError::Unauthorized("Token is missing company id".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_value(Role::Company).unwrap(), "company");
        assert_eq!(serde_json::to_value(Role::Employee).unwrap(), "employee");
        assert_eq!(
            serde_json::from_value::<Role>(serde_json::json!("employee")).unwrap(),
            Role::Employee
        );
        assert!(serde_json::from_value::<Role>(serde_json::json!("admin")).is_err());
    }

    #[test]
    fn test_acting_company_id_for_company_actor() {
        let id = Uuid::new_v4();
        let actor = AuthenticatedUser {
            id,
            email: "acme@example.com".to_string(),
            role: Role::Company,
            company_id: None,
            is_active: true,
        };
        assert_eq!(actor.acting_company_id().unwrap(), id);
    }

    #[test]
    fn test_acting_company_id_for_employee_actor() {
        let company_id = Uuid::new_v4();
        let actor = AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "worker@example.com".to_string(),
            role: Role::Employee,
            company_id: Some(company_id),
            is_active: true,
        };
        assert_eq!(actor.acting_company_id().unwrap(), company_id);
    }

    #[test]
    fn test_acting_company_id_missing_for_employee() {
        let actor = AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "worker@example.com".to_string(),
            role: Role::Employee,
            company_id: None,
            is_active: true,
        };
        assert!(actor.acting_company_id().is_err());
    }

    #[test]
    fn test_claims_omit_optional_fields() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "acme@example.com".to_string(),
            role: Role::Company,
            is_active: None,
            company_id: None,
            exp: 0,
            iat: 0,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("is_active").is_none());
        assert!(json.get("company_id").is_none());
        assert_eq!(json["role"], "company");
    }
}
