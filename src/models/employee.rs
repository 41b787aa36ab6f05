//! Modelo de Employee
//!
//! Cada employee pertenece exactamente a una company (borrado en cascada).
//! `password_hash` guarda el hash de la contraseña temporal hasta que el
//! empleado activa su cuenta fijando una definitiva.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(
        company_id: Uuid,
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            first_name,
            last_name,
            email,
            password_hash: Some(password_hash),
            is_active: false,
            created_at: Utc::now(),
        }
    }
}
