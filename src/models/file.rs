//! Modelo de FileRecord
//!
//! Metadatos de los archivos subidos y la regla de visibilidad por archivo.
//! `allowed_employees` guarda emails, o el valor centinela que significa
//! "toda la empresa" cuando el archivo no está restringido.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Centinela de la allow-list: el archivo es visible para toda la empresa
pub const WHOLE_COMPANY: &str = "Whole Company";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    pub id: Uuid,
    pub company_id: Uuid,
    pub uploaded_by: Uuid,
    pub name: String,
    pub key: String,
    pub url: String,
    pub restricted: bool,
    pub allowed_employees: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Regla de visibilidad para un employee: archivo no restringido,
    /// email en la allow-list, o ser quien lo subió.
    pub fn visible_to(&self, employee_id: Uuid, employee_email: &str) -> bool {
        !self.restricted
            || self.allowed_employees.iter().any(|e| e == employee_email)
            || self.uploaded_by == employee_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(restricted: bool, allowed: Vec<&str>, uploaded_by: Uuid) -> FileRecord {
        FileRecord {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            uploaded_by,
            name: "report.csv".to_string(),
            key: "key-report.csv".to_string(),
            url: "https://files.example.com/key-report.csv".to_string(),
            restricted,
            allowed_employees: allowed.into_iter().map(String::from).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unrestricted_file_visible_to_any_employee() {
        let f = file(false, vec![WHOLE_COMPANY], Uuid::new_v4());
        assert!(f.visible_to(Uuid::new_v4(), "anyone@example.com"));
    }

    #[test]
    fn test_restricted_file_visible_to_listed_employee() {
        let f = file(true, vec!["a@x.com"], Uuid::new_v4());
        assert!(f.visible_to(Uuid::new_v4(), "a@x.com"));
    }

    #[test]
    fn test_restricted_file_visible_to_uploader_regardless_of_list() {
        let uploader = Uuid::new_v4();
        let f = file(true, vec!["a@x.com"], uploader);
        assert!(f.visible_to(uploader, "uploader@x.com"));
    }

    #[test]
    fn test_restricted_file_invisible_to_other_employees() {
        let f = file(true, vec!["a@x.com"], Uuid::new_v4());
        assert!(!f.visible_to(Uuid::new_v4(), "b@x.com"));
    }
}
