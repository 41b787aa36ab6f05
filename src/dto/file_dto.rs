//! DTOs de archivos
//!
//! Incluye la normalización de la allow-list: un string suelto se convierte
//! en lista de un elemento y un campo ausente en lista vacía.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::file::FileRecord;

/// Allow-list tal y como llega del cliente: lista, string suelto o ausente
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AllowedEmployeesInput {
    Many(Vec<String>),
    One(String),
}

impl AllowedEmployeesInput {
    /// Normaliza a lista de emails
    pub fn normalize(input: Option<Self>) -> Vec<String> {
        match input {
            Some(AllowedEmployeesInput::Many(list)) => list,
            Some(AllowedEmployeesInput::One(email)) => vec![email],
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateFilePermissionsRequest {
    pub file_id: Uuid,
    pub restricted: bool,
    #[serde(default)]
    pub allowed_employees: Option<AllowedEmployeesInput>,
}

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    pub message: String,
    pub file_url: String,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub message: String,
    pub files: Vec<FileRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_list() {
        let input: AllowedEmployeesInput =
            serde_json::from_value(serde_json::json!(["a@x.com", "b@x.com"])).unwrap();
        assert_eq!(
            AllowedEmployeesInput::normalize(Some(input)),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
    }

    #[test]
    fn test_normalize_single_string_becomes_one_element_list() {
        let input: AllowedEmployeesInput =
            serde_json::from_value(serde_json::json!("a@x.com")).unwrap();
        assert_eq!(
            AllowedEmployeesInput::normalize(Some(input)),
            vec!["a@x.com".to_string()]
        );
    }

    #[test]
    fn test_normalize_absent_becomes_empty() {
        assert!(AllowedEmployeesInput::normalize(None).is_empty());
    }
}
