//! Servicio de archivos
//!
//! Subida con validación de formato y allow-list, cambio de permisos
//! (solo quien subió el archivo), borrado y consulta con la regla de
//! visibilidad por actor. La subida al storage y la escritura de metadatos
//! son dos llamadas independientes sin commit en dos fases: un fallo entre
//! ambas puede dejar un objeto huérfano, que se superficializa como error.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::file_dto::FileListResponse;
use crate::models::auth::{AuthenticatedUser, Role};
use crate::models::file::{FileRecord, WHOLE_COMPANY};
use crate::repositories::{EmployeeRepository, FileRepository};
use crate::services::storage_service::StorageService;
use crate::utils::errors::{AppError, AppResult};

/// Formatos admitidos: CSV, XLS y XLSX
const ALLOWED_FORMATS: [&str; 3] = [
    "text/csv",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

pub struct FileService {
    files: FileRepository,
    employees: EmployeeRepository,
    storage: StorageService,
}

impl FileService {
    pub fn new(pool: PgPool, storage: StorageService) -> Self {
        Self {
            files: FileRepository::new(pool.clone()),
            employees: EmployeeRepository::new(pool),
            storage,
        }
    }

    /// Normaliza la allow-list según el flag `restricted` y valida que
    /// todos los emails listados pertenezcan a la company. Cualquier email
    /// ajeno invalida la operación completa, sin aplicación parcial.
    async fn resolve_allowed_employees(
        &self,
        company_id: Uuid,
        restricted: bool,
        allowed_employees: Vec<String>,
    ) -> AppResult<Vec<String>> {
        if !restricted {
            return Ok(vec![WHOLE_COMPANY.to_string()]);
        }

        for email in &allowed_employees {
            let member = self.employees.find_by_email(email).await?;
            let belongs = member.map(|e| e.company_id == company_id).unwrap_or(false);
            if !belongs {
                return Err(AppError::InvalidMember(
                    "One/some employee(s) is/are not a member of the company".to_string(),
                ));
            }
        }

        Ok(allowed_employees)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn upload(
        &self,
        actor: &AuthenticatedUser,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        restricted: bool,
        allowed_employees: Vec<String>,
    ) -> AppResult<String> {
        if !ALLOWED_FORMATS.contains(&content_type) {
            return Err(AppError::InvalidFormat(
                "Invalid file format. Only CSV, XLS, and XLSX are allowed.".to_string(),
            ));
        }

        let company_id = actor.acting_company_id()?;

        // Quien sube es siempre un employee de la company
        let uploader = self
            .employees
            .find_in_company(actor.id, company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        let allowed = self
            .resolve_allowed_employees(company_id, restricted, allowed_employees)
            .await?;

        let key = format!("{}-{}", Uuid::new_v4(), file_name);
        let url = self.storage.put(&key, bytes, content_type).await?;

        let record = FileRecord {
            id: Uuid::new_v4(),
            company_id,
            uploaded_by: uploader.id,
            name: file_name.to_string(),
            key,
            url: url.clone(),
            restricted,
            allowed_employees: allowed,
            created_at: chrono::Utc::now(),
        };
        self.files.create(&record).await?;

        info!("📄 Archivo subido por {}: {}", uploader.id, record.id);
        Ok(url)
    }

    /// Solo quien subió el archivo puede cambiar sus permisos
    pub async fn update_permissions(
        &self,
        actor: &AuthenticatedUser,
        file_id: Uuid,
        restricted: bool,
        allowed_employees: Vec<String>,
    ) -> AppResult<()> {
        let company_id = actor.acting_company_id()?;

        let file = self
            .files
            .find_in_company(file_id, company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if file.uploaded_by != actor.id {
            return Err(AppError::Forbidden(
                "Only the uploader can update the file".to_string(),
            ));
        }

        let allowed = self
            .resolve_allowed_employees(company_id, restricted, allowed_employees)
            .await?;

        self.files
            .update_permissions(file_id, restricted, &allowed)
            .await?;

        Ok(())
    }

    /// Borra el objeto del storage y después el registro de metadatos;
    /// las dos operaciones no son transaccionales entre sí
    pub async fn delete(&self, actor: &AuthenticatedUser, file_id: Uuid) -> AppResult<()> {
        let company_id = actor.acting_company_id()?;

        let file = self
            .files
            .find_in_company(file_id, company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        self.storage.delete(&file.key).await?;
        self.files.delete(file.id).await?;

        info!("🗑️ Archivo eliminado de {}: {}", company_id, file_id);
        Ok(())
    }

    /// Una company ve todos sus archivos; un employee solo los no
    /// restringidos, aquellos donde está listado y los que subió él mismo
    pub async fn get_company_files(
        &self,
        actor: &AuthenticatedUser,
    ) -> AppResult<FileListResponse> {
        let company_id = actor.acting_company_id()?;
        let files = self.files.find_all_by_company(company_id).await?;

        let visible = match actor.role {
            Role::Company => files,
            Role::Employee => files
                .into_iter()
                .filter(|f| f.visible_to(actor.id, &actor.email))
                .collect(),
        };

        Ok(FileListResponse {
            message: "Files retrieved successfully".to_string(),
            files: visible,
        })
    }
}
