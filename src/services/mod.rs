pub mod auth_service;
pub mod employee_service;
pub mod file_service;
pub mod mail_service;
pub mod storage_service;
pub mod subscription_service;
pub mod token_service;
