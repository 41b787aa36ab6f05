pub mod company_repository;
pub mod employee_repository;
pub mod file_repository;

pub use company_repository::CompanyRepository;
pub use employee_repository::EmployeeRepository;
pub use file_repository::FileRepository;
