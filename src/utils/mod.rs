pub mod errors;
pub mod password;
