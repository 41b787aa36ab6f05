//! Utilidades de contraseñas
//!
//! Hashing con bcrypt y generación de contraseñas temporales
//! para el alta de empleados.

use bcrypt::{hash, verify, DEFAULT_COST};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::utils::errors::{AppError, AppResult};

/// Hashea una contraseña con salt (bcrypt)
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))
}

/// Verifica una contraseña contra su hash (comparación segura)
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify(password, password_hash)
        .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))
}

const TEMPORARY_PASSWORD_LENGTH: usize = 10;
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";

/// Genera la contraseña temporal de un empleado recién creado.
///
/// 10 caracteres: siempre al menos una mayúscula y un símbolo,
/// el resto aleatorio de minúsculas + dígitos, orden barajado.
pub fn generate_temporary_password() -> String {
    let mut rng = rand::thread_rng();
    let pool: Vec<char> = LOWERCASE.chars().chain(DIGITS.chars()).collect();

    let mut password: Vec<char> = vec!['A', '@'];
    while password.len() < TEMPORARY_PASSWORD_LENGTH {
        password.push(pool[rng.gen_range(0..pool.len())]);
    }
    password.shuffle(&mut rng);

    password.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("S3cret!pass").unwrap();
        assert!(verify_password("S3cret!pass", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_temporary_password_shape() {
        for _ in 0..50 {
            let password = generate_temporary_password();
            assert_eq!(password.len(), TEMPORARY_PASSWORD_LENGTH);
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.contains('@'));
            assert!(password
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '@' || c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_temporary_passwords_are_not_constant() {
        let a = generate_temporary_password();
        let b = generate_temporary_password();
        let c = generate_temporary_password();
        assert!(a != b || b != c);
    }
}
