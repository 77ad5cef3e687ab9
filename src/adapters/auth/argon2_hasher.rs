//! Argon2id implementation of the PasswordHasher port.
//!
//! Produces PHC-format strings (algorithm, parameters, salt and hash in
//! one self-describing value), so parameters can evolve without a schema
//! change. Salts come from the OS CSPRNG.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordVerifier, SaltString},
    Argon2, PasswordHasher as _,
};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Argon2id password hasher with the library's recommended parameters.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| {
                DomainError::new(ErrorCode::HashingError, format!("Failed to hash password: {}", e))
            })?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(digest).map_err(|e| {
            DomainError::new(
                ErrorCode::HashingError,
                format!("Invalid password hash format: {}", e),
            )
        })?;
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::new(
                ErrorCode::HashingError,
                format!("Failed to verify password: {}", e),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_opaque_and_salted() {
        let hasher = Argon2PasswordHasher::new();
        let a = hasher.hash("frostmourne hungers").unwrap();
        let b = hasher.hash("frostmourne hungers").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert!(!a.contains("frostmourne"));
    }

    #[test]
    fn verify_accepts_original_and_rejects_others() {
        let hasher = Argon2PasswordHasher::new();
        let digest = hasher.hash("frostmourne hungers").unwrap();
        assert!(hasher.verify("frostmourne hungers", &digest).unwrap());
        assert!(!hasher.verify("light of elune", &digest).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_digests() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify("anything", "not-a-phc-string").is_err());
    }
}
