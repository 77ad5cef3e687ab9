//! PasswordHasher port - opaque one-way password digests.

use crate::domain::foundation::DomainError;

/// Port for password hashing.
///
/// The digest is opaque to the services: it is stored verbatim, never
/// reversed, and compared only through [`PasswordHasher::verify`].
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into an opaque digest.
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Checks a plaintext password against a stored digest.
    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PasswordHasher) {}
}
