use anyhow::{Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use mockall::automock;
use rand::rngs::OsRng;

/// One-way hashing for the subscription access code. The stored value is a
/// PHC string; nothing in this service ever reverses it.
#[automock]
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| anyhow!("failed to hash credential: {}", err))?;

        Ok(hashed.to_string())
    }
}
