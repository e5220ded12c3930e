//! Password credential: a salted one-way hash with no way back to the plaintext.

use std::sync::LazyLock;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("stored credential is not a valid PHC string")]
    Malformed,
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Argon2id hash of a password in PHC string format.
///
/// Every call to [`PasswordCredential::hash`] draws a fresh salt, so hashing the
/// same password twice yields different credentials that both verify.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential(String);

impl PasswordCredential {
    pub fn hash(password: &str) -> Result<Self, CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a credential loaded from storage.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, CredentialError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| CredentialError::Malformed)?;
        Ok(Self(phc))
    }

    /// The PHC string to persist.
    #[inline]
    pub fn as_phc(&self) -> &str {
        &self.0
    }

    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hash checked when an account has no credential, so a failed lookup costs the
/// same Argon2 work as a wrong password.
static DECOY: LazyLock<Option<PasswordCredential>> =
    LazyLock::new(|| PasswordCredential::hash("hsi-decoy-credential").ok());

impl PasswordCredential {
    /// Verify `candidate` against a decoy hash and always fail.
    pub fn verify_missing(candidate: &str) -> bool {
        if let Some(decoy) = DECOY.as_ref() {
            let _ = decoy.verify(candidate);
        }
        false
    }
}

impl std::fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredential")
            .field("phc_string", &"[REDACTED]")
            .finish()
    }
}
