use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2id PHC string for `password`, salted per call.
pub fn hash(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow::anyhow!("argon2 hash failed: {e}"))
}

/// Whether `password` matches the stored hash. An unreadable stored hash
/// never matches.
pub fn matches(password: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_and_wrong_password() {
        let stored = hash("correct horse").unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(matches("correct horse", &stored));
        assert!(!matches("correct horsf", &stored));
    }

    #[test]
    fn same_password_gets_distinct_hashes() {
        assert_ne!(hash("abcdef").unwrap(), hash("abcdef").unwrap());
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!matches("anything", "plaintext-from-an-old-import"));
    }
}
