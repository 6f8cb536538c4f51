use anyhow::{Result, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// The result is a self-describing PHC string (algorithm, parameters, salt,
/// derived key), so parameters can change later without breaking stored
/// hashes. Argon2 has no input-length cap.
pub fn hash(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash string.
///
/// A malformed hash string and a wrong password both return `false` —
/// callers cannot tell the two apart, and neither is an error.
pub fn verify(plaintext: &str, hash_string: &str) -> bool {
    match PasswordHash::new(hash_string) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let h = hash("secret1").unwrap();
        assert!(verify("secret1", &h));
    }

    #[test]
    fn wrong_password_fails() {
        let h = hash("secret1").unwrap();
        assert!(!verify("secret2", &h));
    }

    #[test]
    fn malformed_hash_is_false_not_panic() {
        assert!(!verify("anything", "not-a-phc-string"));
        assert!(!verify("anything", ""));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("same-password").unwrap();
        let b = hash("same-password").unwrap();
        assert_ne!(a, b);
        assert!(verify("same-password", &a));
        assert!(verify("same-password", &b));
    }

    #[test]
    fn long_passwords_are_not_truncated() {
        // bcrypt-style 72-byte caps would make these collide
        let base = "x".repeat(100);
        let h = hash(&base).unwrap();
        assert!(verify(&base, &h));
        assert!(!verify(&format!("{}y", base), &h));
    }
}
