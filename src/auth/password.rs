use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

pub const MIN_PASSWORD_LEN: usize = 8;
const SPECIAL_CHARS: &[char] = &['_', '@', '$'];

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Password must be at least 8 chars with a lowercase letter, an uppercase
/// letter, a digit, one of `_@$`, and no whitespace.
pub fn meets_policy(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARS.contains(&c))
        && !password.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("Abc12345@").expect("hashing should succeed");
        assert!(!verify_password("Abc12345$", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("Abc12345@").unwrap();
        let b = hash_password("Abc12345@").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn policy_accepts_strong_passwords() {
        assert!(meets_policy("Abc12345@"));
        assert!(meets_policy("andr3S@2"));
        assert!(meets_policy("x_Y1zzzz"));
        assert!(meets_policy("$$$$aA1$"));
    }

    #[test]
    fn policy_rejects_each_missing_class() {
        assert!(!meets_policy("Ab1@"), "too short");
        assert!(!meets_policy("ABC12345@"), "no lowercase");
        assert!(!meets_policy("abc12345@"), "no uppercase");
        assert!(!meets_policy("Abcdefgh@"), "no digit");
        assert!(!meets_policy("Abc123456"), "no special");
        assert!(!meets_policy("Abc1234!#"), "special outside _@$");
        assert!(!meets_policy("Abc 12345@"), "whitespace");
        assert!(!meets_policy("Abc12345@\t"), "tab");
    }
}
