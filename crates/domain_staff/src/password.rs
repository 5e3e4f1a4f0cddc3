//! Password hashing
//!
//! SHA-256 over password bytes followed by a random 16-byte salt, both
//! stored hex-encoded. Verification re-derives the hash with the stored
//! salt and compares.

use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Hashes a password with a fresh random salt
///
/// Returns `(hash_hex, salt_hex)`.
pub fn hash_password(password: &str) -> (String, String) {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let hash = derive(password, &salt);
    (hex::encode(hash), hex::encode(salt))
}

/// Checks a password against a stored hash and salt
///
/// Malformed stored values fail verification rather than erroring; a
/// corrupt credential row must never let a login through.
pub fn verify_password(password: &str, hash_hex: &str, salt_hex: &str) -> bool {
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(hash_hex) else {
        return false;
    };
    derive(password, &salt) == expected
}

fn derive(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let (hash, salt) = hash_password("s3cret!");
        assert!(verify_password("s3cret!", &hash, &salt));
        assert!(!verify_password("s3cret", &hash, &salt));
    }

    #[test]
    fn test_salts_are_unique() {
        let (hash_a, salt_a) = hash_password("same-password");
        let (hash_b, salt_b) = hash_password("same-password");
        assert_ne!(salt_a, salt_b);
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn test_malformed_stored_values_fail_closed() {
        let (hash, _) = hash_password("pw");
        assert!(!verify_password("pw", &hash, "not hex"));
        assert!(!verify_password("pw", "not hex", "00ff"));
    }
}
