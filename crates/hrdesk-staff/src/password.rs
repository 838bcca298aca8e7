//! Argon2id password hashing

use crate::error::{StaffError, StaffResult};
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use uuid::Uuid;

/// Hash `password` into a PHC string
pub fn hash_password(password: &str) -> StaffResult<String> {
	// A v4 UUID carries 122 random bits, plenty for a salt
	let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
		.map_err(|e| StaffError::PasswordHash(e.to_string()))?;

	Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| StaffError::PasswordHash(e.to_string()))
}

/// Check `password` against a PHC string
///
/// A malformed hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
	match PasswordHash::new(hash) {
		Ok(parsed) => Argon2::default()
			.verify_password(password.as_bytes(), &parsed)
			.is_ok(),
		Err(e) => {
			tracing::warn!(error = %e, "stored password hash is malformed");
			false
		}
	}
}
