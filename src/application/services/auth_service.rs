//! Admin gate for destructive endpoints.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Decides whether a caller may use admin-only endpoints.
///
/// The admin token itself is never stored; only its SHA-256 hex digest is
/// configured (`ADMIN_TOKEN_HASH`). Without a configured digest the gate is
/// open and every caller is authorized.
#[derive(Debug, Clone, Default)]
pub struct AuthService {
    admin_token_hash: Option<String>,
}

impl AuthService {
    /// Creates a gate checking bearer tokens against `admin_token_hash`.
    ///
    /// `None` leaves the gate open.
    pub fn new(admin_token_hash: Option<String>) -> Self {
        Self {
            admin_token_hash: admin_token_hash.map(|h| h.trim().to_ascii_lowercase()),
        }
    }

    /// Returns true when admin endpoints require a token.
    pub fn is_enforced(&self) -> bool {
        self.admin_token_hash.is_some()
    }

    /// Checks the bearer token presented by the caller, if any.
    pub fn is_authorized(&self, token: Option<&str>) -> bool {
        let Some(expected) = &self.admin_token_hash else {
            return true;
        };

        let Some(token) = token else {
            return false;
        };

        hash_token(token).as_bytes().ct_eq(expected.as_bytes()).into()
    }
}

/// Hashes a raw token with SHA-256.
///
/// Returns a 64-character lowercase hex digest, the format expected in
/// `ADMIN_TOKEN_HASH`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
