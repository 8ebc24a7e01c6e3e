//! Token claims and the identity resolver

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed role set. Role strings are validated exactly once, at identity
/// resolution; everything downstream matches on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Map a raw role claim to a role. Anything other than `"admin"`,
    /// including an absent claim, is an ordinary user.
    pub fn from_claim(raw: Option<&str>) -> Self {
        match raw {
            Some("admin") => Role::Admin,
            _ => Role::User,
        }
    }
}

/// Decoded token claims, as handed over by the token verifier.
///
/// Unknown claims (`exp`, `iat`, issuer data) are ignored; only the
/// subject and role matter here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// The resolved caller for one request. Created when request handling
/// starts and discarded when it ends; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: Uuid,
    pub role: Role,
}

/// Resolve claims into an identity.
///
/// Returns `None` (an anonymous caller) when the subject claim is missing
/// or not a well-formed id. This never fails: whether anonymity is fatal
/// is the caller's decision, made per operation by the policy engine.
pub fn resolve(claims: &TokenClaims) -> Option<Identity> {
    let subject_id = claims.sub.as_deref()?.parse().ok()?;
    Some(Identity {
        subject_id,
        role: Role::from_claim(claims.role.as_deref()),
    })
}
