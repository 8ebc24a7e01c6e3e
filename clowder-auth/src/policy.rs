//! The authorization policy engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Identity, Role};

/// What the caller is trying to do to an owned resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Read,
    Update,
    Delete,
    /// Change the resource's `owner` field. Admin-only, even when the
    /// caller happens to be the current owner.
    ReassignOwner,
}

impl Action {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::Read)
    }
}

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthzReason {
    PublicRead,
    IsOwner,
    IsAdmin,
    NotOwnerNotAdmin,
    NoIdentity,
}

/// An allow/deny verdict plus its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzDecision {
    pub allowed: bool,
    pub reason: AuthzReason,
}

impl AuthzDecision {
    fn allow(reason: AuthzReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: AuthzReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Decide whether `identity` may perform `action` on a resource owned by
/// `owner_id`.
///
/// The rule set, in order:
/// 1. `Read` is allowed for everyone, anonymous callers included.
/// 2. An anonymous caller is denied every mutation (`NoIdentity`).
/// 3. An admin is allowed every action (`IsAdmin`); `ReassignOwner` is
///    allowed for admins only.
/// 4. A user may `Update`/`Delete` exactly the resources they own.
///
/// Total and infallible: every input yields exactly one decision, and the
/// caller translates a denial into a transport-level rejection. Handlers
/// must call this before touching storage (decide, then act).
pub fn authorize(identity: Option<&Identity>, owner_id: Uuid, action: Action) -> AuthzDecision {
    if !action.is_mutation() {
        return AuthzDecision::allow(AuthzReason::PublicRead);
    }
    let Some(identity) = identity else {
        return AuthzDecision::deny(AuthzReason::NoIdentity);
    };
    if identity.role == Role::Admin {
        return AuthzDecision::allow(AuthzReason::IsAdmin);
    }
    match action {
        Action::Update | Action::Delete if identity.subject_id == owner_id => {
            AuthzDecision::allow(AuthzReason::IsOwner)
        }
        _ => AuthzDecision::deny(AuthzReason::NotOwnerNotAdmin),
    }
}
