//! Identity resolution and authorization policy
//!
//! The one canonical ownership-and-role rule set for mutating owned
//! resources, shared by every transport. Both halves are pure: the
//! resolver maps decoded token claims to an identity (or none), and
//! `authorize` turns an identity, an owner id, and an action into a
//! total allow/deny decision.

pub mod identity;
pub mod policy;

pub use identity::{resolve, Identity, Role, TokenClaims};
pub use policy::{authorize, Action, AuthzDecision, AuthzReason};
