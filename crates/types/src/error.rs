//! Error types for the comptrack registry using snafu.
//!
//! Authorization is the registry's only failure mode: all operations are
//! total over well-formed inputs, and idempotent add/remove operations
//! never fail merely because the target state is already reached. A failed
//! call leaves state unchanged and the registry remains usable.

use std::fmt;

use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::types::Principal;

/// Unified result type for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// Mutations subject to role checks.
///
/// Used as context on [`RegistryError::Unauthorized`] and as a structured
/// field in denial logs, so every denied call records what was attempted
/// and by whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryOp {
    /// Add a principal to the admin set (owner-only).
    AddAdmin,
    /// Remove a principal from the admin set (owner-only).
    RemoveAdmin,
    /// Establish a user binding for a serial number (admin-only).
    AddUserBinding,
    /// Clear a user binding for a serial number (admin-only).
    RemoveUserBinding,
    /// Append a tracking record (bound-user-only).
    TrackComputer,
}

impl RegistryOp {
    /// Returns the operation as a static string label for logs and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddAdmin => "add_admin",
            Self::RemoveAdmin => "remove_admin",
            Self::AddUserBinding => "add_user_binding",
            Self::RemoveUserBinding => "remove_user_binding",
            Self::TrackComputer => "track_computer",
        }
    }
}

impl fmt::Display for RegistryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by registry mutations.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum RegistryError {
    /// Caller lacks the role required for the requested mutation:
    /// not-owner for admin operations, not-admin for binding operations,
    /// not-bound-user for tracking.
    #[snafu(display("unauthorized: {principal} may not {operation}"))]
    Unauthorized {
        /// The caller that was denied.
        principal: Principal,
        /// The mutation that was attempted.
        operation: RegistryOp,
    },
}

impl RegistryError {
    /// Returns the denied operation, for callers that branch on what was
    /// attempted rather than on the message.
    pub const fn operation(&self) -> RegistryOp {
        match self {
            Self::Unauthorized { operation, .. } => *operation,
        }
    }
}
