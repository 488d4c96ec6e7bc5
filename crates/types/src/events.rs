//! Notification types emitted by registry mutations.
//!
//! Every successful mutation produces a [`RegistryEvent`] — a single
//! structured record capturing when it happened, who performed it, and
//! what changed. Events are handed to the configured sink; publishing them
//! onward (to a ledger, a message bus, or a log pipeline) is the embedding
//! collaborator's concern.
//!
//! Events are serialized as JSON for queryability; the file sink writes
//! one JSON object per line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Principal, RecordId, SerialNumber};

/// A structured notification for one applied mutation.
///
/// # Fields
///
/// - `timestamp`: when the mutation was applied (UTC wall clock)
/// - `event_id`: UUID v4 for deduplication
/// - `principal`: who performed the mutation (the authorized caller)
/// - `kind`: what changed, with operation-specific context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEvent {
    /// When the mutation was applied.
    pub timestamp: DateTime<Utc>,
    /// Unique event identifier (UUID v4).
    pub event_id: String,
    /// Principal that performed the mutation.
    pub principal: Principal,
    /// What changed.
    pub kind: EventKind,
}

impl RegistryEvent {
    /// Creates an event stamped with the current time and a fresh id.
    pub fn new(principal: Principal, kind: EventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            event_id: Uuid::new_v4().to_string(),
            principal,
            kind,
        }
    }
}

/// The mutation a [`RegistryEvent`] describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A principal was added to the admin set.
    AdminAdded {
        /// The admin that was added.
        admin: Principal,
    },
    /// A principal was removed from the admin set.
    AdminRemoved {
        /// The admin that was removed.
        admin: Principal,
    },
    /// A user binding was established for a serial number.
    UserAdded {
        /// Serial number the binding is scoped to.
        serial_number: SerialNumber,
        /// The bound user.
        user: Principal,
    },
    /// A user binding was cleared for a serial number.
    UserRemoved {
        /// Serial number the binding was scoped to.
        serial_number: SerialNumber,
        /// The unbound user.
        user: Principal,
    },
    /// A tracking record was appended.
    ComputerTracked {
        /// Identifier of the new record.
        record_id: RecordId,
        /// Serial number the record was created under.
        serial_number: SerialNumber,
        /// Record payload.
        payload: String,
        /// Caller-supplied Unix timestamp in seconds.
        timestamp: i64,
    },
}

impl EventKind {
    /// Returns the event kind as a static string label for logs and metrics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AdminAdded { .. } => "admin_added",
            Self::AdminRemoved { .. } => "admin_removed",
            Self::UserAdded { .. } => "user_added",
            Self::UserRemoved { .. } => "user_removed",
            Self::ComputerTracked { .. } => "computer_tracked",
        }
    }
}
