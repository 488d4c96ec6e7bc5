//! Core types, errors, events, and configuration for the comptrack registry.
//!
//! This crate provides the foundational types used throughout the registry:
//! - Identifier newtypes (Principal, SerialNumber, RecordId)
//! - The tracked record structure
//! - Notification types emitted by mutations
//! - Error types using snafu
//! - Registry configuration

pub mod config;
pub mod error;
pub mod events;
pub mod types;

// Re-export commonly used types at crate root
pub use config::{BindingScope, EventLogConfig, RegistryConfig};
pub use error::{RegistryError, RegistryOp, Result};
pub use events::{EventKind, RegistryEvent};
pub use types::{ComputerRecord, Principal, RecordId, SerialNumber};
