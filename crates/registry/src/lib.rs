//! Registry state machine for comptrack.
//!
//! This crate provides the role-gated registry core:
//!
//! - [`Registry`] — the single state machine: owner-fixed role hierarchy,
//!   admin-managed user bindings, and an append-only record log
//! - [`RoleStore`] and [`RecordStore`] — the in-memory stores the registry
//!   serializes access to
//! - [`EventSink`] and its implementations — the injected notification
//!   sink, decoupled from mutation logic
//!
//! The registry has no wire protocol of its own; the embedding runtime
//! resolves caller identity to a [`Principal`](comptrack_types::Principal)
//! and invokes operations directly.

#![deny(unsafe_code)]

mod records;
mod registry;
mod roles;
mod sink;

pub use records::RecordStore;
pub use registry::Registry;
pub use roles::RoleStore;
pub use sink::{
    EventSink, FileEventSink, MemoryEventSink, NullEventSink, SinkError, create_event_sink,
};
