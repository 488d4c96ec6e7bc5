//! The registry state machine: role-gated mutations and open queries.
//!
//! A single [`Registry`] instance is constructed once per deployment with
//! its owner fixed for life. Mutations serialize through one write lock so
//! no two can interleave partial writes; queries take the read lock and
//! observe a consistent snapshot. Authorization is checked before any
//! state is touched, so a denied call leaves the registry unchanged.

use std::sync::Arc;

use parking_lot::RwLock;

use comptrack_types::{
    BindingScope, ComputerRecord, EventKind, Principal, RecordId, RegistryConfig, RegistryError,
    RegistryEvent, RegistryOp, Result, SerialNumber,
};

use crate::records::RecordStore;
use crate::roles::RoleStore;
use crate::sink::{EventSink, NullEventSink, SinkError, create_event_sink};

/// Role-based registry of computer tracking records.
///
/// Holds the role hierarchy (owner → admins → bound users) and the
/// append-only record log. The embedding runtime resolves caller identity
/// to a [`Principal`] before invoking operations; the registry only
/// compares principals.
///
/// # Authorization
///
/// - `add_admin` / `remove_admin`: owner only
/// - `add_user_binding` / `remove_user_binding`: current admins only
/// - `track_computer`: principals holding a live binding for the serial
///   (or any binding, under [`BindingScope::AnyBinding`])
/// - queries: open to any caller
pub struct Registry {
    owner: Principal,
    config: RegistryConfig,
    sink: Arc<dyn EventSink>,
    inner: RwLock<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    roles: RoleStore,
    records: RecordStore,
}

impl Registry {
    /// Creates a registry owned by `owner` with default configuration and
    /// no event sink.
    pub fn new(owner: impl Into<Principal>) -> Self {
        Self::with_sink(owner, RegistryConfig::default(), Arc::new(NullEventSink))
    }

    /// Creates a registry with explicit configuration and event sink.
    pub fn with_sink(
        owner: impl Into<Principal>,
        config: RegistryConfig,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self { owner: owner.into(), config, sink, inner: RwLock::new(RegistryInner::default()) }
    }

    /// Creates a registry from configuration alone, constructing the event
    /// sink it describes (a file sink when `event_log` is set, otherwise
    /// a no-op sink).
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the configured event log file cannot be
    /// opened.
    pub fn from_config(
        owner: impl Into<Principal>,
        config: RegistryConfig,
    ) -> std::result::Result<Self, SinkError> {
        let sink = create_event_sink(config.event_log.clone())?;
        Ok(Self::with_sink(owner, config, sink))
    }

    /// The principal that owns this registry, fixed at construction.
    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    // =========================================================================
    // Admin Operations
    // =========================================================================

    /// Adds a principal to the admin set.
    ///
    /// Idempotent: re-adding a current admin succeeds without change.
    /// Emits [`EventKind::AdminAdded`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] if the caller is not the
    /// owner.
    pub fn add_admin(&self, caller: &Principal, admin: impl Into<Principal>) -> Result<()> {
        let mut inner = self.write_as_owner(caller, RegistryOp::AddAdmin)?;
        let admin = admin.into();
        let added = inner.roles.add_admin(admin.clone());
        tracing::debug!(admin = %admin, added, "admin added");
        self.emit(caller, EventKind::AdminAdded { admin });
        Ok(())
    }

    /// Removes a principal from the admin set.
    ///
    /// Idempotent: removing an absent admin succeeds without change.
    /// Emits [`EventKind::AdminRemoved`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] if the caller is not the
    /// owner.
    pub fn remove_admin(&self, caller: &Principal, admin: &Principal) -> Result<()> {
        let mut inner = self.write_as_owner(caller, RegistryOp::RemoveAdmin)?;
        let removed = inner.roles.remove_admin(admin);
        tracing::debug!(admin = %admin, removed, "admin removed");
        self.emit(caller, EventKind::AdminRemoved { admin: admin.clone() });
        Ok(())
    }

    /// Whether the principal is currently in the admin set. Open query.
    pub fn is_admin(&self, principal: &Principal) -> bool {
        self.inner.read().roles.is_admin(principal)
    }

    // =========================================================================
    // User Binding Operations
    // =========================================================================

    /// Establishes the binding `(user, serial_number)`, granting `user`
    /// tracking rights for that serial.
    ///
    /// Idempotent: re-adding a live binding succeeds without change.
    /// Emits [`EventKind::UserAdded`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] if the caller is not a
    /// current admin.
    pub fn add_user_binding(
        &self,
        caller: &Principal,
        serial_number: impl Into<SerialNumber>,
        user: impl Into<Principal>,
    ) -> Result<()> {
        let mut inner = self.write_as_admin(caller, RegistryOp::AddUserBinding)?;
        let serial_number = serial_number.into();
        let user = user.into();
        let added = inner.roles.add_binding(user.clone(), serial_number.clone());
        tracing::debug!(user = %user, serial_number = %serial_number, added, "user bound");
        self.emit(caller, EventKind::UserAdded { serial_number, user });
        Ok(())
    }

    /// Clears the binding `(user, serial_number)`.
    ///
    /// Idempotent: clearing an absent binding succeeds without change.
    /// Records already created under the binding are untouched. Emits
    /// [`EventKind::UserRemoved`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] if the caller is not a
    /// current admin.
    pub fn remove_user_binding(
        &self,
        caller: &Principal,
        serial_number: &SerialNumber,
        user: &Principal,
    ) -> Result<()> {
        let mut inner = self.write_as_admin(caller, RegistryOp::RemoveUserBinding)?;
        let removed = inner.roles.remove_binding(user, serial_number);
        tracing::debug!(user = %user, serial_number = %serial_number, removed, "user unbound");
        self.emit(
            caller,
            EventKind::UserRemoved { serial_number: serial_number.clone(), user: user.clone() },
        );
        Ok(())
    }

    /// Whether a live binding `(principal, serial_number)` exists. Open
    /// query.
    pub fn is_user_bound(&self, principal: &Principal, serial_number: &SerialNumber) -> bool {
        self.inner.read().roles.is_bound(principal, serial_number)
    }

    // =========================================================================
    // Tracking
    // =========================================================================

    /// Appends a tracking record for `serial_number` and returns its id.
    ///
    /// Emits [`EventKind::ComputerTracked`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] unless the caller holds a
    /// live binding for `serial_number` — or, under
    /// [`BindingScope::AnyBinding`], any live binding at all.
    pub fn track_computer(
        &self,
        caller: &Principal,
        serial_number: impl Into<SerialNumber>,
        payload: impl Into<String>,
        timestamp: i64,
    ) -> Result<RecordId> {
        let serial_number = serial_number.into();
        let mut inner = self.inner.write();

        let authorized = match self.config.binding_scope {
            BindingScope::ExactSerial => inner.roles.is_bound(caller, &serial_number),
            BindingScope::AnyBinding => inner.roles.has_any_binding(caller),
        };
        if !authorized {
            return Err(self.deny(caller, RegistryOp::TrackComputer));
        }

        let payload = payload.into();
        let record = ComputerRecord {
            serial_number: serial_number.clone(),
            payload: payload.clone(),
            timestamp,
        };
        let record_id = inner.records.append(record);
        tracing::debug!(record_id = %record_id, serial_number = %serial_number, "computer tracked");
        self.emit(
            caller,
            EventKind::ComputerTracked { record_id, serial_number, payload, timestamp },
        );
        Ok(record_id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All records system-wide, in creation order. Open query.
    pub fn records(&self) -> Vec<ComputerRecord> {
        self.inner.read().records.all().to_vec()
    }

    /// All records for one serial number, in creation order. Open query.
    pub fn records_for_serial(&self, serial_number: &SerialNumber) -> Vec<ComputerRecord> {
        self.inner.read().records.for_serial(serial_number).cloned().collect()
    }

    /// Returns a record by id, if it exists. Open query.
    pub fn record(&self, id: RecordId) -> Option<ComputerRecord> {
        self.inner.read().records.get(id).cloned()
    }

    /// Total number of records. Open query.
    pub fn record_count(&self) -> usize {
        self.inner.read().records.len()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Takes the write lock for an owner-only mutation, denying non-owners
    /// before any state is touched.
    fn write_as_owner(
        &self,
        caller: &Principal,
        operation: RegistryOp,
    ) -> Result<parking_lot::RwLockWriteGuard<'_, RegistryInner>> {
        if caller != &self.owner {
            return Err(self.deny(caller, operation));
        }
        Ok(self.inner.write())
    }

    /// Takes the write lock for an admin-only mutation, denying
    /// non-admins before any state is touched.
    fn write_as_admin(
        &self,
        caller: &Principal,
        operation: RegistryOp,
    ) -> Result<parking_lot::RwLockWriteGuard<'_, RegistryInner>> {
        let inner = self.inner.write();
        if !inner.roles.is_admin(caller) {
            return Err(self.deny(caller, operation));
        }
        Ok(inner)
    }

    fn deny(&self, caller: &Principal, operation: RegistryOp) -> RegistryError {
        tracing::warn!(caller = %caller, operation = operation.as_str(), "mutation denied");
        RegistryError::Unauthorized { principal: caller.clone(), operation }
    }

    /// Hands one event to the sink. Sink failures never roll back the
    /// mutation that produced the event.
    fn emit(&self, principal: &Principal, kind: EventKind) {
        let event = RegistryEvent::new(principal.clone(), kind);
        if let Err(error) = self.sink.emit(&event) {
            tracing::warn!(event = event.kind.as_str(), error = %error, "event sink emit failed");
        }
    }
}
