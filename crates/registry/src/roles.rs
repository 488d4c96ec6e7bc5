//! Role membership storage.
//!
//! Stores the admin set and user bindings. A binding is the pair
//! `(principal, serial_number)`: it grants one principal tracking rights
//! for one device serial, and a principal may hold bindings for multiple
//! serials at once.

use std::collections::{HashMap, HashSet};

use comptrack_types::{Principal, SerialNumber};

/// In-memory role membership for admins and user bindings.
///
/// Mutators return `true` when membership actually changed, `false` when
/// the target state was already reached, so callers can distinguish
/// created/already-existed without an error path.
///
/// Not synchronized itself — [`Registry`](crate::Registry) serializes
/// access through its write lock.
#[derive(Debug, Default)]
pub struct RoleStore {
    admins: HashSet<Principal>,
    bindings: HashMap<Principal, HashSet<SerialNumber>>,
}

impl RoleStore {
    /// Creates an empty role store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a principal to the admin set.
    ///
    /// Returns true if added, false if already present.
    pub fn add_admin(&mut self, admin: Principal) -> bool {
        self.admins.insert(admin)
    }

    /// Removes a principal from the admin set.
    ///
    /// Returns true if removed, false if absent.
    pub fn remove_admin(&mut self, admin: &Principal) -> bool {
        self.admins.remove(admin)
    }

    /// Whether the principal is currently in the admin set.
    pub fn is_admin(&self, principal: &Principal) -> bool {
        self.admins.contains(principal)
    }

    /// Establishes a binding granting `user` tracking rights for `serial`.
    ///
    /// Returns true if created, false if it already existed.
    pub fn add_binding(&mut self, user: Principal, serial: SerialNumber) -> bool {
        self.bindings.entry(user).or_default().insert(serial)
    }

    /// Clears the binding `(user, serial)`.
    ///
    /// Returns true if cleared, false if no such binding existed.
    pub fn remove_binding(&mut self, user: &Principal, serial: &SerialNumber) -> bool {
        let Some(serials) = self.bindings.get_mut(user) else {
            return false;
        };
        let removed = serials.remove(serial);
        if serials.is_empty() {
            self.bindings.remove(user);
        }
        removed
    }

    /// Whether a live binding `(principal, serial)` exists.
    pub fn is_bound(&self, principal: &Principal, serial: &SerialNumber) -> bool {
        self.bindings.get(principal).is_some_and(|serials| serials.contains(serial))
    }

    /// Whether the principal holds any live binding, regardless of serial.
    pub fn has_any_binding(&self, principal: &Principal) -> bool {
        self.bindings.contains_key(principal)
    }
}
