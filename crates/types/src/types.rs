//! Core type definitions for the comptrack registry.
//!
//! These types cover:
//! - Identifier newtypes (Principal, SerialNumber, RecordId)
//! - The tracked record structure

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifier Types
// ============================================================================

/// Generates a newtype wrapper around `String` for opaque, comparable
/// identifiers.
///
/// Each generated type provides:
/// - Standard derives: Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord
/// - Serde with `#[serde(transparent)]` for wire format compatibility
/// - `From<&str>` and `From<String>` conversions
/// - `Display` printing the inner value verbatim
/// - `new()` constructor and `as_str()` accessor
///
/// The inner representation is deliberately unconstrained: collaborators
/// decide whether a principal is an account address, a user id, or
/// something else entirely.
macro_rules! define_str_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from any string-like value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_str_id!(
    /// Opaque, comparable identity of a caller.
    ///
    /// The caller's runtime resolves authentication to a stable principal
    /// value before invoking any registry operation; the registry only
    /// compares principals for equality.
    Principal
);

define_str_id!(
    /// Opaque device serial number.
    ///
    /// Serial numbers key user bindings and the per-serial record index.
    /// The registry imposes no format on them.
    SerialNumber
);

/// Identifier of a tracked record.
///
/// Wraps the record's insertion index in the append-only log with
/// compile-time type safety to prevent mixing with other numeric values.
///
/// # Display
///
/// Formats with `rec:` prefix: `rec:7`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a new identifier from a raw value.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    #[inline]
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for u64 {
    #[inline]
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec:{}", self.0)
    }
}

// ============================================================================
// Records
// ============================================================================

/// An immutable tracking record for one device.
///
/// Appended by `track_computer` once the caller's binding has been
/// verified; never modified or deleted afterwards. The timestamp is
/// caller-supplied (Unix seconds) so that embedding collaborators control
/// the time source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerRecord {
    /// Serial number of the tracked device.
    pub serial_number: SerialNumber,
    /// Free-form payload describing the device (e.g. `"Laptop i5 16GB"`).
    pub payload: String,
    /// Caller-supplied Unix timestamp in seconds.
    pub timestamp: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_display_is_verbatim() {
        let p = Principal::new("acct:alice");
        assert_eq!(p.to_string(), "acct:alice");
        assert_eq!(p.as_str(), "acct:alice");
    }

    #[test]
    fn test_principal_equality_and_hash() {
        use std::collections::HashSet;

        let a = Principal::from("alice");
        let b = Principal::new(String::from("alice"));
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_serial_number_serde_transparent() {
        let serial = SerialNumber::new("COMP-001");
        let json = serde_json::to_string(&serial).expect("serialize");
        assert_eq!(json, "\"COMP-001\"");
        let back: SerialNumber = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, serial);
    }

    #[test]
    fn test_record_id_display_and_value() {
        let id = RecordId::new(7);
        assert_eq!(id.to_string(), "rec:7");
        assert_eq!(id.value(), 7);
        assert_eq!(u64::from(id), 7);
        assert_eq!(RecordId::from(7u64), id);
    }

    #[test]
    fn test_record_id_serde_transparent() {
        let id = RecordId::new(42);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "42");
    }

    #[test]
    fn test_computer_record_serde_roundtrip() {
        let record = ComputerRecord {
            serial_number: SerialNumber::new("COMP-003"),
            payload: "Laptop Ryzen".to_string(),
            timestamp: 1_736_935_800,
        };
        let json = serde_json::to_string(&record).expect("serialize");
        let back: ComputerRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }
}
