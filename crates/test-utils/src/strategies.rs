//! Proptest strategies for comptrack domain types.
//!
//! Reusable generators for property-based testing across crates.
//! Strategies produce well-formed domain values while exploring edge
//! cases through random variation.
//!
//! # Usage
//!
//! ```no_run
//! use comptrack_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(principal in strategies::arb_principal()) {
//!         // test invariant with a randomly generated principal
//!     }
//! }
//! ```

use comptrack_types::{ComputerRecord, Principal, SerialNumber};
use proptest::prelude::*;

/// Generates an arbitrary principal in `acct:{key}` format.
///
/// Key is 1-32 characters matching `[a-z][a-z0-9]{0,31}`.
pub fn arb_principal() -> impl Strategy<Value = Principal> {
    "[a-z][a-z0-9]{0,31}".prop_map(|key| Principal::new(format!("acct:{key}")))
}

/// Generates an arbitrary serial number in `COMP-{0000..9999}` format,
/// matching the device fleet's labeling convention.
pub fn arb_serial_number() -> impl Strategy<Value = SerialNumber> {
    (0u32..10_000).prop_map(|n| SerialNumber::new(format!("COMP-{n:04}")))
}

/// Generates an arbitrary record payload of 0-64 printable ASCII
/// characters.
pub fn arb_payload() -> impl Strategy<Value = String> {
    "[ -~]{0,64}"
}

/// Generates a Unix-second timestamp within a plausible device lifetime
/// (2017 through 2033).
pub fn arb_timestamp() -> impl Strategy<Value = i64> {
    1_500_000_000i64..2_000_000_000i64
}

/// Generates a complete arbitrary record.
pub fn arb_record() -> impl Strategy<Value = ComputerRecord> {
    (arb_serial_number(), arb_payload(), arb_timestamp()).prop_map(
        |(serial_number, payload, timestamp)| ComputerRecord { serial_number, payload, timestamp },
    )
}
