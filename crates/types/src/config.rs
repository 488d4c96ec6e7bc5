//! Registry configuration.
//!
//! Provides configuration loading from files and environment via serde.
//! All fields default so that `RegistryConfig::default()` yields a working
//! in-memory registry with the strict binding policy and no event log file.

use serde::Deserialize;

/// Registry configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    /// Which bindings authorize `track_computer` (see [`BindingScope`]).
    #[serde(default)]
    pub binding_scope: BindingScope,
    /// Durable event log settings.
    /// If not set, no event log file is written.
    #[serde(default)]
    pub event_log: Option<EventLogConfig>,
}

/// Binding scope policy for `track_computer` authorization.
///
/// Deployed variants of the original system disagreed on how far a user
/// binding reaches; the strict exact-serial policy is the default, and
/// the looser variant is available for compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingScope {
    /// The caller must hold a live binding for the exact serial number
    /// being tracked.
    #[default]
    ExactSerial,
    /// Any live binding grants the caller tracking rights for every
    /// serial number.
    AnyBinding,
}

/// Event log file sink configuration.
///
/// The sink writes one JSON event per line and rotates the active file
/// when it would exceed `max_file_size_bytes`:
/// `events.jsonl` → `events.jsonl.1` → ... → deleted past
/// `max_rotated_files`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventLogConfig {
    /// Path of the active JSON Lines log file.
    pub path: String,
    /// Rotate when the active file would exceed this size.
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
    /// Number of rotated files kept before deletion.
    #[serde(default = "default_max_rotated_files")]
    pub max_rotated_files: u32,
}

fn default_max_file_size_bytes() -> u64 {
    100 * 1024 * 1024
}

fn default_max_rotated_files() -> u32 {
    3
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.binding_scope, BindingScope::ExactSerial);
        assert!(config.event_log.is_none());
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: RegistryConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config.binding_scope, BindingScope::ExactSerial);
        assert!(config.event_log.is_none());
    }

    #[test]
    fn test_deserialize_binding_scope_snake_case() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"binding_scope": "any_binding"}"#).expect("deserialize");
        assert_eq!(config.binding_scope, BindingScope::AnyBinding);
    }

    #[test]
    fn test_event_log_defaults_apply() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"event_log": {"path": "/var/log/comptrack/events.jsonl"}}"#)
                .expect("deserialize");
        let event_log = config.event_log.expect("event log config");
        assert_eq!(event_log.path, "/var/log/comptrack/events.jsonl");
        assert_eq!(event_log.max_file_size_bytes, 100 * 1024 * 1024);
        assert_eq!(event_log.max_rotated_files, 3);
    }
}
