//! Shared test utilities for comptrack crates.
//!
//! Provides proptest strategies for domain types so unit and integration
//! tests across the workspace generate well-formed principals, serial
//! numbers, and records without duplicating generators.

#![deny(unsafe_code)]

pub mod strategies;
