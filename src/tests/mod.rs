//! Test modules for the trie dictionary.
//!
//! This module contains the crate-internal test suites:
//! - Configuration loading and validation
//! - Error conversions and display
//! - Property-based tests for the store and the flat file codec
//! - Scripted interactive sessions
//!
//! Unit tests for individual components live next to the code they test.
