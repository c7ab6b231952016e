//! Common test utilities for daubechies-sweep.
//!
//! This module provides shared helpers for the integration tests.

// Re-export all common test utilities
pub mod assertions;
pub mod test_data;
