//! Serializer integration tests
//!
//! This module tests serializer resolution and the typed read/write paths
//! for built-in scalar, pattern, identifier and collection types.

mod collection_tests;
mod pattern_tests;
mod scalar_tests;
