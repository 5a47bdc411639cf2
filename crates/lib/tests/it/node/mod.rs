//! Configuration tree integration tests
//!
//! This module tests ConfigNode content handling, lazy navigation through
//! NodeEntry, shape coercion and the map ordering strategies.

mod map_factory_tests;
mod navigation_tests;
mod tree_tests;
