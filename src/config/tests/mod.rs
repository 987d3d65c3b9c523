//! Unit tests for configuration types.
//!
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Deserialisation and default tests
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence tests

mod helpers;
