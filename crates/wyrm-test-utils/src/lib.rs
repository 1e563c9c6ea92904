//! Shared test fixtures and utilities for Wyrm crates.
//!
//! Provides Bevy test app builders, follower spawn helpers, mock obstacle
//! worlds and scripted head paths.

pub mod app;
pub mod mocks;
pub mod paths;
pub mod spawn;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use app::{follow_test_app, minimal_test_app};
pub use mocks::{SolidBelow, SolidEverywhere, Wall};
pub use paths::{circle_head, line_head};
pub use spawn::{spawn_bound_follower, spawn_test_follower};
