//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestEnv, JUAN};
//!
//! #[test]
//! fn test_discover() {
//!     let env = TestEnv::seeded();
//!     assert!(!env.state.discover(JUAN, None).is_empty());
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
pub use fixtures::{titles, TestEnv};
