//! # Sealed Santa Testkit
//!
//! Testing utilities for Sealed Santa.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Participants with known secret keys, so tests can open
//!   every envelope of a draw
//! - **Generators**: Proptest strategies for names, rosters, and payloads
//!
//! Participant keys are only ever created here; the library itself never
//! generates them.
//!
//! ## Test Fixtures
//!
//! ```rust
//! use sealed_santa::SantaDraw;
//! use sealed_santa_testkit::fixtures::Roster;
//!
//! let roster = Roster::named(&["Alice", "Bob", "Carol"]);
//! let out = SantaDraw::default().draw(&roster.registry()).unwrap();
//!
//! for (giver, receiver) in roster.open_all(&out) {
//!     assert_ne!(giver, receiver);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use sealed_santa_testkit::generators::roster;
//!
//! proptest! {
//!     #[test]
//!     fn nobody_draws_themself(roster in roster(2, 10)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{seed_for, Party, Roster};
pub use generators::{participant_name, payload, roster, unique_names};
