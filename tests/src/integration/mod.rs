//! # Integration Tests
//!
//! End-to-end flows through the public API of the sanction ledger.

pub mod flows;
