//! # Quantum-Chain Sanction Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Performance tests
//! │   └── qc_18_sanction.rs
//! │
//! └── integration/      # Ledger + governance + bank choreography
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-sanction-tests
//!
//! # Integration only
//! cargo test -p qc-sanction-tests integration::
//!
//! # Benchmarks
//! cargo bench -p qc-sanction-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod benchmarks;
pub mod integration;
