//! # Quantum-Chain Benchmarks
//!
//! Performance benchmarks for the sanction ledger.

pub mod qc_18_sanction;
