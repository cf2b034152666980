//! # Quantum-Chain Sanction Benchmarks
//!
//! | Operation | Claim | Target |
//! |-----------|-------|--------|
//! | `is_sanctioned_addr` | one reverse seek | flat across temp entry counts |
//! | temp entry add + cleanup | linear in batch size | < 1ms per 100 addresses |

use criterion::{criterion_group, criterion_main};
use qc_sanction_tests::benchmarks::qc_18_sanction::{bench_is_sanctioned, bench_temp_entry_lifecycle};

criterion_group!(benches, bench_is_sanctioned, bench_temp_entry_lifecycle);
criterion_main!(benches);
