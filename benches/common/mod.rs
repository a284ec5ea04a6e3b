//! Shared data generators and constants for the benchmarks.
#![allow(dead_code)]
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

// DATA GENERATORS

/// Generate random alphanumeric string of specified length
#[inline]
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate batch of random strings with specified length
pub fn generate_strings(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_string(len)).collect()
}

/// Generate random u64 keys as 8-byte little-endian arrays
pub fn generate_u64_keys(count: usize) -> Vec<[u8; 8]> {
    let mut rng = thread_rng();
    (0..count).map(|_| rng.gen::<u64>().to_le_bytes()).collect()
}

/// Generate random byte strings, every length in `0..max_len` equally likely
pub fn generate_byte_keys(count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = thread_rng();
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..max_len);
            (0..len).map(|_| rng.gen::<u8>()).collect()
        })
        .collect()
}

// CONSTANTS

/// Filter sizes (expected items)
pub const SIZES: &[usize] = &[1_000, 10_000, 100_000, 1_000_000];

/// Target false positive rates, spanning way 4 to way 8
pub const FP_RATES: &[f64] = &[0.05, 0.01, 0.005, 0.001];

/// Key lengths covering every hash tail path
pub const KEY_LENGTHS: &[usize] = &[4, 8, 15, 16, 31, 32, 64, 256];

/// Thread counts for the shared filter
pub const THREAD_COUNTS: &[usize] = &[1, 2, 4, 8];

// UTILITIES

/// Empirical false positive rate over keys known to be absent
pub fn measure_fpr(filter_results: &[bool]) -> f64 {
    if filter_results.is_empty() {
        return 0.0;
    }
    let hits = filter_results.iter().filter(|&&hit| hit).count();
    hits as f64 / filter_results.len() as f64
}
