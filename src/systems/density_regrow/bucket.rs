//! Bucket indexing and the geometric neighbor bound

use std::f64::consts::PI;

/// Most same-type cells that fit in a disc of `radius`: `floor(π·r² + 1) + 1`.
/// Zero when counting is disabled or the disc is a single point.
pub fn upper_bound_possible_neighbors(radius: Option<u32>) -> usize {
    match radius {
        Some(r) if r > 0 => {
            let r = r as f64;
            (PI * r * r + 1.0).floor() as usize + 1
        }
        _ => 0,
    }
}

/// Dormant bucket for `count`; counts past the table reuse the last slot.
#[inline]
pub fn bucket_index(count: u32, table_len: usize) -> usize {
    (count as usize).min(table_len.saturating_sub(1))
}

#[inline]
pub fn bucket_probability(table: &[f64], bucket: usize) -> f64 {
    match table.len() {
        0 => 0.0,
        n => table[bucket.min(n - 1)],
    }
}
