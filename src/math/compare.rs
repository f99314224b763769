//! Tolerant floating-point comparisons.
//!
//! All envelope and classification decisions go through these helpers so
//! that two values differing only by accumulated rounding noise compare
//! equal. `is_close` uses the combined relative/absolute bound
//! `|a - b| <= atol + rtol * |b|`.

/// Default relative tolerance for closeness checks.
pub const DEFAULT_RTOL: f64 = 1e-5;

/// Default absolute tolerance for closeness checks.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Relative tolerance used by the ordered comparisons below.
const CMP_RTOL: f64 = 1e-3;

/// Closeness with explicit relative and absolute tolerance.
#[must_use]
pub fn is_close(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    (a - b).abs() <= atol + rtol * b.abs()
}

/// Closeness with the default tolerances.
#[must_use]
pub fn is_close_default(a: f64, b: f64) -> bool {
    is_close(a, b, DEFAULT_RTOL, DEFAULT_ATOL)
}

/// Tolerant `a < b`: false when the values are close.
#[must_use]
pub fn less(a: f64, b: f64) -> bool {
    !is_close(a, b, CMP_RTOL, DEFAULT_ATOL) && a < b
}

/// Tolerant `a <= b`: true when the values are close.
#[must_use]
pub fn less_equal(a: f64, b: f64) -> bool {
    is_close(a, b, CMP_RTOL, DEFAULT_ATOL) || a < b
}

/// Tolerant `a > b`: false when the values are close.
#[must_use]
pub fn greater(a: f64, b: f64) -> bool {
    !is_close(a, b, CMP_RTOL, DEFAULT_ATOL) && a > b
}

/// Tolerant `a >= b`: true when the values are close.
#[must_use]
pub fn greater_equal(a: f64, b: f64) -> bool {
    is_close(a, b, CMP_RTOL, DEFAULT_ATOL) || a > b
}
