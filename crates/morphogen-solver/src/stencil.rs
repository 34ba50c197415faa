//! The discrete Laplacian stencil.

/// 9-point (Moore-neighbourhood) discrete Laplacian at interior cell
/// `(i, j)` of a flat row-major `n * n` buffer: the sum of all 8 neighbours
/// minus `8 * center`.
///
/// Second-order and isotropic on the square grid, which the plain 5-point
/// stencil is not. The caller divides by `3 * h^2` to normalize; see the
/// solver's step routine.
///
/// Caller contract: `1 <= i, j <= n - 2`.
pub fn laplace(buf: &[f64], n: usize, i: usize, j: usize) -> f64 {
    debug_assert!((1..n - 1).contains(&i) && (1..n - 1).contains(&j));
    let idx = i * n + j;
    buf[idx - n]
        + buf[idx + n]
        + buf[idx - 1]
        + buf[idx + 1]
        + buf[idx - n - 1]
        + buf[idx + n + 1]
        + buf[idx - n + 1]
        + buf[idx + n - 1]
        - 8.0 * buf[idx]
}
