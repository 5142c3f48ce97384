//! Square root without libm.
//!
//! x86-64 uses the SSE2 scalar instruction, which rounds correctly in
//! hardware. The portable fallback seeds from a halved exponent field, runs
//! Heron iterations, and applies a one-ulp fixup driven by exact squaring,
//! leaving the result faithful (within one ulp, and bit-exact whenever the
//! root is exactly representable).

use super::scalbn_internal;
use super::wide::two_prod;

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn sqrt_sse2(x: f64) -> f64 {
    use core::arch::x86_64::{_mm_cvtsd_f64, _mm_set_sd, _mm_sqrt_sd};
    _mm_cvtsd_f64(_mm_sqrt_sd(_mm_set_sd(0.0), _mm_set_sd(x)))
}

/// Portable path; x is positive, finite, nonzero here.
#[cfg_attr(target_arch = "x86_64", allow(dead_code))]
fn sqrt_generic(x: f64) -> f64 {
    // One representable step; y is positive and finite.
    fn bump(y: f64, dir: i64) -> f64 {
        f64::from_bits((y.to_bits() as i64 + dir) as u64)
    }
    // Exact comparisons of y*y against x via the error-free product.
    fn square_above(y: f64, x: f64) -> bool {
        let (p, e) = two_prod(y, y);
        p > x || (p == x && e > 0.0)
    }
    fn square_below(y: f64, x: f64) -> bool {
        let (p, e) = two_prod(y, y);
        p < x || (p == x && e < 0.0)
    }

    let mut ax = x;
    let mut rescale = 0;
    let mut ux = ax.to_bits();
    if (ux >> 52) & 0x7ff == 0 {
        // normalize subnormals
        ax = scalbn_internal(ax, 54);
        rescale = -27;
        ux = ax.to_bits();
    }

    // Halving the exponent field lands within a couple of bits of the root.
    let mut y = f64::from_bits((ux >> 1) + 0x1ff8_0000_0000_0000);
    for _ in 0..6 {
        y = 0.5 * (y + ax / y);
    }
    if rescale != 0 {
        y = scalbn_internal(y, rescale);
    }

    // y is within one ulp of the root; settle the final bit so the square
    // straddles x as tightly as the grid allows.
    if square_below(y, x) {
        let up = bump(y, 1);
        if !square_above(up, x) {
            y = up;
        }
    } else if square_above(y, x) {
        let down = bump(y, -1);
        if !square_below(down, x) {
            y = down;
        }
    }
    y
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn sqrt_arch(x: f64) -> f64 {
    // SAFETY: SSE2 is baseline on x86-64.
    unsafe { sqrt_sse2(x) }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
fn sqrt_arch(x: f64) -> f64 {
    sqrt_generic(x)
}

#[inline]
pub fn sqrt(x: f64) -> f64 {
    if x == 0.0 {
        return x; // ±0
    }
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x.is_infinite() {
        return f64::INFINITY;
    }
    sqrt_arch(x)
}
