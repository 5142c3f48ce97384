//! Fused multiply-add.
//!
//! When the build carries hardware FMA (aarch64 baseline, or x86 compiled
//! with the `fma` target feature) the arch intrinsic is used. The software
//! kernel splits both factors at the 26-bit boundary and accumulates the
//! four partial products into a double-double, most significant term first,
//! so the value is rounded once when the pair collapses back to f64.
//!
//! Results that need more than the ~106 bits the accumulator holds to
//! decide the final rounding can be double-rounded, and products that
//! overflow or vanish inside the expansion are resolved in naive
//! arithmetic. Both relaxations are inherited from the reference algorithm
//! and recorded in DESIGN.md.

use super::wide::{split, Wide, SPLIT};

#[cfg(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64"))]
const HAS_FMA: bool = !cfg!(feature = "soft-fma")
    && (cfg!(target_arch = "aarch64") || cfg!(target_feature = "fma"));

#[inline(always)]
pub fn fma(x: f64, y: f64, z: f64) -> f64 {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64"))]
    {
        if HAS_FMA {
            // SAFETY: HAS_FMA holds only when fused multiply-add is a
            // compile-time target feature.
            return unsafe { super::arch::fma_hw(x, y, z) };
        }
    }
    fma_soft(x, y, z)
}

pub(crate) fn fma_soft(x: f64, y: f64, z: f64) -> f64 {
    if !x.is_finite() || !y.is_finite() {
        return x * y + z;
    }
    if !z.is_finite() {
        return z; // NaN propagates, a lone infinite addend dominates
    }
    let p = x * y;
    if !p.is_finite() || p == 0.0 {
        // overflow, or a zero product where only sign arithmetic matters
        return p + z;
    }
    let lim = f64::MAX / SPLIT;
    if x.abs() > lim || y.abs() > lim {
        // the factors cannot be split without overflowing
        return p + z;
    }

    let (xh, xl) = split(x);
    let (yh, yl) = split(y);

    // Accumulate in significance order so each renormalization keeps the
    // bits the splitting preserved.
    let mut acc = Wide::from(z);
    acc = acc + xh * yh;
    acc = acc + (xh * yl + xl * yh);
    acc = acc + xl * yl;
    acc.to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_path_fuses_the_product() {
        // (1 + 2^-27)(1 - 2^-27) = 1 - 2^-54: naive arithmetic rounds the
        // product to 1 and cancels to zero; the fused result keeps the tail.
        let x = 1.0 + 2.0f64.powi(-27);
        let y = 1.0 - 2.0f64.powi(-27);
        let fused = fma_soft(x, y, -1.0);
        assert_eq!(fused, -(2.0f64.powi(-54)));
        assert_ne!(fused, x * y + -1.0);
    }

    #[test]
    fn soft_path_handles_zero_signs() {
        assert_eq!(fma_soft(0.0, 5.0, -0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(fma_soft(-0.0, 5.0, -0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(fma_soft(-0.0, 0.0, -0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(fma_soft(0.0, 0.0, -0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn soft_path_specials() {
        assert!(fma_soft(f64::NAN, 1.0, 1.0).is_nan());
        assert!(fma_soft(1.0, 1.0, f64::NAN).is_nan());
        assert!(fma_soft(f64::INFINITY, 0.0, 1.0).is_nan());
        assert_eq!(fma_soft(f64::INFINITY, 2.0, -3.0), f64::INFINITY);
        assert_eq!(fma_soft(1.0, 2.0, f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert!(fma_soft(f64::INFINITY, 1.0, f64::NEG_INFINITY).is_nan());
        // product overflows to infinity, finite addend cannot rescue it
        assert_eq!(fma_soft(1e200, 1e200, -1e300), f64::INFINITY);
    }
}
