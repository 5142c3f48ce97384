//! Extended-precision cube root over the double-double type.
//!
//! Reduction mirrors the double kernel: strip the binary exponent mod 3,
//! take the root of the mantissa part, and reapply the power-of-two scale.
//! The double kernel supplies the seed (it already carries ~53 good bits),
//! and one Halley step in Wide arithmetic, with the square made exact by the
//! error-free product, pushes the error far below one ulp of the 106-bit
//! format.

use super::wide::Wide;
use super::{cbrt, exp_field};

pub fn cbrt_wide(x: Wide) -> Wide {
    let eb = exp_field(x.hi.to_bits());
    if eb == 0x7ff {
        // NaN and ±Inf propagate through the head; the error-free sums
        // inside Wide addition would turn Inf - Inf into NaN, so this stays
        // in plain f64
        return Wide::from(x.hi + x.hi);
    }
    if x.hi == 0.0 {
        // ±0 (a renormalized pair cannot hide a tail under a zero head)
        return x;
    }

    let neg = x.hi.is_sign_negative();
    let mut ax = x.abs();

    // ax = m * 2^(3q + k), m in [1, 2), k in {0, 1, 2}. Subnormal heads are
    // scaled up by 2^120 first so the exponent field is meaningful; the
    // prescale is folded back into the reduction shift.
    let mut ea = eb - 1023;
    let mut prescale = 0;
    if eb == 0 {
        ax = ax.scale_pow2(120);
        prescale = 120;
        ea = exp_field(ax.hi.to_bits()) - 1023 - 120;
    }
    let q = ea.div_euclid(3);

    // xr in [1, 8): the k leftover exponent bits stay with the mantissa.
    let xr = ax.scale_pow2(-(3 * q + prescale));

    // Double-precision stage.
    let t = cbrt(xr.hi);

    // Halley step in Wide arithmetic; s = t^2 is exact.
    let s = Wide::prod(t, t);
    let r = xr / s;
    let r = (r - t) / (r + (t + t));
    let y = (r * t + t).scale_pow2(q);

    if neg {
        -y
    } else {
        y
    }
}
