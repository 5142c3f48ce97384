//! Arcsine.
//!
//! fdlibm-style piecewise evaluation. On [0, 0.5) the odd series
//! asin(x) = x + x*R(x^2) uses a degree-5/4 rational minimax fit whose
//! relative error is below 2^-58.75. On [0.5, 1) the identity
//! asin(x) = pi/2 - 2*asin(sqrt((1-x)/2)) is evaluated with the square root
//! split at the 32-bit mantissa boundary, so the correction term stays exact
//! as the argument approaches 1.

use super::{hi_word, lo_word, sqrt, zero_low_word};

const PIO2_HI: f64 = f64::from_bits(0x3ff9_21fb_5444_2d18);
const PIO2_LO: f64 = f64::from_bits(0x3c91_a626_3314_5c07);

// R(z) = P(z)/Q(z), minimax for (asin(s) - s) / s^3 on [0, 0.25].
const P_S0: f64 = f64::from_bits(0x3fc5_5555_5555_5555); // 1.66666666666666657415e-01
const P_S1: f64 = f64::from_bits(0xbfd4_d612_03eb_6f7d); // -3.25565818622400915405e-01
const P_S2: f64 = f64::from_bits(0x3fc9_c155_0e88_4455); // 2.01212532134862925881e-01
const P_S3: f64 = f64::from_bits(0xbfa4_8228_b568_8f3b); // -4.00555345006794114027e-02
const P_S4: f64 = f64::from_bits(0x3f49_efe0_7501_b288); // 7.91534994289814532176e-04
const P_S5: f64 = f64::from_bits(0x3f02_3de1_0dfd_f709); // 3.47933107596021167570e-05
const Q_S1: f64 = f64::from_bits(0xc003_3a27_1c8a_2d4b); // -2.40339491173441421878e+00
const Q_S2: f64 = f64::from_bits(0x4000_2ae5_9c59_8ac8); // 2.02094576023350569471e+00
const Q_S3: f64 = f64::from_bits(0xbfe6_066c_1b8d_0159); // -6.88283971605453293030e-01
const Q_S4: f64 = f64::from_bits(0x3fb3_b8c5_b12e_9282); // 7.70381505559019352791e-02

#[inline]
fn rational(z: f64) -> f64 {
    let p = z * (P_S0 + z * (P_S1 + z * (P_S2 + z * (P_S3 + z * (P_S4 + z * P_S5)))));
    let q = 1.0 + z * (Q_S1 + z * (Q_S2 + z * (Q_S3 + z * Q_S4)));
    p / q
}

#[allow(clippy::eq_op)]
pub fn asin(x: f64) -> f64 {
    let hx = hi_word(x);
    let ix = hx & 0x7fff_ffff;
    if ix >= 0x3ff0_0000 {
        // |x| >= 1 or NaN
        if ((ix - 0x3ff0_0000) | lo_word(x)) == 0 {
            // asin(±1) = ±pi/2, inexact
            return x * PIO2_HI + f64::from_bits(0x3870_0000_0000_0000);
        }
        // domain error: quiet NaN, raises invalid; NaN inputs land here too
        return 0.0 / (x - x);
    }
    if ix < 0x3fe0_0000 {
        // |x| < 0.5
        if ix < 0x3e50_0000 {
            // |x| < 2^-26: asin(x) = x to full precision
            return x;
        }
        return x + x * rational(x * x);
    }

    // 0.5 <= |x| < 1
    let z = (1.0 - x.abs()) * 0.5;
    let s = sqrt(z);
    let r = rational(z);
    let v = if ix >= 0x3fef_3333 {
        // |x| > 0.975
        PIO2_HI - (2.0 * (s + s * r) - PIO2_LO)
    } else {
        let f = zero_low_word(s);
        let c = (z - f * f) / (s + f);
        0.5 * PIO2_HI - (2.0 * s * r - (PIO2_LO - 2.0 * c) - (0.5 * PIO2_HI - 2.0 * f))
    };
    if hx >> 31 != 0 {
        -v
    } else {
        v
    }
}
