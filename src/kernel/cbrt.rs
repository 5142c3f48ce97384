//! Cube root.
//!
//! musl-lineage algorithm: seed by dividing the biased-exponent field by 3
//! and adding a magic offset, sharpen with a degree-4 polynomial in t^3/x,
//! round the estimate so its square is exact, and finish with one Halley
//! step carried out on exact intermediates. Max error below 0.667 ulp, and
//! exact cubes of representable roots come back exact.

const B1: u32 = 715_094_163; // (1023 - 1023/3 - 0.03306235651) * 2^20
const B2: u32 = 696_219_795; // B1 - (54/3) * 2^20, for inputs prescaled by 2^54

const P0: f64 = 1.87595182427177009643;
const P1: f64 = -1.88497979543377169875;
const P2: f64 = 1.621429720105354466140;
const P3: f64 = -0.758397934778766047437;
const P4: f64 = 0.145996192886612446982;

pub fn cbrt(x: f64) -> f64 {
    let u = x.to_bits();
    let mut hx = (u >> 32) as u32 & 0x7fff_ffff;
    if hx >= 0x7ff0_0000 {
        // cbrt(NaN) = NaN, cbrt(±Inf) = ±Inf
        return x + x;
    }

    // Seed within about 5 bits of the root. Subnormals go through a 2^54
    // prescale and the companion offset.
    let mut ui: u64;
    if hx < 0x0010_0000 {
        let scaled = x * f64::from_bits(0x4350_0000_0000_0000);
        ui = scaled.to_bits();
        hx = (ui >> 32) as u32 & 0x7fff_ffff;
        if hx == 0 {
            return x; // ±0
        }
        hx = hx / 3 + B2;
    } else {
        ui = u;
        hx = hx / 3 + B1;
    }
    ui &= 1 << 63;
    ui |= (hx as u64) << 32;
    let mut t = f64::from_bits(ui);

    // Sharpen to about 23 bits with r = t^3/x.
    let r = (t * t) * (t / x);
    t *= (P0 + r * (P1 + r * P2)) + ((r * r) * r) * (P3 + r * P4);

    // Round t to about 23 bits so that t*t below is exact.
    ui = t.to_bits();
    ui = (ui + 0x8000_0000) & 0xffff_ffff_c000_0000;
    t = f64::from_bits(ui);

    // One Halley step: s and q - t are exact, so the correction carries the
    // full working precision.
    let s = t * t;
    let mut q = x / s;
    let w = t + t;
    q = (q - t) / (w + q);
    t + t * q
}
