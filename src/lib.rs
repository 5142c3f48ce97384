#![no_std]

#[cfg(test)]
extern crate std;

pub mod kernel;

pub use kernel::{asin, cbrt, cbrt_wide, fma, sqrt, Wide};
