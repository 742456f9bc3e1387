//! # slim_num
//! Arbitrary-precision signed integers with value semantics.
//!
//! This crate provides:
//! - [`BigInt`]: a sign-magnitude integer of unbounded size supporting
//!   arithmetic, comparison, bitwise, and shift operators.
//!
//! Storage adapts to the magnitude: values up to 96 bits live inline with no
//! heap allocation, and larger magnitudes move to a heap buffer that clones
//! share copy-on-write. Copying is O(1) either way; the shared buffer is
//! duplicated only when one of its owners writes.
//!
//! # Example
//! ```
//! use slim_num::BigInt;
//!
//! let a: BigInt = "10000000000000".parse().unwrap();
//! let b: BigInt = "900000000000".parse().unwrap();
//! println!("a + b = {}", &a + &b);
//! println!("a - b = {}", &a - &b);
//! println!("a * b = {}", &a * &b);
//! println!("a / b = {}", &a / &b);
//! println!("a % b = {}", &a % &b);
//! println!("a << 10 = {}", &a << 10);
//! println!("a >> 10 = {}", &a >> 10);
//! ```

mod arith;
mod big_int;
mod bitwise;
mod limb_vec;
mod shared_buf;

pub use big_int::{BigInt, ParseBigIntError};
