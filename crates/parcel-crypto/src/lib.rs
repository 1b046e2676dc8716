//! Hashing primitives for request signing

pub mod hash;

pub use hash::*;
