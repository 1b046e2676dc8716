//! Request signing for Parcel

pub mod signer;

pub use signer::{Credentials, SignedRequest, SignerV4};
