//! Core types for Parcel

mod acl;
mod headers;
mod object;

pub use acl::*;
pub use headers::*;
pub use object::*;
