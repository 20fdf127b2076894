//! Various utility types and functions.

pub mod buf;
#[cfg(feature = "std")]
pub mod pnm;
pub mod rect;
