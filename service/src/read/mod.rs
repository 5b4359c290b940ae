//! Read entities definitions.

pub mod offer;
