//! Per-collection [`Store`] implementations of the [`Memory`] store.
//!
//! [`Memory`]: super::Memory
//! [`Store`]: crate::infra::Store

mod listing;
mod offer;
mod user;
