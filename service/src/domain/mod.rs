//! Domain definitions.

pub mod listing;
pub mod offer;
pub mod user;

pub use self::{listing::Listing, offer::Offer, user::User};
