//! [`Command`] definition.

pub mod create_payment_intent;
pub mod finalize_offer;
pub mod respond_to_offer;
pub mod save_listing;
pub mod submit_offer;
pub mod unsave_listing;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_payment_intent::CreatePaymentIntent,
    finalize_offer::FinalizeOffer,
    respond_to_offer::{Decision, RespondToOffer},
    save_listing::SaveListing,
    submit_offer::SubmitOffer,
    unsave_listing::UnsaveListing,
};
