//! [`User`] definitions.

pub mod session;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::{Listing, Offer};
use crate::{
    domain::{listing, offer},
    infra::payments,
};

pub use self::session::Identity;

/// Marketplace user, in the subset relevant to [`Offer`]s.
///
/// The identity itself (credentials, email verification) is owned by the
/// external identity provider; this document only carries what the offer
/// lifecycle reads and mutates.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
    /// ID of this [`User`], as issued by the identity provider.
    pub id: Id,

    /// Whether the identity provider has verified this [`User`]'s email.
    pub email_verified: bool,

    /// IDs of the [`Offer`]s this [`User`] has sent. Append-only.
    pub offered_listings: Vec<offer::Id>,

    /// IDs of the [`Listing`]s this [`User`] has saved for later.
    pub saved_listings: Vec<listing::Id>,

    /// ID of this [`User`] at the payment processor, if they ever paid.
    pub customer_id: Option<payments::CustomerId>,

    /// Connected account of this [`User`] at the payment processor, if they
    /// ever received payouts.
    pub payment_account: Option<payments::AccountId>,

    /// [`DateTime`] when this [`User`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`User`].
///
/// Opaque identifier issued by the external identity provider (not
/// necessarily a UUID).
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(String, &str)]
pub struct Id(String);

/// Append of a sent [`Offer`]'s ID onto a [`User`]'s `offered_listings`.
#[derive(Clone, Debug)]
pub struct OfferedListing {
    /// ID of the [`User`] to update.
    pub user_id: Id,

    /// ID of the sent [`Offer`].
    pub offer_id: offer::Id,
}

/// Membership of a [`Listing`]'s ID in a [`User`]'s `saved_listings`.
///
/// [`Push`]ed to save, [`Pull`]ed to unsave.
///
/// [`Pull`]: common::operations::Pull
/// [`Push`]: common::operations::Push
#[derive(Clone, Debug)]
pub struct SavedListing {
    /// ID of the [`User`] to update.
    pub user_id: Id,

    /// ID of the saved [`Listing`].
    pub listing_id: listing::Id,
}

/// [`DateTime`] when a [`User`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;
