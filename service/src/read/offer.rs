//! [`Offer`] read model definitions.

use crate::domain::{user, Offer};

/// Selector of the active received [`Offer`]s of a [`User`]: addressed to
/// them and not yet finalized.
///
/// Rejected [`Offer`]s drop out of this set on their own, since rejection
/// clears the receiver.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct ReceivedBy(pub user::Id);

/// Selector of all the [`Offer`]s a [`User`] has sent.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct SentBy(pub user::Id);

/// Subset of an [`Offer`]s snapshot accepted by their receivers.
///
/// Derived client-side over a [`SentBy`] snapshot.
#[derive(Clone, Debug)]
pub struct Accepted(pub Vec<Offer>);

impl From<Vec<Offer>> for Accepted {
    fn from(offers: Vec<Offer>) -> Self {
        Self(
            offers
                .into_iter()
                .filter(|o| o.status.is_accepted())
                .collect(),
        )
    }
}

/// Subset of an [`Offer`]s snapshot still in flight (not finalized).
#[derive(Clone, Debug)]
pub struct Active(pub Vec<Offer>);

impl From<Vec<Offer>> for Active {
    fn from(offers: Vec<Offer>) -> Self {
        Self(
            offers
                .into_iter()
                .filter(|o| !o.status.is_finalized())
                .collect(),
        )
    }
}

/// Subset of an [`Offer`]s snapshot already finalized: the transaction
/// history an archive screen shows.
#[derive(Clone, Debug)]
pub struct Archived(pub Vec<Offer>);

impl From<Vec<Offer>> for Archived {
    fn from(offers: Vec<Offer>) -> Self {
        Self(
            offers
                .into_iter()
                .filter(|o| o.status.is_finalized())
                .collect(),
        )
    }
}
