//! [`Command`] for removing a [`Listing`] from a watchlist.

use common::operations::Pull;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, user},
    infra::{store, Store},
    Service,
};
#[cfg(doc)]
use crate::domain::Listing;

use super::Command;

/// [`Command`] for removing a [`Listing`] from a [`User`]'s watchlist.
///
/// Idempotent, and intentionally skips the existence check: a [`Listing`]
/// gone from the catalog must still be removable from watchlists.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct UnsaveListing {
    /// ID of the [`Listing`] to remove.
    pub listing_id: listing::Id,

    /// ID of the [`User`] removing it.
    ///
    /// [`User`]: crate::domain::User
    pub actor: user::Id,
}

impl<Db, Pg> Command<UnsaveListing> for Service<Db, Pg>
where
    Db: Store<Pull<user::SavedListing>, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UnsaveListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UnsaveListing { listing_id, actor } = cmd;

        self.store()
            .execute(Pull(user::SavedListing { user_id: actor, listing_id }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UnsaveListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
