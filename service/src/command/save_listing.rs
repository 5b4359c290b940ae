//! [`Command`] for saving a [`Listing`] for later.

use common::operations::{By, Push, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, user, Listing},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for saving a [`Listing`] into a [`User`]'s watchlist.
///
/// Idempotent: saving an already saved [`Listing`] changes nothing.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct SaveListing {
    /// ID of the [`Listing`] to save.
    pub listing_id: listing::Id,

    /// ID of the saving [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub actor: user::Id,
}

impl<Db, Pg> Command<SaveListing> for Service<Db, Pg>
where
    Db: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<Push<user::SavedListing>, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SaveListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SaveListing { listing_id, actor } = cmd;

        self.store()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.store()
            .execute(Push(user::SavedListing { user_id: actor, listing_id }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SaveListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}
