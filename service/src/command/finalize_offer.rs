//! [`Command`] for finalizing an accepted [`Offer`].

use common::operations::{By, Patch, Push, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, offer, user, Listing, Offer},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for finalizing an accepted [`Offer`] after its payment has
/// settled on the client side.
///
/// A rental [`Offer`] additionally reserves its [`Window`] on the
/// [`Listing`], unless another finalization claimed an overlapping range
/// first. A purchase [`Offer`] leaves the [`Listing`] untouched.
///
/// [`Window`]: offer::Window
#[derive(Clone, Debug)]
pub struct FinalizeOffer {
    /// ID of the [`Offer`] to finalize.
    pub offer_id: offer::Id,

    /// ID of the finalizing [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub actor: user::Id,
}

impl<Db, Pg> Command<FinalizeOffer> for Service<Db, Pg>
where
    Db: Store<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<store::Error>,
        > + Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<Push<listing::Reserve>, Ok = (), Err = Traced<store::Error>>
        + Store<
            Patch<offer::PatchBy>,
            Ok = Option<Offer>,
            Err = Traced<store::Error>,
        >,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: FinalizeOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let FinalizeOffer { offer_id, actor } = cmd;

        let offer = self
            .store()
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;
        if offer.sender != actor {
            return Err(tracerr::new!(E::NotSender(offer_id)));
        }

        let status =
            offer.status.finalize().map_err(tracerr::from_and_wrap!(=> E))?;

        if let Some(window) = offer.rental_window() {
            let listing = self
                .store()
                .execute(Select(By::<Option<Listing>, _>::new(
                    offer.listing_id,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::ListingNotExists(offer.listing_id))
                .map_err(tracerr::wrap!())?;
            if listing.availability.overlaps(&window) {
                return Err(tracerr::new!(E::WindowUnavailable(
                    offer.listing_id
                )));
            }

            self.store()
                .execute(Push(listing::Reserve { id: listing.id, window }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        let patched = self
            .store()
            .execute(Patch(offer::PatchBy {
                id: offer.id,
                expected: offer.revision,
                fields: offer::Fields {
                    status: Some(status),
                    receiver: None,
                },
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;

        tracing::debug!(offer = %patched.id, "finalized");

        Ok(patched)
    }
}

/// Error of [`FinalizeOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Offer`] is not in a [`Status`] allowing finalization.
    ///
    /// [`Status`]: offer::Status
    #[display("{_0}")]
    #[from]
    InvalidTransition(offer::TransitionError),

    /// [`Listing`] of the [`Offer`] does not exist anymore.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`User`] finalizing the [`Offer`] is not its sender.
    ///
    /// [`User`]: crate::domain::User
    #[display("`Offer(id: {_0})` was sent by another `User`")]
    NotSender(#[error(not(source))] offer::Id),

    /// [`Offer`] with the provided ID does not exist.
    #[display("`Offer(id: {_0})` does not exist")]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),

    /// Rental [`Window`] of the [`Offer`] overlaps an already reserved range.
    ///
    /// [`Window`]: offer::Window
    #[display("rental window on `Listing(id: {_0})` is already reserved")]
    WindowUnavailable(#[error(not(source))] listing::Id),
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use common::operations::{By, Insert, Select};

    use crate::{
        domain::{offer, Listing},
        infra::{Memory, Store as _},
        testing,
        Command as _,
    };

    use super::{ExecutionError, FinalizeOffer};

    #[tokio::test]
    async fn rental_finalization_reserves_window() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let listing = testing::listing("bob", &[10]);
        let mut offer = testing::rental_offer("alice", "bob", 100, 200);
        offer.listing_id = listing.id;
        offer.status = offer::Status::Accepted;
        store.execute(Insert(listing.clone())).await.unwrap();
        store.execute(Insert(offer.clone())).await.unwrap();

        let finalized = service
            .execute(FinalizeOffer {
                offer_id: offer.id,
                actor: "alice".into(),
            })
            .await
            .unwrap();
        assert!(finalized.status.is_finalized());

        let stored: Option<Listing> = store
            .execute(Select(By::<Option<Listing>, _>::new(listing.id)))
            .await
            .unwrap();
        let availability = stored.unwrap().availability;
        assert_eq!(availability.starts(), &[testing::window(100, 200).start()]);
        assert_eq!(availability.ends(), &[testing::window(100, 200).end()]);
    }

    #[tokio::test]
    async fn overlapping_window_loses_the_race() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let listing = testing::listing("bob", &[10]);
        let mut first = testing::rental_offer("alice", "bob", 100, 200);
        first.listing_id = listing.id;
        first.status = offer::Status::Accepted;
        let mut second = testing::rental_offer("carol", "bob", 150, 250);
        second.listing_id = listing.id;
        second.status = offer::Status::Accepted;
        store.execute(Insert(listing)).await.unwrap();
        store.execute(Insert(first.clone())).await.unwrap();
        store.execute(Insert(second.clone())).await.unwrap();

        drop(
            service
                .execute(FinalizeOffer {
                    offer_id: first.id,
                    actor: "alice".into(),
                })
                .await
                .unwrap(),
        );

        let err = service
            .execute(FinalizeOffer {
                offer_id: second.id,
                actor: "carol".into(),
            })
            .await
            .unwrap_err()
            .split()
            .0;
        assert!(matches!(err, ExecutionError::WindowUnavailable(_)));

        // The loser stays accepted: not finalized, not corrupted.
        let stored = store
            .execute(Select(By::<Option<crate::domain::Offer>, _>::new(
                second.id,
            )))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.status.is_accepted());
    }

    #[tokio::test]
    async fn purchase_finalization_skips_listing() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let listing = testing::listing("bob", &[10]);
        let mut offer = testing::offer("alice", "bob");
        offer.listing_id = listing.id;
        offer.status = offer::Status::Accepted;
        store.execute(Insert(listing.clone())).await.unwrap();
        store.execute(Insert(offer.clone())).await.unwrap();

        let finalized = service
            .execute(FinalizeOffer {
                offer_id: offer.id,
                actor: "alice".into(),
            })
            .await
            .unwrap();
        assert!(finalized.status.is_finalized());

        let stored: Option<Listing> = store
            .execute(Select(By::<Option<Listing>, _>::new(listing.id)))
            .await
            .unwrap();
        assert!(stored.unwrap().availability.starts().is_empty());
    }

    #[tokio::test]
    async fn only_sender_may_finalize() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let mut offer = testing::offer("alice", "bob");
        offer.status = offer::Status::Accepted;
        store.execute(Insert(offer.clone())).await.unwrap();

        let err = service
            .execute(FinalizeOffer {
                offer_id: offer.id,
                actor: "bob".into(),
            })
            .await
            .unwrap_err()
            .split()
            .0;

        assert!(matches!(err, ExecutionError::NotSender(_)));
    }

    #[tokio::test]
    async fn pending_offer_cannot_finalize() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let offer = testing::offer("alice", "bob");
        store.execute(Insert(offer.clone())).await.unwrap();

        let err = service
            .execute(FinalizeOffer {
                offer_id: offer.id,
                actor: "alice".into(),
            })
            .await
            .unwrap_err()
            .split()
            .0;

        assert!(matches!(err, ExecutionError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn missing_offer_is_reported() {
        let service = testing::service(Memory::new());

        let err = service
            .execute(FinalizeOffer {
                offer_id: offer::Id::new(),
                actor: "alice".into(),
            })
            .await
            .unwrap_err()
            .split()
            .0;

        assert!(matches!(err, ExecutionError::OfferNotExists(_)));
    }
}
