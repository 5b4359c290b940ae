//! [`Command`] for submitting a new [`Offer`] on a [`Listing`].

use common::{
    operations::{By, Increment, Insert, Push, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, offer, user, Listing, Offer},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for submitting a new [`Offer`] on a [`Listing`].
///
/// The [`Offer`] is addressed to the [`Listing`]'s owner, and its price is
/// resolved from the [`Listing`]'s [`PriceTable`] at this point, never
/// trusted from the caller.
///
/// [`PriceTable`]: listing::PriceTable
#[derive(Clone, Debug)]
pub struct SubmitOffer {
    /// ID of the [`Listing`] the [`Offer`] is about.
    pub listing_id: listing::Id,

    /// [`Identity`] of the sender.
    ///
    /// [`Identity`]: user::Identity
    pub sender: user::Identity,

    /// [`Mode`] of the [`Offer`] being submitted.
    pub mode: Mode,
}

/// Mode of a [`SubmitOffer`] [`Command`]: what is offered and at which entry
/// of the [`Listing`]'s [`PriceTable`].
///
/// [`PriceTable`]: listing::PriceTable
#[derive(Clone, Copy, Debug)]
pub enum Mode {
    /// Rental [`Offer`] over the [`Window`] at the rental price.
    ///
    /// [`Window`]: offer::Window
    Rental {
        /// Desired rental period.
        window: offer::Window,
    },

    /// Purchase [`Offer`], optionally at the alternate purchase price.
    Purchase {
        /// Whether to charge the alternate [`PriceTable`] entry.
        ///
        /// [`PriceTable`]: listing::PriceTable
        alternate_price: bool,
    },
}

impl<Db, Pg> Command<SubmitOffer> for Service<Db, Pg>
where
    Db: Store<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<store::Error>,
        > + Store<Insert<Offer>, Ok = (), Err = Traced<store::Error>>
        + Store<Push<user::OfferedListing>, Ok = (), Err = Traced<store::Error>>
        + Store<
            Increment<listing::OfferCount>,
            Ok = (),
            Err = Traced<store::Error>,
        >,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitOffer { listing_id, sender, mode } = cmd;

        if !sender.email_verified {
            return Err(tracerr::new!(E::EmailNotVerified));
        }

        let listing = self
            .store()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;
        if listing.owner_id == sender.user_id {
            return Err(tracerr::new!(E::OwnListing(listing_id)));
        }

        let (price, kind) = match mode {
            Mode::Rental { window } => {
                (listing.prices.rental(), offer::Kind::Rental { window })
            }
            Mode::Purchase { alternate_price } => (
                listing.prices.purchase(alternate_price),
                offer::Kind::Purchase,
            ),
        };

        let offer = Offer {
            id: offer::Id::new(),
            listing_id: listing.id,
            sender: sender.user_id.clone(),
            receiver: Some(listing.owner_id),
            price,
            kind,
            status: offer::Status::Pending,
            revision: offer::Revision::INITIAL,
            item: listing.name,
            image: listing.image,
            created_at: DateTime::now().coerce(),
        };
        self.store()
            .execute(Insert(offer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.store()
            .execute(Push(user::OfferedListing {
                user_id: sender.user_id,
                offer_id: offer.id,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.store()
            .execute(Increment(listing::OfferCount(listing.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tracing::debug!(offer = %offer.id, listing = %listing.id, "submitted");

        Ok(offer)
    }
}

/// Error of [`SubmitOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Sender's email is not verified by the identity provider.
    #[display("sender's email is not verified")]
    EmailNotVerified,

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Sender owns the [`Listing`] themselves.
    #[display("cannot make an offer on own `Listing(id: {_0})`")]
    OwnListing(#[error(not(source))] listing::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    #[from]
    Store(store::Error),
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use common::operations::{By, Insert, Select};

    use crate::{
        domain::{offer, user, Listing, User},
        infra::{Memory, Store as _},
        testing,
        Command as _,
    };

    use super::{ExecutionError, Mode, SubmitOffer};

    #[tokio::test]
    async fn resolves_rental_price_from_listing() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let listing = testing::listing("bob", &[10, 23]);
        store.execute(Insert(listing.clone())).await.unwrap();

        let offer = service
            .execute(SubmitOffer {
                listing_id: listing.id,
                sender: testing::identity("alice"),
                mode: Mode::Rental { window: testing::window(100, 200) },
            })
            .await
            .unwrap();

        assert_eq!(offer.price, testing::usd(10));
        assert_eq!(offer.rental_window(), Some(testing::window(100, 200)));
        assert_eq!(offer.status, offer::Status::Pending);
        assert_eq!(offer.revision, offer::Revision::INITIAL);
        assert_eq!(offer.receiver, Some("bob".into()));
    }

    #[tokio::test]
    async fn denormalizes_listing_name_and_image() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let listing = testing::listing("bob", &[10]);
        store.execute(Insert(listing.clone())).await.unwrap();

        let offer = service
            .execute(SubmitOffer {
                listing_id: listing.id,
                sender: testing::identity("alice"),
                mode: Mode::Purchase { alternate_price: false },
            })
            .await
            .unwrap();

        assert_eq!(offer.item, listing.name);
        assert_eq!(offer.image, listing.image);
    }

    #[tokio::test]
    async fn tracks_sender_and_listing_counters() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let sender = testing::user("alice");
        let listing = testing::listing("bob", &[10]);
        store.execute(Insert(sender)).await.unwrap();
        store.execute(Insert(listing.clone())).await.unwrap();

        let offer = service
            .execute(SubmitOffer {
                listing_id: listing.id,
                sender: testing::identity("alice"),
                mode: Mode::Purchase { alternate_price: false },
            })
            .await
            .unwrap();

        let sender: Option<User> = store
            .execute(Select(By::<Option<User>, _>::new(user::Id::from(
                "alice",
            ))))
            .await
            .unwrap();
        assert_eq!(sender.unwrap().offered_listings, vec![offer.id]);

        let listing: Option<Listing> = store
            .execute(Select(By::<Option<Listing>, _>::new(listing.id)))
            .await
            .unwrap();
        assert_eq!(listing.unwrap().offer_count, 1);
    }

    #[tokio::test]
    async fn rejects_unverified_sender() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let listing = testing::listing("bob", &[10]);
        store.execute(Insert(listing.clone())).await.unwrap();

        let mut sender = testing::identity("alice");
        sender.email_verified = false;
        let err = service
            .execute(SubmitOffer {
                listing_id: listing.id,
                sender,
                mode: Mode::Purchase { alternate_price: false },
            })
            .await
            .unwrap_err()
            .split()
            .0;

        assert!(matches!(err, ExecutionError::EmailNotVerified));
    }

    #[tokio::test]
    async fn rejects_offer_on_own_listing() {
        let store = Memory::new();
        let service = testing::service(store.clone());
        let listing = testing::listing("bob", &[10]);
        store.execute(Insert(listing.clone())).await.unwrap();

        let err = service
            .execute(SubmitOffer {
                listing_id: listing.id,
                sender: testing::identity("bob"),
                mode: Mode::Purchase { alternate_price: false },
            })
            .await
            .unwrap_err()
            .split()
            .0;

        assert!(matches!(err, ExecutionError::OwnListing(_)));
    }

    #[tokio::test]
    async fn rejects_missing_listing() {
        let service = testing::service(Memory::new());

        let err = service
            .execute(SubmitOffer {
                listing_id: crate::domain::listing::Id::new(),
                sender: testing::identity("alice"),
                mode: Mode::Purchase { alternate_price: false },
            })
            .await
            .unwrap_err()
            .split()
            .0;

        assert!(matches!(err, ExecutionError::ListingNotExists(_)));
    }
}
