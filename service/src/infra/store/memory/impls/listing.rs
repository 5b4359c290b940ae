//! [`Listing`]-related [`Store`] implementations.

use common::operations::{By, Increment, Insert, Push, Select};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::store::{self, Memory, Store},
};

impl Store<Insert<Listing>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<(), Self::Err> {
        drop(self.listings_mut().insert(listing.id, listing));
        Ok(())
    }
}

impl Store<Select<By<Option<Listing>, listing::Id>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.listings().get(&by.into_inner()).cloned())
    }
}

impl Store<Push<listing::Reserve>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Push(reserve): Push<listing::Reserve>,
    ) -> Result<(), Self::Err> {
        if let Some(listing) = self.listings_mut().get_mut(&reserve.id) {
            listing.availability.reserve(reserve.window);
        }
        Ok(())
    }
}

impl Store<Increment<listing::OfferCount>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Increment(count): Increment<listing::OfferCount>,
    ) -> Result<(), Self::Err> {
        let listing::OfferCount(id) = count;
        if let Some(listing) = self.listings_mut().get_mut(&id) {
            listing.offer_count += 1;
        }
        Ok(())
    }
}
