//! [`User`]-related [`Store`] implementations.

use common::operations::{By, Insert, Pull, Push, Select};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::store::{self, Memory, Store},
};

impl Store<Insert<User>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(&self, Insert(user): Insert<User>) -> Result<(), Self::Err> {
        drop(self.users_mut().insert(user.id.clone(), user));
        Ok(())
    }
}

impl Store<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.users().get(&by.into_inner()).cloned())
    }
}

impl Store<Push<user::OfferedListing>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Push(offered): Push<user::OfferedListing>,
    ) -> Result<(), Self::Err> {
        if let Some(user) = self.users_mut().get_mut(&offered.user_id) {
            // Set semantics: appending twice keeps one membership.
            if !user.offered_listings.contains(&offered.offer_id) {
                user.offered_listings.push(offered.offer_id);
            }
        }
        Ok(())
    }
}

impl Store<Push<user::SavedListing>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Push(saved): Push<user::SavedListing>,
    ) -> Result<(), Self::Err> {
        if let Some(user) = self.users_mut().get_mut(&saved.user_id) {
            if !user.saved_listings.contains(&saved.listing_id) {
                user.saved_listings.push(saved.listing_id);
            }
        }
        Ok(())
    }
}

impl Store<Pull<user::SavedListing>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Pull(saved): Pull<user::SavedListing>,
    ) -> Result<(), Self::Err> {
        if let Some(user) = self.users_mut().get_mut(&saved.user_id) {
            user.saved_listings.retain(|id| *id != saved.listing_id);
        }
        Ok(())
    }
}
