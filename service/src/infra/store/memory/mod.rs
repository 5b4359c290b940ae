//! In-memory [`Store`] implementation.
//!
//! Backs tests and offline development: documents live in process-local
//! collections, change notifications fan out to [`Watch`] subscribers, and
//! [`Offer`] merge-patches are revision-checked the way the redesigned
//! production adapter is expected to behave.
//!
//! [`Watch`]: common::operations::Watch

mod impls;

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::{listing, offer, user, Listing, Offer, User};
#[cfg(doc)]
use crate::infra::Store;

/// In-memory [`Store`].
///
/// Cheap to clone; every clone shares the same collections, so one handle
/// can seed documents while another executes commands against them.
#[derive(Clone, Debug)]
pub struct Memory {
    /// Shared state of this [`Memory`] store.
    inner: Arc<Inner>,
}

/// Inner state of a [`Memory`] store.
#[derive(Debug)]
struct Inner {
    /// `offers` collection.
    offers: RwLock<HashMap<offer::Id, Offer>>,

    /// `listings` collection.
    listings: RwLock<HashMap<listing::Id, Listing>>,

    /// `users` collection.
    users: RwLock<HashMap<user::Id, User>>,

    /// Change notifications of the `offers` collection.
    ///
    /// Carries no payload: subscribers re-read their snapshot on every tick,
    /// so a lagged receiver only coalesces updates instead of losing them.
    offers_changed: broadcast::Sender<()>,
}

impl Memory {
    /// Creates a new empty [`Memory`] store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                offers: RwLock::new(HashMap::new()),
                listings: RwLock::new(HashMap::new()),
                users: RwLock::new(HashMap::new()),
                offers_changed: broadcast::channel(16).0,
            }),
        }
    }

    /// Acquires the `offers` collection for reading.
    fn offers(&self) -> RwLockReadGuard<'_, HashMap<offer::Id, Offer>> {
        self.inner.offers.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires the `offers` collection for writing.
    fn offers_mut(&self) -> RwLockWriteGuard<'_, HashMap<offer::Id, Offer>> {
        self.inner.offers.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires the `listings` collection for reading.
    fn listings(&self) -> RwLockReadGuard<'_, HashMap<listing::Id, Listing>> {
        self.inner
            .listings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires the `listings` collection for writing.
    fn listings_mut(
        &self,
    ) -> RwLockWriteGuard<'_, HashMap<listing::Id, Listing>> {
        self.inner
            .listings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires the `users` collection for reading.
    fn users(&self) -> RwLockReadGuard<'_, HashMap<user::Id, User>> {
        self.inner.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires the `users` collection for writing.
    fn users_mut(&self) -> RwLockWriteGuard<'_, HashMap<user::Id, User>> {
        self.inner.users.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Notifies [`Watch`] subscribers about an `offers` collection change.
    ///
    /// [`Watch`]: common::operations::Watch
    fn notify_offers(&self) {
        // No subscribers is fine.
        _ = self.inner.offers_changed.send(());
    }

    /// Takes the current snapshot of [`Offer`]s matching the given `filter`,
    /// ordered by creation instant (ties broken by ID for determinism).
    fn offers_snapshot<F: Filter>(&self, filter: &F) -> Vec<Offer> {
        let mut offers: Vec<_> = self
            .offers()
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        offers.sort_unstable_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| Uuid::from(a.id).cmp(&Uuid::from(b.id)))
        });
        offers
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality-predicate filter of the `offers` collection, as the live query
/// subscriptions of the external store support it.
trait Filter {
    /// Checks whether the given [`Offer`] matches this [`Filter`].
    fn matches(&self, offer: &Offer) -> bool;
}
