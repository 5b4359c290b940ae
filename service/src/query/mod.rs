//! [`Query`] definition.

pub mod offer;
pub mod offers;

use common::operations::{By, Select, Watch};
use tracerr::Traced;

use crate::{
    infra::{store, Store},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Store`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct StoreQuery<T>(T);

impl<W, B> StoreQuery<By<W, B>> {
    /// Creates a new [`StoreQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, Pg, W, B> Query<StoreQuery<By<W, B>>> for Service<Db, Pg>
where
    Db: Store<Select<By<W, B>>, Ok = W, Err = Traced<store::Error>>,
{
    type Ok = W;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        StoreQuery(by): StoreQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.store()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] [`Watch`]ing live results of a `T`ype selection in a [`Store`].
///
/// Resolves into a [`store::Subscription`] the caller must keep for as long
/// as it wants snapshots, and drop to tear the listener down.
#[derive(Clone, Copy, Debug)]
pub struct WatchQuery<T>(T);

impl<W, B> WatchQuery<By<W, B>> {
    /// Creates a new [`WatchQuery`] watching a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, Pg, W, B> Query<WatchQuery<By<W, B>>> for Service<Db, Pg>
where
    Db: Store<
        Watch<By<W, B>>,
        Ok = store::Subscription<W>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = store::Subscription<W>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        WatchQuery(by): WatchQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.store()
            .execute(Watch(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
